//! # Attrz Architecture
//!
//! Attrz attaches named byte-string attributes to any existing file or directory
//! without touching the host filesystem's on-disk format. Attributes live out of
//! band, in a hidden sibling directory holding one regular file per attribute:
//!
//! ```text
//! /tmp/foo.txt
//! /tmp/.foo.txt_attr/
//! ├── owner      # content: "alice"
//! └── group      # content: "staff"
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs) + commands/                         │
//! │  - Parses arguments, renders CmdResult, owns exit codes     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Entry points (api.rs)                                      │
//! │  - i64 call-gate surface, scoped access context             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  AttributeStore (store.rs) + resolver.rs + names.rs         │
//! │  - Lazy directory creation, empty-directory cleanup         │
//! │  - Typed errors, no printing                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Filesystem service (fs/)                                   │
//! │  - FsService trait                                          │
//! │  - OsFs (production), MemFs (testing)                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `store.rs` inward, code never writes to stdout/stderr and never reaches
//! `std::fs` except through [`fs::FsService`]. Diagnostics go through `tracing`.
//!
//! ## Module Overview
//!
//! - [`store`]: The five attribute operations
//! - [`resolver`]: Target path to attribute directory mapping and validation
//! - [`names`]: Attribute name listings and their `:`-joined form
//! - [`fs`]: Filesystem service abstraction and implementations
//! - [`api`]: Integer-returning entry points
//! - [`context`]: Scoped access contexts for the entry points
//! - [`commands`]: CLI business logic
//! - [`config`]: Limits and creation modes
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod fs;
pub mod names;
pub mod resolver;
pub mod store;
