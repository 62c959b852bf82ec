//! # Entry Points
//!
//! The five attribute operations in their call-gate form: plain arguments in,
//! a single `i64` out. Non-negative values are results, negative values are the
//! negated errno codes of [`ErrorCode`].
//!
//! | Operation | Success value |
//! |---|---|
//! | [`AttrApi::set_attribute`] | `0` |
//! | [`AttrApi::get_attribute`] | bytes copied |
//! | [`AttrApi::list_attribute_names`] | logical length of the joined listing |
//! | [`AttrApi::remove_attribute`] | `0` |
//! | [`AttrApi::remove_all_attributes`] | `0` |
//!
//! A read into a buffer smaller than the stored value fills the whole buffer and
//! returns [`ErrorCode::Truncated`]; the caller knows exactly `capacity` bytes
//! were copied. A listing that does not fit is copied as far as it goes and still
//! returns its full length, so callers compare against `capacity` and retry.
//!
//! Every call runs inside a [`ContextGuard`](crate::context::ContextGuard) of the
//! configured [`AccessContext`], which is restored before the call returns.
//!
//! Rust callers that want typed errors should use [`AttributeStore`] directly.

use crate::context::{AccessContext, NoContext};
use crate::error::{AttrError, ErrorCode, Result};
use crate::fs::FsService;
use crate::store::AttributeStore;
use std::path::Path;
use tracing::debug;

pub struct AttrApi<F: FsService, C: AccessContext = NoContext> {
    store: AttributeStore<F>,
    ctx: C,
}

impl<F: FsService> AttrApi<F, NoContext> {
    pub fn new(store: AttributeStore<F>) -> Self {
        Self::with_context(store, NoContext)
    }
}

impl<F: FsService, C: AccessContext> AttrApi<F, C> {
    pub fn with_context(store: AttributeStore<F>, ctx: C) -> Self {
        Self { store, ctx }
    }

    pub fn store(&self) -> &AttributeStore<F> {
        &self.store
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Stores the first `size` bytes of `value` as attribute `name`.
    pub fn set_attribute(
        &self,
        target: impl AsRef<Path>,
        name: &str,
        value: &[u8],
        size: usize,
    ) -> i64 {
        self.call("set", |store| {
            let value = prefix(value, size, "value")?;
            store.set(target.as_ref(), name, value)?;
            Ok(0)
        })
    }

    /// Copies up to `capacity` bytes of attribute `name` into `buf`.
    pub fn get_attribute(
        &self,
        target: impl AsRef<Path>,
        name: &str,
        buf: &mut [u8],
        capacity: usize,
    ) -> i64 {
        self.call("get", |store| {
            let buf = prefix_mut(buf, capacity)?;
            let copied = store.get_into(target.as_ref(), name, buf)?.into_result()?;
            Ok(as_i64(copied))
        })
    }

    /// Copies the `:`-joined attribute names into `buf`, up to `capacity` bytes.
    pub fn list_attribute_names(
        &self,
        target: impl AsRef<Path>,
        buf: &mut [u8],
        capacity: usize,
    ) -> i64 {
        self.call("list", |store| {
            let buf = prefix_mut(buf, capacity)?;
            let logical = store.list_names_into(target.as_ref(), buf)?;
            Ok(as_i64(logical))
        })
    }

    pub fn remove_attribute(&self, target: impl AsRef<Path>, name: &str) -> i64 {
        self.call("remove", |store| {
            store.remove(target.as_ref(), name)?;
            Ok(0)
        })
    }

    pub fn remove_all_attributes(&self, target: impl AsRef<Path>) -> i64 {
        self.call("remove_all", |store| {
            store.remove_all(target.as_ref())?;
            Ok(0)
        })
    }

    fn call(&self, op: &'static str, f: impl FnOnce(&AttributeStore<F>) -> Result<i64>) -> i64 {
        let _guard = self.ctx.scoped();
        match f(&self.store) {
            Ok(value) => value,
            Err(e) => {
                let code = e.code();
                debug!(op, error = %e, code = code.as_i64(), "attribute call failed");
                code.as_i64()
            }
        }
    }
}

fn prefix<'a>(bytes: &'a [u8], size: usize, what: &str) -> Result<&'a [u8]> {
    bytes.get(..size).ok_or_else(|| {
        AttrError::invalid(format!(
            "{} size {} exceeds the {} bytes supplied",
            what,
            size,
            bytes.len()
        ))
    })
}

fn prefix_mut(buf: &mut [u8], capacity: usize) -> Result<&mut [u8]> {
    let len = buf.len();
    buf.get_mut(..capacity).ok_or_else(|| {
        AttrError::invalid(format!(
            "capacity {} exceeds the {} byte buffer",
            capacity, len
        ))
    })
}

fn as_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Splits an entry-point return value into a success value or its [`ErrorCode`].
///
/// Unknown negative values are reported as [`ErrorCode::Io`].
pub fn decode(ret: i64) -> std::result::Result<u64, ErrorCode> {
    if ret >= 0 {
        Ok(ret as u64)
    } else {
        Err(ErrorCode::from_i64(ret).unwrap_or(ErrorCode::Io))
    }
}
