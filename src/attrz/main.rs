use attrz::commands::config::ConfigAction;
use attrz::commands::helpers::{absolute_target, display_value};
use attrz::commands::{self, CmdMessage, MessageLevel};
use attrz::config::{AttrzConfig, CONFIG_KEYS};
use attrz::error::{AttrError, Result};
use attrz::fs::os::OsFs;
use attrz::names::AttrNames;
use attrz::store::AttributeStore;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands};

const CONFIG_DIR_ENV: &str = "ATTRZ_CONFIG_DIR";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    store: AttributeStore<OsFs>,
    config_dir: PathBuf,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "attrz=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let ctx = init_context()?;

    match cli.command {
        Commands::Set {
            target,
            name,
            value,
            file,
        } => handle_set(&ctx, &target, &name, value, file),
        Commands::Get {
            target,
            name,
            max,
            raw,
        } => handle_get(&ctx, &target, &name, max, raw),
        Commands::List { target, json } => handle_list(&ctx, &target, json),
        Commands::Remove { target, name } => handle_remove(&ctx, &target, &name),
        Commands::Clear { target } => handle_clear(&ctx, &target),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn init_context() -> Result<AppContext> {
    let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("com", "attrz", "attrz")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| AttrError::invalid("Could not determine config dir"))?,
    };
    let config = AttrzConfig::load(&config_dir)?;
    let store = AttributeStore::with_limits(OsFs::new(), config.limits());

    Ok(AppContext { store, config_dir })
}

fn handle_set(
    ctx: &AppContext,
    target: &Path,
    name: &str,
    value: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let bytes = match (value, file) {
        (_, Some(path)) => std::fs::read(&path).map_err(AttrError::Io)?,
        (Some(v), None) => v.into_bytes(),
        (None, None) => return Err(AttrError::invalid("A value or --file is required")),
    };
    let target = absolute_target(target)?;
    let result = commands::set::run(&ctx.store, &target, name, &bytes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_get(
    ctx: &AppContext,
    target: &Path,
    name: &str,
    max: Option<usize>,
    raw: bool,
) -> Result<()> {
    let target = absolute_target(target)?;
    let result = commands::get::run(&ctx.store, &target, name, max)?;
    if let Some(value) = &result.value {
        if raw {
            let mut out = std::io::stdout().lock();
            out.write_all(value).map_err(AttrError::Io)?;
            out.flush().map_err(AttrError::Io)?;
        } else {
            println!("{}", display_value(value));
        }
    }
    eprint_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, target: &Path, json: bool) -> Result<()> {
    let target = absolute_target(target)?;
    let result = commands::list::run(&ctx.store, &target)?;
    let names = result.names.clone().unwrap_or_default();
    if json {
        let list = serde_json::to_string(&names.into_vec()).map_err(AttrError::Config)?;
        println!("{}", list);
    } else {
        print_names(&names);
        print_messages(&result.messages);
    }
    Ok(())
}

fn handle_remove(ctx: &AppContext, target: &Path, name: &str) -> Result<()> {
    let target = absolute_target(target)?;
    let result = commands::remove::run(&ctx.store, &target, name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &AppContext, target: &Path) -> Result<()> {
    let target = absolute_target(target)?;
    let result = commands::remove::run_all(&ctx.store, &target)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = commands::config::run(&ctx.config_dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            for key in CONFIG_KEYS {
                if let Some(val) = config.get(key) {
                    println!("{} = {}", key, val);
                }
            }
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_names(names: &AttrNames) {
    for name in names {
        println!("{}", name);
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Same as `print_messages`, but on stderr so stdout carries only the value.
fn eprint_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => eprintln!("{}", message.content.dimmed()),
            MessageLevel::Success => eprintln!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}
