mod cancel;
mod commands;
mod config;
mod context;
mod metadata;
mod pointer;
mod repository;

use std::{ffi::OsString, fs::File, path::PathBuf};

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{eyre, WrapErr};
use tracing::{debug, info, warn};

use common::rel_path::RelPath;

enum Error {
    Clap(clap::Error),
    Eyre(color_eyre::Report),
}

impl From<clap::Error> for Error {
    fn from(err: clap::Error) -> Self {
        Self::Clap(err)
    }
}

impl From<color_eyre::Report> for Error {
    fn from(err: color_eyre::Report) -> Self {
        Self::Eyre(err)
    }
}

#[derive(Parser, Debug)]
#[clap(version, about = "Keeps track of the current university course", long_about = None)]
#[clap(group(clap::ArgGroup::new("task").multiple(false)))]
struct Opts {
    /// Use this config file instead of the default one
    #[clap(long, value_parser)]
    config: Option<PathBuf>,
    /// Directory containing the semester folders
    #[clap(long, value_parser)]
    root: Option<PathBuf>,
    #[clap(flatten)]
    action: commands::Action,
}

/// Flags that were historically spelled with a single dash.
const LEGACY_FLAGS: &[&str] = &["cc", "nc", "lc", "sc", "sPdf", "oc", "cl", "cn"];

/// Rewrite `-cc` style flags to their long form so clap can parse them.
fn legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let long = arg
                .to_str()
                .and_then(|arg| arg.strip_prefix('-'))
                .filter(|flag| LEGACY_FLAGS.contains(flag))
                .map(|flag| format!("--{flag}"));
            long.map(OsString::from).unwrap_or(arg)
        })
        .collect()
}

fn main() {
    match run() {
        Ok(res) => match res {
            Ok(_) => std::process::exit(0),
            Err(_) => std::process::exit(1),
        },
        Err(err) => match err {
            // Also handles --help and --version
            Error::Clap(err) => err.exit(),
            Error::Eyre(err) => {
                eprintln!("Error: {err:?}");
                std::process::exit(1);
            }
        },
    }
}

fn run() -> Result<commands::CmdResult, Error> {
    install_eyre()?;
    install_tracing()?;
    info!("Application started");

    let opts = Opts::try_parse_from(legacy_args(std::env::args_os()))?;
    debug!(?opts);

    let config_path = opts
        .config
        .clone()
        .map(Ok)
        .unwrap_or_else(context::default_config_path)
        .and_then(|path| {
            RelPath::new(path, context::home_dir()).wrap_err("Failed to expand config path")
        })?;
    let config = config::Config::load(config_path.absolute())?;

    let context = context::Context::new(config, opts.root.clone())?;
    debug!(?context);

    match opts.action.command() {
        Some(command) => Ok(command.run(&context)),
        None => {
            warn!("No action requested");
            Opts::command()
                .print_help()
                .wrap_err("Failed to print help")?;
            Ok(Ok(()))
        }
    }
}

fn install_tracing() -> color_eyre::Result<()> {
    let path = context::log_path().wrap_err("Cannot find log path")?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).wrap_err("Failed to create log directory")?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err("Failed to create log file")?;

    // Set global subscriber
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_writer(file)
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init()
        .map_err(|err| eyre!(err))
        .wrap_err("Failed to initialize tracing subscriber")
}

fn install_eyre() -> color_eyre::Result<()> {
    // Install color_eyre panic and error handlers
    color_eyre::config::HookBuilder::new()
        .display_env_section(false)
        .display_location_section(false)
        .install()
        .wrap_err("Failed to initialize eyre")
}
