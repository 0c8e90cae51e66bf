//! Logging setup for the space-report tool.

use clap::Args;
use eyre::{Result, WrapErr};
use tracing_subscriber::{EnvFilter, filter::Directive};

/// Logging configuration.
#[derive(Debug, Args, Clone, Default)]
#[command(next_help_heading = "Logging")]
pub(crate) struct LogArgs {
    /// Silence everything but errors.
    #[arg(short, long, global = true)]
    pub(crate) quiet: bool,

    /// Verbose mode (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub(crate) verbosity: u8,

    /// Log filter directive (e.g., "quota_space_use=debug").
    #[arg(long = "log.filter", value_name = "DIRECTIVE", global = true)]
    pub(crate) filter: Option<String>,
}

/// Build the log filter from command line arguments.
///
/// Precedence:
/// 1. `--quiet` shows only errors
/// 2. Otherwise `RUST_LOG` if set, else a level chosen by verbosity
/// 3. Directives from `--log.filter` are added on top; a malformed one is an
///    error
fn env_filter(args: &LogArgs) -> Result<EnvFilter> {
    if args.quiet {
        return Ok(EnvFilter::new("error"));
    }

    let base_level = match args.verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(base_level));

    if let Some(custom_filter) = &args.filter {
        for directive in custom_filter.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            let directive: Directive = directive
                .parse()
                .wrap_err_with(|| format!("invalid log filter directive `{directive}`"))?;
            filter = filter.add_directive(directive);
        }
    }

    Ok(filter)
}

pub(crate) fn init_logging(args: &LogArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(args)?)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .map_err(|e| eyre::eyre!("failed to install log subscriber: {e}"))
}
