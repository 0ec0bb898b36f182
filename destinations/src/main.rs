mod cli;
mod config;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use cli::CliArgs;
use config::DestinationsConfig;
use std::io::{self, Write};
use std::process::ExitCode;
use targets::error::EX_USAGE;
use targets::{AddressFamily, ResolveError, Resolver};
use thiserror::Error;
use tracing::{debug, info};

/// `sysexits.h` statuses for failures outside resolution.
const EX_IOERR: u8 = 74;
const EX_CONFIG: u8 = 78;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let cfg = match load_config(args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(EX_CONFIG);
        }
    };

    let _guard = telemetry::init_tracing(cfg.log_dir.as_deref(), &cfg.log_file, &cfg.log_level);
    debug!("Configuration: {:?}", cfg);

    if cfg.destinations.is_empty() {
        eprintln!("Expected at least one host:port destination. See --help.");
        return ExitCode::from(EX_USAGE);
    }

    match run(&cfg, &mut io::stderr().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Run aborted: {:?}", e);
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn load_config(args: CliArgs) -> Result<DestinationsConfig> {
    let mut cfg = match &args.config {
        Some(path) => DestinationsConfig::load(path)
            .with_context(|| format!("Invalid configuration file: {}", path))?,
        None => DestinationsConfig::default(),
    };
    apply_overrides(&mut cfg, args);
    Ok(cfg)
}

fn apply_overrides(cfg: &mut DestinationsConfig, args: CliArgs) {
    if !args.destinations.is_empty() {
        let configured = std::mem::take(&mut cfg.destinations);
        cfg.destinations = args.destinations;
        cfg.destinations.extend(configured);
    }
    if args.ipv4 {
        cfg.resolver.family = AddressFamily::Ipv4;
    }
    if args.ipv6 {
        cfg.resolver.family = AddressFamily::Ipv6;
    }
    if let Some(log_level) = args.log_level {
        cfg.log_level = log_level;
    }
    if let Some(log_dir) = args.log_dir {
        cfg.log_dir = Some(log_dir);
    }
    if let Some(log_file) = args.log_file {
        cfg.log_file = log_file;
    }
}

#[derive(Error, Debug)]
enum RunError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Writing destinations: {0}")]
    Output(#[from] io::Error),
}

impl RunError {
    fn exit_code(&self) -> u8 {
        match self {
            RunError::Resolve(e) => e.exit_code(),
            RunError::Output(_) => EX_IOERR,
        }
    }
}

/// Resolves every destination and prints the framed list to `out`.
///
/// A failed write is fatal: a caller reading the list must not mistake a
/// truncated line for the full set.
fn run<W: Write>(cfg: &DestinationsConfig, out: &mut W) -> std::result::Result<(), RunError> {
    let resolver = Resolver::system(cfg.resolver);
    let addrs = resolver.resolve(&cfg.destinations)?;
    info!(
        "Resolved {} destination(s) into {} address(es)",
        cfg.destinations.len(),
        addrs.len()
    );

    targets::write_all(out, &addrs, &cfg.prefix, &cfg.separator, &cfg.suffix)?;
    Ok(())
}
