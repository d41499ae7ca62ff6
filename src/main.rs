//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `spf_dns` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Printing lookup results
//!
//! All lookup logic is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use spf_dns::config::{Cli, Command};
use spf_dns::initialization::{init_logger_with, init_resolver};
use spf_dns::{DnsLookupError, DnsRecordGetter, HickoryTransport};

/// Exit code for transport failures.
const EXIT_RESOLUTION_ERROR: i32 = 1;
/// Exit code for an exhausted lookup budget.
const EXIT_LIMIT_EXCEEDED: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let resolver =
        init_resolver(&cli.resolver_settings()).context("Failed to initialize DNS resolver")?;
    let getter = DnsRecordGetter::new(HickoryTransport::new(resolver));
    getter.set_lookup_limit_enforcement(!cli.no_limit);

    match run(&getter, &cli.command).await {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            log::info!("DNS lookups charged: {}", getter.lookup_count());
            Ok(())
        }
        Err(e) => {
            let code = exit_code(&e);
            eprintln!("spf_dns error: {:#}", anyhow::Error::new(e));
            process::exit(code);
        }
    }
}

async fn run(
    getter: &DnsRecordGetter<HickoryTransport>,
    command: &Command,
) -> Result<Vec<String>, DnsLookupError> {
    if command.lookup_args().count {
        getter.count_lookup()?;
    }

    match command {
        Command::Spf { domain, .. } => getter.get_spf_records(domain).await,
        Command::Dkim {
            domain, selector, ..
        } => getter.get_dkim_records(domain, selector).await,
        Command::Addrs {
            domain, ipv4_only, ..
        } => getter.resolve_addresses(domain, *ipv4_only).await,
        Command::Mx { domain, .. } => getter.resolve_mail_exchangers(domain).await,
        Command::Ptr { ip, .. } => getter.resolve_pointer(*ip).await,
        Command::Exists { domain, .. } => Ok(vec![getter.exists(domain).await.to_string()]),
    }
}

fn exit_code(e: &DnsLookupError) -> i32 {
    match e {
        DnsLookupError::LookupLimitExceeded { .. } => EXIT_LIMIT_EXCEEDED,
        DnsLookupError::Resolution { .. } => EXIT_RESOLUTION_ERROR,
    }
}
