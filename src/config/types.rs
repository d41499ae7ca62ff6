//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and resolver configuration.

use std::net::IpAddr;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::constants::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Timeout and retry settings handed to the DNS resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Per-query timeout in seconds
    pub timeout_secs: u64,
    /// Attempts per query
    pub attempts: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DNS_TIMEOUT_SECS,
            attempts: DNS_ATTEMPTS,
        }
    }
}

/// Command-line interface of the `spf_dns` diagnostic binary.
#[derive(Debug, Parser)]
#[command(
    name = "spf_dns",
    version,
    about = "Run budgeted SPF/DKIM DNS lookups"
)]
pub struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// DNS query timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// DNS attempts per query
    #[arg(long, default_value_t = DNS_ATTEMPTS, global = true)]
    pub attempts: usize,

    /// Keep counting lookups but never fail on the budget
    #[arg(long, global = true)]
    pub no_limit: bool,

    /// Lookup to perform
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Resolver settings taken from the global flags.
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            timeout_secs: self.timeout_secs,
            attempts: self.attempts,
        }
    }
}

/// Flags shared by every lookup subcommand.
#[derive(Debug, Clone, Args)]
pub struct LookupArgs {
    /// Charge this lookup against the session budget before querying
    #[arg(long)]
    pub count: bool,
}

/// Lookup subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// SPF records published at a domain
    Spf {
        domain: String,
        #[command(flatten)]
        args: LookupArgs,
    },
    /// DKIM key records for a selector
    Dkim {
        domain: String,
        selector: String,
        #[command(flatten)]
        args: LookupArgs,
    },
    /// A (and AAAA) addresses of a domain
    Addrs {
        domain: String,
        /// Query A records only
        #[arg(long)]
        ipv4_only: bool,
        #[command(flatten)]
        args: LookupArgs,
    },
    /// Mail exchanger host names of a domain
    Mx {
        domain: String,
        #[command(flatten)]
        args: LookupArgs,
    },
    /// PTR names of an IP address
    Ptr {
        ip: IpAddr,
        #[command(flatten)]
        args: LookupArgs,
    },
    /// Whether a domain has at least one A record
    Exists {
        domain: String,
        #[command(flatten)]
        args: LookupArgs,
    },
}

impl Command {
    /// Shared lookup flags of this subcommand.
    pub fn lookup_args(&self) -> &LookupArgs {
        match self {
            Command::Spf { args, .. }
            | Command::Dkim { args, .. }
            | Command::Addrs { args, .. }
            | Command::Mx { args, .. }
            | Command::Ptr { args, .. }
            | Command::Exists { args, .. } => args,
        }
    }
}
