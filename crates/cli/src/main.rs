//! # HopZero
//!
//! Command-line DNS lookups with retries and a short-lived in-memory cache.

mod bootstrap;
mod di;

use clap::{ArgAction, CommandFactory, Parser};
use hopzero_application::use_cases::LookupRequest;
use hopzero_domain::CliOverrides;
use tracing::debug;

const USAGE_EXAMPLES: &str = "\
Examples:
  hopzero --domain google.com --type A
  hopzero --reverse 8.8.8.8
  hopzero --domain github.com --type MX --dns 1.1.1.1:53
  hopzero --domain example.com --type SOA
  hopzero --domain example.com --timeout 2 --cache=false
  hopzero --debug --domain openai.com";

#[derive(Parser, Debug)]
#[command(name = "hopzero")]
#[command(version)]
#[command(about = "DNS lookup utility with retries and a short-lived cache")]
#[command(after_help = USAGE_EXAMPLES)]
struct Cli {
    /// Domain name to resolve
    #[arg(long)]
    domain: Option<String>,

    /// DNS record type (A, AAAA, MX, TXT, NS, CNAME, SOA)
    #[arg(long = "type", default_value = "A")]
    record_type: String,

    /// IP address for a reverse (PTR) lookup
    #[arg(long)]
    reverse: Option<String>,

    /// Custom DNS server, e.g. 8.8.8.8 or 1.1.1.1:53
    #[arg(long)]
    dns: Option<String>,

    /// Reverse lookup timeout in seconds [default: 5]
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Cache results in memory [default: true]
    #[arg(long, action = ArgAction::Set)]
    cache: Option<bool>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// File every log line is duplicated to [default: resolver.log]
    #[arg(long)]
    log_file: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            reverse_timeout_secs: self.timeout,
            cache_enabled: self.cache,
            debug: self.debug,
            log_file: self.log_file.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.domain.is_none() && cli.reverse.is_none() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config)?;

    debug!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        attempts = config.lookup.attempts,
        attempt_timeout_secs = config.lookup.attempt_timeout_secs,
        cache_enabled = config.lookup.cache_enabled,
        "Configuration loaded"
    );

    let use_cases = di::UseCases::new(&config);

    // Lookup outcomes are logged by the use cases and never change the exit code
    if let Some(domain) = &cli.domain {
        let mut request = LookupRequest::new(domain.as_str(), cli.record_type.as_str())
            .with_cache(config.lookup.cache_enabled);
        if let Some(server) = &cli.dns {
            request = request.with_server(server.as_str());
        }
        use_cases.resolve_record.execute(&request).await;
    }

    if let Some(address) = &cli.reverse {
        use_cases
            .reverse_lookup
            .execute(address, config.lookup.reverse_timeout())
            .await;
    }

    Ok(())
}
