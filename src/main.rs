use anyhow::{Context, Result};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use signal_any_event::cli::{self, Cli};
use signal_any_event::config::{load_config, Config, LoggingConfig};
use signal_any_event::SignalRequest;

fn main() {
    let cli = match cli::parse_args(std::env::args()) {
        Ok(cli) => cli,
        Err(err) => {
            err.print();
            process::exit(err.exit_code());
        }
    };

    let config = match load(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:#}", err);
            process::exit(2);
        }
    };

    init_logging(&config.logging, cli.verbose);
    debug!("SignalAnyEvent v{} ({})", env!("CARGO_PKG_VERSION"), std::env::consts::ARCH);

    let request = cli.request(config.event.default_namespace);
    process::exit(run(&request));
}

fn load(cli: &Cli) -> Result<Config> {
    let path = cli.config.as_deref();
    load_config(path).with_context(|| match path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to build default configuration".to_string(),
    })
}

/// `RUST_LOG` wins over `/verbose`, which wins over the configured level
fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let fallback = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(logging.ansi)
        .without_time()
        .init();
}

#[cfg(windows)]
fn run(request: &SignalRequest) -> i32 {
    cli::execute(&signal_any_event::NativePlatform, request)
}

#[cfg(not(windows))]
fn run(_request: &SignalRequest) -> i32 {
    use signal_any_event::ErrorCode;

    eprintln!("SignalAnyEvent only supports the Windows platform");
    ErrorCode::CallNotImplemented.code() as i32
}
