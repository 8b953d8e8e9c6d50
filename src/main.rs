use clap::Parser;
use gncbook::commands;
use tracing::{debug, error};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Parser)]
#[command(name = "gncbook")]
#[command(author = "Silvio Böhler")]
#[command(version = "0.1.0")]
#[command(about = "Reads GnuCash XML books and reports on them.", long_about = None)]
struct Cli {
    /// Log level for this crate, ignored when RUST_LOG is set
    #[arg(long, global = true, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: commands::Commands,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.log_level);
    debug!("log level set to {}", cli.log_level);
    if let Err(e) = cli.command.run() {
        error!("{e}");
        std::process::exit(1)
    };
}

/// Logs to stderr. `RUST_LOG` takes precedence over `level`.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
