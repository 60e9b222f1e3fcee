//! Storefront shopper CLI

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[expect(clippy::print_stdout, reason = "commands report their results on stdout")]
mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .compact()
        .init();

    let cli = cli::Cli::parse();

    if let Err(error) = cli.run().await {
        #[expect(clippy::print_stderr, reason = "command failures are reported to the shopper")]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
