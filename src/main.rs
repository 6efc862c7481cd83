use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use issuescan::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("issuescan=debug")
    } else {
        EnvFilter::new("issuescan=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan(args) => cli::scan::execute(args).await,
        Commands::Parse(args) => cli::parse::execute(args),
        Commands::Parsers(args) => cli::parsers::execute(args),
        Commands::Schema => cli::schema::execute(),
    }
}
