use clap::Parser;
use tracing_subscriber::EnvFilter;

use fsac::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("fsac=debug,info")
    } else {
        EnvFilter::new("fsac=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Call(args) => cli::call::run(args, cli.threads)?,
        cli::Commands::Update(args) => cli::update::run(args, cli.threads)?,
        cli::Commands::Tabulate(args) => cli::tabulate::run(args)?,
    }

    Ok(())
}
