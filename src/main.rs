use anyhow::Result;
use clap::Parser;

use biolex::cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    tracing::debug!(data_dir = %config.data_dir().display(), "resolved configuration");

    match &cli.command {
        Commands::Documents {
            input,
            lines,
            output,
        } => biolex::cli::documents::run(&config, input, *lines, output),
        Commands::Relations {
            input,
            format,
            output,
        } => biolex::cli::relations::run(&config, input, *format, output),
        Commands::Lookup {
            input,
            strict,
            output,
        } => biolex::cli::lookup::run(&config, input, *strict, output),
        Commands::Ctd {
            input,
            strict,
            documents,
            output,
        } => biolex::cli::ctd::run(&config, input, *strict, documents.as_deref(), output),
        Commands::Stats { splits, ctd } => biolex::cli::stats::run(&config, splits, *ctd),
    }
}
