mod prepare;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gearlens")]
#[command(about = "Athleisure competitive-intelligence data pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Transform a scraper state snapshot into the dashboard document.
    Prepare {
        /// Input snapshot; defaults to GEARLENS_STATE_PATH.
        #[arg(long)]
        state: Option<PathBuf>,
        /// Output document; defaults to GEARLENS_OUT_PATH.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Brand roster YAML; defaults to GEARLENS_BRANDS_PATH.
        #[arg(long)]
        brands: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let config = gearlens_core::load_app_config();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Prepare { state, out, brands } => prepare::run(
            &state.unwrap_or_else(|| config.state_path.clone()),
            &out.unwrap_or_else(|| config.out_path.clone()),
            &brands.unwrap_or_else(|| config.brands_path.clone()),
        ),
    }
}
