use std::path::PathBuf;

use clap::Parser;

mod cli;
mod config;
mod core;
mod error;
mod services;
mod utils;

use config::Config;
use error::{Result, TuneFetchError};
use services::SimpleServices;

#[derive(Parser)]
#[command(name = "tunefetch")]
#[command(about = "Download YouTube, Spotify and SoundCloud tracks as tagged MP3 files")]
#[command(version)]
struct Cli {
    /// URL or search query; prompts for one when omitted
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long)]
    config: Option<String>,

    /// Directory to write MP3 files into
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    utils::logging::init_logging(cli.verbose).map_err(TuneFetchError::Internal)?;

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = Some(output_dir);
        config.validate()?;
    }
    config.ensure_output_dir()?;

    let services = SimpleServices::new(config);
    cli::fetch::execute(cli.input, &services).await
}
