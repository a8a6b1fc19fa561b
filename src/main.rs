use clap::Parser;
use tracing::{error, info};

use albumdl::app::{logging, pipeline, AppContext};
use albumdl::cli::Cli;
use albumdl::config::{ApiKey, Config};
use albumdl::input::ConsoleInput;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.headed {
        config.browser.headless = false;
    }

    let log_path = logging::init(&config.logging.dir)?;
    info!("Logging to {}", log_path.display());

    let api_key = match ApiKey::load(cli.env_file.as_deref()) {
        Ok(key) => key,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let job = match cli.job(&config.album, &mut ConsoleInput) {
        Ok(job) => job,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let ctx = AppContext::new(config, api_key)?;

    if let Err(e) = pipeline::run(&ctx, &job).await {
        error!("Run failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
