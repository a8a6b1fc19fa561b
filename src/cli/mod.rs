use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use crate::app::pipeline::Job;
use crate::app::Result;
use crate::config::AlbumConfig;
use crate::input::{prompt_album_url, prompt_output_dir, validate_album_url, InputProvider};

#[derive(Parser, Debug)]
#[command(name = "albumdl")]
#[command(about = "Download every article of a WeChat album page", long_about = None)]
pub struct Cli {
    /// Album page URL (prompted for when missing or invalid)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Absolute output directory (prompted for when missing or relative)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (default: ~/.config/albumdl/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// .env file holding WEB_READER_API_KEY
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,
}

impl Cli {
    /// Build the job from the flags, prompting for whatever is missing or invalid.
    pub fn job(&self, rules: &AlbumConfig, input: &mut dyn InputProvider) -> Result<Job> {
        let album_url = match self.url.as_deref().map(str::trim) {
            Some(url) if validate_album_url(url, rules) => url.to_string(),
            Some(url) => {
                warn!("Ignoring --url {:?}: not an album URL", url);
                prompt_album_url(input, rules)?
            }
            None => prompt_album_url(input, rules)?,
        };

        let output_dir = match &self.output {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => {
                warn!("Ignoring --output {}: not an absolute path", dir.display());
                prompt_output_dir(input)?
            }
            None => prompt_output_dir(input)?,
        };

        Ok(Job {
            album_url,
            output_dir,
        })
    }
}
