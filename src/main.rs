use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use voxgate::{frontend, Config, Script};

/// Permission-gated speech recognition demo.
#[derive(Debug, Parser)]
#[command(name = "voxgate", version, about)]
struct Args {
    /// Configuration file, without extension.
    #[arg(long, default_value = "config/voxgate")]
    config: String,

    /// JSON recognizer script. Overrides the configured script path and the
    /// built-in demo script.
    #[arg(long)]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::load(&args.config)
        .with_context(|| format!("failed to load config `{}`", args.config))?;
    info!("{} starting", config.service.name);

    let script_path = args
        .script
        .or_else(|| config.recognition.script_path.clone().map(PathBuf::from));
    let script = match script_path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read script `{}`", path.display()))?;
            Script::from_json(&raw)
                .with_context(|| format!("failed to parse script `{}`", path.display()))?
        }
        None => Script::demo(),
    };

    frontend::run(config, script).await
}
