//! Replay entry point.

use clap::Parser;
use fibermap_core::EditorConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Replay recorded route-editing gestures and print the stored route.
#[derive(Debug, Parser)]
#[command(name = "fibermap-replay", version, about)]
struct Cli {
    /// Gesture script (JSON).
    script: PathBuf,
    /// Editor config (JSON); defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the whole outcome instead of only the stored route.
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(fibermap_replay::load_config) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
        None => EditorConfig::default(),
    };
    let script = match fibermap_replay::load_script(&cli.script) {
        Ok(script) => script,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = fibermap_replay::replay(script, config);
    if !outcome.rejected.is_empty() {
        log::info!("{} events rejected", outcome.rejected.len());
    }

    let output = if cli.verbose {
        serde_json::to_string_pretty(&outcome)
    } else {
        serde_json::to_string(&outcome.stored_value())
    };
    match output {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize outcome: {}", e);
            ExitCode::FAILURE
        }
    }
}
