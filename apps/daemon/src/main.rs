use clipdeck_application::{AppPaths, ClipService, Platform, Settings};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod commands;
mod panel;

use commands::{Command, Flow};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,clipdeck=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting clipdeck daemon");

    let paths = AppPaths::from_env();
    std::fs::create_dir_all(paths.root())?;
    let settings = Settings::load_or_default(&paths.settings_file());

    if !clipdeck_input::has_accessibility_access() {
        tracing::warn!("accessibility access not granted; paste-back will only fill the clipboard");
    }

    let platform = Platform::native().with_panel(Arc::new(panel::LogPanel));
    let service = ClipService::open(paths, settings, platform);

    let pruned = service.prune_expired();
    if pruned > 0 {
        tracing::info!(pruned, "removed expired entries");
    }

    service.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::info!("stdin closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if commands::run(&service, command) == Flow::Quit {
                    break;
                }
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }

    service.stop();
    service.flush();
    tracing::info!("clipdeck daemon stopped");
    Ok(())
}
