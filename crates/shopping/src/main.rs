mod command;
mod shell;

use anyhow::{Context, Result};
use command::Command;
use shared::{config::Config, state::AppState, utils::init_logger};
use shell::{Flow, Shell};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;
    let _guard = init_logger(&config.log, "cli");

    info!("🚀 Starting shopping list ({:?} storage)", config.backend);

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    let mut shell = Shell::start(state)
        .await
        .context("Failed to restore session")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("🛑 Shutdown signal received (Ctrl+C).");
                break;
            }
            line = lines.next_line() => line.context("Failed to read input")?,
        };

        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match shell.handle(command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => {
                error!("❌ Command failed: {err:#}");
                println!("Błąd: {err}");
            }
        }
    }

    info!("✅ Shopping list closed");
    Ok(())
}
