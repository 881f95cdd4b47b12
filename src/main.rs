//! Medscreen: multi-disease screening terminal application.
//!
//! Main entry point.

use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medscreen::adapters::sanitize::SanitizingMakeWriter;
use medscreen::config::Config;
use medscreen::tui::App;

fn main() -> Result<()> {
    let config = Config::from_env();

    // Logging to the terminal would corrupt the TUI (alternate screen), so an
    // interactive session logs to a file unless told otherwise.
    let interactive = std::io::stdout().is_terminal();
    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: a missing directory surfaces as an open error below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!(model_dir = ?config.model_dir, "Starting Medscreen...");

    let mut app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e).with_context(|| {
                format!(
                    "Failed to load models from {:?}. Set MEDSCREEN_MODEL_DIR to a directory containing the five model artifacts.",
                    config.model_dir
                )
            });
        }
    };
    app.run()?;

    tracing::info!("Medscreen shutdown complete.");
    Ok(())
}
