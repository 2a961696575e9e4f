use anyhow::Context;
use clap::Parser;
use matrix_math_engine::utils::{logger, validation::Validate};
use matrix_math_engine::{server, AppState, CliArgs};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let level = config.logging.level.as_deref();
    if config.logging.json {
        logger::init_json_logger(args.verbose, level);
    } else {
        logger::init_console_logger(args.verbose, level);
    }

    tracing::info!("Starting matrix-math-engine");
    if args.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let state = Arc::new(AppState::from_config(&config));
    tracing::info!(
        "📊 {} benchmark labels loaded (default {}s)",
        state.benchmarker.table().entries().len(),
        state.benchmarker.table().default_seconds()
    );

    tracing::info!("🌐 Binding {}", config.bind_address());
    server::serve(&config.server.host, config.server.port, state)
        .await
        .map_err(|e| {
            tracing::error!(
                "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            e
        })
        .context("HTTP server terminated with an error")?;

    tracing::info!("✅ Server stopped cleanly");
    Ok(())
}
