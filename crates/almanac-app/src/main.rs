use std::sync::Arc;

use almanac_app::app::router;
use almanac_app::config::Settings;
use almanac_calendar::{LunarCalendar, LunarTable, NoLunarCalendar};
use almanac_core::config::load_config;
use salvo::Listener;
use salvo::conn::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

/// ## Summary
/// Loads the configured lunar table, or falls back to a calendar that knows
/// no lunar dates.
///
/// ## Errors
/// Returns an error if a table path is configured but the table cannot be
/// read or fails validation.
fn load_lunar_calendar(settings: &Settings) -> anyhow::Result<Arc<dyn LunarCalendar>> {
    let Some(path) = settings.lunar.table_path.as_deref() else {
        tracing::warn!("No lunar table configured, lunar rules will produce no occurrences");
        return Ok(Arc::new(NoLunarCalendar));
    };

    let table = LunarTable::load(path)?;
    match table.coverage() {
        Some((first, last)) => {
            tracing::info!(path = %path.display(), first, last, "Lunar table loaded");
        }
        None => tracing::warn!(path = %path.display(), "Lunar table is empty"),
    }
    Ok(Arc::new(table))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Almanac appointment service");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let calendar = load_lunar_calendar(&config)?;

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = router(config, calendar);

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
