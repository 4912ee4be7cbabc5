use std::sync::Arc;

use seatkit::{
    init_logging, EventBus, InMemoryBackend, Session, SettingsManager, BUILD_DATE, VERSION,
};
use seatkit_core::constants::DEFAULT_SEAT_COUNT;
use seatkit_core::{EventCategory, EventFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    tracing::info!("SeatKit {} (built {})", VERSION, BUILD_DATE);

    let settings = match SettingsManager::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Falling back to default settings: {}", e);
            SettingsManager::load_from("seatkit.toml")?
        }
    };

    let events = Arc::new(EventBus::new());
    events.subscribe(
        EventFilter::Categories(vec![EventCategory::Error]),
        |event| tracing::warn!("{:?}", event),
    );

    let backend = Arc::new(InMemoryBackend::seeded(DEFAULT_SEAT_COUNT));
    let session = Session::start(settings.config(), backend, events).await?;

    let summary = serde_json::to_string(&session.summary())?;
    tracing::info!("Session summary: {}", summary);

    Ok(())
}
