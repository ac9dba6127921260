use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assistant_cell::{Assistant, ConsoleSpeech, HttpClinicClient};
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Logs go to stderr so they do not interleave with the conversation.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    let api = HttpClinicClient::new(config.clinic_api_url.clone());
    info!("Talking to clinic API at {}", api.get_base_url());

    let mut assistant = Assistant::connect(api, ConsoleSpeech::new(), config.assistant_slot_preview).await;
    assistant.run().await;

    Ok(())
}
