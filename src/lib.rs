pub mod config;
pub mod discord;
pub mod logging;

use log::info;

use crate::config::Config;
use crate::discord::DiscordClient;

/// Runs the bot until the gateway connection ends or Ctrl+C arrives.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let client = DiscordClient::new(&config).await?;

    info!(
        "Starting bot: watching {} forum channel(s), announcing to {}",
        config.forum_channel_ids.len(),
        config.announce_channel_id
    );

    tokio::select! {
        result = client.start() => {
            result?;
            info!("Discord client stopped.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down.");
            client.shutdown().await;
        }
    }

    info!("Bot has shut down.");
    Ok(())
}
