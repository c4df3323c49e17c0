// src/discord/client.rs

use serenity::prelude::*;
use crate::config::Config;
use crate::discord::notifier::ThreadNotifier;
use std::sync::Arc;
use std::time::Duration;
use log::{info, warn};
use tokio::sync::Mutex;

use super::events::EventHandler;

pub struct DiscordClient {
    client: Arc<Mutex<Option<Client>>>,
}

impl DiscordClient {
    pub async fn new(config: &Config) -> Result<Self, serenity::Error> {
        let notifier = Arc::new(ThreadNotifier::new(
            config.forum_channel_ids.clone(),
            config.announce_channel_id,
        ));

        // GUILDS is the only intent thread events need.
        let intents = GatewayIntents::GUILDS;

        let client = Client::builder(&config.discord_token, intents)
            .event_handler(EventHandler::new(notifier))
            .await?;

        Ok(Self {
            client: Arc::new(Mutex::new(Some(client))),
        })
    }

    pub async fn shutdown(&self) {
        info!("Shutting down DiscordClient...");
        let mut client_guard = self.client.lock().await;
        if let Some(client) = client_guard.take() {
            let shard_manager = client.shard_manager.clone();
            match tokio::time::timeout(Duration::from_secs(10), shard_manager.shutdown_all()).await {
                Ok(_) => info!("Discord shards shut down successfully"),
                Err(_) => warn!("Timed out while shutting down Discord shards"),
            }
        }
        info!("DiscordClient shutdown complete.");
    }

    pub async fn start(&self) -> Result<(), serenity::Error> {
        let mut client_guard = self.client.lock().await;
        if let Some(mut client) = client_guard.take() {
            client.start().await?;
            *client_guard = Some(client);
            Ok(())
        } else {
            Err(serenity::Error::Other("Discord client has already been started"))
        }
    }
}
