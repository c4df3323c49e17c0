// src/discord/notifier.rs

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info};
use serenity::http::Http;
use serenity::model::prelude::*;

/// Where announcements get delivered. Production uses [`HttpSink`]; tests
/// substitute a recording double.
#[async_trait]
pub trait AnnounceSink: Send + Sync {
    async fn send_message(&self, channel_id: ChannelId, content: &str)
        -> Result<(), serenity::Error>;
}

pub struct HttpSink {
    http: Arc<Http>,
}

impl HttpSink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AnnounceSink for HttpSink {
    async fn send_message(
        &self,
        channel_id: ChannelId,
        content: &str,
    ) -> Result<(), serenity::Error> {
        channel_id.say(&self.http, content).await?;
        Ok(())
    }
}

/// Owned snapshot of a gateway thread-create delivery.
#[derive(Debug, Clone)]
pub struct ThreadEvent {
    pub thread_id: ChannelId,
    pub guild_id: GuildId,
    pub parent_id: Option<ChannelId>,
    pub name: String,
    pub creator: String,
}

impl ThreadEvent {
    pub fn from_channel(thread: &GuildChannel) -> Self {
        let creator = thread
            .owner_id
            .map(|id| format!("<@{id}>"))
            .unwrap_or_else(|| "unknown creator".to_string());
        Self {
            thread_id: thread.id,
            guild_id: thread.guild_id,
            parent_id: thread.parent_id,
            name: thread.name.clone(),
            creator,
        }
    }
}

pub fn format_notification(event: &ThreadEvent) -> String {
    format!(
        "**New thread created**\n{} by {}\nhttps://discord.com/channels/{}/{}",
        event.name, event.creator, event.guild_id, event.thread_id
    )
}

/// Filters thread-create events against the watched forum set and forwards
/// matching ones to the announce channel. Holds no mutable state.
pub struct ThreadNotifier {
    forum_channel_ids: HashSet<ChannelId>,
    announce_channel_id: ChannelId,
}

impl ThreadNotifier {
    pub fn new(forum_channel_ids: HashSet<ChannelId>, announce_channel_id: ChannelId) -> Self {
        Self {
            forum_channel_ids,
            announce_channel_id,
        }
    }

    /// Sends one announcement per event whose parent is a watched forum.
    /// A failed send is logged and swallowed so the bot keeps serving
    /// subsequent events.
    pub async fn handle_thread_create(&self, event: &ThreadEvent, sink: &dyn AnnounceSink) {
        let Some(parent_id) = event
            .parent_id
            .filter(|parent| self.forum_channel_ids.contains(parent))
        else {
            debug!(
                "Ignoring thread '{}' (id={}): parent {:?} is not watched",
                event.name, event.thread_id, event.parent_id
            );
            return;
        };

        let message = format_notification(event);
        match sink.send_message(self.announce_channel_id, &message).await {
            Ok(()) => info!(
                "Notified new thread '{}' (id={}) in parent {}",
                event.name, event.thread_id, parent_id
            ),
            Err(e) => error!(
                "Failed to announce thread '{}' (id={}) to channel {}: {}",
                event.name, event.thread_id, self.announce_channel_id, e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct RecordingSink {
        sent: Mutex<Vec<(ChannelId, String)>>,
        fail: bool,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn sent(&self) -> Vec<(ChannelId, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AnnounceSink for RecordingSink {
        async fn send_message(
            &self,
            channel_id: ChannelId,
            content: &str,
        ) -> Result<(), serenity::Error> {
            if self.fail {
                return Err(serenity::Error::Other("channel unavailable"));
            }
            self.sent
                .lock()
                .unwrap()
                .push((channel_id, content.to_string()));
            Ok(())
        }
    }

    fn notifier() -> ThreadNotifier {
        ThreadNotifier::new(
            HashSet::from([ChannelId::new(111), ChannelId::new(222)]),
            ChannelId::new(333),
        )
    }

    fn event(parent: u64) -> ThreadEvent {
        ThreadEvent {
            thread_id: ChannelId::new(4242),
            guild_id: GuildId::new(99),
            parent_id: Some(ChannelId::new(parent)),
            name: "Release plan".to_string(),
            creator: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn announces_thread_from_watched_forum() {
        let sink = RecordingSink::new();
        notifier().handle_thread_create(&event(111), &sink).await;

        let sent = sink.sent();
        assert_eq!(sent.len(), 1);
        let (channel, message) = &sent[0];
        assert_eq!(*channel, ChannelId::new(333));
        assert!(message.contains("Release plan"));
        assert!(message.contains("alice"));
        assert!(message.contains("https://discord.com/channels/99/4242"));
    }

    #[tokio::test]
    async fn ignores_thread_from_unwatched_forum() {
        let sink = RecordingSink::new();
        notifier().handle_thread_create(&event(999), &sink).await;
        assert!(sink.sent().is_empty());
    }

    #[tokio::test]
    async fn ignores_thread_without_parent() {
        let sink = RecordingSink::new();
        let mut event = event(111);
        event.parent_id = None;
        notifier().handle_thread_create(&event, &sink).await;
        assert!(sink.sent().is_empty());
    }

    #[tokio::test]
    async fn duplicate_delivery_sends_twice() {
        let sink = RecordingSink::new();
        let notifier = notifier();
        let event = event(222);
        notifier.handle_thread_create(&event, &sink).await;
        notifier.handle_thread_create(&event, &sink).await;
        assert_eq!(sink.sent().len(), 2);
    }

    #[tokio::test]
    async fn send_failure_is_swallowed() {
        let sink = RecordingSink::failing();
        // Must return normally; the error is only logged.
        notifier().handle_thread_create(&event(111), &sink).await;
        assert!(sink.sent().is_empty());
    }

    #[test]
    fn notification_contains_name_creator_and_link() {
        let text = format_notification(&event(111));
        assert_eq!(
            text,
            "**New thread created**\nRelease plan by alice\nhttps://discord.com/channels/99/4242"
        );
    }
}
