use std::sync::Arc;

use log::{debug, info};
use serenity::async_trait;
use serenity::model::prelude::*;
use serenity::prelude::*;

use crate::discord::notifier::{HttpSink, ThreadEvent, ThreadNotifier};

pub struct EventHandler {
    notifier: Arc<ThreadNotifier>,
}

impl EventHandler {
    pub fn new(notifier: Arc<ThreadNotifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl serenity::client::EventHandler for EventHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected! (id={})", ready.user.name, ready.user.id);
    }

    async fn thread_create(&self, ctx: Context, thread: GuildChannel) {
        // The gateway also delivers THREAD_CREATE when the bot gains access
        // to an existing thread; only genuinely new threads get announced.
        if thread.newly_created != Some(true) {
            debug!(
                "Skipping THREAD_CREATE for existing thread '{}' (id={})",
                thread.name, thread.id
            );
            return;
        }

        let event = ThreadEvent::from_channel(&thread);
        let sink = HttpSink::new(ctx.http.clone());
        self.notifier.handle_thread_create(&event, &sink).await;
    }
}
