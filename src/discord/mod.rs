// src/discord/mod.rs
mod client;
mod events;
pub mod notifier;
pub use client::DiscordClient;
