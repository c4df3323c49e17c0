// src/config.rs

use std::collections::HashSet;
use std::env;

use serenity::model::prelude::*;
use thiserror::Error;

const TOKEN_VAR: &str = "DISCORD_BOT_TOKEN";
const FORUM_IDS_VAR: &str = "FORUM_CHANNEL_IDS";
const ANNOUNCE_VAR: &str = "ANNOUNCE_CHANNEL_ID";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set or empty")]
    Missing(&'static str),

    #[error("{var} contains a value that is not a channel id: '{value}'")]
    InvalidChannelId { var: &'static str, value: String },

    #[error("{0} does not contain any channel ids")]
    EmptyChannelList(&'static str),
}

/// Startup configuration, read once from the environment and immutable
/// for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub forum_channel_ids: HashSet<ChannelId>,
    pub announce_channel_id: ChannelId,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = read_var(TOKEN_VAR)?;
        let forum_raw = read_var(FORUM_IDS_VAR)?;
        let announce_raw = read_var(ANNOUNCE_VAR)?;
        Self::from_values(token, &forum_raw, &announce_raw)
    }

    fn from_values(
        discord_token: String,
        forum_raw: &str,
        announce_raw: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            discord_token,
            forum_channel_ids: parse_channel_list(FORUM_IDS_VAR, forum_raw)?,
            announce_channel_id: parse_channel_id(ANNOUNCE_VAR, announce_raw.trim())?,
        })
    }
}

fn read_var(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(var)),
    }
}

/// Parses a comma-separated list of channel ids. Whitespace around entries
/// is tolerated and empty entries between commas are skipped.
fn parse_channel_list(var: &'static str, raw: &str) -> Result<HashSet<ChannelId>, ConfigError> {
    let mut ids = HashSet::new();
    for chunk in raw.split(',') {
        let entry = chunk.trim();
        if entry.is_empty() {
            continue;
        }
        ids.insert(parse_channel_id(var, entry)?);
    }
    if ids.is_empty() {
        return Err(ConfigError::EmptyChannelList(var));
    }
    Ok(ids)
}

fn parse_channel_id(var: &'static str, entry: &str) -> Result<ChannelId, ConfigError> {
    // Discord snowflakes are non-zero 64-bit integers.
    match entry.parse::<u64>() {
        Ok(id) if id != 0 => Ok(ChannelId::new(id)),
        _ => Err(ConfigError::InvalidChannelId {
            var,
            value: entry.to_string(),
        }),
    }
}
