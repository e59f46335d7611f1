use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub discord_bot_token: String,
    pub scheduler_url: String,
    pub scheduler_token: Option<String>,
    /// Absolute URL the scheduler POSTs reminder payloads back to.
    pub reminder_callback_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            discord_bot_token: env::var("DISCORD_BOT_TOKEN")
                .context("DISCORD_BOT_TOKEN must be set")?,
            scheduler_url: env::var("SCHEDULER_URL").context("SCHEDULER_URL must be set")?,
            scheduler_token: env::var("SCHEDULER_TOKEN").ok(),
            reminder_callback_url: env::var("REMINDER_CALLBACK_URL")
                .context("REMINDER_CALLBACK_URL must be set")?,
        })
    }
}
