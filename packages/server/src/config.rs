use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Cron schedule for the placement expiry sweep (6-field cron syntax).
    pub expiry_sweep_schedule: String,
    /// Age threshold (days) for the bulk purge of old listings.
    pub listing_purge_age_days: i64,
    /// Run the listing purge on a schedule. Off by default: the purge
    /// hard-deletes listings, so it is normally triggered by an admin
    /// through the purge endpoint.
    pub listing_purge_enabled: bool,
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "TRUE" | "True" | "yes" | "on")
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
            expiry_sweep_schedule: env::var("EXPIRY_SWEEP_SCHEDULE")
                .unwrap_or_else(|_| "0 0 * * * *".to_string()),
            listing_purge_age_days: env::var("LISTING_PURGE_AGE_DAYS")
                .unwrap_or_else(|_| "21".to_string())
                .parse()
                .context("LISTING_PURGE_AGE_DAYS must be a valid number")?,
            listing_purge_enabled: env::var("LISTING_PURGE_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag("true"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
