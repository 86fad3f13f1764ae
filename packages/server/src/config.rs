use anyhow::{Context, Result};
use chrono::NaiveDate;
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Date contribution tracking began, independent of any member's join date.
    pub contribution_epoch: NaiveDate,
    pub rates: RateTable,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let contribution_epoch = match env::var("CONTRIBUTION_EPOCH") {
            Ok(raw) => raw
                .parse()
                .context("CONTRIBUTION_EPOCH must be a YYYY-MM-DD date")?,
            Err(_) => default_epoch(),
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            contribution_epoch,
            rates: RateTable::default(),
        })
    }
}

fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("default epoch is a valid date")
}

/// One age bracket of the contribution rate table.
///
/// Brackets are ordered and matched first-to-last on the inclusive upper
/// bound; `max_age: None` marks the open-ended final bracket.
#[derive(Debug, Clone)]
pub struct RateTier {
    pub max_age: Option<i32>,
    pub monthly_rate: i64,
}

/// Age-dependent monthly contribution rates, read-only at runtime.
#[derive(Debug, Clone)]
pub struct RateTable {
    tiers: Vec<RateTier>,
}

impl RateTable {
    pub fn new(tiers: Vec<RateTier>) -> Self {
        Self { tiers }
    }

    /// Monthly rate for a member of the given age in whole years.
    ///
    /// Ages below the first bracket (including negative ages from
    /// inconsistent input data) fall into the first bracket.
    pub fn rate_for_age(&self, age: i32) -> i64 {
        self.tiers
            .iter()
            .find(|tier| tier.max_age.map_or(true, |max| age <= max))
            .map(|tier| tier.monthly_rate)
            .unwrap_or(0)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new(vec![
            RateTier { max_age: Some(19), monthly_rate: 5 },
            RateTier { max_age: Some(30), monthly_rate: 10 },
            RateTier { max_age: None, monthly_rate: 20 },
        ])
    }
}
