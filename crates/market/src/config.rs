use core::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;

use marketplace_core::{DomainError, DomainResult};

pub const ENV_OVERSTOCK_THRESHOLD: &str = "MARKET_OVERSTOCK_THRESHOLD";
pub const ENV_OVERSTOCK_MIN_VENDORS: &str = "MARKET_OVERSTOCK_MIN_VENDORS";
pub const ENV_DATE_FORMAT: &str = "MARKET_DATE_FORMAT";

const DEFAULT_OVERSTOCK_THRESHOLD: u64 = 50;
const DEFAULT_OVERSTOCK_MIN_VENDORS: usize = 2;
const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Tunables for market-wide views.
///
/// An item is overstocked when its aggregate quantity is strictly greater
/// than `overstock_threshold` and at least `overstock_min_vendors` distinct
/// vendors stock it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketConfig {
    overstock_threshold: u64,
    overstock_min_vendors: usize,
    date_format: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            overstock_threshold: DEFAULT_OVERSTOCK_THRESHOLD,
            overstock_min_vendors: DEFAULT_OVERSTOCK_MIN_VENDORS,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl MarketConfig {
    pub fn new(
        overstock_threshold: u64,
        overstock_min_vendors: usize,
        date_format: impl Into<String>,
    ) -> DomainResult<Self> {
        let date_format = date_format.into();
        if overstock_min_vendors == 0 {
            return Err(DomainError::invalid_config(
                "overstock_min_vendors must be at least 1",
            ));
        }
        validate_date_format(&date_format)?;
        Ok(Self {
            overstock_threshold,
            overstock_min_vendors,
            date_format,
        })
    }

    /// Read overrides from the process environment, defaulting unset keys.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading keys through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let defaults = Self::default();

        let overstock_threshold = match lookup(ENV_OVERSTOCK_THRESHOLD) {
            Some(raw) => parse_var(ENV_OVERSTOCK_THRESHOLD, &raw)?,
            None => defaults.overstock_threshold,
        };
        let overstock_min_vendors = match lookup(ENV_OVERSTOCK_MIN_VENDORS) {
            Some(raw) => parse_var(ENV_OVERSTOCK_MIN_VENDORS, &raw)?,
            None => defaults.overstock_min_vendors,
        };
        let date_format = lookup(ENV_DATE_FORMAT).unwrap_or_else(|| {
            tracing::debug!("{ENV_DATE_FORMAT} not set; using {DEFAULT_DATE_FORMAT}");
            defaults.date_format
        });

        Self::new(overstock_threshold, overstock_min_vendors, date_format)
    }

    pub fn overstock_threshold(&self) -> u64 {
        self.overstock_threshold
    }

    pub fn overstock_min_vendors(&self) -> usize {
        self.overstock_min_vendors
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }
}

fn parse_var<T>(key: &str, raw: &str) -> DomainResult<T>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| {
        tracing::warn!(key, value = raw, "rejected market configuration value");
        DomainError::invalid_config(format!("{key}={raw:?}: {e}"))
    })
}

// Formatting fails at display time for unknown specifiers and for time or
// offset fields a bare date cannot supply, so patterns are trial-rendered once.
fn validate_date_format(format: &str) -> DomainResult<()> {
    if format.is_empty() {
        return Err(DomainError::invalid_config("date format cannot be empty"));
    }
    let mut rendered = String::new();
    write!(rendered, "{}", NaiveDate::default().format(format)).map_err(|_| {
        DomainError::invalid_config(format!("{format:?} is not a valid date format"))
    })?;
    Ok(())
}
