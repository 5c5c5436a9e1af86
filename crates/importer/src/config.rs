use chrono::{Local, NaiveDate};
use std::env;

use crate::{ImporterError, Result};

/// What the loader does with a result whose athlete fits no age category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UnresolvedPolicy {
    /// Store the result without an age category.
    #[default]
    Keep,
    /// Skip the result and report it as rejected.
    Reject,
}

impl UnresolvedPolicy {
    fn parse_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "reject" => Ok(Self::Reject),
            other => Err(ImporterError::ConfigError(format!(
                "ATHLETICS_UNRESOLVED_CATEGORY must be 'keep' or 'reject', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Date treated as "today" for the athlete minimum-age rule.
    pub reference_date: NaiveDate,
    pub unresolved: UnresolvedPolicy,
}

impl LoaderConfig {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            unresolved: UnresolvedPolicy::default(),
        }
    }

    /// Reads `ATHLETICS_REFERENCE_DATE` (ISO date, defaults to the local date)
    /// and `ATHLETICS_UNRESOLVED_CATEGORY` (`keep` or `reject`).
    pub fn from_env() -> Result<Self> {
        let reference_date = match env::var("ATHLETICS_REFERENCE_DATE") {
            Ok(raw) => raw.trim().parse::<NaiveDate>().map_err(|e| {
                ImporterError::ConfigError(format!(
                    "ATHLETICS_REFERENCE_DATE must be YYYY-MM-DD, got '{}': {}",
                    raw, e
                ))
            })?,
            Err(_) => Local::now().date_naive(),
        };

        let unresolved = match env::var("ATHLETICS_UNRESOLVED_CATEGORY") {
            Ok(raw) => UnresolvedPolicy::parse_str(&raw)?,
            Err(_) => UnresolvedPolicy::default(),
        };

        Ok(Self {
            reference_date,
            unresolved,
        })
    }
}
