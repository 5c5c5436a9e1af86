use chrono::NaiveDate;
use registry::models::{AgeCategoryKey, CompetitionCategory, Gender};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

pub const FORMAT_VERSION: &str = "1.0.0";

/// A self-contained dataset: reference tables, athletes, competitions and
/// their results, cross-referenced by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFormat {
    pub format_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Age category catalog. The full table is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_categories: Option<Vec<AgeCategoryKey>>,
    #[serde(default)]
    pub disciplines: Vec<String>,
    #[serde(default)]
    pub athletes: Vec<AthleteData>,
    #[serde(default)]
    pub competitions: Vec<CompetitionData>,
    #[serde(default)]
    pub results: Vec<ResultData>,
}

impl DatasetFormat {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub async fn read(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json(&content)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteData {
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    #[serde(default)]
    pub disciplines: Vec<String>,
}

impl AthleteData {
    pub fn label(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn matches(&self, reference: &AthleteRef) -> bool {
        self.first_name.eq_ignore_ascii_case(reference.first_name.trim())
            && self.last_name.eq_ignore_ascii_case(reference.last_name.trim())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionData {
    pub name: String,
    pub country: String,
    pub city: String,
    pub category: CompetitionCategory,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub age_groups: Vec<AgeCategoryKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteRef {
    pub first_name: String,
    pub last_name: String,
}

impl std::fmt::Display for AthleteRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultData {
    pub athlete: AthleteRef,
    pub competition: String,
    pub discipline: String,
    /// Resolved from the athlete's age and gender when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_category: Option<AgeCategoryKey>,
    pub position: u32,
    pub result_value: Decimal,
    /// Defaults to the competition's start date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_date: Option<NaiveDate>,
}

impl ResultData {
    pub fn label(&self) -> String {
        format!("{} - {} @ {}", self.athlete, self.discipline, self.competition)
    }
}
