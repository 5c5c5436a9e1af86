use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{AgeCategoryKey, CompetitionCategory};

/// Request payload for creating a new competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCompetitionRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Name must be between 1 and 150 characters"
    ))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub country: String,

    #[validate(length(min = 1, max = 50))]
    pub city: String,

    pub category: CompetitionCategory,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    /// Age categories offered at the competition.
    #[serde(default)]
    pub age_groups: Vec<AgeCategoryKey>,
}

impl CreateCompetitionRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        if self.start_date > self.end_date {
            return Err("Start date cannot be after end date.");
        }
        Ok(())
    }
}
