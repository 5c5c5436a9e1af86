use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Gender;

/// Request payload for registering an athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAthleteRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "First name must be between 1 and 50 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 50,
        message = "Last name must be between 1 and 50 characters"
    ))]
    pub last_name: String,

    #[validate(length(max = 50, message = "Nationality cannot exceed 50 characters"))]
    pub nationality: String,

    pub birth_date: NaiveDate,

    pub gender: Gender,

    #[serde(default)]
    pub disciplines: Vec<Uuid>,
}

/// Request payload for editing an athlete. Birth date and gender cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAthleteRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,

    #[validate(length(max = 50))]
    pub nationality: Option<String>,

    pub disciplines: Option<Vec<Uuid>>,
}
