use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AgeCategoryId;

/// A stored competition result. `result_value` is a time in seconds or a
/// distance in meters depending on the discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionResult {
    pub result_id: Uuid,
    pub athlete_id: Uuid,
    pub competition_id: Uuid,
    pub discipline_id: Uuid,
    pub age_category: Option<AgeCategoryId>,
    pub position: u32,
    pub result_value: Decimal,
    pub result_date: NaiveDate,
}
