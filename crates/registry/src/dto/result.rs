use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::AgeCategoryKey;

/// Whole-number digits allowed in a result value (7 digits, 2 of them decimals).
const RESULT_VALUE_MAX_WHOLE_DIGITS: u32 = 5;
const RESULT_VALUE_MAX_DECIMALS: u32 = 2;

/// Request payload for recording or replacing a result
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateResultRequest {
    pub athlete_id: Uuid,

    pub competition_id: Uuid,

    pub discipline_id: Uuid,

    /// Left empty when no category applies.
    pub age_category: Option<AgeCategoryKey>,

    #[validate(range(min = 1, message = "Position must be a positive number"))]
    pub position: u32,

    /// Time in seconds or distance in meters
    #[validate(custom(function = "validate_result_value"))]
    pub result_value: Decimal,

    pub result_date: NaiveDate,
}

fn validate_result_value(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_result_value"));
    }

    let normalized = value.normalize();
    if normalized.scale() > RESULT_VALUE_MAX_DECIMALS {
        return Err(validator::ValidationError::new("too_many_decimal_places"));
    }

    let limit = Decimal::from(10u64.pow(RESULT_VALUE_MAX_WHOLE_DIGITS));
    if normalized.trunc() >= limit {
        return Err(validator::ValidationError::new("too_many_digits"));
    }

    Ok(())
}
