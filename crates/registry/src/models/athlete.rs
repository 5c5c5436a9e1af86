use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use uuid::Uuid;

use super::Gender;
use crate::error::{RegistryError, Result};
use crate::services::age::compute_age;

/// Youngest age, in whole years at creation time, an athlete may be registered with.
pub const MINIMUM_ATHLETE_AGE: i32 = 10;

/// Birth date and gender are fixed at creation; they feed every later
/// consistency check, so they have no setters.
#[derive(Debug, Clone, Serialize)]
pub struct Athlete {
    pub athlete_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    birth_date: NaiveDate,
    gender: Gender,
    pub disciplines: BTreeSet<Uuid>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Athlete {
    /// Builds a new athlete, rejecting anyone younger than
    /// [`MINIMUM_ATHLETE_AGE`] on `today`.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        nationality: impl Into<String>,
        birth_date: NaiveDate,
        gender: Gender,
        today: NaiveDate,
    ) -> Result<Self> {
        let age = compute_age(birth_date, today);
        if age < MINIMUM_ATHLETE_AGE {
            return Err(RegistryError::ConstraintViolation(format!(
                "Athlete must be at least {} years old.",
                MINIMUM_ATHLETE_AGE
            )));
        }

        let now = Utc::now().naive_utc();
        Ok(Self {
            athlete_id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            nationality: nationality.into(),
            birth_date,
            gender,
            disciplines: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age_on(&self, date: NaiveDate) -> i32 {
        compute_age(self.birth_date, date)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now().naive_utc();
    }
}

impl std::fmt::Display for Athlete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_athlete_at_minimum_age() {
        let athlete = Athlete::new(
            "Ivan",
            "Ivanov",
            "Bulgarian",
            date(2016, 5, 1),
            Gender::Male,
            date(2026, 5, 1),
        )
        .unwrap();

        assert_eq!(athlete.age_on(date(2026, 5, 1)), 10);
        assert_eq!(athlete.full_name(), "Ivan Ivanov");
        assert!(athlete.disciplines.is_empty());
    }

    #[test]
    fn test_new_athlete_below_minimum_age_is_rejected() {
        let result = Athlete::new(
            "Ivan",
            "Ivanov",
            "Bulgarian",
            date(2016, 5, 2),
            Gender::Male,
            date(2026, 5, 1),
        );

        match result {
            Err(RegistryError::ConstraintViolation(msg)) => {
                assert_eq!(msg, "Athlete must be at least 10 years old.")
            }
            other => panic!("expected constraint violation, got {:?}", other),
        }
    }
}
