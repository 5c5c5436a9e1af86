use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::AgeCategoryId;
use crate::error::{RegistryError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompetitionCategory {
    Indoor,
    Outdoor,
}

impl CompetitionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indoor => "INDOOR",
            Self::Outdoor => "OUTDOOR",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Indoor => "Indoor",
            Self::Outdoor => "Outdoor",
        }
    }
}

impl std::fmt::Display for CompetitionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A competition spanning `start_date..=end_date`. The window is only ever
/// set through [`Competition::new`] or [`Competition::reschedule`], both of
/// which reject a reversed range.
#[derive(Debug, Clone, Serialize)]
pub struct Competition {
    pub competition_id: Uuid,
    pub name: String,
    pub country: String,
    pub city: String,
    pub category: CompetitionCategory,
    pub age_groups: BTreeSet<AgeCategoryId>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Competition {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        city: impl Into<String>,
        category: CompetitionCategory,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self> {
        check_window(start_date, end_date)?;

        Ok(Self {
            competition_id: Uuid::new_v4(),
            name: name.into(),
            country: country.into(),
            city: city.into(),
            category,
            age_groups: BTreeSet::new(),
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn offers(&self, age_category: AgeCategoryId) -> bool {
        self.age_groups.contains(&age_category)
    }

    pub fn reschedule(&mut self, start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
        check_window(start_date, end_date)?;
        self.start_date = start_date;
        self.end_date = end_date;
        Ok(())
    }
}

impl std::fmt::Display for Competition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} is in country {} and is {}",
            self.name, self.country, self.category
        )
    }
}

fn check_window(start_date: NaiveDate, end_date: NaiveDate) -> Result<()> {
    if start_date > end_date {
        return Err(RegistryError::ConstraintViolation(
            "Start date cannot be after end date.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn indoor(start: NaiveDate, end: NaiveDate) -> Result<Competition> {
        Competition::new(
            "European Indoor Championships",
            "Germany",
            "Berlin",
            CompetitionCategory::Indoor,
            start,
            end,
        )
    }

    #[test]
    fn test_single_day_competition_is_allowed() {
        let competition = indoor(date(2025, 11, 10), date(2025, 11, 10)).unwrap();
        assert!(competition.contains_date(date(2025, 11, 10)));
        assert!(!competition.contains_date(date(2025, 11, 11)));
    }

    #[test]
    fn test_reversed_window_is_rejected() {
        let result = indoor(date(2025, 11, 11), date(2025, 11, 9));
        assert!(matches!(result, Err(RegistryError::ConstraintViolation(_))));
    }

    #[test]
    fn test_reschedule_keeps_old_window_on_failure() {
        let mut competition = indoor(date(2025, 11, 9), date(2025, 11, 11)).unwrap();

        assert!(competition.reschedule(date(2025, 12, 2), date(2025, 12, 1)).is_err());
        assert_eq!(competition.start_date(), date(2025, 11, 9));
        assert_eq!(competition.end_date(), date(2025, 11, 11));

        competition
            .reschedule(date(2025, 12, 1), date(2025, 12, 2))
            .unwrap();
        assert_eq!(competition.start_date(), date(2025, 12, 1));
    }
}
