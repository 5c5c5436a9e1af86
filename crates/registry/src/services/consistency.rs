use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{AgeCategory, Athlete, Competition};
use crate::services::age::compute_age;

/// Field of a result that a consistency check can fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultField {
    ResultDate,
    AgeCategory,
}

impl ResultField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResultDate => "result_date",
            Self::AgeCategory => "age_category",
        }
    }
}

impl std::fmt::Display for ResultField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    OutsideCompetitionWindow,
    AgeOutOfBounds,
    GenderMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: ResultField,
    pub kind: ViolationKind,
    pub reason: String,
}

/// Outcome of [`ResultValidator::validate`]. Empty means the result is
/// consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verdict {
    violations: Vec<Violation>,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn kinds(&self) -> Vec<ViolationKind> {
        self.violations.iter().map(|v| v.kind).collect()
    }

    /// Failed field name to reason. Several reasons on one field are joined
    /// with a space.
    pub fn reasons(&self) -> BTreeMap<&'static str, String> {
        let mut reasons: BTreeMap<&'static str, String> = BTreeMap::new();
        for violation in &self.violations {
            reasons
                .entry(violation.field.as_str())
                .and_modify(|existing| {
                    existing.push(' ');
                    existing.push_str(&violation.reason);
                })
                .or_insert_with(|| violation.reason.clone());
        }
        reasons
    }

    pub fn reason(&self, field: ResultField) -> Option<String> {
        self.reasons().remove(field.as_str())
    }

    fn push(&mut self, field: ResultField, kind: ViolationKind, reason: String) {
        self.violations.push(Violation {
            field,
            kind,
            reason,
        });
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            return write!(f, "no violations");
        }

        let rendered = self
            .reasons()
            .iter()
            .map(|(field, reason)| format!("{}: {}", field, reason))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", rendered)
    }
}

/// The values a result is checked against.
#[derive(Debug, Clone, Copy)]
pub struct ResultCandidate<'a> {
    pub athlete: &'a Athlete,
    pub competition: &'a Competition,
    pub age_category: Option<&'a AgeCategory>,
    pub result_date: NaiveDate,
}

pub struct ResultValidator;

impl ResultValidator {
    /// Runs every check and collects all failures, so a caller can report
    /// them together. Age is taken at the competition's start date. With no
    /// age category, only the date check applies.
    pub fn validate(candidate: &ResultCandidate<'_>) -> Verdict {
        let mut verdict = Verdict::default();
        let competition = candidate.competition;

        if !competition.contains_date(candidate.result_date) {
            verdict.push(
                ResultField::ResultDate,
                ViolationKind::OutsideCompetitionWindow,
                format!(
                    "Result date must be within the competition dates ({} to {}).",
                    competition.start_date(),
                    competition.end_date()
                ),
            );
        }

        if let Some(age_category) = candidate.age_category {
            let athlete_age = compute_age(
                candidate.athlete.birth_date(),
                competition.start_date(),
            );

            if !age_category.bounds().contains(athlete_age) {
                verdict.push(
                    ResultField::AgeCategory,
                    ViolationKind::AgeOutOfBounds,
                    format!(
                        "Athlete is {} years old and does not fit {}.",
                        athlete_age, age_category.code
                    ),
                );
            }

            if candidate.athlete.gender() != age_category.gender {
                verdict.push(
                    ResultField::AgeCategory,
                    ViolationKind::GenderMismatch,
                    "Athlete gender does not match age category gender.".to_string(),
                );
            }
        }

        verdict
    }
}
