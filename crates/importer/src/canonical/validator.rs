use super::models::{DatasetFormat, FORMAT_VERSION};
use crate::{ImporterError, Result};
use registry::AgeCategoryCatalog;
use std::collections::HashSet;
use tracing::warn;

/// Structural checks run before anything is loaded. Consistency of each
/// result (dates, age, gender) is left to the registry at load time.
pub struct DatasetValidator;

impl DatasetValidator {
    pub fn validate(dataset: &DatasetFormat) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if dataset.format_version != FORMAT_VERSION {
            report.errors.push(format!(
                "Unsupported format version: {}. Expected {}",
                dataset.format_version, FORMAT_VERSION
            ));
        }

        let catalog = match &dataset.age_categories {
            Some(keys) => {
                let mut seen = HashSet::new();
                for key in keys {
                    if !seen.insert(*key) {
                        report.errors.push(format!(
                            "Duplicate age category: {} ({})",
                            key.code, key.gender
                        ));
                    }
                }
                AgeCategoryCatalog::from_entries(seen.into_iter()).unwrap_or_default()
            }
            None => AgeCategoryCatalog::seeded(),
        };

        let mut discipline_names = HashSet::new();
        for name in &dataset.disciplines {
            if name.trim().is_empty() {
                report
                    .errors
                    .push("Discipline name cannot be empty".to_string());
            } else if !discipline_names.insert(name.trim().to_lowercase()) {
                report
                    .warnings
                    .push(format!("Discipline '{}' is listed twice", name));
            }
        }

        let mut athlete_keys = HashSet::new();
        for athlete in &dataset.athletes {
            let label = athlete.label();

            if athlete.first_name.trim().is_empty() || athlete.last_name.trim().is_empty() {
                report
                    .errors
                    .push(format!("Athlete '{}' has an empty name", label.trim()));
            }
            for (field, value) in [
                ("first_name", &athlete.first_name),
                ("last_name", &athlete.last_name),
                ("nationality", &athlete.nationality),
            ] {
                check_max_length(&mut report, "Athlete", &label, field, value, 50);
            }

            if catalog.codes_for(athlete.gender).is_empty() {
                report.warnings.push(format!(
                    "Athlete '{}': the catalog has no age categories for gender {}",
                    label, athlete.gender
                ));
            }

            if !athlete_keys.insert((
                athlete.first_name.to_lowercase(),
                athlete.last_name.to_lowercase(),
            )) {
                report.errors.push(format!(
                    "Athlete '{}' appears more than once; results could not tell them apart",
                    label
                ));
            }

            for discipline in &athlete.disciplines {
                if !discipline_names.contains(&discipline.trim().to_lowercase()) {
                    report.errors.push(format!(
                        "Athlete '{}' practises unknown discipline: '{}'",
                        label, discipline
                    ));
                }
            }

            if athlete.disciplines.is_empty() {
                report
                    .warnings
                    .push(format!("Athlete '{}' has no disciplines", label));
            }
        }

        let mut competition_names = HashSet::new();
        for competition in &dataset.competitions {
            if competition.name.trim().is_empty() {
                report
                    .errors
                    .push("Competition name is required".to_string());
            }
            check_max_length(
                &mut report,
                "Competition",
                &competition.name,
                "name",
                &competition.name,
                150,
            );
            for (field, value) in [
                ("country", &competition.country),
                ("city", &competition.city),
            ] {
                if value.trim().is_empty() {
                    report.errors.push(format!(
                        "Competition '{}' has an empty {}",
                        competition.name, field
                    ));
                }
                check_max_length(&mut report, "Competition", &competition.name, field, value, 50);
            }
            if !competition_names.insert(competition.name.trim().to_lowercase()) {
                report.errors.push(format!(
                    "Duplicate competition name: '{}'",
                    competition.name
                ));
            }
            if competition.start_date > competition.end_date {
                report.errors.push(format!(
                    "Competition '{}' starts after it ends ({} > {})",
                    competition.name, competition.start_date, competition.end_date
                ));
            }

            for group in &competition.age_groups {
                if !catalog.contains(group.code, group.gender) {
                    report.errors.push(format!(
                        "Competition '{}' offers age category {} ({}) missing from the catalog",
                        competition.name, group.code, group.gender
                    ));
                }
            }

            if competition.age_groups.is_empty() {
                report.warnings.push(format!(
                    "Competition '{}' declares no age groups",
                    competition.name
                ));
            }
        }

        for result in &dataset.results {
            let label = result.label();

            if !dataset.athletes.iter().any(|a| a.matches(&result.athlete)) {
                report
                    .errors
                    .push(format!("Result '{}' references an unknown athlete", label));
            }
            if !competition_names.contains(&result.competition.trim().to_lowercase()) {
                report
                    .errors
                    .push(format!("Result '{}' references an unknown competition", label));
            }
            if !discipline_names.contains(&result.discipline.trim().to_lowercase()) {
                report
                    .errors
                    .push(format!("Result '{}' references an unknown discipline", label));
            }
            if result.position < 1 {
                report.errors.push(format!(
                    "Result '{}' has invalid position {}. Position must be >= 1",
                    label, result.position
                ));
            }
            if result.result_value.is_sign_negative() {
                report
                    .errors
                    .push(format!("Result '{}' has a negative value", label));
            }
            if let Some(key) = result.age_category
                && !catalog.contains(key.code, key.gender)
            {
                report.errors.push(format!(
                    "Result '{}' uses age category {} ({}) missing from the catalog",
                    label, key.code, key.gender
                ));
            }
        }

        if dataset.results.is_empty() {
            report.warnings.push("Dataset has no results".to_string());
        }

        if !report.errors.is_empty() {
            Err(ImporterError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

fn check_max_length(
    report: &mut ValidationReport,
    kind: &str,
    label: &str,
    field: &str,
    value: &str,
    max: usize,
) {
    let length = value.chars().count();
    if length > max {
        report.errors.push(format!(
            "{} '{}' has a {} of {} characters. Maximum is {}",
            kind, label, field, length, max
        ));
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}
