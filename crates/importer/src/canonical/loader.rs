use super::models::*;
use crate::config::{LoaderConfig, UnresolvedPolicy};
use crate::{ImporterError, Result};
use registry::dto::athlete::CreateAthleteRequest;
use registry::dto::competition::CreateCompetitionRequest;
use registry::dto::result::CreateResultRequest;
use registry::models::AgeCategoryKey;
use registry::{AgeCategoryCatalog, Registry, RegistryError};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A record the loader skipped, with the reason(s) per field.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRecord {
    pub label: String,
    pub reasons: BTreeMap<String, String>,
}

impl RejectedRecord {
    fn single(label: String, field: &str, reason: impl Into<String>) -> Self {
        Self {
            label,
            reasons: BTreeMap::from([(field.to_string(), reason.into())]),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct LoadSummary {
    pub disciplines: usize,
    pub athletes_created: usize,
    pub competitions_created: usize,
    pub results_loaded: usize,
    /// Results whose category came from the resolver.
    pub results_classified: usize,
    /// Results stored without a category.
    pub results_unclassified: usize,
    pub rejected_athletes: Vec<RejectedRecord>,
    pub rejected_competitions: Vec<RejectedRecord>,
    pub rejected_results: Vec<RejectedRecord>,
    pub warnings: Vec<String>,
}

impl LoadSummary {
    pub fn has_rejections(&self) -> bool {
        !self.rejected_athletes.is_empty()
            || !self.rejected_competitions.is_empty()
            || !self.rejected_results.is_empty()
    }

    pub fn log(&self) {
        info!("  • Disciplines: {}", self.disciplines);
        info!("  • Athletes: {}", self.athletes_created);
        info!("  • Competitions: {}", self.competitions_created);
        info!(
            "  • Results: {} ({} classified automatically, {} without category)",
            self.results_loaded, self.results_classified, self.results_unclassified
        );

        for rejected in &self.rejected_athletes {
            warn!("  ✗ Athlete {}: {}", rejected.label, join_reasons(&rejected.reasons));
        }
        for rejected in &self.rejected_competitions {
            warn!("  ✗ Competition {}: {}", rejected.label, join_reasons(&rejected.reasons));
        }
        for rejected in &self.rejected_results {
            warn!("  ✗ Result {}: {}", rejected.label, join_reasons(&rejected.reasons));
        }
    }
}

fn join_reasons(reasons: &BTreeMap<String, String>) -> String {
    reasons
        .iter()
        .map(|(field, reason)| format!("{}: {}", field, reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Loads a validated dataset into a fresh [`Registry`].
///
/// Athletes, competitions and results that break a rule are reported in the
/// [`LoadSummary`] and skipped; everything else is loaded.
pub struct DatasetLoader {
    config: LoaderConfig,
}

impl DatasetLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn load(&self, dataset: DatasetFormat) -> Result<(Registry, LoadSummary)> {
        let catalog = match &dataset.age_categories {
            Some(keys) => AgeCategoryCatalog::from_entries(keys.iter().copied())?,
            None => AgeCategoryCatalog::seeded(),
        };
        info!("Loaded {} age categories", catalog.len());

        let mut registry = Registry::new(catalog);
        let mut summary = LoadSummary::default();

        let mut disciplines = HashMap::new();
        for name in &dataset.disciplines {
            let discipline_id = registry.register_discipline(name)?;
            disciplines.insert(name.trim().to_lowercase(), discipline_id);
        }
        summary.disciplines = registry.list_disciplines().len();

        let mut athletes = Vec::new();
        for athlete in &dataset.athletes {
            if let Some(athlete_id) = self.load_athlete(&mut registry, athlete, &disciplines, &mut summary)? {
                athletes.push((athlete, athlete_id));
            }
        }

        let mut competitions = HashMap::new();
        for competition in &dataset.competitions {
            if let Some(competition_id) = self.load_competition(&mut registry, competition, &mut summary)? {
                competitions.insert(competition.name.trim().to_lowercase(), competition_id);
            }
        }

        for result in &dataset.results {
            let athlete_id = athletes
                .iter()
                .find(|(data, _)| data.matches(&result.athlete))
                .map(|(_, id)| *id);
            let Some(athlete_id) = athlete_id else {
                summary.rejected_results.push(RejectedRecord::single(
                    result.label(),
                    "athlete",
                    "Athlete was not registered.",
                ));
                continue;
            };

            let Some(competition_id) = competitions
                .get(&result.competition.trim().to_lowercase())
                .copied()
            else {
                summary.rejected_results.push(RejectedRecord::single(
                    result.label(),
                    "competition",
                    "Competition was not registered.",
                ));
                continue;
            };
            let discipline_id = lookup(&disciplines, &result.discipline, "discipline")?;

            self.load_result(
                &mut registry,
                result,
                athlete_id,
                competition_id,
                discipline_id,
                &mut summary,
            )?;
        }

        Ok((registry, summary))
    }

    fn load_athlete(
        &self,
        registry: &mut Registry,
        athlete: &AthleteData,
        disciplines: &HashMap<String, Uuid>,
        summary: &mut LoadSummary,
    ) -> Result<Option<Uuid>> {
        if let Some(existing) =
            registry.find_athlete(&athlete.first_name, &athlete.last_name, athlete.birth_date)
        {
            return Ok(Some(existing.athlete_id));
        }

        let discipline_ids = athlete
            .disciplines
            .iter()
            .map(|name| lookup(disciplines, name, "discipline"))
            .collect::<Result<Vec<_>>>()?;

        let request = CreateAthleteRequest {
            first_name: athlete.first_name.clone(),
            last_name: athlete.last_name.clone(),
            nationality: athlete.nationality.clone(),
            birth_date: athlete.birth_date,
            gender: athlete.gender,
            disciplines: discipline_ids,
        };

        match registry.create_athlete(request, self.config.reference_date) {
            Ok(athlete_id) => {
                summary.athletes_created += 1;
                debug!("Created athlete {}", athlete.label());
                Ok(Some(athlete_id))
            }
            Err(e @ (RegistryError::ConstraintViolation(_) | RegistryError::Validation(_))) => {
                summary.rejected_athletes.push(RejectedRecord::single(
                    athlete.label(),
                    "athlete",
                    e.to_string(),
                ));
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn load_competition(
        &self,
        registry: &mut Registry,
        competition: &CompetitionData,
        summary: &mut LoadSummary,
    ) -> Result<Option<Uuid>> {
        let request = CreateCompetitionRequest {
            name: competition.name.clone(),
            country: competition.country.clone(),
            city: competition.city.clone(),
            category: competition.category,
            start_date: competition.start_date,
            end_date: competition.end_date,
            age_groups: competition.age_groups.clone(),
        };

        match registry.create_competition(request) {
            Ok(competition_id) => {
                summary.competitions_created += 1;
                debug!("Created competition '{}'", competition.name);
                Ok(Some(competition_id))
            }
            Err(RegistryError::Validation(errors)) => {
                summary.rejected_competitions.push(RejectedRecord {
                    label: competition.name.clone(),
                    reasons: field_reasons(&errors),
                });
                Ok(None)
            }
            Err(e @ (RegistryError::ConstraintViolation(_) | RegistryError::UnknownAgeCategory { .. })) => {
                summary.rejected_competitions.push(RejectedRecord::single(
                    competition.name.clone(),
                    "competition",
                    e.to_string(),
                ));
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn load_result(
        &self,
        registry: &mut Registry,
        result: &ResultData,
        athlete_id: Uuid,
        competition_id: Uuid,
        discipline_id: Uuid,
        summary: &mut LoadSummary,
    ) -> Result<()> {
        let label = result.label();

        let mut classified = false;
        let age_category = match result.age_category {
            Some(key) => Some(key),
            None => {
                let suggested = registry
                    .suggest_age_category(athlete_id, competition_id)?
                    .and_then(|id| registry.catalog().get(id))
                    .map(|category| category.key());
                match suggested {
                    Some(key) => {
                        debug!("Classified {} as {}", label, key.code);
                        classified = true;
                        Some(key)
                    }
                    None if self.config.unresolved == UnresolvedPolicy::Reject => {
                        summary.rejected_results.push(RejectedRecord::single(
                            label,
                            "age_category",
                            "No eligible age category for this athlete.",
                        ));
                        return Ok(());
                    }
                    None => None,
                }
            }
        };

        let not_offered = match age_category {
            Some(key) => self.not_offered_warning(registry, competition_id, key, &label)?,
            None => None,
        };

        let competition = registry.get_competition(competition_id)?;
        let request = CreateResultRequest {
            athlete_id,
            competition_id,
            discipline_id,
            age_category,
            position: result.position,
            result_value: result.result_value,
            result_date: result.result_date.unwrap_or(competition.start_date()),
        };

        match registry.record_result(request) {
            Ok(_) => {
                summary.results_loaded += 1;
                if classified {
                    summary.results_classified += 1;
                }
                if age_category.is_none() {
                    summary.results_unclassified += 1;
                    summary
                        .warnings
                        .push(format!("{}: no eligible age category, stored without one", label));
                }
                if let Some(message) = not_offered {
                    warn!("{}", message);
                    summary.warnings.push(message);
                }
                debug!("✓ Created result: {}", label);
            }
            Err(RegistryError::Inconsistent(verdict)) => {
                summary.rejected_results.push(RejectedRecord {
                    label,
                    reasons: verdict
                        .reasons()
                        .into_iter()
                        .map(|(field, reason)| (field.to_string(), reason))
                        .collect(),
                });
            }
            Err(RegistryError::Validation(errors)) => {
                summary.rejected_results.push(RejectedRecord {
                    label,
                    reasons: field_reasons(&errors),
                });
            }
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }

    /// Warning text when `key` is not among the competition's age groups.
    fn not_offered_warning(
        &self,
        registry: &Registry,
        competition_id: Uuid,
        key: AgeCategoryKey,
        label: &str,
    ) -> Result<Option<String>> {
        let competition = registry.get_competition(competition_id)?;
        let offered = registry
            .catalog()
            .lookup(key.code, key.gender)
            .is_some_and(|id| competition.offers(id));

        Ok((!offered).then(|| {
            format!(
                "{}: age category {} ({}) is not offered at '{}'",
                label, key.code, key.gender, competition.name
            )
        }))
    }
}

fn field_reasons(errors: &validator::ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect::<Vec<_>>()
                .join(", ");
            (field.to_string(), messages)
        })
        .collect()
}

fn lookup(ids: &HashMap<String, Uuid>, name: &str, kind: &str) -> Result<Uuid> {
    ids.get(&name.trim().to_lowercase()).copied().ok_or_else(|| {
        ImporterError::ImportError(format!("Unknown {} referenced: '{}'", kind, name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use registry::models::{AgeCategoryCode, CompetitionCategory, Gender};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn athlete(first: &str, last: &str, birth_date: NaiveDate, gender: Gender) -> AthleteData {
        AthleteData {
            first_name: first.to_string(),
            last_name: last.to_string(),
            nationality: "Germany".to_string(),
            birth_date,
            gender,
            disciplines: vec!["Shot Put".to_string()],
        }
    }

    fn result(first: &str, last: &str, age_category: Option<AgeCategoryKey>) -> ResultData {
        ResultData {
            athlete: AthleteRef {
                first_name: first.to_string(),
                last_name: last.to_string(),
            },
            competition: "Autumn Masters".to_string(),
            discipline: "Shot Put".to_string(),
            age_category,
            position: 1,
            result_value: Decimal::new(1875, 2),
            result_date: None,
        }
    }

    fn dataset(athletes: Vec<AthleteData>, results: Vec<ResultData>) -> DatasetFormat {
        DatasetFormat {
            format_version: FORMAT_VERSION.to_string(),
            description: None,
            age_categories: None,
            disciplines: vec!["Shot Put".to_string()],
            athletes,
            competitions: vec![CompetitionData {
                name: "Autumn Masters".to_string(),
                country: "Germany".to_string(),
                city: "Munich".to_string(),
                category: CompetitionCategory::Outdoor,
                start_date: date(2025, 11, 9),
                end_date: date(2025, 11, 11),
                age_groups: vec![
                    AgeCategoryKey::new(AgeCategoryCode::Sen, Gender::Male),
                    AgeCategoryKey::new(AgeCategoryCode::V35, Gender::Male),
                ],
            }],
            results,
        }
    }

    fn loader(unresolved: UnresolvedPolicy) -> DatasetLoader {
        DatasetLoader::new(LoaderConfig {
            reference_date: date(2026, 1, 15),
            unresolved,
        })
    }

    #[test]
    fn test_missing_category_is_resolved() {
        let data = dataset(
            vec![athlete("David", "Wilson", date(1990, 7, 18), Gender::Male)],
            vec![result("David", "Wilson", None)],
        );

        let (registry, summary) = loader(UnresolvedPolicy::Keep).load(data).unwrap();

        assert_eq!(summary.results_loaded, 1);
        assert_eq!(summary.results_classified, 1);
        assert!(summary.warnings.is_empty());

        let competition = registry.find_competition("Autumn Masters").unwrap();
        let stored = registry.list_results_for_competition(competition.competition_id)[0];
        let category = registry.catalog().get(stored.age_category.unwrap()).unwrap();
        assert_eq!(category.code, AgeCategoryCode::V35);
        assert_eq!(stored.result_date, date(2025, 11, 9));
    }

    #[test]
    fn test_inconsistent_result_is_reported_not_loaded() {
        let data = dataset(
            vec![athlete("Michael", "Brown", date(1994, 3, 10), Gender::Male)],
            vec![result(
                "Michael",
                "Brown",
                Some(AgeCategoryKey::new(AgeCategoryCode::V35, Gender::Male)),
            )],
        );

        let (registry, summary) = loader(UnresolvedPolicy::Keep).load(data).unwrap();

        assert_eq!(summary.results_loaded, 0);
        assert_eq!(registry.counts().results, 0);
        let rejected = &summary.rejected_results[0];
        assert_eq!(rejected.label, "Michael Brown - Shot Put @ Autumn Masters");
        assert_eq!(
            rejected.reasons["age_category"],
            "Athlete is 31 years old and does not fit V35."
        );
    }

    #[test]
    fn test_unresolved_policy() {
        let young = || athlete("Young", "Thrower", date(2014, 6, 1), Gender::Female);

        let (_, kept) = loader(UnresolvedPolicy::Keep)
            .load(dataset(vec![young()], vec![result("Young", "Thrower", None)]))
            .unwrap();
        assert_eq!(kept.results_loaded, 1);
        assert_eq!(kept.results_unclassified, 1);
        assert_eq!(kept.warnings.len(), 1);

        let (_, rejected) = loader(UnresolvedPolicy::Reject)
            .load(dataset(vec![young()], vec![result("Young", "Thrower", None)]))
            .unwrap();
        assert_eq!(rejected.results_loaded, 0);
        assert_eq!(
            rejected.rejected_results[0].reasons["age_category"],
            "No eligible age category for this athlete."
        );
    }

    #[test]
    fn test_underage_athlete_and_their_results_are_skipped() {
        let data = dataset(
            vec![athlete("Tiny", "Sprinter", date(2016, 3, 1), Gender::Male)],
            vec![result("Tiny", "Sprinter", None)],
        );

        let (registry, summary) = loader(UnresolvedPolicy::Keep).load(data).unwrap();

        assert_eq!(summary.athletes_created, 0);
        assert_eq!(summary.rejected_athletes.len(), 1);
        assert!(summary.rejected_athletes[0].reasons["athlete"].contains("at least 10 years old"));
        assert_eq!(summary.rejected_results[0].reasons["athlete"], "Athlete was not registered.");
        assert!(registry.list_athletes().is_empty());
        assert!(summary.has_rejections());
    }

    #[test]
    fn test_category_not_offered_is_a_warning() {
        let data = dataset(
            vec![athlete("Sarah", "Davis", date(1984, 11, 30), Gender::Male)],
            vec![result("Sarah", "Davis", None)],
        );

        let (_, summary) = loader(UnresolvedPolicy::Keep).load(data).unwrap();

        // 40 at the start date: V40 is resolved but only SEN and V35 are offered.
        assert_eq!(summary.results_loaded, 1);
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.warnings[0].contains("V40 (M) is not offered"));
    }

    #[test]
    fn test_sample_dataset_loads_cleanly() {
        let data: DatasetFormat =
            serde_json::from_str(include_str!("../../../../data/sample_dataset.json")).unwrap();
        crate::DatasetValidator::validate(&data).unwrap();

        let (registry, summary) = loader(UnresolvedPolicy::Keep).load(data).unwrap();

        assert!(!summary.has_rejections(), "{:?}", summary);
        assert!(summary.warnings.is_empty(), "{:?}", summary.warnings);
        assert_eq!(summary.athletes_created, 6);
        assert_eq!(summary.competitions_created, 3);
        assert_eq!(summary.results_loaded, 9);
        assert_eq!(summary.results_classified, 1);
        assert_eq!(registry.counts().age_categories, 24);
        assert_eq!(registry.list_disciplines().len(), 10);
    }

    #[test]
    fn test_invalid_competition_is_reported_and_load_continues() {
        let mut data = dataset(
            vec![athlete("David", "Wilson", date(1990, 7, 18), Gender::Male)],
            vec![result("David", "Wilson", None)],
        );
        data.competitions[0].city = String::new();

        let (registry, summary) = loader(UnresolvedPolicy::Keep).load(data).unwrap();

        assert_eq!(summary.competitions_created, 0);
        assert_eq!(summary.athletes_created, 1);
        let rejected = &summary.rejected_competitions[0];
        assert_eq!(rejected.label, "Autumn Masters");
        assert!(rejected.reasons.contains_key("city"));
        assert_eq!(
            summary.rejected_results[0].reasons["competition"],
            "Competition was not registered."
        );
        assert!(registry.list_competitions().is_empty());
        assert!(summary.has_rejections());
    }

    #[test]
    fn test_reversed_competition_window_is_reported() {
        let mut data = dataset(Vec::new(), Vec::new());
        data.competitions[0].end_date = date(2025, 11, 8);

        let (_, summary) = loader(UnresolvedPolicy::Keep).load(data).unwrap();

        assert_eq!(
            summary.rejected_competitions[0].reasons["competition"],
            "Constraint violation: Start date cannot be after end date."
        );
    }

    #[test]
    fn test_classified_result_rejected_by_validator_is_not_counted() {
        let mut rejected = result("David", "Wilson", None);
        rejected.result_date = Some(date(2025, 12, 1));
        let data = dataset(
            vec![athlete("David", "Wilson", date(1990, 7, 18), Gender::Male)],
            vec![rejected],
        );

        let (_, summary) = loader(UnresolvedPolicy::Keep).load(data).unwrap();

        assert_eq!(summary.results_loaded, 0);
        assert_eq!(summary.results_classified, 0);
        assert_eq!(summary.rejected_results.len(), 1);
        assert!(summary.rejected_results[0].reasons.contains_key("result_date"));
    }

    #[test]
    fn test_rejected_result_leaves_no_offering_warning() {
        let mut rejected = result(
            "Sarah",
            "Davis",
            Some(AgeCategoryKey::new(AgeCategoryCode::V40, Gender::Male)),
        );
        rejected.result_date = Some(date(2025, 12, 1));
        let data = dataset(
            vec![athlete("Sarah", "Davis", date(1984, 11, 30), Gender::Male)],
            vec![rejected],
        );

        let (_, summary) = loader(UnresolvedPolicy::Keep).load(data).unwrap();

        assert_eq!(summary.rejected_results.len(), 1);
        assert!(summary.warnings.is_empty(), "{:?}", summary.warnings);
    }
}
