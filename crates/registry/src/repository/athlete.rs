use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;
use validator::Validate;

use super::Registry;
use crate::dto::athlete::{CreateAthleteRequest, UpdateAthleteRequest};
use crate::error::{RegistryError, Result};
use crate::models::Athlete;

impl Registry {
    /// Registers an athlete. The minimum age is checked against `today` once,
    /// here, and never again.
    pub fn create_athlete(&mut self, request: CreateAthleteRequest, today: NaiveDate) -> Result<Uuid> {
        request.validate()?;
        self.check_disciplines(&request.disciplines)?;

        let mut athlete = Athlete::new(
            request.first_name,
            request.last_name,
            request.nationality,
            request.birth_date,
            request.gender,
            today,
        )
        .inspect_err(|e| warn!("Rejected athlete: {}", e))?;
        athlete.disciplines.extend(request.disciplines);

        let athlete_id = athlete.athlete_id;
        debug!("Created athlete {} ({})", athlete, athlete_id);
        self.athletes.insert(athlete_id, athlete);
        Ok(athlete_id)
    }

    pub fn update_athlete(&mut self, athlete_id: Uuid, request: UpdateAthleteRequest) -> Result<()> {
        request.validate()?;
        if let Some(disciplines) = &request.disciplines {
            self.check_disciplines(disciplines)?;
        }

        let athlete = self
            .athletes
            .get_mut(&athlete_id)
            .ok_or(RegistryError::NotFound("Athlete"))?;

        if let Some(first_name) = request.first_name {
            athlete.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            athlete.last_name = last_name;
        }
        if let Some(nationality) = request.nationality {
            athlete.nationality = nationality;
        }
        if let Some(disciplines) = request.disciplines {
            athlete.disciplines = disciplines.into_iter().collect();
        }
        athlete.touch();

        Ok(())
    }

    /// Removes the athlete and every result recorded for them. Returns the
    /// number of results removed.
    pub fn delete_athlete(&mut self, athlete_id: Uuid) -> Result<usize> {
        self.athletes
            .remove(&athlete_id)
            .ok_or(RegistryError::NotFound("Athlete"))?;

        let before = self.results.len();
        self.results.retain(|_, r| r.athlete_id != athlete_id);
        Ok(before - self.results.len())
    }

    pub fn get_athlete(&self, athlete_id: Uuid) -> Result<&Athlete> {
        self.athletes
            .get(&athlete_id)
            .ok_or(RegistryError::NotFound("Athlete"))
    }

    /// Finds an athlete by name (case-insensitive) and birth date.
    pub fn find_athlete(
        &self,
        first_name: &str,
        last_name: &str,
        birth_date: NaiveDate,
    ) -> Option<&Athlete> {
        self.athletes.values().find(|a| {
            a.birth_date() == birth_date
                && a.first_name.eq_ignore_ascii_case(first_name.trim())
                && a.last_name.eq_ignore_ascii_case(last_name.trim())
        })
    }

    /// Athletes ordered by last name, then first name.
    pub fn list_athletes(&self) -> Vec<&Athlete> {
        let mut athletes: Vec<_> = self.athletes.values().collect();
        athletes.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        athletes
    }

    fn check_disciplines(&self, disciplines: &[Uuid]) -> Result<()> {
        for discipline_id in disciplines {
            self.get_discipline(*discipline_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::models::Gender;

    #[test]
    fn test_create_athlete_with_disciplines() {
        let mut registry = Registry::default();
        let shot_put = registry.register_discipline("Shot Put").unwrap();

        let mut request = athlete_request("David", "Wilson", date(1990, 7, 18), Gender::Male);
        request.disciplines = vec![shot_put];
        let athlete_id = registry.create_athlete(request, today()).unwrap();

        let athlete = registry.get_athlete(athlete_id).unwrap();
        assert!(athlete.disciplines.contains(&shot_put));
    }

    #[test]
    fn test_create_athlete_rejects_unknown_discipline() {
        let mut registry = Registry::default();
        let mut request = athlete_request("David", "Wilson", date(1990, 7, 18), Gender::Male);
        request.disciplines = vec![Uuid::new_v4()];

        assert!(matches!(
            registry.create_athlete(request, today()),
            Err(RegistryError::NotFound("Discipline"))
        ));
    }

    #[test]
    fn test_create_athlete_under_ten_is_rejected() {
        let mut registry = Registry::default();
        let request = athlete_request("Young", "Runner", date(2016, 1, 16), Gender::Female);

        let err = registry.create_athlete(request, today()).unwrap_err();
        assert!(err.is_constraint_violation());
        assert!(registry.list_athletes().is_empty());
    }

    #[test]
    fn test_create_athlete_rejects_invalid_fields() {
        let mut registry = Registry::default();
        let request = athlete_request("", "Wilson", date(1990, 7, 18), Gender::Male);

        assert!(matches!(
            registry.create_athlete(request, today()),
            Err(RegistryError::Validation(_))
        ));
    }

    #[test]
    fn test_update_athlete_changes_names_only() {
        let (mut registry, athlete_id, _, _) = populated();

        registry
            .update_athlete(
                athlete_id,
                UpdateAthleteRequest {
                    nationality: Some("Austria".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let athlete = registry.get_athlete(athlete_id).unwrap();
        assert_eq!(athlete.nationality, "Austria");
        assert_eq!(athlete.birth_date(), date(1990, 7, 18));
        assert!(athlete.updated_at >= athlete.created_at);
    }

    #[test]
    fn test_list_athletes_sorted_by_last_then_first_name() {
        let mut registry = Registry::default();
        for (first, last) in [("Emma", "Johnson"), ("Anna", "Mueller"), ("Adam", "Johnson")] {
            registry
                .create_athlete(
                    athlete_request(first, last, date(1995, 2, 25), Gender::Female),
                    today(),
                )
                .unwrap();
        }

        let names: Vec<String> = registry.list_athletes().iter().map(|a| a.full_name()).collect();
        assert_eq!(names, vec!["Adam Johnson", "Emma Johnson", "Anna Mueller"]);
    }

    #[test]
    fn test_find_athlete_ignores_case() {
        let (registry, athlete_id, _, _) = populated();

        let found = registry
            .find_athlete("david", "WILSON", date(1990, 7, 18))
            .unwrap();
        assert_eq!(found.athlete_id, athlete_id);
        assert!(registry.find_athlete("David", "Wilson", date(1990, 7, 19)).is_none());
    }
}
