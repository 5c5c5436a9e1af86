use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;
use validator::Validate;

use super::Registry;
use crate::dto::competition::CreateCompetitionRequest;
use crate::error::{RegistryError, Result};
use crate::models::Competition;

impl Registry {
    pub fn create_competition(&mut self, request: CreateCompetitionRequest) -> Result<Uuid> {
        request.validate()?;
        request.validate_dates().map_err(|msg| {
            warn!("Rejected competition '{}': {}", request.name, msg);
            RegistryError::ConstraintViolation(msg.to_string())
        })?;

        let age_groups = request
            .age_groups
            .iter()
            .map(|key| self.catalog.require(key.code, key.gender))
            .collect::<Result<Vec<_>>>()?;

        let mut competition = Competition::new(
            request.name,
            request.country,
            request.city,
            request.category,
            request.start_date,
            request.end_date,
        )?;
        competition.age_groups.extend(age_groups);

        let competition_id = competition.competition_id;
        debug!(
            "Created competition '{}' ({} to {})",
            competition.name,
            competition.start_date(),
            competition.end_date()
        );
        self.competitions.insert(competition_id, competition);
        Ok(competition_id)
    }

    /// Moves the competition window. Results already recorded are not
    /// re-checked against the new window.
    pub fn reschedule_competition(
        &mut self,
        competition_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<()> {
        let competition = self
            .competitions
            .get_mut(&competition_id)
            .ok_or(RegistryError::NotFound("Competition"))?;
        competition.reschedule(start_date, end_date)
    }

    /// Removes the competition and its results. Returns the number of
    /// results removed.
    pub fn delete_competition(&mut self, competition_id: Uuid) -> Result<usize> {
        self.competitions
            .remove(&competition_id)
            .ok_or(RegistryError::NotFound("Competition"))?;

        let before = self.results.len();
        self.results.retain(|_, r| r.competition_id != competition_id);
        Ok(before - self.results.len())
    }

    pub fn get_competition(&self, competition_id: Uuid) -> Result<&Competition> {
        self.competitions
            .get(&competition_id)
            .ok_or(RegistryError::NotFound("Competition"))
    }

    pub fn find_competition(&self, name: &str) -> Option<&Competition> {
        self.competitions
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Competitions ordered by start date, then name.
    pub fn list_competitions(&self) -> Vec<&Competition> {
        let mut competitions: Vec<_> = self.competitions.values().collect();
        competitions.sort_by(|a, b| {
            a.start_date()
                .cmp(&b.start_date())
                .then_with(|| a.name.cmp(&b.name))
        });
        competitions
    }
}
