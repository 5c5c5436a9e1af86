use tracing::{debug, warn};
use uuid::Uuid;
use validator::Validate;

use super::Registry;
use crate::dto::result::CreateResultRequest;
use crate::error::{RegistryError, Result};
use crate::models::{AgeCategoryId, CompetitionResult};
use crate::services::classification::resolve_age_category;
use crate::services::consistency::{ResultCandidate, ResultValidator, Verdict};

impl Registry {
    /// Stores a result once it passes field validation, reference checks and
    /// the consistency checks. A failing verdict is returned as
    /// [`RegistryError::Inconsistent`] and nothing is stored.
    pub fn record_result(&mut self, request: CreateResultRequest) -> Result<Uuid> {
        let result = self.build_result(Uuid::new_v4(), request)?;
        let result_id = result.result_id;
        debug!(
            "Recorded result {} for athlete {} at competition {}",
            result_id, result.athlete_id, result.competition_id
        );
        self.results.insert(result_id, result);
        Ok(result_id)
    }

    /// Replaces a stored result, re-running every check.
    pub fn update_result(&mut self, result_id: Uuid, request: CreateResultRequest) -> Result<()> {
        if !self.results.contains_key(&result_id) {
            return Err(RegistryError::NotFound("Result"));
        }

        let result = self.build_result(result_id, request)?;
        self.results.insert(result_id, result);
        Ok(())
    }

    /// Checks a request without storing it.
    pub fn check_result(&self, request: &CreateResultRequest) -> Result<Verdict> {
        request.validate()?;
        let athlete = self.get_athlete(request.athlete_id)?;
        let competition = self.get_competition(request.competition_id)?;
        self.get_discipline(request.discipline_id)?;

        let age_category = match request.age_category {
            Some(key) => {
                let id = self.catalog.require(key.code, key.gender)?;
                self.catalog.get(id)
            }
            None => None,
        };

        Ok(ResultValidator::validate(&ResultCandidate {
            athlete,
            competition,
            age_category,
            result_date: request.result_date,
        }))
    }

    /// The category the resolver assigns to the athlete at the competition's
    /// start date, if the catalog has one for them.
    pub fn suggest_age_category(
        &self,
        athlete_id: Uuid,
        competition_id: Uuid,
    ) -> Result<Option<AgeCategoryId>> {
        let athlete = self.get_athlete(athlete_id)?;
        let competition = self.get_competition(competition_id)?;
        let age = athlete.age_on(competition.start_date());

        Ok(resolve_age_category(age, athlete.gender(), &self.catalog)
            .and_then(|code| self.catalog.lookup(code, athlete.gender())))
    }

    pub fn get_result(&self, result_id: Uuid) -> Result<&CompetitionResult> {
        self.results
            .get(&result_id)
            .ok_or(RegistryError::NotFound("Result"))
    }

    pub fn delete_result(&mut self, result_id: Uuid) -> Result<()> {
        self.results
            .remove(&result_id)
            .map(|_| ())
            .ok_or(RegistryError::NotFound("Result"))
    }

    /// Results of one competition ordered by discipline name, then position.
    pub fn list_results_for_competition(&self, competition_id: Uuid) -> Vec<&CompetitionResult> {
        let mut results: Vec<_> = self
            .results
            .values()
            .filter(|r| r.competition_id == competition_id)
            .collect();
        results.sort_by(|a, b| {
            self.discipline_name(a.discipline_id)
                .cmp(self.discipline_name(b.discipline_id))
                .then_with(|| a.position.cmp(&b.position))
        });
        results
    }

    pub fn list_results_for_athlete(&self, athlete_id: Uuid) -> Vec<&CompetitionResult> {
        let mut results: Vec<_> = self
            .results
            .values()
            .filter(|r| r.athlete_id == athlete_id)
            .collect();
        results.sort_by_key(|r| r.result_date);
        results
    }

    fn build_result(&self, result_id: Uuid, request: CreateResultRequest) -> Result<CompetitionResult> {
        let verdict = self.check_result(&request)?;
        if !verdict.is_valid() {
            warn!("Rejected result for athlete {}: {}", request.athlete_id, verdict);
            return Err(RegistryError::Inconsistent(verdict));
        }

        let age_category = match request.age_category {
            Some(key) => Some(self.catalog.require(key.code, key.gender)?),
            None => None,
        };

        Ok(CompetitionResult {
            result_id,
            athlete_id: request.athlete_id,
            competition_id: request.competition_id,
            discipline_id: request.discipline_id,
            age_category,
            position: request.position,
            result_value: request.result_value,
            result_date: request.result_date,
        })
    }

    fn discipline_name(&self, discipline_id: Uuid) -> &str {
        self.disciplines
            .get(&discipline_id)
            .map(|d| d.name.as_str())
            .unwrap_or_default()
    }
}
