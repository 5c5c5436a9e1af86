mod athlete;
mod competition;
mod result;

use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::AgeCategoryCatalog;
use crate::error::{RegistryError, Result};
use crate::models::{Athlete, Competition, CompetitionResult, Discipline};

/// In-memory record store. Every write goes through the same checks the
/// entities and [`crate::ResultValidator`] enforce, so nothing inconsistent
/// is ever held.
#[derive(Debug, Clone)]
pub struct Registry {
    catalog: AgeCategoryCatalog,
    disciplines: HashMap<Uuid, Discipline>,
    athletes: HashMap<Uuid, Athlete>,
    competitions: HashMap<Uuid, Competition>,
    results: HashMap<Uuid, CompetitionResult>,
}

impl Registry {
    pub fn new(catalog: AgeCategoryCatalog) -> Self {
        Self {
            catalog,
            disciplines: HashMap::new(),
            athletes: HashMap::new(),
            competitions: HashMap::new(),
            results: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &AgeCategoryCatalog {
        &self.catalog
    }

    /// Returns the discipline called `name`, creating it on first use.
    pub fn register_discipline(&mut self, name: &str) -> Result<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::ConstraintViolation(
                "Discipline name cannot be empty".to_string(),
            ));
        }

        if let Some(existing) = self.find_discipline(name) {
            return Ok(existing.discipline_id);
        }

        let discipline = Discipline::new(name);
        let discipline_id = discipline.discipline_id;
        debug!("Registered discipline '{}'", name);
        self.disciplines.insert(discipline_id, discipline);
        Ok(discipline_id)
    }

    pub fn get_discipline(&self, discipline_id: Uuid) -> Result<&Discipline> {
        self.disciplines
            .get(&discipline_id)
            .ok_or(RegistryError::NotFound("Discipline"))
    }

    pub fn find_discipline(&self, name: &str) -> Option<&Discipline> {
        self.disciplines
            .values()
            .find(|d| d.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn list_disciplines(&self) -> Vec<&Discipline> {
        let mut disciplines: Vec<_> = self.disciplines.values().collect();
        disciplines.sort_by(|a, b| a.name.cmp(&b.name));
        disciplines
    }

    pub fn counts(&self) -> RegistryCounts {
        RegistryCounts {
            age_categories: self.catalog.len(),
            disciplines: self.disciplines.len(),
            athletes: self.athletes.len(),
            competitions: self.competitions.len(),
            results: self.results.len(),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(AgeCategoryCatalog::seeded())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RegistryCounts {
    pub age_categories: usize,
    pub disciplines: usize,
    pub athletes: usize,
    pub competitions: usize,
    pub results: usize,
}
