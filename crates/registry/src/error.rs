use thiserror::Error;

use crate::models::{AgeCategoryCode, Gender};
use crate::services::consistency::Verdict;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Age category {code} ({gender}) is already registered")]
    DuplicateAgeCategory { code: AgeCategoryCode, gender: Gender },

    #[error("Age category {code} ({gender}) is not in the catalog")]
    UnknownAgeCategory { code: AgeCategoryCode, gender: Gender },

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Inconsistent result: {0}")]
    Inconsistent(Verdict),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            RegistryError::ConstraintViolation(_) | RegistryError::DuplicateAgeCategory { .. }
        )
    }

    /// The verdict carried by an [`RegistryError::Inconsistent`] rejection.
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            RegistryError::Inconsistent(verdict) => Some(verdict),
            _ => None,
        }
    }
}
