pub mod catalog;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use catalog::AgeCategoryCatalog;
pub use error::{RegistryError, Result};
pub use repository::{Registry, RegistryCounts};
pub use services::age::compute_age;
pub use services::classification::resolve_age_category;
pub use services::consistency::{
    ResultCandidate, ResultField, ResultValidator, Verdict, Violation, ViolationKind,
};
