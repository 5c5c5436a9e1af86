pub mod canonical;
pub mod config;
pub mod error;

pub use canonical::loader::{DatasetLoader, LoadSummary, RejectedRecord};
pub use canonical::models::DatasetFormat;
pub use canonical::validator::{DatasetValidator, ValidationReport};
pub use config::{LoaderConfig, UnresolvedPolicy};
pub use error::{ImporterError, Result};
