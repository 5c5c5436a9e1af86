pub mod age_category;
pub mod athlete;
pub mod competition;
pub mod discipline;
pub mod gender;
pub mod result;

pub use age_category::{AgeBounds, AgeCategory, AgeCategoryCode, AgeCategoryId, AgeCategoryKey};
pub use athlete::{Athlete, MINIMUM_ATHLETE_AGE};
pub use competition::{Competition, CompetitionCategory};
pub use discipline::Discipline;
pub use gender::Gender;
pub use result::CompetitionResult;
