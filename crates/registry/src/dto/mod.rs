pub mod athlete;
pub mod competition;
pub mod result;
