use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    pub discipline_id: Uuid,
    pub name: String,
}

impl Discipline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            discipline_id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
