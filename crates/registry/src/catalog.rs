use std::collections::HashMap;

use crate::error::{RegistryError, Result};
use crate::models::{AgeCategory, AgeCategoryCode, AgeCategoryId, AgeCategoryKey, Gender};

/// Read-only table of age category definitions, one per `(code, gender)`.
///
/// Definitions live in an arena and are referenced by [`AgeCategoryId`], so
/// results point at a category without copying it.
#[derive(Debug, Clone, Default)]
pub struct AgeCategoryCatalog {
    entries: Vec<AgeCategory>,
    index: HashMap<AgeCategoryKey, AgeCategoryId>,
}

impl AgeCategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every code for both genders.
    pub fn seeded() -> Self {
        let mut catalog = Self::new();
        for code in AgeCategoryCode::all() {
            for gender in Gender::all() {
                catalog.push_entry(AgeCategoryKey::new(*code, *gender));
            }
        }
        catalog
    }

    pub fn from_entries<I>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = AgeCategoryKey>,
    {
        let mut catalog = Self::new();
        for key in keys {
            catalog.register(key.code, key.gender)?;
        }
        Ok(catalog)
    }

    pub fn register(&mut self, code: AgeCategoryCode, gender: Gender) -> Result<AgeCategoryId> {
        let key = AgeCategoryKey::new(code, gender);
        if self.index.contains_key(&key) {
            return Err(RegistryError::DuplicateAgeCategory { code, gender });
        }
        Ok(self.push_entry(key))
    }

    /// Caller guarantees `key` is not indexed yet.
    fn push_entry(&mut self, key: AgeCategoryKey) -> AgeCategoryId {
        let id = AgeCategoryId(self.entries.len() as u16);
        self.entries.push(AgeCategory::new(key.code, key.gender));
        self.index.insert(key, id);
        id
    }

    pub fn get(&self, id: AgeCategoryId) -> Option<&AgeCategory> {
        self.entries.get(id.index())
    }

    pub fn lookup(&self, code: AgeCategoryCode, gender: Gender) -> Option<AgeCategoryId> {
        self.index.get(&AgeCategoryKey::new(code, gender)).copied()
    }

    pub fn require(&self, code: AgeCategoryCode, gender: Gender) -> Result<AgeCategoryId> {
        self.lookup(code, gender)
            .ok_or(RegistryError::UnknownAgeCategory { code, gender })
    }

    pub fn contains(&self, code: AgeCategoryCode, gender: Gender) -> bool {
        self.lookup(code, gender).is_some()
    }

    /// Codes registered for `gender`, in registration order.
    pub fn codes_for(&self, gender: Gender) -> Vec<AgeCategoryCode> {
        self.entries
            .iter()
            .filter(|entry| entry.gender == gender)
            .map(|entry| entry.code)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgeCategoryId, &AgeCategory)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (AgeCategoryId(idx as u16), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn bounds_for(code: AgeCategoryCode) -> crate::models::AgeBounds {
        code.bounds()
    }
}
