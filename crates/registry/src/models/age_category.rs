use serde::{Deserialize, Serialize};

use super::Gender;
use crate::error::RegistryError;

/// Age category codes. Bounds are a pure function of the code; gender only
/// takes part in a category's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgeCategoryCode {
    U14,
    U16,
    U18,
    U20,
    U23,
    Sen,
    V35,
    V40,
    V45,
    V50,
    V55,
    V60,
}

impl AgeCategoryCode {
    /// Veteran codes in the order the resolver scans them (oldest first).
    pub const VETERAN_SCAN: [AgeCategoryCode; 6] =
        [Self::V60, Self::V55, Self::V50, Self::V45, Self::V40, Self::V35];

    /// Open codes in the order the resolver scans them (youngest first).
    pub const GENERAL_SCAN: [AgeCategoryCode; 6] =
        [Self::U14, Self::U16, Self::U18, Self::U20, Self::U23, Self::Sen];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U14 => "U14",
            Self::U16 => "U16",
            Self::U18 => "U18",
            Self::U20 => "U20",
            Self::U23 => "U23",
            Self::Sen => "SEN",
            Self::V35 => "V35",
            Self::V40 => "V40",
            Self::V45 => "V45",
            Self::V50 => "V50",
            Self::V55 => "V55",
            Self::V60 => "V60",
        }
    }

    pub fn all() -> &'static [AgeCategoryCode] {
        &[
            Self::U14,
            Self::U16,
            Self::U18,
            Self::U20,
            Self::U23,
            Self::Sen,
            Self::V35,
            Self::V40,
            Self::V45,
            Self::V50,
            Self::V55,
            Self::V60,
        ]
    }

    /// Inclusive age bounds for this code.
    ///
    /// V35 is capped at 39 even though the veteran scan would also accept
    /// an uncapped V35; the table is kept exactly as published.
    pub fn bounds(&self) -> AgeBounds {
        match self {
            Self::U14 => AgeBounds::new(12, Some(14)),
            Self::U16 => AgeBounds::new(14, Some(16)),
            Self::U18 => AgeBounds::new(16, Some(18)),
            Self::U20 => AgeBounds::new(18, Some(20)),
            Self::U23 => AgeBounds::new(20, Some(23)),
            Self::Sen => AgeBounds::new(20, None),
            Self::V35 => AgeBounds::new(35, Some(39)),
            Self::V40 => AgeBounds::new(40, Some(44)),
            Self::V45 => AgeBounds::new(45, Some(49)),
            Self::V50 => AgeBounds::new(50, Some(54)),
            Self::V55 => AgeBounds::new(55, Some(59)),
            Self::V60 => AgeBounds::new(60, None),
        }
    }

    fn parse_str(s: &str) -> Result<Self, RegistryError> {
        let normalized = s.trim().to_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|code| code.as_str() == normalized)
            .ok_or_else(|| {
                RegistryError::ConstraintViolation(format!(
                    "Unknown age category: '{}'. Available: {}",
                    s,
                    Self::all()
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

impl TryFrom<&str> for AgeCategoryCode {
    type Error = RegistryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_str(value)
    }
}

impl std::str::FromStr for AgeCategoryCode {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for AgeCategoryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive `[min_age, max_age]` range; `max_age = None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBounds {
    pub min_age: i32,
    pub max_age: Option<i32>,
}

impl AgeBounds {
    pub const fn new(min_age: i32, max_age: Option<i32>) -> Self {
        Self { min_age, max_age }
    }

    pub fn contains(&self, age: i32) -> bool {
        age >= self.min_age && self.max_age.is_none_or(|max| age <= max)
    }
}

/// Index of a definition inside an [`crate::catalog::AgeCategoryCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgeCategoryId(pub(crate) u16);

impl AgeCategoryId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A registered `(code, gender)` pair together with its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeCategory {
    pub code: AgeCategoryCode,
    pub gender: Gender,
    pub min_age: i32,
    pub max_age: Option<i32>,
}

impl AgeCategory {
    pub fn new(code: AgeCategoryCode, gender: Gender) -> Self {
        let bounds = code.bounds();
        Self {
            code,
            gender,
            min_age: bounds.min_age,
            max_age: bounds.max_age,
        }
    }

    pub fn bounds(&self) -> AgeBounds {
        AgeBounds::new(self.min_age, self.max_age)
    }

    pub fn key(&self) -> AgeCategoryKey {
        AgeCategoryKey {
            code: self.code,
            gender: self.gender,
        }
    }
}

impl std::fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code, self.gender)
    }
}

/// Identity of a definition in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgeCategoryKey {
    pub code: AgeCategoryCode,
    pub gender: Gender,
}

impl AgeCategoryKey {
    pub fn new(code: AgeCategoryCode, gender: Gender) -> Self {
        Self { code, gender }
    }
}
