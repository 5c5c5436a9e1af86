use crate::catalog::AgeCategoryCatalog;
use crate::models::{AgeCategoryCode, Gender};

const VETERAN_MIN_AGE: i32 = 35;

/// Picks the single age category that applies to `age` for `gender`.
///
/// Veteran and open ranges overlap from 35 upwards (SEN is unbounded), so
/// the scan order decides the winner:
///
/// 1. From 35, veteran codes are tried oldest first (V60 down to V35).
/// 2. Otherwise, or when no veteran range matches, open codes are tried
///    youngest first (U14 up to SEN).
///
/// Only codes registered for `gender` in `catalog` are considered. `None`
/// means no eligible category; a default is never invented.
pub fn resolve_age_category(
    age: i32,
    gender: Gender,
    catalog: &AgeCategoryCatalog,
) -> Option<AgeCategoryCode> {
    if age >= VETERAN_MIN_AGE
        && let Some(code) = first_match(&AgeCategoryCode::VETERAN_SCAN, age, gender, catalog)
    {
        return Some(code);
    }

    first_match(&AgeCategoryCode::GENERAL_SCAN, age, gender, catalog)
}

fn first_match(
    scan: &[AgeCategoryCode],
    age: i32,
    gender: Gender,
    catalog: &AgeCategoryCatalog,
) -> Option<AgeCategoryCode> {
    scan.iter()
        .copied()
        .filter(|code| catalog.contains(*code, gender))
        .find(|code| code.bounds().contains(age))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AgeCategoryKey;

    fn resolve(age: i32, gender: Gender) -> Option<AgeCategoryCode> {
        resolve_age_category(age, gender, &AgeCategoryCatalog::seeded())
    }

    #[test]
    fn test_veteran_threshold() {
        for gender in Gender::all() {
            assert_eq!(resolve(34, *gender), Some(AgeCategoryCode::Sen));
            assert_eq!(resolve(35, *gender), Some(AgeCategoryCode::V35));
            assert_eq!(resolve(39, *gender), Some(AgeCategoryCode::V35));
            assert_eq!(resolve(40, *gender), Some(AgeCategoryCode::V40));
        }
    }

    #[test]
    fn test_oldest_veteran_tiers() {
        assert_eq!(resolve(59, Gender::Male), Some(AgeCategoryCode::V55));
        assert_eq!(resolve(60, Gender::Male), Some(AgeCategoryCode::V60));
        assert_eq!(resolve(62, Gender::Female), Some(AgeCategoryCode::V60));
        assert_eq!(resolve(95, Gender::Female), Some(AgeCategoryCode::V60));
    }

    #[test]
    fn test_youth_overlaps_prefer_younger_category() {
        assert_eq!(resolve(12, Gender::Male), Some(AgeCategoryCode::U14));
        assert_eq!(resolve(14, Gender::Male), Some(AgeCategoryCode::U14));
        assert_eq!(resolve(15, Gender::Male), Some(AgeCategoryCode::U16));
        assert_eq!(resolve(16, Gender::Female), Some(AgeCategoryCode::U16));
        assert_eq!(resolve(18, Gender::Female), Some(AgeCategoryCode::U18));
        assert_eq!(resolve(20, Gender::Male), Some(AgeCategoryCode::U20));
        assert_eq!(resolve(21, Gender::Male), Some(AgeCategoryCode::U23));
        assert_eq!(resolve(23, Gender::Female), Some(AgeCategoryCode::U23));
        assert_eq!(resolve(24, Gender::Female), Some(AgeCategoryCode::Sen));
    }

    #[test]
    fn test_too_young_is_unresolved() {
        assert_eq!(resolve(11, Gender::Male), None);
        assert_eq!(resolve(10, Gender::Female), None);
        assert_eq!(resolve(-1, Gender::Female), None);
    }

    #[test]
    fn test_missing_veteran_tiers_fall_back_to_senior() {
        let catalog = AgeCategoryCatalog::from_entries(vec![
            AgeCategoryKey::new(AgeCategoryCode::Sen, Gender::Female),
            AgeCategoryKey::new(AgeCategoryCode::V35, Gender::Female),
        ])
        .unwrap();

        assert_eq!(
            resolve_age_category(37, Gender::Female, &catalog),
            Some(AgeCategoryCode::V35)
        );
        // V35 stays capped at 39 even with no higher tier registered.
        assert_eq!(
            resolve_age_category(52, Gender::Female, &catalog),
            Some(AgeCategoryCode::Sen)
        );
        assert_eq!(resolve_age_category(52, Gender::Male, &catalog), None);
    }

    #[test]
    fn test_resolved_code_always_contains_age() {
        let catalog = AgeCategoryCatalog::seeded();
        for gender in Gender::all() {
            for age in -5..=120 {
                if let Some(code) = resolve_age_category(age, *gender, &catalog) {
                    assert!(code.bounds().contains(age), "{} does not contain {}", code, age);
                } else {
                    assert!(age < 12, "age {} left unresolved", age);
                }
            }
        }
    }
}
