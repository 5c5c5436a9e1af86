use chrono::{Datelike, NaiveDate};

/// Whole years between `birth_date` and `on_date`.
///
/// One year is subtracted while the birthday has not yet been reached in
/// `on_date`'s year. A reference date before the birth date yields a
/// negative age; callers decide what that means.
pub fn compute_age(birth_date: NaiveDate, on_date: NaiveDate) -> i32 {
    let years = on_date.year() - birth_date.year();
    if (on_date.month(), on_date.day()) < (birth_date.month(), birth_date.day()) {
        years - 1
    } else {
        years
    }
}
