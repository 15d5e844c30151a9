//! Best-effort "as of" date extraction.
//!
//! The sources stamp their pages with a day/month/year date ("Remate del
//! 12/08/2025", "al 05/08/25"). The first parseable one is taken as the
//! report date; a page without one is fine, the date is just absent.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static DMY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{2,4})").unwrap());

/// Scan free text for the first day/month/year date. Two-digit years are
/// expanded by prefixing "20".
pub fn extract_as_of(text: &str) -> Option<NaiveDate> {
    for caps in DMY_RE.captures_iter(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year_text = &caps[3];
        let year: i32 = if year_text.len() == 2 {
            format!("20{year_text}").parse().ok()?
        } else {
            year_text.parse().ok()?
        };
        // Not every d/m/y-shaped match is a calendar date; keep scanning.
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_dmy_date() {
        let text = "Remate del 12/08/2025 — próximo 19/08/2025";
        assert_eq!(extract_as_of(text), NaiveDate::from_ymd_opt(2025, 8, 12));
    }

    #[test]
    fn expands_two_digit_years() {
        assert_eq!(extract_as_of("al 05/08/25"), NaiveDate::from_ymd_opt(2025, 8, 5));
    }

    #[test]
    fn skips_impossible_dates() {
        let text = "resultado 45/13/2025, remate 01/09/2025";
        assert_eq!(extract_as_of(text), NaiveDate::from_ymd_opt(2025, 9, 1));
    }

    #[test]
    fn absent_when_no_date() {
        assert_eq!(extract_as_of("sin fecha en esta página"), None);
    }
}
