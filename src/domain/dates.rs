//! Strict parsing of user-entered calendar dates.
//!
//! Accepted shapes are `DD/MM/YYYY` and `DD/MM/YY`, with `-` or spaces
//! tolerated as separators. Anything else is rejected; the caller keeps the
//! previous value.

use chrono::NaiveDate;

const LONG_FORMAT: &str = "%d/%m/%Y";
const SHORT_FORMAT: &str = "%d/%m/%y";

/// Parses a user-supplied date string, returning `None` when it does not
/// match the accepted formats or names an impossible day.
pub fn parse_user_date(raw: &str) -> Option<NaiveDate> {
    let normalized: String = raw
        .trim()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '/' } else { c })
        .collect();

    let parts: Vec<&str> = normalized.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    let is_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !(is_digits(day) && is_digits(month) && is_digits(year)) {
        return None;
    }
    if day.len() > 2 || month.len() > 2 {
        return None;
    }

    let format = match year.len() {
        2 => SHORT_FORMAT,
        4 => LONG_FORMAT,
        _ => return None,
    };
    NaiveDate::parse_from_str(&normalized, format).ok()
}

/// Renders a date in the canonical `DD/MM/YYYY` form used everywhere the
/// user (or the ledger) sees one.
pub fn format_user_date(date: NaiveDate) -> String {
    date.format(LONG_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_long_and_short_years() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();
        assert_eq!(parse_user_date("12/05/2024"), Some(expected));
        assert_eq!(parse_user_date("12/05/24"), Some(expected));
    }

    #[test]
    fn accepts_single_digit_day_and_month() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(parse_user_date("7/3/2024"), Some(expected));
    }

    #[test]
    fn normalizes_dash_and_space_separators() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();
        assert_eq!(parse_user_date("12-05-2024"), Some(expected));
        assert_eq!(parse_user_date("12 05 2024"), Some(expected));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_user_date("2024/05/12"), None);
        assert_eq!(parse_user_date("12/05/202"), None);
        assert_eq!(parse_user_date("12/05"), None);
        assert_eq!(parse_user_date("mañana"), None);
        assert_eq!(parse_user_date(""), None);
    }

    #[test]
    fn rejects_impossible_days() {
        assert_eq!(parse_user_date("31/02/2024"), None);
        assert_eq!(parse_user_date("00/01/2024"), None);
    }

    #[test]
    fn canonical_format_is_padded_long_form() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_user_date(date), "07/03/2024");
    }
}
