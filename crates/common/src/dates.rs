use chrono::{Local, NaiveDate};

/// Today's calendar date as an ISO `YYYY-MM-DD` string. All persisted
/// daily keys and due-date comparisons use this format, which compares
/// correctly as a plain string.
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Formats an ISO date for display (`DD/MM/YYYY`, the original app's
/// pt-BR locale). Unparseable input is returned as-is rather than
/// erroring; a bad stored date is a display problem, not a crash.
pub fn format_br(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(d) => d.format("%d/%m/%Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// True when `iso` parses as a calendar date.
pub fn is_valid_iso(iso: &str) -> bool {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_pt_br() {
        assert_eq!(format_br("2024-01-31"), "31/01/2024");
    }

    #[test]
    fn bad_dates_pass_through() {
        assert_eq!(format_br("sem data"), "sem data");
        assert!(!is_valid_iso("2024-13-01"));
        assert!(is_valid_iso("2024-02-29"));
    }
}
