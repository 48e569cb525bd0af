use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%b %d, %Y", "%B %d, %Y", "%d %b %Y"];
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Season label ("22/23") for a calendar date, seasons running July to June.
pub fn season_for_date(date: NaiveDate) -> String {
    let year = date.year();
    let start = if date.month() >= 7 { year } else { year - 1 };
    season_label(start)
}

/// Label for the season starting in July of `start_year`.
pub fn season_label(start_year: i32) -> String {
    format!(
        "{:02}/{:02}",
        start_year.rem_euclid(100),
        (start_year + 1).rem_euclid(100)
    )
}

/// Four-digit year a season label ends in: "23/24" -> 2024.
///
/// Two-digit years are read as 20xx. A label without "/" is taken as a year
/// on its own. Anything unparseable is `None`.
pub fn season_end_year(label: &str) -> Option<i32> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    let year_part = match label.split_once('/') {
        Some((_, rest)) => rest.split('/').next().unwrap_or(rest),
        None => label,
    };
    let year = year_part.trim().parse::<i32>().ok()?;
    if (0..100).contains(&year) {
        Some(2000 + year)
    } else {
        Some(year)
    }
}

/// Parses the `date_unix` column of a market value file.
///
/// The column holds calendar dates in practice; plain integers are read as
/// Unix seconds.
pub fn parse_valuation_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(secs) = raw.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive());
    }
    parse_calendar_date(raw)
}

/// Parses a date of birth, returning `None` for anything unrecognised.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    parse_calendar_date(raw)
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn july_starts_a_new_season() {
        assert_eq!(season_for_date(date(2022, 6, 30)), "21/22");
        assert_eq!(season_for_date(date(2022, 7, 1)), "22/23");
        assert_eq!(season_for_date(date(2022, 12, 31)), "22/23");
        assert_eq!(season_for_date(date(2023, 1, 1)), "22/23");
    }

    #[test]
    fn century_boundary_is_zero_padded() {
        assert_eq!(season_for_date(date(1999, 8, 1)), "99/00");
        assert_eq!(season_for_date(date(2000, 3, 1)), "99/00");
        assert_eq!(season_for_date(date(2005, 9, 1)), "05/06");
    }

    #[test]
    fn end_year_expands_two_digit_years() {
        assert_eq!(season_end_year("23/24"), Some(2024));
        assert_eq!(season_end_year("99/00"), Some(2000));
        assert_eq!(season_end_year("2024"), Some(2024));
        assert_eq!(season_end_year("23/"), None);
        assert_eq!(season_end_year("abc"), None);
        assert_eq!(season_end_year(""), None);
    }

    #[test]
    fn valuation_dates_accept_iso_and_unix() {
        assert_eq!(parse_valuation_date("2023-08-01"), Some(date(2023, 8, 1)));
        assert_eq!(
            parse_valuation_date("2023-08-01 12:30:00"),
            Some(date(2023, 8, 1))
        );
        assert_eq!(parse_valuation_date("1690848000"), Some(date(2023, 8, 1)));
        assert_eq!(parse_valuation_date("soon"), None);
    }

    #[test]
    fn birth_dates_accept_common_layouts() {
        assert_eq!(parse_birth_date("2000-05-15"), Some(date(2000, 5, 15)));
        assert_eq!(parse_birth_date("May 15, 2000"), Some(date(2000, 5, 15)));
        assert_eq!(parse_birth_date("15 May 2000"), Some(date(2000, 5, 15)));
        assert_eq!(
            parse_birth_date("2000-05-15T00:00:00+00:00"),
            Some(date(2000, 5, 15))
        );
        assert_eq!(parse_birth_date("unknown"), None);
        assert_eq!(parse_birth_date(""), None);
    }
}
