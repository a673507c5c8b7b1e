use chrono::NaiveDate;

/// The calendar form dates are entered and displayed in.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar date.
///
/// Surrounding whitespace is ignored. Anything that is not exactly four year
/// digits, two month digits and two day digits is rejected.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// The inclusive number of days spanned by two dates.
///
/// A vacation starting and ending on the same day lasts one day. The order of
/// the arguments does not matter. If either date is missing, the duration is
/// zero.
#[must_use]
pub fn duration(start: Option<NaiveDate>, end: Option<NaiveDate>) -> u64 {
    match (start, end) {
        (Some(start), Some(end)) => (end - start).num_days().unsigned_abs() + 1,
        _ => 0,
    }
}

/// Like [`duration`], but for dates as typed into the form.
///
/// Empty or unparsable dates count as missing.
#[must_use]
pub fn duration_str(start: &str, end: &str) -> u64 {
    duration(parse_date(start), parse_date(end))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn date(value: &str) -> NaiveDate {
        parse_date(value).unwrap()
    }

    #[test_case("2024-08-01", "2024-08-10", 10; "ten days")]
    #[test_case("2024-08-01", "2024-08-03", 3; "three days")]
    #[test_case("2024-02-28", "2024-03-01", 3; "across leap day")]
    #[test_case("2023-12-31", "2024-01-01", 2; "across new year")]
    #[test_case("2024-07-25", "2024-07-26", 2; "two days")]
    fn inclusive_day_count(start: &str, end: &str, expected: u64) {
        assert_eq!(duration(Some(date(start)), Some(date(end))), expected);
    }

    #[test]
    fn same_day_is_one_day() {
        for value in ["2024-01-01", "2024-02-29", "1999-12-31"] {
            assert_eq!(duration(Some(date(value)), Some(date(value))), 1);
        }
    }

    #[test]
    fn symmetric_in_argument_order() {
        let a = date("2024-08-10");
        let b = date("2024-08-01");
        assert_eq!(duration(Some(a), Some(b)), duration(Some(b), Some(a)));
        assert_eq!(duration(Some(a), Some(b)), 10);
    }

    #[test]
    fn missing_date_is_zero() {
        let d = date("2024-08-01");
        assert_eq!(duration(None, Some(d)), 0);
        assert_eq!(duration(Some(d), None), 0);
        assert_eq!(duration(None, None), 0);
    }

    #[test_case("", "2024-08-10"; "empty start")]
    #[test_case("2024-08-01", ""; "empty end")]
    #[test_case("2024-8-1", "2024-08-10"; "unpadded")]
    #[test_case("2024-13-01", "2024-08-10"; "no such month")]
    fn unusable_text_is_zero(start: &str, end: &str) {
        assert_eq!(duration_str(start, end), 0);
    }

    #[test]
    fn text_dates_are_trimmed() {
        assert_eq!(duration_str(" 2024-08-01 ", "2024-08-10\n"), 10);
    }
}
