use chrono::{Datelike, Months, NaiveDate, Weekday};

/// Count Monday..Friday days in the inclusive range. Used as the denominator
/// for implied absence; holidays are out of scope.
pub fn working_days(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut count = 0;
    let mut day = start;
    while day <= end {
        match day.weekday() {
            Weekday::Sat | Weekday::Sun => {}
            _ => count += 1,
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    count
}

/// First and last calendar day of a month. None for an out-of-range month
/// number.
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn full_week_has_five_working_days() {
        // Mon 2026-03-02 through Sun 2026-03-08: one weekend inside.
        assert_eq!(working_days(d(2026, 3, 2), d(2026, 3, 8)), 5);
    }

    #[test]
    fn weekend_only_range_has_none() {
        assert_eq!(working_days(d(2026, 3, 7), d(2026, 3, 8)), 0);
    }

    #[test]
    fn single_day_ranges() {
        assert_eq!(working_days(d(2026, 3, 4), d(2026, 3, 4)), 1);
        assert_eq!(working_days(d(2026, 3, 7), d(2026, 3, 7)), 0);
    }

    #[test]
    fn range_crossing_a_month_boundary() {
        // Fri 2026-02-27 through Tue 2026-03-03.
        assert_eq!(working_days(d(2026, 2, 27), d(2026, 3, 3)), 3);
    }

    #[test]
    fn june_2026_has_22_working_days() {
        let (start, end) = month_range(2026, 6).unwrap();
        assert_eq!(start, d(2026, 6, 1));
        assert_eq!(end, d(2026, 6, 30));
        assert_eq!(working_days(start, end), 22);
    }

    #[test]
    fn month_range_handles_february() {
        assert_eq!(month_range(2026, 2).unwrap().1, d(2026, 2, 28));
        assert_eq!(month_range(2024, 2).unwrap().1, d(2024, 2, 29));
        assert!(month_range(2026, 13).is_none());
    }
}
