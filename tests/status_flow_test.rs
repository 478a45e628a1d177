use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use attendance_backend::models::attendance::{close_out, status_for_check_in, AttendanceStatus};
use attendance_backend::services::report_service;
use attendance_backend::utils::time::{month_range, working_days};

#[test]
fn late_arrival_with_short_day_ends_as_half_day() {
    // Check in at 09:45: past the 09:30 cutoff.
    let check_in_clock = NaiveTime::from_hms_opt(9, 45, 0).unwrap();
    let status = status_for_check_in(check_in_clock);
    assert_eq!(status, AttendanceStatus::Late);

    // Check out three hours later: the half-day rule overrides late.
    let check_in = Utc.with_ymd_and_hms(2026, 3, 2, 9, 45, 0).unwrap();
    let check_out = Utc.with_ymd_and_hms(2026, 3, 2, 12, 45, 0).unwrap();
    let (status, total_hours) = close_out(status, check_in, check_out);
    assert_eq!(status, AttendanceStatus::HalfDay);
    assert_eq!(total_hours, 3.0);
}

#[test]
fn on_time_full_day_keeps_its_check_in_status() {
    let status = status_for_check_in(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    assert_eq!(status, AttendanceStatus::Present);

    let check_in = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    let check_out = Utc.with_ymd_and_hms(2026, 3, 2, 17, 30, 0).unwrap();
    let (status, total_hours) = close_out(status, check_in, check_out);
    assert_eq!(status, AttendanceStatus::Present);
    assert_eq!(total_hours, 8.5);
}

#[test]
fn a_recordless_month_counts_every_working_day_absent() {
    let (start, end) = month_range(2026, 6).unwrap();
    assert_eq!(working_days(start, end), 22);

    let summary = report_service::monthly_summary(&[], start, end);
    assert_eq!(summary.total_days, 0);
    assert_eq!(summary.present, 0);
    assert_eq!(summary.late, 0);
    assert_eq!(summary.half_day, 0);
    assert_eq!(summary.absent, 22);
}

#[test]
fn one_weekend_week_has_five_working_days() {
    let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let end = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    assert_eq!(working_days(start, end), 5);
}
