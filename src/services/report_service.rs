use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::dto::attendance_dto::{
    AbsentEmployee, AttendanceSummary, EmployeeBrief, EmployeeSummary, PresentEmployee,
};
use crate::dto::dashboard_dto::{DepartmentStat, TrendPoint};
use crate::models::attendance::{AttendanceRecord, AttendanceStatus, AttendanceWithUser};
use crate::models::user::User;
use crate::utils::time::working_days;

// Aggregation is a plain computation over rows the repository already
// fetched. Absence is implied: it is always derived from an explicit
// population (working-day count or the employee roster), never from the
// attendance rows alone.

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn summarize(
    statuses: impl Iterator<Item = (AttendanceStatus, f64)>,
    start: NaiveDate,
    end: NaiveDate,
) -> AttendanceSummary {
    let mut total_days = 0;
    let mut present = 0;
    let mut late = 0;
    let mut half_day = 0;
    let mut total_hours = 0.0;

    for (status, hours) in statuses {
        total_days += 1;
        match status {
            AttendanceStatus::Present => present += 1,
            AttendanceStatus::Late => late += 1,
            AttendanceStatus::HalfDay => half_day += 1,
            AttendanceStatus::Absent => {}
        }
        total_hours += hours;
    }

    AttendanceSummary {
        total_days,
        present,
        late,
        half_day,
        // Records on weekends still count toward total_days, so this can go
        // negative; preserved from the original behavior.
        absent: working_days(start, end) - total_days,
        total_hours: round2(total_hours),
    }
}

/// Summary of one user's records over an inclusive range.
pub fn monthly_summary(
    records: &[AttendanceRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> AttendanceSummary {
    summarize(records.iter().map(|r| (r.status, r.total_hours)), start, end)
}

/// Per-employee summaries over the whole roster. Employees with no records
/// in the range still appear, with every working day counted absent.
pub fn team_summary(
    employees: &[User],
    records: &[AttendanceWithUser],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<EmployeeSummary> {
    employees
        .iter()
        .map(|emp| {
            let summary = summarize(
                records
                    .iter()
                    .filter(|r| r.user_id == emp.id)
                    .map(|r| (r.status, r.total_hours)),
                start,
                end,
            );
            EmployeeSummary {
                employee: EmployeeBrief::from(emp),
                summary,
            }
        })
        .collect()
}

/// Group records by the employee's department, ordered by department name.
pub fn department_stats(records: &[AttendanceWithUser]) -> Vec<DepartmentStat> {
    let mut groups: BTreeMap<&str, (i64, i64, i64)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.department.as_str()).or_default();
        entry.0 += 1;
        match record.status {
            AttendanceStatus::Present => entry.1 += 1,
            AttendanceStatus::Late => entry.2 += 1,
            _ => {}
        }
    }
    groups
        .into_iter()
        .map(|(department, (total_attendance, present, late))| DepartmentStat {
            department: department.to_string(),
            total_attendance,
            present,
            late,
        })
        .collect()
}

/// Per-date record counts, ascending by date.
pub fn daily_trend(records: &[AttendanceWithUser]) -> Vec<TrendPoint> {
    let mut counts: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for record in records {
        *counts.entry(record.date).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(date, count)| TrendPoint { date, count })
        .collect()
}

/// Split the roster into employees with a record today and those without.
pub fn partition_today(
    employees: &[User],
    records: &[AttendanceWithUser],
) -> (Vec<PresentEmployee>, Vec<AbsentEmployee>) {
    let present: Vec<PresentEmployee> = records
        .iter()
        .map(|r| PresentEmployee {
            id: r.user_id,
            name: r.name.clone(),
            employee_id: r.employee_id.clone(),
            department: r.department.clone(),
            check_in_time: r.check_in_time,
            check_out_time: r.check_out_time,
            status: r.status,
        })
        .collect();

    let present_ids: HashSet<_> = records.iter().map(|r| r.user_id).collect();
    let absent: Vec<AbsentEmployee> = employees
        .iter()
        .filter(|emp| !present_ids.contains(&emp.id))
        .map(|emp| AbsentEmployee {
            id: emp.id,
            name: emp.name.clone(),
            employee_id: emp.employee_id.clone(),
            department: emp.department.clone(),
            status: AttendanceStatus::Absent,
        })
        .collect();

    (present, absent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ts(day: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, day, h, 0, 0).unwrap()
    }

    fn employee(name: &str, department: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "x".to_string(),
            role: UserRole::Employee,
            employee_id: format!("EMP-{}", name),
            department: department.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn row(user: &User, day: u32, status: AttendanceStatus, hours: f64) -> AttendanceWithUser {
        AttendanceWithUser {
            id: Uuid::new_v4(),
            user_id: user.id,
            date: d(2026, 6, day),
            check_in_time: ts(day, 9),
            check_out_time: Some(ts(day, 17)),
            status,
            total_hours: hours,
            name: user.name.clone(),
            employee_id: user.employee_id.clone(),
            department: user.department.clone(),
        }
    }

    fn record(user_id: Uuid, day: u32, status: AttendanceStatus, hours: f64) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            user_id,
            date: d(2026, 6, day),
            check_in_time: ts(day, 9),
            check_out_time: Some(ts(day, 17)),
            status,
            total_hours: hours,
            created_at: ts(day, 9),
        }
    }

    #[test]
    fn empty_month_is_all_absent() {
        // June 2026 has 22 working days.
        let summary = monthly_summary(&[], d(2026, 6, 1), d(2026, 6, 30));
        assert_eq!(summary.total_days, 0);
        assert_eq!(summary.absent, 22);
        assert_eq!(summary.total_hours, 0.0);
    }

    #[test]
    fn summary_counts_statuses_and_sums_hours() {
        let user_id = Uuid::new_v4();
        let records = vec![
            record(user_id, 1, AttendanceStatus::Present, 8.0),
            record(user_id, 2, AttendanceStatus::Late, 7.5),
            record(user_id, 3, AttendanceStatus::HalfDay, 3.25),
        ];
        let summary = monthly_summary(&records, d(2026, 6, 1), d(2026, 6, 30));
        assert_eq!(summary.total_days, 3);
        assert_eq!(summary.present, 1);
        assert_eq!(summary.late, 1);
        assert_eq!(summary.half_day, 1);
        assert_eq!(summary.absent, 19);
        assert_eq!(summary.total_hours, 18.75);
    }

    #[test]
    fn weekend_record_can_drive_absence_negative() {
        let user_id = Uuid::new_v4();
        // Saturday 2026-06-06: zero working days in range, one record.
        let records = vec![record(user_id, 6, AttendanceStatus::Present, 8.0)];
        let summary = monthly_summary(&records, d(2026, 6, 6), d(2026, 6, 6));
        assert_eq!(summary.absent, -1);
    }

    #[test]
    fn team_summary_covers_recordless_employees() {
        let alice = employee("Alice", "Engineering");
        let bob = employee("Bob", "Sales");
        let records = vec![
            row(&alice, 1, AttendanceStatus::Present, 8.0),
            row(&alice, 2, AttendanceStatus::Late, 8.0),
        ];
        let summaries = team_summary(
            &[alice.clone(), bob.clone()],
            &records,
            d(2026, 6, 1),
            d(2026, 6, 30),
        );
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].employee.id, alice.id);
        assert_eq!(summaries[0].summary.total_days, 2);
        assert_eq!(summaries[0].summary.absent, 20);
        assert_eq!(summaries[1].employee.id, bob.id);
        assert_eq!(summaries[1].summary.total_days, 0);
        assert_eq!(summaries[1].summary.absent, 22);
    }

    #[test]
    fn department_stats_group_and_count() {
        let alice = employee("Alice", "Engineering");
        let bob = employee("Bob", "Engineering");
        let cara = employee("Cara", "Sales");
        let records = vec![
            row(&alice, 1, AttendanceStatus::Present, 8.0),
            row(&bob, 1, AttendanceStatus::Late, 8.0),
            row(&cara, 1, AttendanceStatus::HalfDay, 3.0),
        ];
        let stats = department_stats(&records);
        assert_eq!(
            stats,
            vec![
                DepartmentStat {
                    department: "Engineering".to_string(),
                    total_attendance: 2,
                    present: 1,
                    late: 1,
                },
                DepartmentStat {
                    department: "Sales".to_string(),
                    total_attendance: 1,
                    present: 0,
                    late: 0,
                },
            ]
        );
    }

    #[test]
    fn daily_trend_is_ascending_by_date() {
        let alice = employee("Alice", "Engineering");
        let bob = employee("Bob", "Sales");
        let records = vec![
            row(&alice, 2, AttendanceStatus::Present, 8.0),
            row(&bob, 2, AttendanceStatus::Present, 8.0),
            row(&alice, 1, AttendanceStatus::Present, 8.0),
        ];
        let trend = daily_trend(&records);
        assert_eq!(
            trend,
            vec![
                TrendPoint {
                    date: d(2026, 6, 1),
                    count: 1
                },
                TrendPoint {
                    date: d(2026, 6, 2),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn partitions_three_of_five_present() {
        let staff: Vec<User> = ["Alice", "Bob", "Cara", "Dan", "Eve"]
            .iter()
            .map(|name| employee(name, "Engineering"))
            .collect();
        let records: Vec<AttendanceWithUser> = staff[..3]
            .iter()
            .map(|emp| row(emp, 1, AttendanceStatus::Present, 8.0))
            .collect();

        let (present, absent) = partition_today(&staff, &records);
        assert_eq!(present.len(), 3);
        assert_eq!(absent.len(), 2);
        assert!(absent.iter().all(|a| a.status == AttendanceStatus::Absent));
        let absent_names: Vec<_> = absent.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(absent_names, vec!["Dan", "Eve"]);
    }
}
