use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// `Absent` is never persisted: a working day with no row is absent. It only
/// appears in computed responses (summaries, team snapshots).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Late,
    HalfDay,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
            AttendanceStatus::HalfDay => "half-day",
            AttendanceStatus::Absent => "absent",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown attendance status: {0}")]
pub struct ParseStatusError(String);

impl std::str::FromStr for AttendanceStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "late" => Ok(AttendanceStatus::Late),
            "half-day" => Ok(AttendanceStatus::HalfDay),
            "absent" => Ok(AttendanceStatus::Absent),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

impl TryFrom<String> for AttendanceStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One row per (user, calendar day), enforced by a unique constraint.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    #[sqlx(try_from = "String")]
    pub status: AttendanceStatus,
    pub total_hours: f64,
    pub created_at: DateTime<Utc>,
}

/// An attendance row joined with the identity of its owner, for manager
/// views and the CSV export.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceWithUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    #[sqlx(try_from = "String")]
    pub status: AttendanceStatus,
    pub total_hours: f64,
    pub name: String,
    pub employee_id: String,
    pub department: String,
}

fn late_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).expect("hard-coded cutoff is valid")
}

/// Status for a fresh check-in: strictly after 09:30:00 local is late.
pub fn status_for_check_in(check_in: NaiveTime) -> AttendanceStatus {
    if check_in > late_cutoff() {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}

/// Close out a day: worked hours rounded to two decimals, and the half-day
/// downgrade when the rounded total is under four hours.
///
/// Callers must have validated `check_out >= check_in`.
pub fn close_out(
    check_in_status: AttendanceStatus,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> (AttendanceStatus, f64) {
    let hours = (check_out - check_in).num_milliseconds() as f64 / 3_600_000.0;
    let total_hours = (hours * 100.0).round() / 100.0;

    let status = if total_hours < 4.0 {
        AttendanceStatus::HalfDay
    } else {
        check_in_status
    };

    (status, total_hours)
}
