use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::attendance::{AttendanceRecord, AttendanceStatus, AttendanceWithUser};
use crate::models::user::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub total_hours: f64,
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(value: AttendanceRecord) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            date: value.date,
            check_in_time: value.check_in_time,
            check_out_time: value.check_out_time,
            status: value.status,
            total_hours: value.total_hours,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBrief {
    pub id: Uuid,
    pub name: String,
    pub employee_id: String,
    pub department: String,
}

impl From<&User> for EmployeeBrief {
    fn from(value: &User) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            employee_id: value.employee_id.clone(),
            department: value.department.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAttendanceResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub total_hours: f64,
    pub employee: EmployeeBrief,
}

impl From<AttendanceWithUser> for TeamAttendanceResponse {
    fn from(value: AttendanceWithUser) -> Self {
        Self {
            id: value.id,
            date: value.date,
            check_in_time: value.check_in_time,
            check_out_time: value.check_out_time,
            status: value.status,
            total_hours: value.total_hours,
            employee: EmployeeBrief {
                id: value.user_id,
                name: value.name,
                employee_id: value.employee_id,
                department: value.department,
            },
        }
    }
}

/// Range filters: explicit `startDate`/`endDate` win over `month`/`year`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total_days: i64,
    pub present: i64,
    pub late: i64,
    pub half_day: i64,
    /// `working_days - total_days`; can go negative when weekend records
    /// exist in the range.
    pub absent: i64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub employee: EmployeeBrief,
    #[serde(flatten)]
    pub summary: AttendanceSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummaryResponse {
    pub month: u32,
    pub year: i32,
    pub summary: AttendanceSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummaryResponse {
    pub month: u32,
    pub year: i32,
    pub employees: Vec<EmployeeSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayStatusResponse {
    pub checked_in: bool,
    pub checked_out: bool,
    pub attendance: Option<AttendanceResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentEmployee {
    pub id: Uuid,
    pub name: String,
    pub employee_id: String,
    pub department: String,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsentEmployee {
    pub id: Uuid,
    pub name: String,
    pub employee_id: String,
    pub department: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamTodayResponse {
    pub date: NaiveDate,
    pub total_employees: i64,
    pub present: i64,
    pub absent: i64,
    pub present_employees: Vec<PresentEmployee>,
    pub absent_employees: Vec<AbsentEmployee>,
}
