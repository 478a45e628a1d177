use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::dto::attendance_dto::{AbsentEmployee, AttendanceResponse, AttendanceSummary};
use crate::models::attendance::AttendanceStatus;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySnapshot {
    pub checked_in: bool,
    pub checked_out: bool,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDashboard {
    pub today_status: TodaySnapshot,
    pub month_stats: AttendanceSummary,
    pub recent_attendance: Vec<AttendanceResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_employees: i64,
    pub present_today: i64,
    pub absent_today: i64,
    pub late_today: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStat {
    pub department: String,
    pub total_attendance: i64,
    pub present: i64,
    pub late: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerDashboard {
    pub overview: Overview,
    pub absent_employees: Vec<AbsentEmployee>,
    pub weekly_trend: Vec<TrendPoint>,
    pub department_stats: Vec<DepartmentStat>,
}
