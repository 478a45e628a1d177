use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use chrono::{Datelike, Duration, Local};

use crate::{
    dto::{
        dashboard_dto::{EmployeeDashboard, ManagerDashboard, Overview, TodaySnapshot},
        ApiResponse,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    services::{attendance_service::TeamFilter, report_service},
    utils::time::month_range,
    AppState,
};

use crate::models::attendance::AttendanceStatus;

/// Composite payload backing the employee landing page: today's state, the
/// running month, and the last week of records.
pub async fn employee_dashboard(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let today = Local::now().date_naive();

    let today_record = state
        .attendance_service
        .find_by_user_and_date(user_id, today)
        .await?;

    let (month_start, month_end) = month_range(today.year(), today.month())
        .ok_or_else(|| Error::Internal("Current month out of range".to_string()))?;
    let month_records = state
        .attendance_service
        .find_for_user(user_id, Some(month_start), Some(month_end))
        .await?;
    let month_stats = report_service::monthly_summary(&month_records, month_start, month_end);

    let recent = state
        .attendance_service
        .find_for_user(user_id, Some(today - Duration::days(7)), Some(today))
        .await?;

    Ok(Json(ApiResponse::new(
        "Employee dashboard retrieved successfully",
        EmployeeDashboard {
            today_status: TodaySnapshot {
                checked_in: today_record.is_some(),
                checked_out: today_record
                    .as_ref()
                    .map(|r| r.check_out_time.is_some())
                    .unwrap_or(false),
                check_in_time: today_record.as_ref().map(|r| r.check_in_time),
                check_out_time: today_record.as_ref().and_then(|r| r.check_out_time),
                status: today_record.as_ref().map(|r| r.status),
            },
            month_stats,
            recent_attendance: recent.into_iter().map(Into::into).collect(),
        },
    )))
}

/// Composite payload for the manager landing page. The overview, trend and
/// department groupings come from independent reads; they can disagree under
/// concurrent check-ins and that is accepted.
pub async fn manager_dashboard(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let today = Local::now().date_naive();

    let total_employees = state.user_service.count_employees().await?;
    let today_records = state.attendance_service.find_by_exact_date(today).await?;

    let present_today = today_records.len() as i64;
    let late_today = today_records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Late)
        .count() as i64;

    let employees = state.user_service.list_employees().await?;
    let (_, absent_employees) = report_service::partition_today(&employees, &today_records);

    let week_records = state
        .attendance_service
        .find_team(&TeamFilter {
            start: Some(today - Duration::days(6)),
            end: Some(today),
            ..TeamFilter::default()
        })
        .await?;
    let weekly_trend = report_service::daily_trend(&week_records);

    let (month_start, month_end) = month_range(today.year(), today.month())
        .ok_or_else(|| Error::Internal("Current month out of range".to_string()))?;
    let month_records = state
        .attendance_service
        .find_team(&TeamFilter {
            start: Some(month_start),
            end: Some(month_end),
            ..TeamFilter::default()
        })
        .await?;
    let department_stats = report_service::department_stats(&month_records);

    Ok(Json(ApiResponse::new(
        "Manager dashboard retrieved successfully",
        ManagerDashboard {
            overview: Overview {
                total_employees,
                present_today,
                absent_today: total_employees - present_today,
                late_today,
            },
            absent_employees,
            weekly_trend,
            department_stats,
        },
    )))
}
