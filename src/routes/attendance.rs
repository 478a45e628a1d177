use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    Extension,
};
use chrono::{Datelike, Local, NaiveDate};
use uuid::Uuid;

use crate::{
    dto::{
        attendance_dto::{
            AttendanceResponse, HistoryQuery, MonthQuery, MonthlySummaryResponse, RangeQuery,
            TeamAttendanceResponse, TeamQuery, TeamSummaryResponse, TeamTodayResponse,
            TodayStatusResponse,
        },
        ApiResponse,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    services::{attendance_service::TeamFilter, export_service::ExportService, report_service},
    utils::time::month_range,
    AppState,
};

/// `startDate`/`endDate` win over `month`/`year`; neither pair means
/// unbounded.
fn resolve_history_range(query: &HistoryQuery) -> Result<(Option<NaiveDate>, Option<NaiveDate>)> {
    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        return Ok((Some(start), Some(end)));
    }
    if let (Some(month), Some(year)) = (query.month, query.year) {
        let (start, end) =
            month_range(year, month).ok_or_else(|| Error::BadRequest("Invalid month".to_string()))?;
        return Ok((Some(start), Some(end)));
    }
    Ok((None, None))
}

/// Month/year with the current month as the default.
fn resolve_month(query: &MonthQuery) -> Result<(u32, i32, NaiveDate, NaiveDate)> {
    let today = Local::now().date_naive();
    let month = query.month.unwrap_or_else(|| today.month());
    let year = query.year.unwrap_or_else(|| today.year());
    let (start, end) =
        month_range(year, month).ok_or_else(|| Error::BadRequest("Invalid month".to_string()))?;
    Ok((month, year, start, end))
}

fn parse_status_filter(raw: Option<&str>) -> Result<Option<crate::models::attendance::AttendanceStatus>> {
    raw.map(|s| s.parse())
        .transpose()
        .map_err(|e| Error::BadRequest(format!("{e}")))
}

#[utoipa::path(
    post,
    path = "/api/attendance/checkin",
    responses(
        (status = 201, description = "Checked in successfully", body = Object),
        (status = 400, description = "Already checked in today", body = Object, example = json!({
            "success": false,
            "message": "Already checked in today"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_in(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let record = state.attendance_service.check_in(claims.user_id()?).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Checked in successfully",
            AttendanceResponse::from(record),
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/attendance/checkout",
    responses(
        (status = 200, description = "Checked out successfully", body = Object),
        (status = 400, description = "No open check-in for today", body = Object, example = json!({
            "success": false,
            "message": "No check-in record found for today"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn check_out(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let record = state
        .attendance_service
        .check_out(claims.user_id()?)
        .await?;

    Ok(Json(ApiResponse::new(
        "Checked out successfully",
        AttendanceResponse::from(record),
    )))
}

#[utoipa::path(
    get,
    path = "/api/attendance/my-history",
    params(
        ("startDate" = Option<String>, Query, description = "Inclusive ISO start date"),
        ("endDate" = Option<String>, Query, description = "Inclusive ISO end date"),
        ("month" = Option<u32>, Query, description = "Month number, used with year"),
        ("year" = Option<i32>, Query, description = "Year, used with month")
    ),
    responses((status = 200, description = "Own records, newest first", body = Object)),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn my_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse> {
    let (start, end) = resolve_history_range(&query)?;
    let records = state
        .attendance_service
        .find_for_user(claims.user_id()?, start, end)
        .await?;
    let records: Vec<AttendanceResponse> = records.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::new(
        "Attendance history retrieved successfully",
        records,
    )))
}

#[utoipa::path(
    get,
    path = "/api/attendance/my-summary",
    params(
        ("month" = Option<u32>, Query, description = "Defaults to the current month"),
        ("year" = Option<i32>, Query, description = "Defaults to the current year")
    ),
    responses((status = 200, description = "Own monthly summary", body = Object)),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn my_summary(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse> {
    let (month, year, start, end) = resolve_month(&query)?;
    let records = state
        .attendance_service
        .find_for_user(claims.user_id()?, Some(start), Some(end))
        .await?;
    let summary = report_service::monthly_summary(&records, start, end);

    Ok(Json(ApiResponse::new(
        "Attendance summary retrieved successfully",
        MonthlySummaryResponse {
            month,
            year,
            summary,
        },
    )))
}

#[utoipa::path(
    get,
    path = "/api/attendance/today",
    responses((status = 200, description = "Own status for today", body = Object)),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn today(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let record = state
        .attendance_service
        .today_for_user(claims.user_id()?)
        .await?;

    Ok(Json(ApiResponse::new(
        "Today's attendance retrieved successfully",
        TodayStatusResponse {
            checked_in: record.is_some(),
            checked_out: record
                .as_ref()
                .map(|r| r.check_out_time.is_some())
                .unwrap_or(false),
            attendance: record.map(Into::into),
        },
    )))
}

#[utoipa::path(
    get,
    path = "/api/attendance/all",
    params(
        ("startDate" = Option<String>, Query, description = "Inclusive ISO start date"),
        ("endDate" = Option<String>, Query, description = "Inclusive ISO end date"),
        ("status" = Option<String>, Query, description = "present | late | half-day"),
        ("department" = Option<String>, Query, description = "Exact department name")
    ),
    responses((status = 200, description = "Org-wide records", body = Object)),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn all_attendance(
    State(state): State<AppState>,
    Query(query): Query<TeamQuery>,
) -> Result<impl IntoResponse> {
    let filter = TeamFilter {
        user_id: None,
        start: query.start_date,
        end: query.end_date,
        status: parse_status_filter(query.status.as_deref())?,
        department: query.department,
    };
    let records = state.attendance_service.find_team(&filter).await?;
    let records: Vec<TeamAttendanceResponse> = records.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::new(
        "Attendance records retrieved successfully",
        records,
    )))
}

#[utoipa::path(
    get,
    path = "/api/attendance/employee/{id}",
    params(("id" = Uuid, Path, description = "Employee user id")),
    responses((status = 200, description = "One employee's records", body = Object)),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse> {
    let filter = TeamFilter {
        user_id: Some(id),
        start: query.start_date,
        end: query.end_date,
        ..TeamFilter::default()
    };
    let records = state.attendance_service.find_team(&filter).await?;
    let records: Vec<TeamAttendanceResponse> = records.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::new(
        "Attendance records retrieved successfully",
        records,
    )))
}

#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    params(
        ("month" = Option<u32>, Query, description = "Defaults to the current month"),
        ("year" = Option<i32>, Query, description = "Defaults to the current year")
    ),
    responses((status = 200, description = "Per-employee monthly summary", body = Object)),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn team_summary(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse> {
    let (month, year, start, end) = resolve_month(&query)?;
    let employees = state.user_service.list_employees().await?;
    let records = state
        .attendance_service
        .find_team(&TeamFilter {
            start: Some(start),
            end: Some(end),
            ..TeamFilter::default()
        })
        .await?;
    let employees = report_service::team_summary(&employees, &records, start, end);

    Ok(Json(ApiResponse::new(
        "Team summary retrieved successfully",
        TeamSummaryResponse {
            month,
            year,
            employees,
        },
    )))
}

#[utoipa::path(
    get,
    path = "/api/attendance/export",
    params(
        ("startDate" = Option<String>, Query, description = "Inclusive ISO start date"),
        ("endDate" = Option<String>, Query, description = "Inclusive ISO end date")
    ),
    responses((status = 200, description = "CSV attachment")),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse> {
    let records = state
        .attendance_service
        .find_team(&TeamFilter {
            start: query.start_date,
            end: query.end_date,
            ..TeamFilter::default()
        })
        .await?;
    let csv = ExportService::attendance_csv(&records)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"attendance_report.csv\"".to_string(),
            ),
        ],
        csv,
    ))
}

#[utoipa::path(
    get,
    path = "/api/attendance/today-status",
    responses((status = 200, description = "Present/absent partition for today", body = Object)),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn today_status(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let today = Local::now().date_naive();
    let records = state.attendance_service.find_by_exact_date(today).await?;
    let employees = state.user_service.list_employees().await?;

    let (present_employees, absent_employees) =
        report_service::partition_today(&employees, &records);

    Ok(Json(ApiResponse::new(
        "Today's team status retrieved successfully",
        TeamTodayResponse {
            date: today,
            total_employees: employees.len() as i64,
            present: present_employees.len() as i64,
            absent: absent_employees.len() as i64,
            present_employees,
            absent_employees,
        },
    )))
}
