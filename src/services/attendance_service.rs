use chrono::{DateTime, Local, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::attendance::{
    close_out, status_for_check_in, AttendanceRecord, AttendanceStatus, AttendanceWithUser,
};

const RECORD_COLUMNS: &str =
    "id, user_id, date, check_in_time, check_out_time, status, total_hours, created_at";

const JOINED_COLUMNS: &str = "a.id, a.user_id, a.date, a.check_in_time, a.check_out_time, \
     a.status, a.total_hours, u.name, u.employee_id, u.department";

/// Filters for team-wide reads. All fields optional; `None` means no
/// constraint.
#[derive(Debug, Clone, Default)]
pub struct TeamFilter {
    pub user_id: Option<Uuid>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub department: Option<String>,
}

// Per-day state machine guards: NONE -> CHECKED_IN -> CHECKED_OUT, no
// reversions.

fn ensure_not_checked_in(existing: Option<&AttendanceRecord>) -> Result<()> {
    match existing {
        Some(_) => Err(Error::BadRequest("Already checked in today".to_string())),
        None => Ok(()),
    }
}

fn open_record(existing: Option<AttendanceRecord>) -> Result<AttendanceRecord> {
    let record = existing
        .ok_or_else(|| Error::BadRequest("No check-in record found for today".to_string()))?;
    if record.check_out_time.is_some() {
        return Err(Error::BadRequest("Already checked out today".to_string()));
    }
    Ok(record)
}

fn ensure_chronological(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Result<()> {
    if check_out < check_in {
        return Err(Error::BadRequest(
            "Check-out time cannot be earlier than check-in time".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct AttendanceService {
    pool: PgPool,
}

impl AttendanceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open today's record. The existence check gives the friendly error;
    /// the unique constraint on (user_id, date) is what actually closes the
    /// race between two concurrent check-ins.
    pub async fn check_in(&self, user_id: Uuid) -> Result<AttendanceRecord> {
        let now_local = Local::now();
        let today = now_local.date_naive();

        let existing = self.find_by_user_and_date(user_id, today).await?;
        ensure_not_checked_in(existing.as_ref())?;

        let status = status_for_check_in(now_local.time());
        let result = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "INSERT INTO attendance (user_id, date, check_in_time, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {RECORD_COLUMNS}"
        ))
        .bind(user_id)
        .bind(today)
        .bind(now_local.with_timezone(&Utc))
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(record) => Ok(record),
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
                Err(Error::BadRequest("Already checked in today".to_string()))
            }
            Err(e) => {
                tracing::error!(error = %e, %user_id, "check-in failed");
                Err(e.into())
            }
        }
    }

    /// Close today's record. Terminal for the day; there is no undo path.
    pub async fn check_out(&self, user_id: Uuid) -> Result<AttendanceRecord> {
        let now_local = Local::now();
        let today = now_local.date_naive();
        let now = now_local.with_timezone(&Utc);

        let record = open_record(self.find_by_user_and_date(user_id, today).await?)?;
        ensure_chronological(record.check_in_time, now)?;

        let (status, total_hours) = close_out(record.status, record.check_in_time, now);

        let updated = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "UPDATE attendance \
             SET check_out_time = $2, status = $3, total_hours = $4 \
             WHERE id = $1 \
             RETURNING {RECORD_COLUMNS}"
        ))
        .bind(record.id)
        .bind(now)
        .bind(status.as_str())
        .bind(total_hours)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn find_by_user_and_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM attendance WHERE user_id = $1 AND date = $2"
        ))
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    pub async fn today_for_user(&self, user_id: Uuid) -> Result<Option<AttendanceRecord>> {
        self.find_by_user_and_date(user_id, Local::now().date_naive())
            .await
    }

    /// One user's records, newest first, optionally bounded by an inclusive
    /// date range.
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        let records = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM attendance \
             WHERE user_id = $1 \
               AND ($2::date IS NULL OR date >= $2) \
               AND ($3::date IS NULL OR date <= $3) \
             ORDER BY date DESC"
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Team-wide records joined with employee identity, newest first.
    pub async fn find_team(&self, filter: &TeamFilter) -> Result<Vec<AttendanceWithUser>> {
        let records = sqlx::query_as::<_, AttendanceWithUser>(&format!(
            "SELECT {JOINED_COLUMNS} \
             FROM attendance a \
             JOIN users u ON u.id = a.user_id \
             WHERE ($1::uuid IS NULL OR a.user_id = $1) \
               AND ($2::date IS NULL OR a.date >= $2) \
               AND ($3::date IS NULL OR a.date <= $3) \
               AND ($4::text IS NULL OR a.status = $4) \
               AND ($5::text IS NULL OR u.department = $5) \
             ORDER BY a.date DESC, u.name ASC"
        ))
        .bind(filter.user_id)
        .bind(filter.start)
        .bind(filter.end)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.department.as_deref())
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// All records for one calendar day, joined with employee identity.
    pub async fn find_by_exact_date(&self, date: NaiveDate) -> Result<Vec<AttendanceWithUser>> {
        self.find_team(&TeamFilter {
            start: Some(date),
            end: Some(date),
            ..TeamFilter::default()
        })
        .await
    }
}
