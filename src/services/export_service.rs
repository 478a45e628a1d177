use chrono::Local;

use crate::error::{Error, Result};
use crate::models::attendance::AttendanceWithUser;

pub const CSV_HEADERS: [&str; 8] = [
    "Date",
    "EmployeeID",
    "EmployeeName",
    "Department",
    "CheckIn",
    "CheckOut",
    "TotalHours",
    "Status",
];

pub struct ExportService;

impl ExportService {
    /// Render attendance rows as a CSV document. Times are formatted in
    /// server-local time, matching how lateness was derived.
    pub fn attendance_csv(rows: &[AttendanceWithUser]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADERS)?;

        for row in rows {
            writer.write_record(&[
                row.date.format("%Y-%m-%d").to_string(),
                row.employee_id.clone(),
                row.name.clone(),
                row.department.clone(),
                row.check_in_time
                    .with_timezone(&Local)
                    .format("%H:%M:%S")
                    .to_string(),
                row.check_out_time
                    .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "Not Checked Out".to_string()),
                format!("{:.2}", row.total_hours),
                row.status.to_string(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| Error::Internal(format!("CSV buffer error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::AttendanceStatus;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn local_utc(h: u32, m: u32, s: u32) -> chrono::DateTime<Utc> {
        Local
            .with_ymd_and_hms(2026, 3, 2, h, m, s)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn sample_row(check_out: Option<chrono::DateTime<Utc>>) -> AttendanceWithUser {
        AttendanceWithUser {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            check_in_time: local_utc(9, 45, 0),
            check_out_time: check_out,
            status: AttendanceStatus::Late,
            total_hours: 7.25,
            name: "Alice Doe".to_string(),
            employee_id: "EMP-7".to_string(),
            department: "Engineering".to_string(),
        }
    }

    fn rows_of(bytes: Vec<u8>) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes.as_slice());
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn header_row_is_fixed() {
        let bytes = ExportService::attendance_csv(&[]).unwrap();
        let rows = rows_of(bytes);
        assert_eq!(rows, vec![CSV_HEADERS.map(str::to_string).to_vec()]);
    }

    #[test]
    fn row_values_match_the_record() {
        let bytes =
            ExportService::attendance_csv(&[sample_row(Some(local_utc(17, 0, 0)))]).unwrap();
        let rows = rows_of(bytes);
        assert_eq!(
            rows[1],
            vec![
                "2026-03-02",
                "EMP-7",
                "Alice Doe",
                "Engineering",
                "09:45:00",
                "17:00:00",
                "7.25",
                "late",
            ]
        );
    }

    #[test]
    fn missing_check_out_uses_the_literal() {
        let mut row = sample_row(None);
        row.total_hours = 0.0;
        let bytes = ExportService::attendance_csv(&[row]).unwrap();
        let rows = rows_of(bytes);
        assert_eq!(rows[1][5], "Not Checked Out");
        assert_eq!(rows[1][6], "0.00");
    }
}
