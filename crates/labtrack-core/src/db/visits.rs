//! Visit database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{BookingType, ReportFile, Visit, VisitStatus};

impl Database {
    /// Insert a new visit.
    pub fn insert_visit(&self, visit: &Visit) -> DbResult<()> {
        let test_ids_json = serde_json::to_string(&visit.test_ids)?;
        let package_ids_json = serde_json::to_string(&visit.package_ids)?;
        let report_json = visit
            .report
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.conn.execute(
            r#"
            INSERT INTO visits (
                visit_id, patient_id, status, booking_type, test_ids, package_ids,
                discount_percent, total_amount, final_amount, report, remarks,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
            params![
                visit.visit_id,
                visit.patient_id,
                visit.status.as_str(),
                visit.booking_type.as_str(),
                test_ids_json,
                package_ids_json,
                visit.discount_percent,
                visit.total_amount,
                visit.final_amount,
                report_json,
                visit.remarks,
                visit.created_at,
                visit.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Persist a visit's mutable fields (status, remarks, report, amounts).
    pub fn update_visit(&self, visit: &Visit) -> DbResult<bool> {
        let test_ids_json = serde_json::to_string(&visit.test_ids)?;
        let package_ids_json = serde_json::to_string(&visit.package_ids)?;
        let report_json = visit
            .report
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let rows_affected = self.conn.execute(
            r#"
            UPDATE visits SET
                status = ?2,
                test_ids = ?3,
                package_ids = ?4,
                discount_percent = ?5,
                total_amount = ?6,
                final_amount = ?7,
                report = ?8,
                remarks = ?9,
                updated_at = datetime('now')
            WHERE visit_id = ?1
            "#,
            params![
                visit.visit_id,
                visit.status.as_str(),
                test_ids_json,
                package_ids_json,
                visit.discount_percent,
                visit.total_amount,
                visit.final_amount,
                report_json,
                visit.remarks,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a visit by id.
    pub fn get_visit(&self, visit_id: &str) -> DbResult<Option<Visit>> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT visit_id, patient_id, status, booking_type, test_ids, package_ids,
                       discount_percent, total_amount, final_amount, report, remarks,
                       created_at, updated_at
                FROM visits
                WHERE visit_id = ?
                "#,
                [visit_id],
                map_visit_row,
            )
            .optional()?;
        row.map(visit_from_row).transpose()
    }

    /// List a patient's visits, newest first.
    pub fn list_visits_for_patient(&self, patient_id: &str) -> DbResult<Vec<Visit>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT visit_id, patient_id, status, booking_type, test_ids, package_ids,
                   discount_percent, total_amount, final_amount, report, remarks,
                   created_at, updated_at
            FROM visits
            WHERE patient_id = ?
            ORDER BY created_at DESC
            "#,
        )?;
        let rows = stmt.query_map([patient_id], map_visit_row)?;
        rows.map(|r| visit_from_row(r?)).collect::<DbResult<Vec<_>>>()
    }

    /// List visits in a given status, oldest first (the worklist order).
    pub fn list_visits_by_status(&self, status: VisitStatus) -> DbResult<Vec<Visit>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT visit_id, patient_id, status, booking_type, test_ids, package_ids,
                   discount_percent, total_amount, final_amount, report, remarks,
                   created_at, updated_at
            FROM visits
            WHERE status = ?
            ORDER BY created_at
            "#,
        )?;
        let rows = stmt.query_map([status.as_str()], map_visit_row)?;
        rows.map(|r| visit_from_row(r?)).collect::<DbResult<Vec<_>>>()
    }

    /// List visits with a report attached, newest first.
    pub fn list_visits_with_reports(&self) -> DbResult<Vec<Visit>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT visit_id, patient_id, status, booking_type, test_ids, package_ids,
                   discount_percent, total_amount, final_amount, report, remarks,
                   created_at, updated_at
            FROM visits
            WHERE report IS NOT NULL
            ORDER BY updated_at DESC
            "#,
        )?;
        let rows = stmt.query_map([], map_visit_row)?;
        rows.map(|r| visit_from_row(r?)).collect::<DbResult<Vec<_>>>()
    }

    /// Attach a report file to a visit without touching its status.
    pub fn attach_report(&self, visit_id: &str, report: &ReportFile) -> DbResult<bool> {
        let report_json = serde_json::to_string(report)?;
        let rows_affected = self.conn.execute(
            "UPDATE visits SET report = ?2, updated_at = datetime('now') WHERE visit_id = ?1",
            params![visit_id, report_json],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a visit (explicit staff action).
    pub fn delete_visit(&self, visit_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM visits WHERE visit_id = ?", [visit_id])?;
        Ok(rows_affected > 0)
    }

    /// Count of visits per status, for the dashboards.
    pub fn visit_status_counts(&self) -> DbResult<Vec<(VisitStatus, u64)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT status, COUNT(*) FROM visits GROUP BY status")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, u64>(1)?))
        })?;

        let mut counts = Vec::new();
        for row in rows {
            let (status, count) = row?;
            let status = VisitStatus::parse(&status).ok_or(DbError::BadColumn {
                field: "status",
                value: status,
            })?;
            counts.push((status, count));
        }
        Ok(counts)
    }
}

/// Intermediate row for visits (JSON columns still raw).
struct VisitRow {
    visit_id: String,
    patient_id: String,
    status: String,
    booking_type: String,
    test_ids: String,
    package_ids: String,
    discount_percent: f64,
    total_amount: f64,
    final_amount: f64,
    report: Option<String>,
    remarks: Option<String>,
    created_at: String,
    updated_at: String,
}

fn map_visit_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<VisitRow> {
    Ok(VisitRow {
        visit_id: row.get(0)?,
        patient_id: row.get(1)?,
        status: row.get(2)?,
        booking_type: row.get(3)?,
        test_ids: row.get(4)?,
        package_ids: row.get(5)?,
        discount_percent: row.get(6)?,
        total_amount: row.get(7)?,
        final_amount: row.get(8)?,
        report: row.get(9)?,
        remarks: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

fn visit_from_row(row: VisitRow) -> DbResult<Visit> {
    let status = VisitStatus::parse(&row.status).ok_or(DbError::BadColumn {
        field: "status",
        value: row.status.clone(),
    })?;
    let booking_type = BookingType::parse(&row.booking_type).ok_or(DbError::BadColumn {
        field: "booking_type",
        value: row.booking_type.clone(),
    })?;
    let report = row
        .report
        .as_deref()
        .map(serde_json::from_str)
        .transpose()?;

    Ok(Visit {
        visit_id: row.visit_id,
        patient_id: row.patient_id,
        status,
        booking_type,
        test_ids: serde_json::from_str(&row.test_ids)?,
        package_ids: serde_json::from_str(&row.package_ids)?,
        discount_percent: row.discount_percent,
        total_amount: row.total_amount,
        final_amount: row.final_amount,
        report,
        remarks: row.remarks,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
