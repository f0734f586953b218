//! Patient database operations.

use rusqlite::{params, OptionalExtension};
use strsim::jaro_winkler;

use super::{fts_prefix_query, Database, DbResult};
use crate::models::Patient;

impl Database {
    /// Insert a new patient.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO patients (
                patient_id, name, email, mobile, address, age, gender,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                patient.patient_id,
                patient.name,
                patient.email,
                patient.mobile,
                patient.address,
                patient.age,
                patient.gender,
                patient.created_at,
                patient.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Update an existing patient.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                email = ?3,
                mobile = ?4,
                address = ?5,
                age = ?6,
                gender = ?7,
                updated_at = datetime('now')
            WHERE patient_id = ?1
            "#,
            params![
                patient.patient_id,
                patient.name,
                patient.email,
                patient.mobile,
                patient.address,
                patient.age,
                patient.gender,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, patient_id: &str) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT patient_id, name, email, mobile, address, age, gender,
                       created_at, updated_at
                FROM patients
                WHERE patient_id = ?
                "#,
                [patient_id],
                map_patient,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Search patients by name, email, or mobile.
    pub fn search_patients(&self, query: &str, limit: usize) -> DbResult<Vec<Patient>> {
        let fts_query = fts_prefix_query(query);
        if fts_query.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(
            r#"
            SELECT p.patient_id, p.name, p.email, p.mobile, p.address, p.age, p.gender,
                   p.created_at, p.updated_at
            FROM patients p
            JOIN patients_fts fts ON p.rowid = fts.rowid
            WHERE patients_fts MATCH ?
            "#,
        )?;
        let rows = stmt.query_map([&fts_query], map_patient)?;
        let mut patients = rows.collect::<Result<Vec<_>, _>>()?;

        let query_lower = query.to_lowercase();
        patients.sort_by(|a, b| {
            let sa = jaro_winkler(&query_lower, &a.name.to_lowercase());
            let sb = jaro_winkler(&query_lower, &b.name.to_lowercase());
            sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
        });
        patients.truncate(limit);
        Ok(patients)
    }

    /// List all patients.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT patient_id, name, email, mobile, address, age, gender,
                   created_at, updated_at
            FROM patients
            ORDER BY name
            "#,
        )?;
        let rows = stmt.query_map([], map_patient)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a patient. Their visits cascade.
    pub fn delete_patient(&self, patient_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE patient_id = ?", [patient_id])?;
        Ok(rows_affected > 0)
    }
}

fn map_patient(row: &rusqlite::Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        patient_id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        mobile: row.get(3)?,
        address: row.get(4)?,
        age: row.get(5)?,
        gender: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
