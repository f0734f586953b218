//! Report register export.
//!
//! The register lists every visit that has an uploaded report, with the
//! file checksum so an auditor can verify the stored PDF was not swapped
//! after upload.

use serde::{Deserialize, Serialize};

use super::escape_csv;
use crate::db::{Database, DbResult};

/// One register row per uploaded report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Visit the report belongs to
    pub visit_id: String,
    /// Patient the report belongs to
    pub patient_id: String,
    /// Visit status at export time
    pub status: String,
    /// Uploaded file name
    pub file_name: String,
    /// SHA-256 of the file contents
    pub sha256: String,
    /// Upload timestamp
    pub uploaded_at: String,
}

/// Report register covering all visits with an uploaded report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRegister {
    /// Export timestamp
    pub exported_at: String,
    /// Register rows
    pub entries: Vec<ReportEntry>,
}

impl ReportRegister {
    /// Build the register from the database.
    pub fn build(db: &Database) -> DbResult<Self> {
        let visits = db.list_visits_with_reports()?;
        let entries = visits
            .into_iter()
            .filter_map(|visit| {
                let report = visit.report?;
                Some(ReportEntry {
                    visit_id: visit.visit_id,
                    patient_id: visit.patient_id,
                    status: visit.status.as_str().to_string(),
                    file_name: report.file_name,
                    sha256: report.sha256,
                    uploaded_at: report.uploaded_at,
                })
            })
            .collect();
        Ok(Self {
            exported_at: chrono::Utc::now().to_rfc3339(),
            entries,
        })
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();
        csv.push_str("visit_id,patient_id,status,file_name,sha256,uploaded_at\n");
        for entry in &self.entries {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                escape_csv(&entry.visit_id),
                escape_csv(&entry.patient_id),
                escape_csv(&entry.status),
                escape_csv(&entry.file_name),
                entry.sha256,
                entry.uploaded_at,
            ));
        }
        csv
    }
}
