//! Barcode and manual scan-code resolution.
//!
//! Sample labels carry a linear barcode encoding `"{patientId}-{visitId}"`.
//! A scan (or manually typed code) is parsed, recorded in a short history,
//! and routed to the detail screen for the scanning role. A repeat of the
//! immediately preceding code is suppressed so a label sitting under the
//! camera does not fire navigation on every frame.

mod history;

pub use history::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Role;

/// Scan resolution errors.
#[derive(Error, Debug, PartialEq)]
pub enum ScanError {
    #[error("Invalid code format (expected patientId-visitId): {0:?}")]
    InvalidFormat(String),
}

pub type ScanResult<T> = Result<T, ScanError>;

/// A decoded scan code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanCode {
    /// Patient half of the code
    pub patient_id: String,
    /// Visit half of the code
    pub visit_id: String,
}

impl ScanCode {
    /// Parse a raw code of the shape `"{patientId}-{visitId}"`.
    ///
    /// Exactly one `-` delimiter, both halves non-empty; anything else is a
    /// format error.
    pub fn parse(raw: &str) -> ScanResult<ScanCode> {
        let raw = raw.trim();
        let (patient_id, visit_id) = raw
            .split_once('-')
            .ok_or_else(|| ScanError::InvalidFormat(raw.to_string()))?;

        if patient_id.is_empty() || visit_id.is_empty() || visit_id.contains('-') {
            return Err(ScanError::InvalidFormat(raw.to_string()));
        }

        Ok(ScanCode {
            patient_id: patient_id.to_string(),
            visit_id: visit_id.to_string(),
        })
    }
}

impl std::fmt::Display for ScanCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.patient_id, self.visit_id)
    }
}

/// Detail-screen path for a role and a decoded code.
pub fn route_for(role: Role, code: &ScanCode) -> String {
    match role {
        Role::Pathologist => format!(
            "/pathologist/patients/{}/visits/{}",
            code.patient_id, code.visit_id
        ),
        Role::Technician => format!(
            "/technician/samples/{}/visits/{}",
            code.patient_id, code.visit_id
        ),
        Role::Receptionist => format!("/receptionist/patients/{}", code.patient_id),
        Role::Admin => format!("/admin/patients/{}", code.patient_id),
    }
}

/// Result of an accepted scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    /// The decoded code
    pub code: ScanCode,
    /// Path the UI should navigate to
    pub route: String,
}

/// Stateful scan handler: parse, dedupe, record, route.
#[derive(Debug, Default)]
pub struct ScanResolver {
    history: ScanHistory,
    last_code: Option<String>,
}

impl ScanResolver {
    /// Create a resolver with empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one raw scan.
    ///
    /// Returns `Ok(None)` when the code repeats the immediately preceding
    /// accepted scan (no navigation, no beep). Malformed codes error without
    /// touching the history or the duplicate tracker.
    pub fn scan(&mut self, role: Role, raw: &str) -> ScanResult<Option<ScanOutcome>> {
        let code = ScanCode::parse(raw)?;
        let rendered = code.to_string();

        if self.last_code.as_deref() == Some(rendered.as_str()) {
            return Ok(None);
        }

        self.history.record(&code);
        self.last_code = Some(rendered);

        let route = route_for(role, &code);
        Ok(Some(ScanOutcome { code, route }))
    }

    /// Recent accepted scans, newest first.
    pub fn history(&self) -> &[ScanRecord] {
        self.history.entries()
    }
}
