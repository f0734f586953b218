//! Visit models and the canonical status vocabulary.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::billing;

/// Canonical visit status lifecycle.
///
/// `Booked → Pending → Collected → Processing → ReportReady → Completed`,
/// with `Cancelled` reachable from every non-terminal status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VisitStatus {
    /// Created at the reception desk, sample not yet due
    Booked,
    /// Awaiting sample collection (online bookings start here)
    Pending,
    /// Sample collected
    Collected,
    /// Sample under analysis
    Processing,
    /// Report drafted, awaiting delivery
    ReportReady,
    /// Report delivered; terminal
    Completed,
    /// Abandoned at any pre-terminal stage; terminal
    Cancelled,
}

impl VisitStatus {
    /// All statuses in lifecycle order, `Cancelled` last.
    pub const ALL: [VisitStatus; 7] = [
        VisitStatus::Booked,
        VisitStatus::Pending,
        VisitStatus::Collected,
        VisitStatus::Processing,
        VisitStatus::ReportReady,
        VisitStatus::Completed,
        VisitStatus::Cancelled,
    ];

    /// Display name, as shown on screens and stored by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStatus::Booked => "Booked",
            VisitStatus::Pending => "Pending",
            VisitStatus::Collected => "Collected",
            VisitStatus::Processing => "Processing",
            VisitStatus::ReportReady => "Report Ready",
            VisitStatus::Completed => "Completed",
            VisitStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse a status from its display name.
    pub fn parse(s: &str) -> Option<VisitStatus> {
        match s {
            "Booked" => Some(VisitStatus::Booked),
            "Pending" => Some(VisitStatus::Pending),
            "Collected" => Some(VisitStatus::Collected),
            "Processing" => Some(VisitStatus::Processing),
            "Report Ready" => Some(VisitStatus::ReportReady),
            "Completed" => Some(VisitStatus::Completed),
            "Cancelled" => Some(VisitStatus::Cancelled),
            _ => None,
        }
    }

    /// Position in the forward chain. `Cancelled` has no rank.
    pub fn rank(&self) -> Option<u8> {
        match self {
            VisitStatus::Booked => Some(0),
            VisitStatus::Pending => Some(1),
            VisitStatus::Collected => Some(2),
            VisitStatus::Processing => Some(3),
            VisitStatus::ReportReady => Some(4),
            VisitStatus::Completed => Some(5),
            VisitStatus::Cancelled => None,
        }
    }

    /// Terminal statuses accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, VisitStatus::Completed | VisitStatus::Cancelled)
    }
}

impl std::fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a visit was booked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingType {
    /// In-person at reception
    Offline,
    /// Patient-initiated online flow
    Online,
}

impl BookingType {
    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Offline => "Offline",
            BookingType::Online => "Online",
        }
    }

    /// Parse a booking type from its display name.
    pub fn parse(s: &str) -> Option<BookingType> {
        match s {
            "Offline" => Some(BookingType::Offline),
            "Online" => Some(BookingType::Online),
            _ => None,
        }
    }

    /// Status a fresh visit starts in. Offline bookings are confirmed at the
    /// desk; online bookings wait for the patient to show up.
    pub fn initial_status(&self) -> VisitStatus {
        match self {
            BookingType::Offline => VisitStatus::Booked,
            BookingType::Online => VisitStatus::Pending,
        }
    }
}

/// Reference to an uploaded report file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportFile {
    /// Original file name (e.g., "cbc-report.pdf")
    pub file_name: String,
    /// Hex-encoded SHA-256 of the file contents
    pub sha256: String,
    /// Upload timestamp
    pub uploaded_at: String,
}

impl ReportFile {
    /// Build a report reference from raw file bytes, computing the checksum.
    pub fn from_bytes(file_name: String, bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self {
            file_name,
            sha256: hex::encode(hasher.finalize()),
            uploaded_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// One booked episode of diagnostic testing for a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Visit {
    /// Unique visit identifier
    pub visit_id: String,
    /// Owning patient id
    pub patient_id: String,
    /// Current lifecycle status
    pub status: VisitStatus,
    /// How the visit was booked
    pub booking_type: BookingType,
    /// Selected test ids
    pub test_ids: Vec<String>,
    /// Selected package ids
    pub package_ids: Vec<String>,
    /// Visit-level discount percentage (0-100)
    pub discount_percent: f64,
    /// Cached subtotal before discount
    pub total_amount: f64,
    /// Cached payable amount after discount
    pub final_amount: f64,
    /// Attached report, present once completed
    pub report: Option<ReportFile>,
    /// Latest staff remarks
    pub remarks: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Visit {
    /// Create a new visit in the initial status for its booking type.
    ///
    /// The id is a hyphen-free uuid so [`Visit::scan_code`] contains exactly
    /// one hyphen and parses back into its two halves.
    pub fn new(patient_id: String, booking_type: BookingType) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            visit_id: uuid::Uuid::new_v4().simple().to_string(),
            patient_id,
            status: booking_type.initial_status(),
            booking_type,
            test_ids: Vec::new(),
            package_ids: Vec::new(),
            discount_percent: 0.0,
            total_amount: 0.0,
            final_amount: 0.0,
            report: None,
            remarks: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// The barcode value printed on this visit's sample label.
    pub fn scan_code(&self) -> String {
        format!("{}-{}", self.patient_id, self.visit_id)
    }

    /// Whether a report file has been attached.
    pub fn has_report(&self) -> bool {
        self.report.is_some()
    }

    /// Recompute the cached amounts from resolved prices. The single writer
    /// of `total_amount`/`final_amount`; every screen reads these figures.
    pub fn reprice(&mut self, test_prices: &[f64], package_final_prices: &[f64]) {
        self.total_amount = billing::subtotal(test_prices, package_final_prices);
        self.final_amount = billing::apply_discount(self.total_amount, self.discount_percent);
        self.touch();
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in VisitStatus::ALL {
            assert_eq!(VisitStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(VisitStatus::parse("ReportReady"), None); // display name has a space
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(VisitStatus::Completed.is_terminal());
        assert!(VisitStatus::Cancelled.is_terminal());
        assert!(!VisitStatus::ReportReady.is_terminal());
    }

    #[test]
    fn test_initial_status_by_booking_type() {
        let offline = Visit::new("p1".into(), BookingType::Offline);
        assert_eq!(offline.status, VisitStatus::Booked);

        let online = Visit::new("p1".into(), BookingType::Online);
        assert_eq!(online.status, VisitStatus::Pending);
    }

    #[test]
    fn test_scan_code_shape() {
        let visit = Visit::new("p1".into(), BookingType::Offline);
        let code = visit.scan_code();
        assert_eq!(code, format!("p1-{}", visit.visit_id));
        // One hyphen, the delimiter
        assert_eq!(code.matches('-').count(), 1);
        assert!(!visit.visit_id.contains('-'));
    }

    #[test]
    fn test_reprice() {
        let mut visit = Visit::new("p1".into(), BookingType::Offline);
        visit.discount_percent = 10.0;
        visit.reprice(&[100.0, 200.0], &[]);
        assert_eq!(visit.total_amount, 300.0);
        assert_eq!(visit.final_amount, 270.0);
    }

    #[test]
    fn test_report_file_checksum() {
        let report = ReportFile::from_bytes("cbc.pdf".into(), b"%PDF-1.4 fake");
        assert_eq!(report.file_name, "cbc.pdf");
        assert_eq!(report.sha256.len(), 64);

        // Same bytes, same digest
        let again = ReportFile::from_bytes("other.pdf".into(), b"%PDF-1.4 fake");
        assert_eq!(report.sha256, again.sha256);
    }
}
