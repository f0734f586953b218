//! Bounded recent-scan history.

use serde::{Deserialize, Serialize};

use super::ScanCode;

/// Number of recent scans kept for the history panel.
pub const HISTORY_LIMIT: usize = 5;

/// One accepted scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanRecord {
    /// Raw code as scanned
    pub code: String,
    /// Decoded patient half
    pub patient_id: String,
    /// Decoded visit half
    pub visit_id: String,
    /// When the scan was accepted
    pub scanned_at: String,
}

/// Newest-first history, capped at [`HISTORY_LIMIT`] entries.
#[derive(Debug, Clone, Default)]
pub struct ScanHistory {
    entries: Vec<ScanRecord>,
}

impl ScanHistory {
    /// Record an accepted scan, evicting the oldest entry past the cap.
    pub fn record(&mut self, code: &ScanCode) {
        self.entries.insert(
            0,
            ScanRecord {
                code: code.to_string(),
                patient_id: code.patient_id.clone(),
                visit_id: code.visit_id.clone(),
                scanned_at: chrono::Utc::now().to_rfc3339(),
            },
        );
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[ScanRecord] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(n: usize) -> ScanCode {
        ScanCode {
            patient_id: format!("p{n}"),
            visit_id: format!("v{n}"),
        }
    }

    #[test]
    fn test_newest_first() {
        let mut history = ScanHistory::default();
        history.record(&code(1));
        history.record(&code(2));

        assert_eq!(history.entries()[0].code, "p2-v2");
        assert_eq!(history.entries()[1].code, "p1-v1");
    }

    #[test]
    fn test_capped_at_limit() {
        let mut history = ScanHistory::default();
        for n in 0..8 {
            history.record(&code(n));
        }

        assert_eq!(history.entries().len(), HISTORY_LIMIT);
        // Oldest entries evicted
        assert_eq!(history.entries()[0].code, "p7-v7");
        assert_eq!(history.entries()[HISTORY_LIMIT - 1].code, "p3-v3");
    }
}
