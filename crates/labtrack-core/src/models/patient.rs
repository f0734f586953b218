//! Patient models.

use serde::{Deserialize, Serialize};

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Unique patient identifier
    pub patient_id: String,
    /// Full name
    pub name: String,
    /// Contact email (also the OTP login identity)
    pub email: String,
    /// Contact mobile number
    pub mobile: String,
    /// Postal address
    pub address: Option<String>,
    /// Age in years
    pub age: Option<u32>,
    /// Gender as free text
    pub gender: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Patient {
    /// Create a new patient with required fields.
    ///
    /// The id is a hyphen-free uuid: it forms the first half of the printed
    /// scan code `{patientId}-{visitId}`, which splits on its only hyphen.
    pub fn new(name: String, email: String, mobile: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            patient_id: uuid::Uuid::new_v4().simple().to_string(),
            name,
            email,
            mobile,
            address: None,
            age: None,
            gender: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
