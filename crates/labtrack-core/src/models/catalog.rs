//! Test and package catalog models.

use serde::{Deserialize, Serialize};

use crate::billing;

/// A single orderable diagnostic test in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabTest {
    /// Unique test identifier
    pub test_id: String,
    /// Display name (e.g., "Complete Blood Count")
    pub name: String,
    /// Sample type required (e.g., "Blood", "Urine")
    pub sample_type: String,
    /// Price in plain currency units
    pub price: f64,
    /// Whether this test is currently orderable
    pub active: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl LabTest {
    /// Create a new catalog test with required fields.
    pub fn new(name: String, sample_type: String, price: f64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            test_id: uuid::Uuid::new_v4().to_string(),
            name,
            sample_type,
            price,
            active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// A discounted bundle of tests sold as one unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestPackage {
    /// Unique package identifier
    pub package_id: String,
    /// Package name (e.g., "Full Body Checkup")
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Member test ids
    pub test_ids: Vec<String>,
    /// Bundle discount percentage (0-100)
    pub discount_percent: f64,
    /// Whether this package is currently orderable
    pub active: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl TestPackage {
    /// Create a new empty package.
    pub fn new(name: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            package_id: uuid::Uuid::new_v4().to_string(),
            name,
            description: None,
            test_ids: Vec::new(),
            discount_percent: 0.0,
            active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Sum of member test prices before the bundle discount.
    ///
    /// `member_prices` must be the prices of this package's tests, resolved
    /// by the caller against the catalog.
    pub fn total_price(&self, member_prices: &[f64]) -> f64 {
        member_prices.iter().sum()
    }

    /// Derived price after the bundle discount.
    pub fn final_price(&self, member_prices: &[f64]) -> f64 {
        billing::apply_discount(self.total_price(member_prices), self.discount_percent)
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
    fn test_new_lab_test() {
        let test = LabTest::new("CBC".into(), "Blood".into(), 350.0);
        assert_eq!(test.name, "CBC");
        assert_eq!(test.price, 350.0);
        assert!(test.active);
        assert_eq!(test.test_id.len(), 36);
    }

    #[test]
    fn test_package_final_price() {
        let mut pkg = TestPackage::new("Wellness Panel".into());
        pkg.discount_percent = 10.0;

        // Two tests priced 300 and 200, 10% off
        assert_eq!(pkg.total_price(&[300.0, 200.0]), 500.0);
        assert_eq!(pkg.final_price(&[300.0, 200.0]), 450.0);
    }

    #[test]
    fn test_package_no_discount() {
        let pkg = TestPackage::new("Basic".into());
        assert_eq!(pkg.final_price(&[500.0]), 500.0);
    }

    #[test]
    fn test_empty_package() {
        let pkg = TestPackage::new("Empty".into());
        assert_eq!(pkg.total_price(&[]), 0.0);
        assert_eq!(pkg.final_price(&[]), 0.0);
    }
}
