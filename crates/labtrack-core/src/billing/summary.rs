//! Billing summary assembly for display and print views.

use serde::{Deserialize, Serialize};

use crate::models::{LabTest, TestPackage, Visit};

/// Kind of a billing line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LineKind {
    Test,
    Package,
}

/// One priced line on a bill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingLine {
    /// Whether this line is a test or a package
    pub kind: LineKind,
    /// Catalog id of the test or package
    pub item_id: String,
    /// Display name
    pub name: String,
    /// Line amount (test price, or package final price)
    pub amount: f64,
}

/// Cost breakdown for one visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingSummary {
    /// Visit this summary was derived from
    pub visit_id: String,
    /// Priced lines in selection order, tests first
    pub lines: Vec<BillingLine>,
    /// Sum of line amounts
    pub subtotal: f64,
    /// Visit-level discount percentage
    pub discount_percent: f64,
    /// Absolute discount value
    pub discount_amount: f64,
    /// Flat tax added after discount
    pub tax: f64,
    /// Amount due
    pub payable: f64,
}

impl BillingSummary {
    /// Build a summary from a visit and its resolved catalog entries.
    ///
    /// `packages` pairs each selected package with its member test prices;
    /// the caller resolves those against the catalog (see
    /// `Database::package_member_prices`).
    pub fn build(
        visit: &Visit,
        tests: &[LabTest],
        packages: &[(TestPackage, Vec<f64>)],
        tax: f64,
    ) -> Self {
        let mut lines = Vec::with_capacity(tests.len() + packages.len());

        for test in tests {
            lines.push(BillingLine {
                kind: LineKind::Test,
                item_id: test.test_id.clone(),
                name: test.name.clone(),
                amount: test.price,
            });
        }

        for (package, member_prices) in packages {
            lines.push(BillingLine {
                kind: LineKind::Package,
                item_id: package.package_id.clone(),
                name: package.name.clone(),
                amount: package.final_price(member_prices),
            });
        }

        let subtotal: f64 = lines.iter().map(|l| l.amount).sum();
        let payable = super::apply_discount(subtotal, visit.discount_percent) + tax;

        Self {
            visit_id: visit.visit_id.clone(),
            lines,
            subtotal,
            discount_percent: visit.discount_percent,
            discount_amount: subtotal * visit.discount_percent / 100.0,
            tax,
            payable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingType;

    fn make_visit(discount: f64) -> Visit {
        let mut visit = Visit::new("patient-1".into(), BookingType::Offline);
        visit.discount_percent = discount;
        visit
    }

    #[test]
    fn test_summary_tests_only() {
        let visit = make_visit(10.0);
        let tests = vec![
            LabTest::new("CBC".into(), "Blood".into(), 100.0),
            LabTest::new("Lipid Profile".into(), "Blood".into(), 200.0),
        ];

        let summary = BillingSummary::build(&visit, &tests, &[], 0.0);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.subtotal, 300.0);
        assert_eq!(summary.discount_amount, 30.0);
        assert_eq!(summary.payable, 270.0);
    }

    #[test]
    fn test_summary_with_package() {
        let visit = make_visit(0.0);
        let mut pkg = TestPackage::new("Wellness".into());
        pkg.discount_percent = 10.0;

        // Package members 300 + 200 at 10% off -> 450
        let summary = BillingSummary::build(&visit, &[], &[(pkg, vec![300.0, 200.0])], 0.0);
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.lines[0].kind, LineKind::Package);
        assert_eq!(summary.lines[0].amount, 450.0);
        assert_eq!(summary.payable, 450.0);
    }

    #[test]
    fn test_summary_tax_after_discount() {
        let visit = make_visit(50.0);
        let tests = vec![LabTest::new("CBC".into(), "Blood".into(), 1000.0)];

        let summary = BillingSummary::build(&visit, &tests, &[], 18.0);
        assert_eq!(summary.payable, 518.0);
        assert_eq!(summary.tax, 18.0);
    }

    #[test]
    fn test_summary_agrees_with_visit_reprice() {
        // The invariant: the cached figures on the visit equal what the
        // summary derives, because both go through billing::apply_discount.
        let mut visit = make_visit(25.0);
        let tests = vec![LabTest::new("CBC".into(), "Blood".into(), 400.0)];
        visit.reprice(&[400.0], &[]);

        let summary = BillingSummary::build(&visit, &tests, &[], 0.0);
        assert_eq!(summary.subtotal, visit.total_amount);
        assert_eq!(summary.payable, visit.final_amount);
    }
}
