//! Billing computation.
//!
//! The one place payable amounts are derived. Screens, print views, and
//! exports all go through these functions; the backend's stored figure
//! remains authoritative, this recomputation is for display and invoicing.

mod summary;

pub use summary::*;

/// Sum of selected test prices and package final prices.
pub fn subtotal(test_prices: &[f64], package_final_prices: &[f64]) -> f64 {
    test_prices.iter().sum::<f64>() + package_final_prices.iter().sum::<f64>()
}

/// Apply a percentage discount: `amount − amount × discount/100`.
pub fn apply_discount(amount: f64, discount_percent: f64) -> f64 {
    amount - amount * (discount_percent / 100.0)
}

/// Payable amount for a selection of tests and packages.
pub fn final_amount(
    test_prices: &[f64],
    package_final_prices: &[f64],
    discount_percent: f64,
) -> f64 {
    apply_discount(subtotal(test_prices, package_final_prices), discount_percent)
}

/// Payable amount with a flat tax added after the discount.
pub fn final_amount_with_tax(
    test_prices: &[f64],
    package_final_prices: &[f64],
    discount_percent: f64,
    tax: f64,
) -> f64 {
    final_amount(test_prices, package_final_prices, discount_percent) + tax
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_amount_tests_only() {
        // ₹100 + ₹200 at 10% off
        assert_eq!(final_amount(&[100.0, 200.0], &[], 10.0), 270.0);
    }

    #[test]
    fn test_final_amount_packages_only() {
        assert_eq!(final_amount(&[], &[500.0], 0.0), 500.0);
    }

    #[test]
    fn test_final_amount_mixed() {
        // (150 + 450) at 0% off
        assert_eq!(final_amount(&[150.0], &[450.0], 0.0), 600.0);
    }

    #[test]
    fn test_zero_selection() {
        assert_eq!(final_amount(&[], &[], 25.0), 0.0);
    }

    #[test]
    fn test_full_discount() {
        assert_eq!(final_amount(&[400.0], &[], 100.0), 0.0);
    }

    #[test]
    fn test_tax_added_after_discount() {
        // 1000 at 10% off = 900, plus flat ₹50 tax
        assert_eq!(final_amount_with_tax(&[1000.0], &[], 10.0, 50.0), 950.0);
    }
}
