//! Pricing engine
//!
//! All arithmetic happens in integer cents. Precedence: bundles and
//! flat-priced services charge the base price regardless of quantity;
//! every other unit scales linearly with the client-declared quantity.

use crate::error::AppError;
use crate::models::{PricingUnit, Service, ServiceType};

/// Compute the total price in cents for `quantity` units of `service`.
///
/// Quantity must be at least 1. Bundles and flat-unit services ignore it.
pub fn price_cents(service: &Service, quantity: i32) -> Result<i64, AppError> {
    if quantity < 1 {
        return Err(AppError::InvalidInput(
            "Quantity must be at least 1".to_string(),
        ));
    }

    if service.service_type() == ServiceType::Bundle || service.unit == PricingUnit::Flat {
        return Ok(service.base_price_cents);
    }

    service
        .base_price_cents
        .checked_mul(quantity as i64)
        .ok_or_else(|| AppError::InvalidInput("Quantity too large".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("builtin catalog is valid")
    }

    #[test]
    fn test_per_file_price_scales_linearly() {
        let cat = catalog();
        let service = cat.lookup("pdf_to_word").expect("exists");
        // $2.99 x 3 = $8.97
        assert_eq!(price_cents(service, 3).expect("priced"), 897);
        assert_eq!(price_cents(service, 1).expect("priced"), 299);
    }

    #[test]
    fn test_bundle_ignores_quantity() {
        let cat = catalog();
        let bundle = cat.lookup("emergency_bundle_pro").expect("exists");
        // $29.99 regardless of quantity
        assert_eq!(price_cents(bundle, 1).expect("priced"), 2999);
        assert_eq!(price_cents(bundle, 5).expect("priced"), 2999);
    }

    #[test]
    fn test_flat_unit_ignores_quantity() {
        let cat = catalog();
        let flat = cat.lookup("pdf_merge").expect("exists");
        assert_eq!(price_cents(flat, 1).expect("priced"), 299);
        assert_eq!(price_cents(flat, 100).expect("priced"), 299);
    }

    #[test]
    fn test_per_page_price_exact_at_large_quantity() {
        let cat = catalog();
        let per_page = cat.lookup("redaction_basic").expect("exists");
        // Integer cents: no floating point drift at q = 10,000.
        assert_eq!(price_cents(per_page, 10_000).expect("priced"), 5_990_000);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let cat = catalog();
        let service = cat.lookup("pdf_to_word").expect("exists");
        assert!(price_cents(service, 0).is_err());
        assert!(price_cents(service, -1).is_err());
    }
}
