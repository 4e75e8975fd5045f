//! Plain record types and their create / update payloads.
//!
//! The [`StoreRecord`](crate::framework::StoreRecord) implementations live next to each
//! collection's actor (`inventory_actor`, `sales_actor`, `expense_actor`).

pub mod expense;
pub mod inventory;
pub mod sale;

pub use expense::*;
pub use inventory::*;
pub use sale::*;

/// Upper bound on any unit price or expense amount accepted by the store.
pub const MAX_AMOUNT: f64 = 9999.99;

/// Checks that `value` lies in `[min, MAX_AMOUNT]`.
pub(crate) fn check_amount(field: &str, value: f64, min: f64) -> Result<(), String> {
    if !value.is_finite() || value < min {
        return Err(format!("{field} must be at least {min}"));
    }
    if value > MAX_AMOUNT {
        return Err(format!("{field} must not exceed {MAX_AMOUNT}"));
    }
    Ok(())
}

/// Checks that `value` is non-blank and at most `max` characters long.
pub(crate) fn check_text(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    if value.chars().count() > max {
        return Err(format!("{field} must not exceed {max} characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_amount_bounds() {
        assert!(check_amount("price", 0.0, 0.0).is_ok());
        assert!(check_amount("price", MAX_AMOUNT, 0.0).is_ok());
        assert!(check_amount("price", -0.5, 0.0).is_err());
        assert!(check_amount("price", 10_000.0, 0.0).is_err());
        assert!(check_amount("price", f64::NAN, 0.0).is_err());
        assert_eq!(
            check_amount("amount", 0.0, MIN_EXPENSE_AMOUNT).unwrap_err(),
            "amount must be at least 0.01"
        );
    }

    #[test]
    fn test_check_text() {
        assert!(check_text("name", "Pearl set", MAX_NAME_LEN).is_ok());
        assert!(check_text("name", "   ", MAX_NAME_LEN).is_err());
        assert!(check_text("name", &"x".repeat(MAX_NAME_LEN + 1), MAX_NAME_LEN).is_err());
    }
}
