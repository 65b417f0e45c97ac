//! Input checks shared by the service (fail fast) and the ledger (last line).

use crate::error::LedgerError;

/// Longest accepted security name, in bytes.
pub const MAX_NAME_LEN: usize = 64;

/// Accept names that are non-empty, not blank, free of control characters and
/// at most `MAX_NAME_LEN` bytes long.
pub fn validate_name(name: &str) -> Result<(), LedgerError> {
    let reason = if name.is_empty() {
        "empty"
    } else if name.trim().is_empty() {
        "blank"
    } else if name.len() > MAX_NAME_LEN {
        "longer than 64 bytes"
    } else if name.chars().any(char::is_control) {
        "contains control characters"
    } else {
        return Ok(());
    };

    Err(LedgerError::InvalidName {
        name: String::from(name),
        reason,
    })
}

/// Accept finite, non-negative prices.
pub fn validate_price(price: f64) -> Result<(), LedgerError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidPrice(price))
    }
}
