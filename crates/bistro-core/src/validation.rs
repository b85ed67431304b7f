//! # Validation Module
//!
//! Input validation for Bistro RMS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Request handlers (out of scope here)                      │
//! │  ├── Deserialization / type validation                              │
//! │  └── Immediate caller feedback                                      │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation                    │
//! │  ├── Well-formed intervals, non-negative tips, shift duration       │
//! │  └── Runs before any state is consulted                             │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL / UNIQUE constraints                                  │
//! │  └── Foreign key constraints                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::interval::TimeRange;
use crate::MIN_SHIFT_MINUTES;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name on a reservation.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a staff member's display name.
pub fn validate_staff_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a menu item name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a menu item price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (complimentary items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a tip amount in cents.
///
/// ## Rules
/// - Must be non-negative; zero tips are legal
pub fn validate_tip_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::NegativeTip);
    }

    Ok(())
}

/// Validates a table's business number.
pub fn validate_table_number(number: i64) -> ValidationResult<()> {
    if number <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "table number".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Interval Validators
// =============================================================================

/// Validates a shift interval: well-formed and at least one hour long.
///
/// ## Example
/// A 60-minute shift passes; 59 minutes is rejected with
/// "Shift must be at least 1 hour long".
pub fn validate_shift_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> ValidationResult<TimeRange> {
    let range = TimeRange::new(start, end)?;

    if range.duration_minutes() < MIN_SHIFT_MINUTES {
        return Err(ValidationError::ShiftTooShort);
    }

    Ok(range)
}

/// Validates a query date range (`start <= end`; equal endpoints allowed).
pub fn validate_query_range(start: DateTime<Utc>, end: DateTime<Utc>) -> ValidationResult<()> {
    if start > end {
        return Err(ValidationError::InvertedDateRange);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 10, hour, min, 0).unwrap()
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Alice").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_tip_cents() {
        assert!(validate_tip_cents(0).is_ok());
        assert!(validate_tip_cents(500).is_ok());
        assert!(matches!(
            validate_tip_cents(-1),
            Err(ValidationError::NegativeTip)
        ));
    }

    #[test]
    fn test_validate_table_number() {
        assert!(validate_table_number(12).is_ok());
        assert!(validate_table_number(0).is_err());
        assert!(validate_table_number(-3).is_err());
    }

    #[test]
    fn test_shift_of_exactly_one_hour_is_accepted() {
        assert!(validate_shift_range(at(9, 0), at(10, 0)).is_ok());
    }

    #[test]
    fn test_shift_of_59_minutes_is_rejected() {
        let err = validate_shift_range(at(9, 0), at(9, 59)).unwrap_err();
        assert_eq!(err.to_string(), "Shift must be at least 1 hour long");
    }

    #[test]
    fn test_shift_with_inverted_range_is_rejected_first() {
        let err = validate_shift_range(at(10, 0), at(9, 0)).unwrap_err();
        assert_eq!(err.to_string(), "End time must be after start time");
    }

    #[test]
    fn test_validate_query_range() {
        assert!(validate_query_range(at(9, 0), at(10, 0)).is_ok());
        assert!(validate_query_range(at(9, 0), at(9, 0)).is_ok());
        assert!(matches!(
            validate_query_range(at(10, 0), at(9, 0)),
            Err(ValidationError::InvertedDateRange)
        ));
    }
}
