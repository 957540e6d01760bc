//! # Validation Module
//!
//! Turns raw form-field text into checked domain values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (desk CLI / form)                                  │
//! │  └── Collects text exactly as typed                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required / format / range checks                                  │
//! │  └── One error per failed precondition, naming the field               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Constructors (BookingItem::new, GuestCount::new, Bill::new)  │
//! │  └── Invariants that must hold however the value was built             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use roomrent_core::validation::{parse_booking, parse_guests};
//!
//! let item = parse_booking("AC Room", "2000.00", "2024-05-01", "2024-05-03").unwrap();
//! assert_eq!(item.days(), 3);
//!
//! let err = parse_booking("AC Room", "2000", "2024-06-10", "2024-06-09").unwrap_err();
//! assert_eq!(err.to_string(), "end date 09-06-2024 must not be before start date 10-06-2024");
//!
//! assert!(parse_guests("0", "1").is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{BookingItem, GuestCount, RoomType};
use crate::MAX_BILL_NUMBER_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Accepted date inputs: ISO first, then the form's day-first layout.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d-%m-%Y"];

const MAX_PHONE_LEN: usize = 20;

/// Guest counts above this are almost certainly typos.
const MAX_GUESTS: i64 = 99;

// =============================================================================
// String Validators
// =============================================================================

/// Rejects empty or whitespace-only text.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be empty
/// - Digits, spaces, `+` and `-` only
/// - At most 20 characters
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();
    validate_required("phone", phone)?;

    if phone.chars().count() > MAX_PHONE_LEN {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: MAX_PHONE_LEN,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '+' || c == '-')
    {
        return Err(ValidationError::invalid(
            "phone",
            "must contain only digits, spaces, '+' and '-'",
        ));
    }

    Ok(())
}

/// Validates a bill number and returns it trimmed.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_BILL_NUMBER_LEN`] characters
/// - Letters, digits, hyphens and underscores only, because the bill
///   number names the invoice file
///
/// ```rust
/// use roomrent_core::validation::validate_bill_number;
///
/// assert_eq!(validate_bill_number(" B100 ").unwrap(), "B100");
/// assert!(validate_bill_number("").is_err());
/// assert!(validate_bill_number("../etc/passwd").is_err());
/// ```
pub fn validate_bill_number(bill_number: &str) -> ValidationResult<String> {
    let bill_number = bill_number.trim();
    validate_required("bill number", bill_number)?;

    if bill_number.chars().count() > MAX_BILL_NUMBER_LEN {
        return Err(ValidationError::TooLong {
            field: "bill number".to_string(),
            max: MAX_BILL_NUMBER_LEN,
        });
    }

    if !bill_number
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::invalid(
            "bill number",
            "must contain only letters, numbers, hyphens, and underscores",
        ));
    }

    Ok(bill_number.to_string())
}

// =============================================================================
// Parsers
// =============================================================================

/// Parses a per-day rate.
///
/// ## Rules
/// - Must not be empty
/// - Non-negative decimal with at most two fraction digits
pub fn parse_rate(text: &str) -> ValidationResult<Money> {
    validate_required("rate", text)?;
    Money::parse_decimal(text).ok_or_else(|| {
        ValidationError::invalid(
            "rate",
            "must be a valid non-negative number with at most two decimals",
        )
    })
}

/// Parses a calendar date in `YYYY-MM-DD` or `DD-MM-YYYY` form.
pub fn parse_date(field: &str, text: &str) -> ValidationResult<NaiveDate> {
    let text = text.trim();
    validate_required(field, text)?;

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .ok_or_else(|| ValidationError::invalid(field, "expected YYYY-MM-DD or DD-MM-YYYY"))
}

/// Parses a whole, non-negative count.
///
/// ## User Workflow
/// ```text
/// "2"   → Ok(2)
/// ""    → "<field> is required"
/// "two" → "<field> has invalid format: must be a whole number"
/// "-1"  → "<field> must be between 0 and 99"
/// ```
pub fn parse_count(field: &str, text: &str) -> ValidationResult<u32> {
    let text = text.trim();
    validate_required(field, text)?;

    let value: i64 = text
        .parse()
        .map_err(|_| ValidationError::invalid(field, "must be a whole number"))?;

    if !(0..=MAX_GUESTS).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_GUESTS,
        });
    }

    Ok(value as u32)
}

/// Parses adult and child counts; at least one adult is required.
pub fn parse_guests(adults: &str, children: &str) -> ValidationResult<GuestCount> {
    let adults = parse_count("number of adults", adults)?;
    let children = parse_count("number of children", children)?;
    GuestCount::new(adults, children)
}

/// Parses the four fields of one "Add Room" submission.
///
/// Checks run in form order: room type, rate, start date, end date, then
/// date ordering. The first failure is returned.
pub fn parse_booking(
    room_type: &str,
    rate: &str,
    start: &str,
    end: &str,
) -> ValidationResult<BookingItem> {
    let room_type: RoomType = room_type.parse()?;
    let rate = parse_rate(rate)?;
    let start = parse_date("start date", start)?;
    let end = parse_date("end date", end)?;
    BookingItem::new(room_type, rate, start, end)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("9000000000").is_ok());
        assert!(validate_phone("+91 98765-43210").is_ok());

        assert!(validate_phone("").is_err());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone(&"9".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_bill_number() {
        assert!(validate_bill_number("B100").is_ok());
        assert!(validate_bill_number("2024-05_001").is_ok());

        assert!(validate_bill_number("   ").is_err());
        assert!(validate_bill_number("B 100").is_err());
        assert!(validate_bill_number("a/b").is_err());
        assert!(validate_bill_number(&"B".repeat(51)).is_err());
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("2000.00").unwrap().cents(), 200_000);
        assert_eq!(parse_rate("").unwrap_err(), ValidationError::required("rate"));

        let err = parse_rate("-5").unwrap_err();
        assert!(err.to_string().contains("non-negative"));
        assert!(parse_rate("abc").is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(parse_date("start date", "2024-05-01").unwrap(), expected);
        assert_eq!(parse_date("start date", "01-05-2024").unwrap(), expected);

        assert!(parse_date("start date", "2024-02-30").is_err());
        assert!(parse_date("start date", "tomorrow").is_err());
    }

    #[test]
    fn test_parse_guests() {
        let guests = parse_guests("2", "1").unwrap();
        assert_eq!((guests.adults(), guests.children()), (2, 1));

        assert!(matches!(
            parse_guests("0", "1"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_guests("2", "-1"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_guests("two", "0"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_guests("", "0"),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_parse_booking_distinguishes_failures() {
        assert!(matches!(
            parse_booking("Tent", "100", "2024-05-01", "2024-05-02"),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(matches!(
            parse_booking("AC Room", "1,000", "2024-05-01", "2024-05-02"),
            Err(ValidationError::InvalidFormat { ref field, .. }) if field == "rate"
        ));
        assert!(matches!(
            parse_booking("AC Room", "1000", "2024-05-01", "someday"),
            Err(ValidationError::InvalidFormat { ref field, .. }) if field == "end date"
        ));
        assert!(matches!(
            parse_booking("AC Room", "1000", "2024-06-10", "2024-06-09"),
            Err(ValidationError::DateOrder { .. })
        ));
    }

    #[test]
    fn test_parse_booking_rejects_amounts_that_cannot_be_billed() {
        // Parses as a rate, but rate × days would not fit in paise.
        assert!(parse_rate("999999999999999").is_ok());
        assert!(matches!(
            parse_booking("AC Room", "999999999999999", "2024-01-01", "2124-01-01"),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "rate"
        ));
        assert!(matches!(
            parse_booking("AC Room", "10000000.00", "2024-01-01", "2124-01-01"),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "length of stay"
        ));
        assert!(parse_booking("AC Room", "10000000.00", "2024-01-01", "2024-12-31").is_ok());
    }
}
