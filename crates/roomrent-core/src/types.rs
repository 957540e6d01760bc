//! # Domain Types
//!
//! Core domain types for the room-rental desk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │   BookingItem   │   │      Bill       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (CUST<n>)   │   │  room_type      │   │  bill_number    │       │
//! │  │  name, address  │   │  rate (Money)   │   │  customer (copy)│       │
//! │  │  phone          │   │  start, end     │   │  guests         │       │
//! │  │  id_type/number │   │  days() = Δ + 1 │   │  items          │       │
//! │  │  photo_path     │   └─────────────────┘   │  issued_at      │       │
//! │  │  created_at     │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │     IdType      │   │    RoomType     │       │
//! │  │  bps (u32)      │   │  Aadhaar, PAN,  │   │  NON-AC, AC,    │       │
//! │  │  1800 = 18%     │   │  DL, Passport,  │   │  Other(label)   │       │
//! │  └─────────────────┘   │  Voter ID       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Customers are durable (owned by the store); booking items and bills only
//! live for the duration of one invoice.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::billing::Charges;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation;
use crate::{MAX_BOOKING_ITEMS, MAX_DAILY_RATE, MAX_STAY_DAYS};

/// Date format used on screen and on the invoice details block.
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

// =============================================================================
// Tax Rate
// =============================================================================

/// GST rate, stored in basis points so tax math stays in integers.
///
/// 1 basis point = 0.01%, so 1800 bps = 18% GST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// 1800 bps is 18%.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Rate in hundredths of a percent.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

/// Renders as a percentage label: `18%`, `12.5%`, `0.25%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Government ID Type
// =============================================================================

/// Government identity document shown at check-in.
///
/// Serialized with the same labels the operator picks from, so the customer
/// file stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdType {
    #[serde(rename = "Aadhaar Card")]
    Aadhaar,
    #[serde(rename = "PAN Card")]
    Pan,
    #[serde(rename = "Driving License")]
    DrivingLicense,
    #[serde(rename = "Passport")]
    Passport,
    #[serde(rename = "Voter ID")]
    VoterId,
}

impl IdType {
    /// Every accepted ID type, in picker order.
    pub const ALL: [IdType; 5] = [
        IdType::Aadhaar,
        IdType::Pan,
        IdType::DrivingLicense,
        IdType::Passport,
        IdType::VoterId,
    ];

    /// The operator-facing label.
    pub const fn label(&self) -> &'static str {
        match self {
            IdType::Aadhaar => "Aadhaar Card",
            IdType::Pan => "PAN Card",
            IdType::DrivingLicense => "Driving License",
            IdType::Passport => "Passport",
            IdType::VoterId => "Voter ID",
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Case-insensitive match on the label.
impl FromStr for IdType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::required("ID type"));
        }
        IdType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "ID type".to_string(),
                allowed: IdType::ALL.iter().map(|t| t.label().to_string()).collect(),
            })
    }
}

// =============================================================================
// Room Type
// =============================================================================

/// Kind of room being rented.
///
/// Parsing from text only admits the standard room types; [`RoomType::Other`]
/// exists so new categories can be introduced in code without touching the
/// pricing or layout paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomType {
    NonAc,
    Ac,
    Other(String),
}

impl RoomType {
    /// Standard room types, in picker order.
    pub const STANDARD: [RoomType; 2] = [RoomType::NonAc, RoomType::Ac];

    /// Creates a custom room type.
    pub fn other(label: impl Into<String>) -> CoreResult<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ValidationError::required("room type").into());
        }
        Ok(RoomType::Other(label.trim().to_string()))
    }

    /// The label printed on the invoice.
    pub fn label(&self) -> &str {
        match self {
            RoomType::NonAc => "NON-AC Room",
            RoomType::Ac => "AC Room",
            RoomType::Other(label) => label,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoomType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::required("room type"));
        }
        RoomType::STANDARD
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "room type".to_string(),
                allowed: RoomType::STANDARD
                    .iter()
                    .map(|t| t.label().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer.
///
/// Field names on disk are stable (`gov_id_type`, `added_on`, ...) so files
/// written by earlier versions of the desk load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// `CUST<n>`, assigned by the store, never reused.
    pub id: String,

    pub name: String,

    /// Free text, may span several lines.
    pub address: String,

    pub phone: String,

    #[serde(rename = "gov_id_type")]
    pub id_type: IdType,

    #[serde(rename = "gov_id_number")]
    pub id_number: String,

    /// Path of the copy kept in photo storage.
    #[serde(rename = "gov_id_photo_path")]
    pub photo_path: PathBuf,

    #[serde(rename = "added_on")]
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Label used in the customer picker: `CUST1 - Asha Rao (9000000000)`.
    pub fn label(&self) -> String {
        format!("{} - {} ({})", self.id, self.name, self.phone)
    }
}

/// Customer fields as collected by the add-customer form.
///
/// Everything except the identifier and timestamp, which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub id_type: IdType,
    pub id_number: String,
    pub photo_path: PathBuf,
}

impl NewCustomer {
    /// Checks every required field is non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_required("name", &self.name)?;
        validation::validate_required("address", &self.address)?;
        validation::validate_phone(&self.phone)?;
        validation::validate_required("ID number", &self.id_number)?;
        if self.photo_path.as_os_str().is_empty() {
            return Err(ValidationError::required("ID photo"));
        }
        Ok(())
    }

    /// Stamps identifier and creation time onto the form data.
    pub fn into_customer(self, id: String, created_at: DateTime<Utc>) -> Customer {
        Customer {
            id,
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            phone: self.phone.trim().to_string(),
            id_type: self.id_type,
            id_number: self.id_number.trim().to_string(),
            photo_path: self.photo_path,
            created_at,
        }
    }
}

// =============================================================================
// Booking Item
// =============================================================================

/// One room booked over an inclusive date range at a fixed daily rate.
///
/// ## Invariants
/// - `end >= start`, so [`BookingItem::days`] is at least 1
/// - `0 <= rate <= MAX_DAILY_RATE`
/// - `days <= MAX_STAY_DAYS`
///
/// The two upper bounds keep `rate × days` summed over a full bill well
/// inside `i64` paise and every amount inside its invoice column.
///
/// Both hold by construction; fields are private for that reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingItem {
    room_type: RoomType,
    rate: Money,
    start: NaiveDate,
    end: NaiveDate,
}

impl BookingItem {
    /// Creates a booking, rejecting stays that end before they start.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use roomrent_core::{BookingItem, Money, RoomType};
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
    /// assert!(BookingItem::new(RoomType::Ac, Money::from_cents(100), d(10), d(9)).is_err());
    /// assert_eq!(
    ///     BookingItem::new(RoomType::Ac, Money::from_cents(100), d(10), d(10)).unwrap().days(),
    ///     1
    /// );
    /// ```
    pub fn new(
        room_type: RoomType,
        rate: Money,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if rate.is_negative() {
            return Err(ValidationError::invalid("rate", "must be a non-negative number"));
        }
        if rate > MAX_DAILY_RATE {
            return Err(ValidationError::OutOfRange {
                field: "rate".to_string(),
                min: 0,
                max: MAX_DAILY_RATE.major(),
            });
        }
        if end < start {
            return Err(ValidationError::DateOrder {
                start: start.format(DISPLAY_DATE_FORMAT).to_string(),
                end: end.format(DISPLAY_DATE_FORMAT).to_string(),
            });
        }
        if (end - start).num_days() >= MAX_STAY_DAYS {
            return Err(ValidationError::OutOfRange {
                field: "length of stay".to_string(),
                min: 1,
                max: MAX_STAY_DAYS,
            });
        }
        Ok(BookingItem {
            room_type,
            rate,
            start,
            end,
        })
    }

    pub fn room_type(&self) -> &RoomType {
        &self.room_type
    }

    /// Per-day rate.
    pub fn rate(&self) -> Money {
        self.rate
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Length of stay. Check-in and check-out day are both charged.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// `rate × days`.
    pub fn line_amount(&self) -> Money {
        self.rate.multiply_quantity(self.days())
    }
}

// =============================================================================
// Guest Count
// =============================================================================

/// Guests staying under one bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestCount {
    adults: u32,
    children: u32,
}

impl GuestCount {
    /// At least one adult is required.
    pub fn new(adults: u32, children: u32) -> Result<Self, ValidationError> {
        if adults == 0 {
            return Err(ValidationError::MustBePositive {
                field: "number of adults".to_string(),
            });
        }
        Ok(GuestCount { adults, children })
    }

    pub fn adults(&self) -> u32 {
        self.adults
    }

    pub fn children(&self) -> u32 {
        self.children
    }
}

impl fmt::Display for GuestCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Adults, {} Children", self.adults, self.children)
    }
}

// =============================================================================
// Bill
// =============================================================================

/// Everything printed on one invoice.
///
/// Holds a copy of the customer as it was when the bill was created.
///
/// Only [`Bill::new`] builds one, so the bill number is always safe to use
/// as a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    bill_number: String,
    customer: Customer,
    guests: GuestCount,
    items: Vec<BookingItem>,
    issued_at: DateTime<Local>,
}

impl Bill {
    /// Assembles a bill after checking the bill number and that there is
    /// at least one room.
    pub fn new(
        bill_number: &str,
        customer: Customer,
        guests: GuestCount,
        items: Vec<BookingItem>,
        issued_at: DateTime<Local>,
    ) -> CoreResult<Self> {
        let bill_number = validation::validate_bill_number(bill_number)?;
        if items.is_empty() {
            return Err(CoreError::NoBookings);
        }
        if items.len() > MAX_BOOKING_ITEMS {
            return Err(CoreError::TooManyBookings {
                max: MAX_BOOKING_ITEMS,
            });
        }
        Ok(Bill {
            bill_number,
            customer,
            guests,
            items,
            issued_at,
        })
    }

    /// Operator-supplied; reusing one overwrites the earlier invoice file.
    pub fn bill_number(&self) -> &str {
        &self.bill_number
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn guests(&self) -> GuestCount {
        self.guests
    }

    /// Insertion order, which is also table order on the invoice.
    pub fn items(&self) -> &[BookingItem] {
        &self.items
    }

    pub fn issued_at(&self) -> DateTime<Local> {
        self.issued_at
    }

    /// Prices the bill at the given tax rate.
    pub fn charges(&self, tax_rate: TaxRate) -> Charges {
        Charges::compute(&self.items, tax_rate)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn sample_customer() -> Customer {
        Customer {
            id: "CUST1".to_string(),
            name: "Asha Rao".to_string(),
            address: "12 Lake Road\nChennai".to_string(),
            phone: "9000000000".to_string(),
            id_type: IdType::Passport,
            id_number: "P1234567".to_string(),
            photo_path: PathBuf::from("customer_data/id_photos/id_1.png"),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_bps(1800).to_string(), "18%");
        assert_eq!(TaxRate::from_bps(1250).to_string(), "12.5%");
        assert_eq!(TaxRate::from_bps(25).to_string(), "0.25%");
        assert_eq!(TaxRate::default().bps(), 1800);
    }

    #[test]
    fn test_id_type_parse() {
        assert_eq!("Passport".parse::<IdType>().unwrap(), IdType::Passport);
        assert_eq!("aadhaar card".parse::<IdType>().unwrap(), IdType::Aadhaar);
        assert!(matches!(
            "Library Card".parse::<IdType>(),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(matches!(
            "".parse::<IdType>(),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_room_type_parse_and_other() {
        assert_eq!("AC Room".parse::<RoomType>().unwrap(), RoomType::Ac);
        assert_eq!("non-ac room".parse::<RoomType>().unwrap(), RoomType::NonAc);
        assert!("Suite".parse::<RoomType>().is_err());

        let suite = RoomType::other("Deluxe Suite").unwrap();
        assert_eq!(suite.label(), "Deluxe Suite");
        assert!(RoomType::other("  ").is_err());
    }

    #[test]
    fn test_customer_serializes_stable_field_names() {
        let json = serde_json::to_value(sample_customer()).unwrap();
        assert_eq!(json["id"], "CUST1");
        assert_eq!(json["gov_id_type"], "Passport");
        assert_eq!(json["gov_id_number"], "P1234567");
        assert_eq!(json["gov_id_photo_path"], "customer_data/id_photos/id_1.png");
        assert!(json.get("added_on").is_some());
    }

    #[test]
    fn test_customer_reads_offset_timestamps() {
        let json = r#"{
            "id": "CUST7",
            "name": "Ravi",
            "address": "Madurai",
            "phone": "9111111111",
            "gov_id_type": "Voter ID",
            "gov_id_number": "V-77",
            "gov_id_photo_path": "customer_data/id_photos/id_7.jpg",
            "added_on": "2024-05-01T15:00:00.5+05:30"
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id_type, IdType::VoterId);
        assert_eq!(
            customer.created_at.format("%H:%M").to_string(),
            "09:30"
        );
    }

    #[test]
    fn test_customer_label() {
        assert_eq!(sample_customer().label(), "CUST1 - Asha Rao (9000000000)");
    }

    #[test]
    fn test_new_customer_validation() {
        let form = NewCustomer {
            name: "Asha Rao".to_string(),
            address: "Chennai".to_string(),
            phone: "9000000000".to_string(),
            id_type: IdType::Passport,
            id_number: "P1".to_string(),
            photo_path: PathBuf::from("id.png"),
        };
        assert!(form.validate().is_ok());

        let mut missing = form.clone();
        missing.address = "   ".to_string();
        assert_eq!(
            missing.validate().unwrap_err(),
            ValidationError::required("address")
        );

        let mut no_photo = form;
        no_photo.photo_path = PathBuf::new();
        assert_eq!(
            no_photo.validate().unwrap_err(),
            ValidationError::required("ID photo")
        );
    }

    #[test]
    fn test_booking_days_inclusive() {
        let item = BookingItem::new(
            RoomType::Ac,
            Money::from_cents(200_000),
            date(2024, 5, 1),
            date(2024, 5, 3),
        )
        .unwrap();
        assert_eq!(item.days(), 3);
        assert_eq!(item.line_amount().cents(), 600_000);

        // Across a month boundary
        let item = BookingItem::new(
            RoomType::NonAc,
            Money::from_cents(100_000),
            date(2024, 2, 28),
            date(2024, 3, 1),
        )
        .unwrap();
        assert_eq!(item.days(), 3); // 2024 is a leap year
    }

    #[test]
    fn test_booking_rejects_end_before_start() {
        let err = BookingItem::new(
            RoomType::Ac,
            Money::from_cents(100),
            date(2024, 6, 10),
            date(2024, 6, 9),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::DateOrder { .. }));
    }

    #[test]
    fn test_booking_rejects_negative_rate() {
        let err = BookingItem::new(
            RoomType::Ac,
            Money::from_cents(-1),
            date(2024, 6, 1),
            date(2024, 6, 2),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_booking_upper_bounds() {
        let at_limit = BookingItem::new(
            RoomType::Ac,
            MAX_DAILY_RATE,
            date(2024, 1, 1),
            date(2024, 12, 31),
        )
        .unwrap();
        assert_eq!(at_limit.days(), MAX_STAY_DAYS);
        assert_eq!(at_limit.line_amount().cents(), 366_000_000_000);

        let err = BookingItem::new(
            RoomType::Ac,
            MAX_DAILY_RATE + Money::from_cents(1),
            date(2024, 1, 1),
            date(2024, 1, 1),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "rate must be between 0 and 10000000");

        let err = BookingItem::new(
            RoomType::Ac,
            Money::from_cents(100),
            date(2024, 1, 1),
            date(2124, 1, 1),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "length of stay must be between 1 and 366");
    }

    #[test]
    fn test_guest_count() {
        assert!(GuestCount::new(0, 2).is_err());
        let guests = GuestCount::new(2, 1).unwrap();
        assert_eq!(guests.to_string(), "2 Adults, 1 Children");
    }

    #[test]
    fn test_bill_requires_items_and_valid_number() {
        let issued = Local.with_ymd_and_hms(2024, 5, 3, 11, 0, 0).unwrap();
        let guests = GuestCount::new(1, 0).unwrap();

        let err = Bill::new("B100", sample_customer(), guests, vec![], issued).unwrap_err();
        assert!(matches!(err, CoreError::NoBookings));

        let item = BookingItem::new(
            RoomType::Ac,
            Money::from_cents(100),
            date(2024, 5, 1),
            date(2024, 5, 1),
        )
        .unwrap();
        let err = Bill::new("../B1", sample_customer(), guests, vec![item.clone()], issued)
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let too_many = vec![item.clone(); MAX_BOOKING_ITEMS + 1];
        let err = Bill::new("B100", sample_customer(), guests, too_many, issued).unwrap_err();
        assert!(matches!(err, CoreError::TooManyBookings { max: MAX_BOOKING_ITEMS }));

        let bill = Bill::new(" B100 ", sample_customer(), guests, vec![item], issued).unwrap();
        assert_eq!(bill.bill_number(), "B100");
        assert_eq!(bill.items().len(), 1);
        assert_eq!(bill.customer().id, "CUST1");
    }
}
