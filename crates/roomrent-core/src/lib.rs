//! # roomrent-core: Pure Business Logic for the Room Rental Desk
//!
//! Everything needed to turn a customer record and a list of room bookings
//! into a priced invoice, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Room Rent Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Operator front end (desk CLI)                  │   │
//! │  │      Add Customer ──► Select Customer ──► Add Rooms ──► Bill    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ roomrent-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │  │  types  │ │  money  │ │ billing  │ │ session │ │ invoice │  │   │
//! │  │  │Customer │ │  Money  │ │ Charges  │ │ Billing │ │ Invoice │  │   │
//! │  │  │ Booking │ │ TaxRate │ │          │ │ Session │ │Document │  │   │
//! │  │  └─────────┘ └─────────┘ └──────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO LOGGING • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   roomrent-store (File Layer)                   │   │
//! │  │         customers.json, id_photos/, Invoice/*.txt               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, BookingItem, Bill, ...)
//! - [`money`] - Paise-based amounts and decimal parsing
//! - [`billing`] - Pricing: line amounts, subtotal, GST, total
//! - [`session`] - The in-progress bill an operator is assembling
//! - [`invoice`] - Fixed-layout invoice rendering into pages of text
//! - [`validation`] - Parsing and checking raw form field text
//! - [`error`] - Validation and billing-flow errors
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use roomrent_core::{BookingItem, Charges, Money, RoomType, TaxRate};
//!
//! let item = BookingItem::new(
//!     RoomType::Ac,
//!     Money::from_cents(200_000),
//!     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
//! )
//! .unwrap();
//!
//! let charges = Charges::compute(&[item], TaxRate::from_bps(1800));
//! assert_eq!(charges.subtotal.cents(), 600_000);
//! assert_eq!(charges.tax.cents(), 108_000);
//! assert_eq!(charges.total.cents(), 708_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod invoice;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports
// =============================================================================

pub use billing::{Charges, LineCharge};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{
    BusinessProfile, InvoiceDocument, InvoiceFormat, InvoiceSettings, PageLayout,
};
pub use money::Money;
pub use session::BillingSession;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST applied to room charges, in basis points (18%).
///
/// Only the default: the rate actually used travels in
/// [`InvoiceSettings::tax_rate`] and can be overridden by configuration.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1800;

/// Bill numbers become file names, so they are kept short.
pub const MAX_BILL_NUMBER_LEN: usize = 50;

/// Maximum rooms on a single bill.
pub const MAX_BOOKING_ITEMS: usize = 100;

/// Highest accepted daily rate, Rs. 1,00,00,000.
pub const MAX_DAILY_RATE: Money = Money::from_cents(1_000_000_000);

/// Longest stay one booking line may cover.
pub const MAX_STAY_DAYS: i64 = 366;
