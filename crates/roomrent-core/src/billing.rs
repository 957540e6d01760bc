//! # Billing Module
//!
//! Pure pricing of a set of booking items.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each item:  line_amount = rate × days         (exact, integer)     │
//! │  subtotal        = Σ line_amount                    (exact, integer)     │
//! │  tax             = round_half_up(subtotal × bps / 10000)                 │
//! │  total           = subtotal + tax                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the tax step rounds, and it rounds once on the subtotal, so the
//! result does not depend on the number or order of items.

use crate::money::Money;
use crate::types::{BookingItem, TaxRate};

/// Priced view of one booking item, in bill order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCharge {
    pub rate: Money,
    pub days: i64,
    pub amount: Money,
}

/// Charge breakdown for a bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charges {
    /// One entry per booking item, same order.
    pub lines: Vec<LineCharge>,
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
}

impl Charges {
    /// Prices `items` at `tax_rate`.
    ///
    /// An empty slice prices to zero; refusing to bill nothing is the
    /// session's job, not the calculator's.
    pub fn compute(items: &[BookingItem], tax_rate: TaxRate) -> Charges {
        let lines: Vec<LineCharge> = items
            .iter()
            .map(|item| LineCharge {
                rate: item.rate(),
                days: item.days(),
                amount: item.line_amount(),
            })
            .collect();

        let subtotal: Money = lines.iter().map(|l| l.amount).sum();
        let tax = subtotal.calculate_tax(tax_rate);

        Charges {
            lines,
            subtotal,
            tax_rate,
            tax,
            total: subtotal + tax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
