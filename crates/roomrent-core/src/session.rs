//! # Billing Session
//!
//! The bill an operator is currently assembling: which customer is selected
//! and which rooms have been added so far.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Billing Session Operations                           │
//! │                                                                         │
//! │  Operator Action          Method                   Session Change       │
//! │  ───────────────          ──────                   ──────────────       │
//! │                                                                         │
//! │  Open "Create Bill" ─────► BillingSession::start() ► empty session      │
//! │                            (fails if no customers)                      │
//! │                                                                         │
//! │  Pick customer ──────────► select_customer() ─────► customer = copy     │
//! │                                                                         │
//! │  Add Room ───────────────► add_booking() ─────────► items.push(item)    │
//! │                                                                         │
//! │  Generate Bill ──────────► finish() ──────────────► Bill, session reset │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is an ordinary value owned by the caller and passed by
//! reference; there is no global "current bill".

use chrono::{DateTime, Local};

use crate::billing::Charges;
use crate::error::{CoreError, CoreResult};
use crate::types::{Bill, BookingItem, Customer, GuestCount, TaxRate, DISPLAY_DATE_FORMAT};
use crate::MAX_BOOKING_ITEMS;

/// In-progress bill.
///
/// ## Invariants
/// - Rooms can only be added once a customer is selected
/// - At most [`MAX_BOOKING_ITEMS`] rooms
/// - Items keep insertion order
#[derive(Debug, Clone, Default)]
pub struct BillingSession {
    customer: Option<Customer>,
    items: Vec<BookingItem>,
}

impl BillingSession {
    /// Opens a session against the registered customers.
    ///
    /// Returns [`CoreError::NoCustomersRegistered`] when there is nobody to
    /// bill, so the front end can point the operator at "Add Customer".
    pub fn start(customers: &[Customer]) -> CoreResult<Self> {
        if customers.is_empty() {
            return Err(CoreError::NoCustomersRegistered);
        }
        Ok(BillingSession::default())
    }

    /// Selects the customer with `id`, keeping a copy of their record.
    pub fn select_customer(&mut self, customers: &[Customer], id: &str) -> CoreResult<&Customer> {
        let id = id.trim();
        let customer = customers
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))?;
        let selected: &Customer = self.customer.insert(customer.clone());
        Ok(selected)
    }

    /// The selected customer, if any.
    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// Appends a validated room booking.
    pub fn add_booking(&mut self, item: BookingItem) -> CoreResult<()> {
        if self.customer.is_none() {
            return Err(CoreError::CustomerNotSelected);
        }
        if self.items.len() >= MAX_BOOKING_ITEMS {
            return Err(CoreError::TooManyBookings {
                max: MAX_BOOKING_ITEMS,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes the room at `index` (0-based).
    pub fn remove_booking(&mut self, index: usize) -> Option<BookingItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn items(&self) -> &[BookingItem] {
        &self.items
    }

    /// Running totals for what has been added so far.
    pub fn charges(&self, tax_rate: TaxRate) -> Charges {
        Charges::compute(&self.items, tax_rate)
    }

    /// The "Rooms Booked" summary shown while building the bill.
    ///
    /// ```text
    /// Rooms Booked:
    /// 1. AC Room - Rs.2000.00 x 3 days = Rs.6000.00
    ///    Period: 01-05-2024 to 03-05-2024
    /// ```
    pub fn preview(&self, currency_symbol: &str) -> String {
        let mut text = String::from("Rooms Booked:\n");
        for (i, item) in self.items.iter().enumerate() {
            text.push_str(&format!(
                "{}. {} - {} x {} days = {}\n",
                i + 1,
                item.room_type(),
                item.rate().format_with(currency_symbol),
                item.days(),
                item.line_amount().format_with(currency_symbol),
            ));
            text.push_str(&format!(
                "   Period: {} to {}\n",
                item.start().format(DISPLAY_DATE_FORMAT),
                item.end().format(DISPLAY_DATE_FORMAT),
            ));
        }
        text
    }

    /// Turns the session into a [`Bill`] and resets it.
    ///
    /// Nothing changes if any check fails, so the operator can correct the
    /// input and try again.
    pub fn finish(
        &mut self,
        bill_number: &str,
        guests: GuestCount,
        issued_at: DateTime<Local>,
    ) -> CoreResult<Bill> {
        let customer = self.customer.clone().ok_or(CoreError::CustomerNotSelected)?;
        let bill = Bill::new(bill_number, customer, guests, self.items.clone(), issued_at)?;
        *self = BillingSession::default();
        Ok(bill)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::tests::{date, sample_customer};
    use crate::types::RoomType;
    use chrono::TimeZone;

    fn ac_room() -> BookingItem {
        BookingItem::new(
            RoomType::Ac,
            Money::from_cents(200_000),
            date(2024, 5, 1),
            date(2024, 5, 3),
        )
        .unwrap()
    }

    fn issued() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 3, 11, 0, 0).unwrap()
    }

    #[test]
    fn test_start_requires_customers() {
        assert!(matches!(
            BillingSession::start(&[]),
            Err(CoreError::NoCustomersRegistered)
        ));
        assert!(BillingSession::start(&[sample_customer()]).is_ok());
    }

    #[test]
    fn test_add_booking_requires_customer() {
        let customers = vec![sample_customer()];
        let mut session = BillingSession::start(&customers).unwrap();

        assert!(matches!(
            session.add_booking(ac_room()),
            Err(CoreError::CustomerNotSelected)
        ));

        session.select_customer(&customers, "CUST1").unwrap();
        session.add_booking(ac_room()).unwrap();
        assert_eq!(session.items().len(), 1);
    }

    #[test]
    fn test_select_unknown_customer() {
        let customers = vec![sample_customer()];
        let mut session = BillingSession::start(&customers).unwrap();
        assert!(matches!(
            session.select_customer(&customers, "CUST9"),
            Err(CoreError::CustomerNotFound(id)) if id == "CUST9"
        ));
    }

    #[test]
    fn test_selected_customer_is_a_snapshot() {
        let mut customers = vec![sample_customer()];
        let mut session = BillingSession::start(&customers).unwrap();
        session.select_customer(&customers, "CUST1").unwrap();

        customers[0].name = "Renamed".to_string();
        assert_eq!(session.customer().unwrap().name, "Asha Rao");
    }

    #[test]
    fn test_preview_text() {
        let customers = vec![sample_customer()];
        let mut session = BillingSession::start(&customers).unwrap();
        session.select_customer(&customers, "CUST1").unwrap();
        session.add_booking(ac_room()).unwrap();

        assert_eq!(
            session.preview("Rs."),
            "Rooms Booked:\n\
             1. AC Room - Rs.2000.00 x 3 days = Rs.6000.00\n   \
             Period: 01-05-2024 to 03-05-2024\n"
        );
    }

    #[test]
    fn test_remove_booking() {
        let customers = vec![sample_customer()];
        let mut session = BillingSession::start(&customers).unwrap();
        session.select_customer(&customers, "CUST1").unwrap();
        session.add_booking(ac_room()).unwrap();

        assert!(session.remove_booking(3).is_none());
        assert!(session.remove_booking(0).is_some());
        assert!(session.items().is_empty());
    }

    #[test]
    fn test_finish_builds_bill_and_resets() {
        let customers = vec![sample_customer()];
        let mut session = BillingSession::start(&customers).unwrap();
        session.select_customer(&customers, "CUST1").unwrap();
        session.add_booking(ac_room()).unwrap();

        let guests = GuestCount::new(2, 1).unwrap();
        let bill = session.finish("B100", guests, issued()).unwrap();

        assert_eq!(bill.bill_number(), "B100");
        assert_eq!(bill.customer().name, "Asha Rao");
        assert_eq!(bill.items().len(), 1);
        assert_eq!(bill.charges(TaxRate::default()).total.cents(), 708_000);

        assert!(session.customer().is_none());
        assert!(session.items().is_empty());
    }

    #[test]
    fn test_failed_finish_keeps_session() {
        let customers = vec![sample_customer()];
        let mut session = BillingSession::start(&customers).unwrap();
        session.select_customer(&customers, "CUST1").unwrap();
        session.add_booking(ac_room()).unwrap();

        let guests = GuestCount::new(1, 0).unwrap();
        assert!(session.finish("", guests, issued()).is_err());
        assert_eq!(session.items().len(), 1);
        assert!(session.customer().is_some());

        let mut empty = BillingSession::start(&customers).unwrap();
        empty.select_customer(&customers, "CUST1").unwrap();
        assert!(matches!(
            empty.finish("B1", guests, issued()),
            Err(CoreError::NoBookings)
        ));
    }
}
