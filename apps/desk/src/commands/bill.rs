//! Bill command - build a bill for one customer and write the invoice.
//!
//! ## User Workflow
//! ```text
//! roomrent bill --customer CUST1 --bill-number B100 --adults 2 --children 1 \
//!     --room "AC Room,2000.00,2024-05-01,2024-05-03"
//!
//! Rooms Booked:
//! 1. AC Room - Rs.2000.00 x 3 days = Rs.6000.00
//!    Period: 01-05-2024 to 03-05-2024
//!
//! Subtotal:      Rs.6000.00
//! GST (18%):     Rs.1080.00
//! Total Amount:  Rs.7080.00
//!
//! Invoice generated: .../Invoice/Invoice_B100.txt
//! ```

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Args;
use roomrent_core::validation::{parse_booking, parse_guests};
use roomrent_core::{BillingSession, BookingItem, Charges, InvoiceFormat};
use roomrent_store::{RejectExisting, Storage};
use tracing::info;

use crate::config::AppConfig;

#[derive(Args)]
pub struct BillCmd {
    /// Customer ID, e.g. CUST1
    #[arg(long)]
    pub customer: String,

    /// Bill number; names the invoice file
    #[arg(long)]
    pub bill_number: String,

    #[arg(long, default_value = "1")]
    pub adults: String,

    #[arg(long, default_value = "0")]
    pub children: String,

    /// Room as TYPE,RATE,START,END (dates YYYY-MM-DD or DD-MM-YYYY); repeatable
    #[arg(long = "room", value_name = "ROOM", required = true)]
    pub rooms: Vec<String>,

    /// Invoice file format (text or pdf); overrides the configuration
    #[arg(long)]
    pub format: Option<InvoiceFormat>,

    /// Refuse a bill number that already has an invoice
    #[arg(long)]
    pub reject_existing: bool,

    /// Print the bill without writing an invoice
    #[arg(long)]
    pub dry_run: bool,
}

impl BillCmd {
    pub fn run(&self, storage: &Storage, config: &AppConfig) -> Result<()> {
        let settings = &config.invoice;
        let customers = storage.customers().list();

        let mut session = BillingSession::start(customers)?;
        let customer = session.select_customer(customers, &self.customer)?;
        println!("Customer: {}", customer.label());

        for (i, room) in self.rooms.iter().enumerate() {
            let item = parse_room(room).with_context(|| format!("Room {}: {:?}", i + 1, room))?;
            session.add_booking(item)?;
        }
        println!();
        print!("{}", session.preview(&settings.currency_symbol));
        println!();
        print!(
            "{}",
            totals(&session.charges(settings.tax_rate), &settings.currency_symbol)
        );

        let guests = parse_guests(&self.adults, &self.children)?;
        let bill = session.finish(&self.bill_number, guests, Local::now())?;

        if self.dry_run {
            println!("\nDry run: no invoice written.");
            return Ok(());
        }

        let mut settings = settings.clone();
        if let Some(format) = self.format {
            settings.format = format;
        }
        let mut writer = storage.invoices(settings);
        if self.reject_existing {
            writer = writer.with_policy(RejectExisting);
        }
        let invoice = writer
            .generate(&bill)
            .with_context(|| format!("Failed to generate invoice {}", bill.bill_number()))?;

        info!(bill_number = %bill.bill_number(), pages = invoice.pages, "Bill completed");
        println!("\nInvoice generated: {}", invoice.path.display());
        Ok(())
    }
}

/// Parses `TYPE,RATE,START,END`.
///
/// The room type is the only field that may not contain a comma, so the
/// text is split into exactly four parts.
pub fn parse_room(text: &str) -> Result<BookingItem> {
    let parts: Vec<&str> = text.splitn(4, ',').map(str::trim).collect();
    let [room_type, rate, start, end] = parts[..] else {
        bail!("expected TYPE,RATE,START,END");
    };
    Ok(parse_booking(room_type, rate, start, end)?)
}

fn totals(charges: &Charges, symbol: &str) -> String {
    format!(
        "{:<15}{}\n{:<15}{}\n{:<15}{}\n",
        "Subtotal:",
        charges.subtotal.format_with(symbol),
        format!("GST ({}):", charges.tax_rate),
        charges.tax.format_with(symbol),
        "Total Amount:",
        charges.total.format_with(symbol),
    )
}
