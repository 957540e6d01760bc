//! # Invoice Layout
//!
//! Renders a priced [`Bill`] into a fixed-layout, paginated text document.
//! Writing the document to disk is the store crate's job; this module only
//! produces lines.
//!
//! ## Page Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Business header       name, address, phone, GSTIN                      │
//! │  ───────────────────────────────────────────────────────────────────── │
//! │  Bill Details                      Customer Details                     │
//! │  Bill No / Date / GSTIN            Name / Phone / ID Type / ID No       │
//! │  No. of Guests                                                          │
//! │  Address (wrapped)                                                      │
//! │  ───────────────────────────────────────────────────────────────────── │
//! │  Room Type | Rate/Day | Days | Period | Amount    (one row per room)    │
//! │  ───────────────────────────────────────────────────────────────────── │
//! │                                          Subtotal / GST / TOTAL         │
//! │  Terms & Conditions (numbered)                                          │
//! │                                               Authorized Signature      │
//! │                                                          Page N of M    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::billing::Charges;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Bill, TaxRate, DISPLAY_DATE_FORMAT};

/// Narrowest page the table still fits on.
const MIN_WIDTH: usize = 72;
const MIN_LINES_PER_PAGE: usize = 20;

const LABEL_WIDTH: usize = 10;
const TOTAL_VALUE_WIDTH: usize = 16;
const TOTAL_RULE_WIDTH: usize = 34;
const SIGNATURE_WIDTH: usize = 20;

const RATE_WIDTH: usize = 12;
const DAYS_WIDTH: usize = 6;
const PERIOD_WIDTH: usize = 22;
const AMOUNT_WIDTH: usize = 14;
const GAP: &str = "  ";

const PERIOD_DATE_FORMAT: &str = "%d/%m/%y";

/// Separates pages in the written file.
pub const PAGE_BREAK: char = '\u{000C}';

/// Label of the emphasised grand-total line.
pub const TOTAL_LABEL: &str = "TOTAL AMOUNT:";

// =============================================================================
// Settings
// =============================================================================

/// The business printed in the invoice header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    /// GST registration number.
    pub gstin: String,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        BusinessProfile {
            name: "Trinity Stays".to_string(),
            address: "123, Main Street, Chennai - 600001".to_string(),
            phone: "+91 98765 43210".to_string(),
            gstin: "33AALCT2345K1ZB".to_string(),
        }
    }
}

/// Page geometry in characters and lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub width: usize,
    pub lines_per_page: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout {
            width: 80,
            lines_per_page: 60,
        }
    }
}

/// File format invoices are written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceFormat {
    /// Fixed-width text, pages separated by form feeds.
    #[default]
    Text,
    /// A4 PDF with one PDF page per text page.
    Pdf,
}

impl InvoiceFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            InvoiceFormat::Text => "txt",
            InvoiceFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for InvoiceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceFormat::Text => write!(f, "text"),
            InvoiceFormat::Pdf => write!(f, "pdf"),
        }
    }
}

impl FromStr for InvoiceFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(InvoiceFormat::Text),
            "pdf" => Ok(InvoiceFormat::Pdf),
            _ => Err(ValidationError::NotAllowed {
                field: "invoice format".to_string(),
                allowed: vec!["text".to_string(), "pdf".to_string()],
            }),
        }
    }
}

/// Everything about an invoice that is configuration rather than bill data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceSettings {
    pub business: BusinessProfile,
    /// GST rate in basis points.
    pub tax_rate: TaxRate,
    pub currency_symbol: String,
    /// Printed numbered, in order.
    pub terms: Vec<String>,
    pub layout: PageLayout,
    pub format: InvoiceFormat,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        InvoiceSettings {
            business: BusinessProfile::default(),
            tax_rate: TaxRate::default(),
            currency_symbol: "Rs.".to_string(),
            terms: [
                "Check-in time is 12:00 PM and check-out time is 11:00 AM",
                "Payment to be made in advance",
                "No refunds for early check-out",
                "ID proof is mandatory for all guests",
                "Outside food is not allowed",
                "Pets are not allowed",
                "The management is not responsible for any valuables",
                "Any damage to hotel property will be charged",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            layout: PageLayout::default(),
            format: InvoiceFormat::default(),
        }
    }
}

// =============================================================================
// Document
// =============================================================================

/// A rendered invoice: pages of lines, no trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDocument {
    pages: Vec<Vec<String>>,
}

impl InvoiceDocument {
    /// Lays out `bill` priced as `charges`.
    ///
    /// ```rust
    /// use chrono::{Local, NaiveDate, TimeZone, Utc};
    /// use roomrent_core::*;
    ///
    /// let customer = Customer {
    ///     id: "CUST1".into(),
    ///     name: "Asha Rao".into(),
    ///     address: "Chennai".into(),
    ///     phone: "9000000000".into(),
    ///     id_type: IdType::Passport,
    ///     id_number: "P1".into(),
    ///     photo_path: "id.png".into(),
    ///     created_at: Utc::now(),
    /// };
    /// let room = BookingItem::new(
    ///     RoomType::Ac,
    ///     Money::from_cents(200_000),
    ///     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
    /// ).unwrap();
    /// let bill = Bill::new(
    ///     "B100",
    ///     customer,
    ///     GuestCount::new(2, 1).unwrap(),
    ///     vec![room],
    ///     Local.with_ymd_and_hms(2024, 5, 3, 10, 0, 0).unwrap(),
    /// ).unwrap();
    ///
    /// let settings = InvoiceSettings::default();
    /// let charges = bill.charges(settings.tax_rate);
    /// let doc = InvoiceDocument::render(&bill, &charges, &settings);
    /// assert!(doc.to_text().contains("Rs.7080.00"));
    /// ```
    pub fn render(bill: &Bill, charges: &Charges, settings: &InvoiceSettings) -> Self {
        let mut sheet = Sheet::new(settings.layout.width.max(MIN_WIDTH));

        sheet.header(&settings.business);
        sheet.details(bill, &settings.business);
        sheet.guests_and_address(bill);
        sheet.items_table(bill, charges);
        sheet.totals(charges, &settings.currency_symbol);
        sheet.terms(&settings.terms);
        sheet.signature();

        let lines_per_page = settings.layout.lines_per_page.max(MIN_LINES_PER_PAGE);
        InvoiceDocument::paginate(sheet.lines, lines_per_page, sheet.width)
    }

    fn paginate(body: Vec<String>, lines_per_page: usize, width: usize) -> Self {
        // Each page ends with a blank line and the page footer.
        let body_per_page = lines_per_page - 2;
        let chunks: Vec<&[String]> = body.chunks(body_per_page).collect();
        let total = chunks.len().max(1);

        let pages = if chunks.is_empty() {
            vec![vec![String::new(), footer(1, 1, width)]]
        } else {
            chunks
                .into_iter()
                .enumerate()
                .map(|(i, chunk)| {
                    let mut page = chunk.to_vec();
                    page.push(String::new());
                    page.push(footer(i + 1, total, width));
                    page
                })
                .collect()
        };

        InvoiceDocument { pages }
    }

    pub fn pages(&self) -> &[Vec<String>] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The document as written to disk: pages separated by a form feed.
    pub fn to_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| {
                let mut text = page.join("\n");
                text.push('\n');
                text
            })
            .collect::<Vec<_>>()
            .join(&PAGE_BREAK.to_string())
    }
}

fn footer(page: usize, total: usize, width: usize) -> String {
    format!("{:>width$}", format!("Page {} of {}", page, total), width = width)
}

// =============================================================================
// Sheet: line-oriented layout helpers
// =============================================================================

struct Sheet {
    width: usize,
    lines: Vec<String>,
}

impl Sheet {
    fn new(width: usize) -> Self {
        Sheet {
            width,
            lines: Vec::new(),
        }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        let text = fit(text.as_ref(), self.width);
        self.lines.push(text.trim_end().to_string());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn rule(&mut self, ch: char) {
        self.lines.push(ch.to_string().repeat(self.width));
    }

    fn right(&mut self, text: &str) {
        let line = format!("{:>width$}", text, width = self.width);
        self.line(line);
    }

    fn header(&mut self, business: &BusinessProfile) {
        self.line(&business.name);
        self.rule_under(business.name.chars().count());
        for line in wrap(&business.address, self.width) {
            self.line(line);
        }
        self.line(format!("Phone: {}", business.phone));
        self.line(format!("GSTIN: {}", business.gstin));
        self.blank();
        self.rule('-');
    }

    fn rule_under(&mut self, len: usize) {
        self.lines.push("=".repeat(len.min(self.width)));
    }

    fn details(&mut self, bill: &Bill, business: &BusinessProfile) {
        let col = self.width / 2;
        let customer = bill.customer();

        let left = [
            ("Bill No:", bill.bill_number().to_string()),
            (
                "Date:",
                bill.issued_at().format(DISPLAY_DATE_FORMAT).to_string(),
            ),
            ("GSTIN:", business.gstin.clone()),
        ];
        let right = [
            ("Name:", one_line(&customer.name)),
            ("Phone:", one_line(&customer.phone)),
            ("ID Type:", customer.id_type.to_string()),
            ("ID No:", one_line(&customer.id_number)),
        ];

        self.line(format!("{:<col$}{}", "Bill Details", "Customer Details", col = col));
        for i in 0..left.len().max(right.len()) {
            let l = left
                .get(i)
                .map(|(label, value)| labelled(label, value, col - 2))
                .unwrap_or_default();
            let r = right
                .get(i)
                .map(|(label, value)| labelled(label, value, self.width - col))
                .unwrap_or_default();
            self.line(format!("{:<col$}{}", l, r, col = col));
        }
        self.blank();
    }

    fn guests_and_address(&mut self, bill: &Bill) {
        self.line(format!("No. of Guests: {}", bill.guests()));
        self.blank();

        let address = wrap(&bill.customer().address, self.width - LABEL_WIDTH);
        if address.is_empty() {
            self.line("Address:");
        }
        for (i, text) in address.iter().enumerate() {
            let label = if i == 0 { "Address:" } else { "" };
            self.line(format!("{:<w$}{}", label, text, w = LABEL_WIDTH));
        }
        self.blank();
        self.rule('-');
    }

    /// Rate and amount cells are never cut; booking bounds keep them
    /// inside their columns.
    fn items_table(&mut self, bill: &Bill, charges: &Charges) {
        let fixed = RATE_WIDTH + DAYS_WIDTH + PERIOD_WIDTH + AMOUNT_WIDTH + 4 * GAP.len();
        let room_width = self.width - fixed;

        let row = |room: &str, rate: &str, days: &str, period: &str, amount: &str| {
            format!(
                "{:<rw$}{gap}{:>aw$}{gap}{:>dw$}{gap}{:<pw$}{gap}{:>mw$}",
                fit(room, room_width),
                rate,
                days,
                fit(period, PERIOD_WIDTH),
                amount,
                rw = room_width,
                aw = RATE_WIDTH,
                dw = DAYS_WIDTH,
                pw = PERIOD_WIDTH,
                mw = AMOUNT_WIDTH,
                gap = GAP,
            )
        };

        let header = row("Room Type", "Rate/Day", "Days", "Period", "Amount");
        self.line(header);
        self.rule('-');

        for (item, charge) in bill.items().iter().zip(&charges.lines) {
            let period = format!(
                "{} to {}",
                item.start().format(PERIOD_DATE_FORMAT),
                item.end().format(PERIOD_DATE_FORMAT)
            );
            let line = row(
                item.room_type().label(),
                &charge.rate.to_string(),
                &charge.days.to_string(),
                &period,
                &charge.amount.to_string(),
            );
            self.line(line);
        }
        self.rule('-');
    }

    /// The value column widens to the longest figure so no digit is lost.
    fn totals(&mut self, charges: &Charges, symbol: &str) {
        let widest = [charges.subtotal, charges.tax, charges.total]
            .iter()
            .map(|m| m.format_with(symbol).chars().count() + 1)
            .max()
            .unwrap_or(0);
        let value_width = TOTAL_VALUE_WIDTH.max(widest);
        let label_width = self.width.saturating_sub(value_width);
        let amount_line = |label: &str, value: Money| {
            format!(
                "{:>lw$}{:>vw$}",
                label,
                value.format_with(symbol),
                lw = label_width,
                vw = value_width
            )
        };

        self.line(amount_line("Subtotal:", charges.subtotal));
        self.line(amount_line(&format!("GST ({}):", charges.tax_rate), charges.tax));

        let emphasis = "=".repeat(TOTAL_RULE_WIDTH.max(value_width + 14));
        self.right(&emphasis);
        self.line(amount_line(TOTAL_LABEL, charges.total));
        self.right(&emphasis);
        self.blank();
    }

    fn terms(&mut self, terms: &[String]) {
        if terms.is_empty() {
            return;
        }
        self.line("Terms & Conditions:");
        for (i, term) in terms.iter().enumerate() {
            let prefix = format!("{}. ", i + 1);
            let indent = prefix.len();
            for (j, text) in wrap(term, self.width - indent).iter().enumerate() {
                let lead = if j == 0 { prefix.as_str() } else { "" };
                self.line(format!("{:<indent$}{}", lead, text, indent = indent));
            }
        }
        self.blank();
        self.blank();
    }

    fn signature(&mut self) {
        self.right(&"_".repeat(SIGNATURE_WIDTH));
        self.right("Authorized Signature");
    }
}

/// `label` padded to the label column, then `value`, cut to `width`.
fn labelled(label: &str, value: &str, width: usize) -> String {
    fit(&format!("{:<w$}{}", label, value, w = LABEL_WIDTH), width)
}

fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap. Embedded newlines are kept as line breaks, words longer
/// than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for raw in text.lines() {
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();
            while chars.len() > width {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                out.push(chars.drain(..width).collect());
            }
            if chars.is_empty() {
                continue;
            }

            let word_len = chars.len();
            let current_len = current.chars().count();
            if current_len > 0 && current_len + 1 + word_len > width {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend(chars);
        }
        if !current.is_empty() {
            out.push(current);
        }
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================
