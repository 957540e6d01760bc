//! # Invoice Output
//!
//! Prices a [`Bill`], lays it out with [`InvoiceDocument`] and writes it to
//! `Invoice_<bill number>.txt` (or `.pdf`) in the invoice directory.
//!
//! ## Generation Steps
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. create invoice directory (on demand)                                │
//! │  2. BillNumberPolicy::check(bill number, target path)                   │
//! │  3. Charges::compute       (roomrent-core, pure)                        │
//! │  4. InvoiceDocument::render (roomrent-core, pure)                       │
//! │  5. encode as text or typeset as PDF                                    │
//! │  6. write temp file, fsync, rename over target                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The file name depends only on the bill number, so generating the same
//! number twice leaves one file holding the second invoice. Nothing is
//! written at the target path unless the whole document was written.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use roomrent_core::{Bill, Charges, InvoiceDocument, InvoiceFormat, InvoiceSettings};
use tracing::{debug, info};

use crate::atomic;
use crate::error::{StoreError, StoreResult};
use crate::pdf;

// =============================================================================
// Bill Number Policy
// =============================================================================

/// Decides whether an invoice may be written for a bill number.
///
/// `target` is where the invoice will be written; it may already exist.
pub trait BillNumberPolicy: fmt::Debug + Send + Sync {
    fn check(&self, bill_number: &str, target: &Path) -> StoreResult<()>;
}

/// Reusing a bill number replaces the earlier invoice.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowOverwrite;

impl BillNumberPolicy for AllowOverwrite {
    fn check(&self, bill_number: &str, target: &Path) -> StoreResult<()> {
        if target.exists() {
            debug!(bill_number, path = %target.display(), "Overwriting existing invoice");
        }
        Ok(())
    }
}

/// Refuses a bill number whose invoice file already exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectExisting;

impl BillNumberPolicy for RejectExisting {
    fn check(&self, bill_number: &str, target: &Path) -> StoreResult<()> {
        if target.exists() {
            return Err(StoreError::BillNumberTaken {
                bill_number: bill_number.to_string(),
                path: target.to_path_buf(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Writer
// =============================================================================

/// What [`InvoiceWriter::generate`] produced.
#[derive(Debug, Clone)]
pub struct GeneratedInvoice {
    pub path: PathBuf,
    pub charges: Charges,
    pub pages: usize,
}

/// Writes invoices into one directory.
///
/// ## Example
/// ```rust,ignore
/// let writer = InvoiceWriter::new("./customer_data/Invoice", InvoiceSettings::default())
///     .with_policy(RejectExisting);
/// let invoice = writer.generate(&bill)?;
/// println!("{} ({})", invoice.path.display(), invoice.charges.total);
/// ```
#[derive(Debug)]
pub struct InvoiceWriter {
    dir: PathBuf,
    settings: InvoiceSettings,
    policy: Box<dyn BillNumberPolicy>,
}

impl InvoiceWriter {
    /// Writer with the default [`AllowOverwrite`] policy.
    pub fn new(dir: impl Into<PathBuf>, settings: InvoiceSettings) -> Self {
        InvoiceWriter {
            dir: dir.into(),
            settings,
            policy: Box::new(AllowOverwrite),
        }
    }

    /// Replaces the bill-number policy.
    pub fn with_policy(mut self, policy: impl BillNumberPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn settings(&self) -> &InvoiceSettings {
        &self.settings
    }

    /// Deterministic output path for a bill number in the configured format.
    pub fn path_for(&self, bill_number: &str) -> PathBuf {
        self.dir.join(format!(
            "Invoice_{}.{}",
            bill_number,
            self.settings.format.extension()
        ))
    }

    /// Prices, renders and writes the invoice for `bill`.
    pub fn generate(&self, bill: &Bill) -> StoreResult<GeneratedInvoice> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::io("create invoice directory", &self.dir, e))?;

        let path = self.path_for(bill.bill_number());
        self.policy.check(bill.bill_number(), &path)?;

        let charges = bill.charges(self.settings.tax_rate);
        let document = InvoiceDocument::render(bill, &charges, &self.settings);
        let bytes = match self.settings.format {
            InvoiceFormat::Text => document.to_text().into_bytes(),
            InvoiceFormat::Pdf => {
                pdf::render(&document, &format!("Invoice {}", bill.bill_number()))?
            }
        };
        atomic::write_file(&path, &bytes)?;

        info!(
            bill_number = %bill.bill_number(),
            customer = %bill.customer().id,
            items = bill.items().len(),
            total = %charges.total,
            format = %self.settings.format,
            path = %path.display(),
            "Invoice written"
        );

        Ok(GeneratedInvoice {
            path,
            charges,
            pages: document.page_count(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
