//! # roomrent-store: File Storage for Room Rent
//!
//! Durable state for the desk lives in plain files under one data directory.
//!
//! ## On-Disk Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  <data dir>/                                                            │
//! │  ├── customers.json          CustomerStore (whole-file rewrite)         │
//! │  ├── id_photos/                                                         │
//! │  │   └── id_<nanos>.<ext>    PhotoStorage (byte-for-byte copies)        │
//! │  └── Invoice/                                                           │
//! │      └── Invoice_<bill>.txt  InvoiceWriter (created on demand, or .pdf)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - Directory configuration and startup (`Storage::open`)
//! - [`customers`] - The customer registry
//! - [`photos`] - Identity photo import
//! - [`invoices`] - Invoice output and bill-number policy
//! - `pdf` - A4 PDF typesetting of a rendered invoice
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roomrent_store::{Storage, StoreConfig};
//!
//! let mut storage = Storage::open(StoreConfig::new("./customer_data"))?;
//! let customer = storage.register(new_customer)?;
//! let invoice = storage.invoices(settings).generate(&bill)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

mod atomic;
mod pdf;
pub mod customers;
pub mod error;
pub mod invoices;
pub mod photos;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use customers::CustomerStore;
pub use error::{StoreError, StoreResult};
pub use invoices::{AllowOverwrite, BillNumberPolicy, GeneratedInvoice, InvoiceWriter, RejectExisting};
pub use photos::PhotoStorage;
pub use storage::{Storage, StoreConfig};
