//! # Storage Startup
//!
//! Directory configuration and the one-time open at startup.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreConfig::new(root) ← configure paths                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Storage::open(config)                                                  │
//! │       ├── create data dir + photo dir  (failure is fatal)               │
//! │       └── CustomerStore::load          (missing file = empty store)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  customers() / customers_mut() / photos() / invoices(settings)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use roomrent_core::{Customer, InvoiceSettings, NewCustomer};
use tracing::{info, warn};

use crate::customers::CustomerStore;
use crate::error::{StoreError, StoreResult};
use crate::invoices::InvoiceWriter;
use crate::photos::PhotoStorage;

// =============================================================================
// Configuration
// =============================================================================

/// Where the desk keeps its files.
///
/// ## Example
/// ```rust
/// use roomrent_store::StoreConfig;
///
/// let config = StoreConfig::new("/srv/roomrent").invoices_dir("/srv/invoices");
/// assert!(config.customers_file.ends_with("customers.json"));
/// assert!(config.photos_dir.ends_with("id_photos"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Root data directory.
    pub data_dir: PathBuf,

    /// Default: `<data_dir>/customers.json`
    pub customers_file: PathBuf,

    /// Default: `<data_dir>/id_photos`
    pub photos_dir: PathBuf,

    /// Default: `<data_dir>/Invoice`
    pub invoices_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        StoreConfig {
            customers_file: data_dir.join("customers.json"),
            photos_dir: data_dir.join("id_photos"),
            invoices_dir: data_dir.join("Invoice"),
            data_dir,
        }
    }

    /// Sets the invoice output directory.
    pub fn invoices_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.invoices_dir = dir.into();
        self
    }

    /// Sets the photo directory.
    pub fn photos_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.photos_dir = dir.into();
        self
    }
}

// =============================================================================
// Storage
// =============================================================================

/// Open storage: the loaded customer registry plus photo and invoice output.
#[derive(Debug)]
pub struct Storage {
    config: StoreConfig,
    customers: CustomerStore,
    photos: PhotoStorage,
}

impl Storage {
    /// Creates the storage directories and loads the customers.
    ///
    /// ## Returns
    /// * `Err(StoreError::Io)` if a directory can't be created
    /// * `Err(StoreError::Corrupt)` if the customer file can't be parsed
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(data_dir = %config.data_dir.display(), "Opening storage");

        ensure_dir(&config.data_dir)?;
        ensure_dir(&config.photos_dir)?;
        if let Some(parent) = config.customers_file.parent() {
            ensure_dir(parent)?;
        }

        let customers = CustomerStore::load(&config.customers_file)?;
        let photos = PhotoStorage::new(&config.photos_dir);

        Ok(Storage {
            config,
            customers,
            photos,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn customers(&self) -> &CustomerStore {
        &self.customers
    }

    pub fn customers_mut(&mut self) -> &mut CustomerStore {
        &mut self.customers
    }

    pub fn photos(&self) -> &PhotoStorage {
        &self.photos
    }

    /// Registers a customer whose `photo_path` still points at the
    /// operator's scan.
    ///
    /// The form is validated before anything is copied. The scan is then
    /// imported and the customer saved; if saving fails the imported copy
    /// is removed again.
    pub fn register(&mut self, mut form: NewCustomer) -> StoreResult<Customer> {
        form.validate()?;

        let stored = self.photos.import(&form.photo_path)?;
        form.photo_path = stored.clone();

        match self.customers.add(form) {
            Ok(customer) => Ok(customer),
            Err(err) => {
                if let Err(cleanup) = self.photos.discard(&stored) {
                    warn!(error = %cleanup, "Could not remove photo of unsaved customer");
                }
                Err(err)
            }
        }
    }

    /// Invoice writer for the configured directory, overwriting on reuse.
    pub fn invoices(&self, settings: InvoiceSettings) -> InvoiceWriter {
        InvoiceWriter::new(&self.config.invoices_dir, settings)
    }
}

fn ensure_dir(dir: &Path) -> StoreResult<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| StoreError::io("create directory", dir, e))
}

// =============================================================================
// Unit Tests
// =============================================================================
