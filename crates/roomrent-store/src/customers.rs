//! # Customer Store
//!
//! Append-only registry of customers, cached in memory and persisted as one
//! pretty-printed JSON array.
//!
//! ## Add Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NewCustomer ──► validate() ──► assign CUST<n> ──► push to memory      │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                   rewrite customers.json (temp+rename) │
//! │                                          │                 │            │
//! │                                        Ok(c)        Err → pop, return  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed write leaves memory exactly as it was, so the add can be retried.
//! There is no locking: one process owns the file at a time.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use roomrent_core::{Customer, NewCustomer};
use tracing::{debug, info, warn};

use crate::atomic;
use crate::error::{StoreError, StoreResult};

const ID_PREFIX: &str = "CUST";

/// The customer registry.
#[derive(Debug)]
pub struct CustomerStore {
    path: PathBuf,
    customers: Vec<Customer>,
}

impl CustomerStore {
    /// Loads every customer from `path`.
    ///
    /// ## Returns
    /// * Empty store if the file does not exist yet (or is empty)
    /// * `Err(StoreError::Corrupt)` if it isn't a JSON list of customers
    /// * `Err(StoreError::Io)` if it can't be read
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "No customer file yet, starting empty");
                return Ok(CustomerStore {
                    path,
                    customers: Vec::new(),
                });
            }
            Err(e) => return Err(StoreError::io("read", &path, e)),
        };

        let customers: Vec<Customer> = if bytes.iter().all(u8::is_ascii_whitespace) {
            Vec::new()
        } else {
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?
        };

        info!(path = %path.display(), count = customers.len(), "Loaded customers");
        Ok(CustomerStore { path, customers })
    }

    /// Registers a customer and persists the full list.
    ///
    /// The identifier is `CUST<count + 1>`, moving up past any number that
    /// is already taken.
    pub fn add(&mut self, new: NewCustomer) -> StoreResult<Customer> {
        new.validate()?;

        let id = self.next_id();
        let customer = new.into_customer(id, Utc::now());
        debug!(id = %customer.id, name = %customer.name, "Adding customer");

        self.customers.push(customer.clone());
        if let Err(e) = self.save() {
            self.customers.pop();
            warn!(id = %customer.id, error = %e, "Customer not saved, rolled back");
            return Err(e);
        }

        info!(id = %customer.id, total = self.customers.len(), "Customer saved");
        Ok(customer)
    }

    /// All customers, in the order they were added.
    pub fn list(&self) -> &[Customer] {
        &self.customers
    }

    /// Finds a customer by identifier.
    pub fn get(&self, id: &str) -> Option<&Customer> {
        let id = id.trim();
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn next_id(&self) -> String {
        let mut n = self.customers.len() + 1;
        loop {
            let id = format!("{}{}", ID_PREFIX, n);
            if self.get(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }

    fn save(&self) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(&self.customers).map_err(StoreError::Serialize)?;
        atomic::write_file(&self.path, &json)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
