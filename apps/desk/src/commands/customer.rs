//! Customer commands - register, list and show customers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use roomrent_core::{Customer, IdType, NewCustomer};
use roomrent_store::Storage;
use tracing::info;

#[derive(Subcommand)]
pub enum CustomerCmd {
    /// Register a new customer
    Add(AddCustomer),

    /// List all customers in the order they were added
    List,

    /// Show one customer's full record
    Show {
        /// Customer ID, e.g. CUST1
        id: String,
    },
}

#[derive(Args)]
pub struct AddCustomer {
    #[arg(long)]
    pub name: String,

    /// Address line; repeat for multi-line addresses
    #[arg(long = "address", required = true)]
    pub address: Vec<String>,

    #[arg(long)]
    pub phone: String,

    /// Aadhaar Card, PAN Card, Driving License, Passport or Voter ID
    #[arg(long)]
    pub id_type: String,

    #[arg(long)]
    pub id_number: String,

    /// Scan of the ID document (.png, .jpg or .jpeg)
    #[arg(long)]
    pub photo: PathBuf,
}

impl CustomerCmd {
    pub fn run(&self, storage: &mut Storage) -> Result<()> {
        match self {
            CustomerCmd::Add(args) => {
                let customer = args.register(storage)?;
                println!("Customer added successfully: {}", customer.label());
                Ok(())
            }
            CustomerCmd::List => {
                let customers = storage.customers().list();
                if customers.is_empty() {
                    println!("No customers registered yet. Run `roomrent customer add` first.");
                    return Ok(());
                }
                for customer in customers {
                    println!("{}", customer.label());
                }
                Ok(())
            }
            CustomerCmd::Show { id } => {
                let customer = storage
                    .customers()
                    .get(id)
                    .with_context(|| format!("Customer not found: {}", id))?;
                print!("{}", describe(customer));
                Ok(())
            }
        }
    }
}

impl AddCustomer {
    /// Validates the form, imports the photo, then saves the customer.
    ///
    /// Nothing is left in the photo directory unless the customer is saved.
    pub fn register(&self, storage: &mut Storage) -> Result<Customer> {
        let id_type: IdType = self.id_type.parse()?;
        let form = NewCustomer {
            name: self.name.clone(),
            address: self.address.join("\n"),
            phone: self.phone.clone(),
            id_type,
            id_number: self.id_number.clone(),
            photo_path: self.photo.clone(),
        };

        let customer = storage.register(form).context("Failed to register customer")?;
        info!(id = %customer.id, "Registered customer");
        Ok(customer)
    }
}

fn describe(customer: &Customer) -> String {
    let mut text = String::new();
    let mut field = |label: &str, value: &str| {
        text.push_str(&format!("{:<12}{}\n", label, value));
    };
    field("ID:", &customer.id);
    field("Name:", &customer.name);
    for (i, line) in customer.address.lines().enumerate() {
        field(if i == 0 { "Address:" } else { "" }, line);
    }
    field("Phone:", &customer.phone);
    field("ID Type:", customer.id_type.label());
    field("ID No:", &customer.id_number);
    field("ID Photo:", &customer.photo_path.display().to_string());
    field("Added On:", &customer.created_at.format("%d-%m-%Y %H:%M").to_string());
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomrent_store::StoreConfig;
    use std::fs;

    fn form(photo: PathBuf) -> AddCustomer {
        AddCustomer {
            name: "Asha Rao".to_string(),
            address: vec!["12 Lake Road".to_string(), "Chennai".to_string()],
            phone: "9000000000".to_string(),
            id_type: "passport".to_string(),
            id_number: "P1234567".to_string(),
            photo,
        }
    }

    #[test]
    fn test_register_copies_photo_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let scan = dir.path().join("scan.jpeg");
        fs::write(&scan, b"jpeg bytes").unwrap();
        let mut storage = Storage::open(StoreConfig::new(dir.path().join("data"))).unwrap();

        let customer = form(scan).register(&mut storage).unwrap();

        assert_eq!(customer.id, "CUST1");
        assert_eq!(customer.address, "12 Lake Road\nChennai");
        assert_eq!(customer.id_type, IdType::Passport);
        assert!(customer.photo_path.starts_with(dir.path().join("data").join("id_photos")));
        assert_eq!(fs::read(&customer.photo_path).unwrap(), b"jpeg bytes");
    }

    #[test]
    fn test_invalid_form_copies_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let scan = dir.path().join("scan.png");
        fs::write(&scan, b"png").unwrap();
        let mut storage = Storage::open(StoreConfig::new(dir.path().join("data"))).unwrap();

        let mut bad = form(scan);
        bad.phone = "not a phone".to_string();
        assert!(bad.register(&mut storage).is_err());

        let photos = fs::read_dir(storage.photos().dir()).unwrap().count();
        assert_eq!(photos, 0);
        assert!(storage.customers().is_empty());
    }

    #[test]
    fn test_unknown_id_type() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::open(StoreConfig::new(dir.path())).unwrap();

        let mut bad = form(dir.path().join("scan.png"));
        bad.id_type = "Library Card".to_string();
        let err = bad.register(&mut storage).unwrap_err();
        assert!(err.to_string().contains("ID type must be one of"));
    }

    #[test]
    fn test_describe_lists_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let scan = dir.path().join("scan.png");
        fs::write(&scan, b"png").unwrap();
        let mut storage = Storage::open(StoreConfig::new(dir.path().join("data"))).unwrap();
        let customer = form(scan).register(&mut storage).unwrap();

        let text = describe(&customer);
        assert!(text.contains("Name:       Asha Rao\n"));
        assert!(text.contains("Address:    12 Lake Road\n            Chennai\n"));
        assert!(text.contains("ID Type:    Passport\n"));
    }
}
