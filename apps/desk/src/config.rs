//! # Desk Configuration
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--data-dir`)
//! 2. Environment variables (`ROOMRENT_*`)
//! 3. Config file (`--config <path>`, else `<data dir>/roomrent.toml`)
//! 4. Defaults (this file and `InvoiceSettings::default`)
//!
//! ## Config File
//! ```toml
//! data_dir = "/srv/roomrent"
//! invoice_dir = "/srv/roomrent/Invoice"
//! tax_rate = 18          # percent, up to two decimals
//! currency_symbol = "Rs."
//! format = "pdf"         # or "text"
//! terms = ["Check-in time is 12:00 PM and check-out time is 11:00 AM"]
//!
//! [business]
//! name = "Trinity Stays"
//! gstin = "33AALCT2345K1ZB"
//!
//! [layout]
//! width = 96
//! ```
//!
//! Configuration is read once at startup and never changes afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use roomrent_core::{BusinessProfile, InvoiceFormat, InvoiceSettings, Money, PageLayout, TaxRate};
use roomrent_store::StoreConfig;
use serde::Deserialize;
use thiserror::Error;

/// File name looked up in the data directory when `--config` is absent.
pub const CONFIG_FILE: &str = "roomrent.toml";

/// Data directory when no platform directory can be determined.
const FALLBACK_DATA_DIR: &str = "customer_data";

pub const ENV_DATA_DIR: &str = "ROOMRENT_DATA_DIR";
pub const ENV_INVOICE_DIR: &str = "ROOMRENT_INVOICE_DIR";
pub const ENV_TAX_RATE: &str = "ROOMRENT_TAX_RATE";
pub const ENV_BUSINESS_NAME: &str = "ROOMRENT_BUSINESS_NAME";
pub const ENV_INVOICE_FORMAT: &str = "ROOMRENT_INVOICE_FORMAT";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: &'static str,
    },

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// =============================================================================
// File Format
// =============================================================================

/// A percentage written either as a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum Percent {
    Number(f64),
    Text(String),
}

impl Percent {
    fn as_text(&self) -> String {
        match self {
            Percent::Number(n) => n.to_string(),
            Percent::Text(s) => s.clone(),
        }
    }
}

/// `roomrent.toml` as written; every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    invoice_dir: Option<PathBuf>,
    tax_rate: Option<Percent>,
    currency_symbol: Option<String>,
    terms: Option<Vec<String>>,
    business: Option<BusinessProfile>,
    layout: Option<PageLayout>,
    format: Option<InvoiceFormat>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Effective configuration for one run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,

    /// Where invoices are written.
    /// Default: `<data_dir>/Invoice`
    pub invoice_dir: PathBuf,

    /// Business header, tax rate, currency, terms and page layout.
    pub invoice: InvoiceSettings,

    /// The config file that was applied, if any.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves configuration from the process environment.
    ///
    /// An explicit `config_path` must exist; the implicit
    /// `<data dir>/roomrent.toml` is optional.
    pub fn load(config_path: Option<&Path>, data_dir_flag: Option<PathBuf>) -> Result<Self, ConfigError> {
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let (file, source) = match config_path {
            Some(path) => (FileConfig::read(path)?, Some(path.to_path_buf())),
            None => {
                let dir = data_dir_flag
                    .clone()
                    .or_else(|| env(ENV_DATA_DIR).map(PathBuf::from))
                    .unwrap_or_else(default_data_dir);
                let path = dir.join(CONFIG_FILE);
                if path.is_file() {
                    (FileConfig::read(&path)?, Some(path))
                } else {
                    (FileConfig::default(), None)
                }
            }
        };

        let mut config = AppConfig::resolve(file, data_dir_flag, env)?;
        config.source = source;
        Ok(config)
    }

    /// Layers flags, `env` and `file` over the defaults.
    fn resolve(
        file: FileConfig,
        data_dir_flag: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = data_dir_flag
            .or_else(|| env(ENV_DATA_DIR).map(PathBuf::from))
            .or(file.data_dir)
            .unwrap_or_else(default_data_dir);

        let invoice_dir = env(ENV_INVOICE_DIR)
            .map(PathBuf::from)
            .or(file.invoice_dir)
            .unwrap_or_else(|| StoreConfig::new(&data_dir).invoices_dir);

        let mut invoice = InvoiceSettings::default();
        if let Some(business) = file.business {
            invoice.business = business;
        }
        if let Some(layout) = file.layout {
            invoice.layout = layout;
        }
        if let Some(terms) = file.terms {
            invoice.terms = terms;
        }
        if let Some(symbol) = file.currency_symbol {
            invoice.currency_symbol = symbol;
        }
        if let Some(format) = file.format {
            invoice.format = format;
        }
        if let Some(rate) = file.tax_rate {
            invoice.tax_rate = parse_tax_rate("tax_rate", &rate.as_text())?;
        }

        if let Some(rate) = env(ENV_TAX_RATE) {
            invoice.tax_rate = parse_tax_rate(ENV_TAX_RATE, &rate)?;
        }
        if let Some(name) = env(ENV_BUSINESS_NAME) {
            invoice.business.name = name;
        }
        if let Some(format) = env(ENV_INVOICE_FORMAT) {
            invoice.format = format.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_INVOICE_FORMAT.to_string(),
                value: format.clone(),
                reason: "expected text or pdf",
            })?;
        }

        Ok(AppConfig {
            data_dir,
            invoice_dir,
            invoice,
            source: None,
        })
    }

    /// Storage paths for this configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.data_dir).invoices_dir(&self.invoice_dir)
    }
}

/// Platform data directory, e.g. `~/.local/share/roomrent` on Linux.
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "roomrent", "roomrent")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

/// Parses a percentage such as `18` or `12.5` into a [`TaxRate`].
///
/// ## Rules
/// - Non-negative, at most two decimals
/// - At most 100
pub fn parse_tax_rate(key: &str, text: &str) -> Result<TaxRate, ConfigError> {
    let invalid = |reason| ConfigError::InvalidValue {
        key: key.to_string(),
        value: text.to_string(),
        reason,
    };

    // A percentage with two decimals is a count of basis points.
    let bps = Money::parse_decimal(text)
        .ok_or_else(|| invalid("expected a percentage like 18 or 12.5"))?
        .cents();
    if bps > 10_000 {
        return Err(invalid("must not exceed 100"));
    }
    Ok(TaxRate::from_bps(bps as u32))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn parse(toml: &str) -> FileConfig {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config =
            AppConfig::resolve(FileConfig::default(), Some("/data".into()), env_from(&[])).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.invoice_dir, PathBuf::from("/data/Invoice"));
        assert_eq!(config.invoice.tax_rate.bps(), 1800);
        assert_eq!(config.invoice.currency_symbol, "Rs.");
        assert_eq!(config.invoice.business.name, "Trinity Stays");
        assert_eq!(config.invoice.terms.len(), 8);
    }

    #[test]
    fn test_file_values() {
        let file = parse(
            r#"
            data_dir = "/srv/rooms"
            tax_rate = 12.5
            currency_symbol = "INR "
            terms = ["No smoking"]

            [business]
            name = "Lakeview Rooms"

            [layout]
            width = 96
            "#,
        );
        let config = AppConfig::resolve(file, None, env_from(&[])).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/rooms"));
        assert_eq!(config.invoice_dir, PathBuf::from("/srv/rooms/Invoice"));
        assert_eq!(config.invoice.tax_rate.bps(), 1250);
        assert_eq!(config.invoice.currency_symbol, "INR ");
        assert_eq!(config.invoice.terms, vec!["No smoking".to_string()]);
        assert_eq!(config.invoice.business.name, "Lakeview Rooms");
        // Unset business fields keep their defaults
        assert_eq!(config.invoice.business.gstin, "33AALCT2345K1ZB");
        assert_eq!(config.invoice.layout.width, 96);
        assert_eq!(config.invoice.layout.lines_per_page, 60);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = parse(
            r#"
            data_dir = "/srv/rooms"
            tax_rate = "5"
            "#,
        );
        let env = env_from(&[
            (ENV_DATA_DIR, "/env/data"),
            (ENV_INVOICE_DIR, "/env/invoices"),
            (ENV_TAX_RATE, "18"),
            (ENV_BUSINESS_NAME, "Hilltop Inn"),
        ]);
        let config = AppConfig::resolve(file, None, env).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/env/data"));
        assert_eq!(config.invoice_dir, PathBuf::from("/env/invoices"));
        assert_eq!(config.invoice.tax_rate.bps(), 1800);
        assert_eq!(config.invoice.business.name, "Hilltop Inn");
    }

    #[test]
    fn test_flag_overrides_env() {
        let env = env_from(&[(ENV_DATA_DIR, "/env/data")]);
        let config = AppConfig::resolve(FileConfig::default(), Some("/flag".into()), env).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/flag"));
    }

    #[test]
    fn test_invalid_tax_rate() {
        let env = env_from(&[(ENV_TAX_RATE, "eighteen")]);
        let err = AppConfig::resolve(FileConfig::default(), Some("/d".into()), env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_TAX_RATE));

        assert!(parse_tax_rate("tax_rate", "101").is_err());
        assert!(parse_tax_rate("tax_rate", "-1").is_err());
        assert_eq!(parse_tax_rate("tax_rate", "0.25").unwrap().bps(), 25);
    }

    #[test]
    fn test_invoice_format() {
        let config = AppConfig::resolve(parse("format = \"pdf\""), Some("/d".into()), env_from(&[]))
            .unwrap();
        assert_eq!(config.invoice.format, InvoiceFormat::Pdf);

        let env = env_from(&[(ENV_INVOICE_FORMAT, "text")]);
        let config = AppConfig::resolve(parse("format = \"pdf\""), Some("/d".into()), env).unwrap();
        assert_eq!(config.invoice.format, InvoiceFormat::Text);

        let env = env_from(&[(ENV_INVOICE_FORMAT, "docx")]);
        let err = AppConfig::resolve(FileConfig::default(), Some("/d".into()), env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_INVOICE_FORMAT));

        assert!(toml::from_str::<FileConfig>("format = \"docx\"").is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("tax = 18").is_err());
    }

    #[test]
    fn test_load_reads_config_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "currency_symbol = \"₹\"\n[business]\nname = \"Lakeview Rooms\"\n",
        )
        .unwrap();

        let config = AppConfig::load(None, Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.invoice.currency_symbol, "₹");
        assert_eq!(config.source, Some(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::load(Some(&missing), Some(dir.path().to_path_buf())),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_store_config_uses_invoice_dir() {
        let env = env_from(&[(ENV_INVOICE_DIR, "/elsewhere")]);
        let config = AppConfig::resolve(FileConfig::default(), Some("/d".into()), env).unwrap();
        let store = config.store_config();
        assert_eq!(store.customers_file, PathBuf::from("/d/customers.json"));
        assert_eq!(store.invoices_dir, PathBuf::from("/elsewhere"));
    }
}
