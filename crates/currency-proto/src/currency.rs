//! Currency records and the read-only catalog the pickers search.
//!
//! The catalog is loaded once at startup (built-in table or a TOML file) and
//! shared between widgets behind an `Arc`. Nothing mutates it afterwards.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One currency entry. `code` is unique across a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    /// Display name; the only field matched against search queries.
    pub name: String,
    /// Opaque icon reference (the built-in table uses flag emoji).
    #[serde(default)]
    pub flag: String,
}

impl Currency {
    pub fn new(code: impl Into<String>, name: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            flag: flag.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate currency code `{0}`")]
    DuplicateCode(String),
    #[error("currency #{index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },
}

/// On-disk layout: a list of `[[currency]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    currency: Vec<Currency>,
}

/// Ordered, immutable currency table. Clones share the same storage.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Arc<[Currency]>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate codes and blank fields.
    pub fn new(items: Vec<Currency>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for (index, c) in items.iter().enumerate() {
            if c.code.trim().is_empty() {
                return Err(CatalogError::EmptyField { index, field: "code" });
            }
            if c.name.trim().is_empty() {
                return Err(CatalogError::EmptyField { index, field: "name" });
            }
            if !seen.insert(c.code.as_str()) {
                return Err(CatalogError::DuplicateCode(c.code.clone()));
            }
        }
        Ok(Self {
            items: items.into(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.currency)
    }

    /// The table shipped with the binary.
    pub fn builtin() -> Self {
        let items: Vec<Currency> = BUILTIN
            .iter()
            .map(|&(code, name, flag)| Currency::new(code, name, flag))
            .collect();
        Self {
            items: items.into(),
        }
    }

    /// Indices of every currency whose name contains `query`, ignoring case.
    /// Catalog order is preserved; an empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<usize> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&Currency> {
        self.items.get(index)
    }

    pub fn find(&self, code: &str) -> Option<&Currency> {
        self.items.iter().find(|c| c.code == code)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Currency> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every index, in order.
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.items.len()).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const BUILTIN: &[(&str, &str, &str)] = &[
    ("USD", "US Dollar", "🇺🇸"),
    ("EUR", "Euro", "🇪🇺"),
    ("EGP", "Egyptian Pound", "🇪🇬"),
    ("GBP", "British Pound", "🇬🇧"),
    ("JPY", "Japanese Yen", "🇯🇵"),
    ("CHF", "Swiss Franc", "🇨🇭"),
    ("CAD", "Canadian Dollar", "🇨🇦"),
    ("AUD", "Australian Dollar", "🇦🇺"),
    ("NZD", "New Zealand Dollar", "🇳🇿"),
    ("CNY", "Chinese Yuan", "🇨🇳"),
    ("HKD", "Hong Kong Dollar", "🇭🇰"),
    ("SGD", "Singapore Dollar", "🇸🇬"),
    ("INR", "Indian Rupee", "🇮🇳"),
    ("PKR", "Pakistani Rupee", "🇵🇰"),
    ("KRW", "South Korean Won", "🇰🇷"),
    ("SEK", "Swedish Krona", "🇸🇪"),
    ("NOK", "Norwegian Krone", "🇳🇴"),
    ("DKK", "Danish Krone", "🇩🇰"),
    ("PLN", "Polish Zloty", "🇵🇱"),
    ("CZK", "Czech Koruna", "🇨🇿"),
    ("HUF", "Hungarian Forint", "🇭🇺"),
    ("TRY", "Turkish Lira", "🇹🇷"),
    ("RUB", "Russian Ruble", "🇷🇺"),
    ("BRL", "Brazilian Real", "🇧🇷"),
    ("MXN", "Mexican Peso", "🇲🇽"),
    ("ARS", "Argentine Peso", "🇦🇷"),
    ("ZAR", "South African Rand", "🇿🇦"),
    ("NGN", "Nigerian Naira", "🇳🇬"),
    ("SAR", "Saudi Riyal", "🇸🇦"),
    ("AED", "UAE Dirham", "🇦🇪"),
    ("KWD", "Kuwaiti Dinar", "🇰🇼"),
    ("JOD", "Jordanian Dinar", "🇯🇴"),
    ("ILS", "Israeli New Shekel", "🇮🇱"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Catalog {
        Catalog::new(vec![
            Currency::new("USD", "US Dollar", ""),
            Currency::new("EUR", "Euro", ""),
            Currency::new("EGP", "Egyptian Pound", ""),
        ])
        .unwrap()
    }

    #[test]
    fn test_filter_is_case_insensitive_and_ordered() {
        let cat = small();
        assert_eq!(cat.filter("eur"), vec![1]);
        assert_eq!(cat.filter("EUR"), vec![1]);
        // "US Dollar" and "Egyptian Pound" both contain "u"
        assert_eq!(cat.filter("u"), vec![0, 1, 2]);
        assert_eq!(cat.filter("pound"), vec![2]);
        assert!(cat.filter("yen").is_empty());
    }

    #[test]
    fn test_filter_matches_name_only() {
        let cat = small();
        // "EGP" is a code, not part of any name
        assert!(cat.filter("egp").is_empty());
    }

    #[test]
    fn test_empty_query_matches_all() {
        let cat = small();
        assert_eq!(cat.filter(""), cat.all_indices());
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let err = Catalog::new(vec![
            Currency::new("USD", "US Dollar", ""),
            Currency::new("USD", "Dollar again", ""),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCode(code) if code == "USD"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Catalog::new(vec![Currency::new("XXX", "  ", "")]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::EmptyField { index: 0, field: "name" }
        ));
    }

    #[test]
    fn test_builtin_codes_unique() {
        let builtin = Catalog::builtin();
        let rebuilt = Catalog::new(builtin.iter().cloned().collect());
        assert!(rebuilt.is_ok());
        assert!(builtin.find("EUR").is_some());
    }

    #[test]
    fn test_from_toml_str() {
        let cat = Catalog::from_toml_str(
            r#"
            [[currency]]
            code = "USD"
            name = "US Dollar"
            flag = "us.png"

            [[currency]]
            code = "EUR"
            name = "Euro"
            "#,
        )
        .unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.get(0).map(|c| c.flag.as_str()), Some("us.png"));
        assert_eq!(cat.get(1).map(|c| c.flag.as_str()), Some(""));
    }
}
