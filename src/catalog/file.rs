//! Catalog Files
//!
//! YAML catalog documents: a currency, a demanded configuration count, and a
//! list of named groups with formatted option prices.
//!
//! ```yaml
//! currency: GBP
//! demand: 3
//! groups:
//!   - name: chassis
//!     options: ["10.00", "12.50"]
//! ```

use std::{fs, path::Path};

use rusty_money::{Money, MoneyError, iso};
use serde::Deserialize;
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, ComponentGroup, GroupKey};

/// Catalog File Errors
#[derive(Debug, Error)]
pub enum CatalogFileError {
    /// IO error reading the catalog file
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown ISO currency code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A price string did not parse for the document currency
    #[error("group {group:?} has invalid price {price:?}")]
    InvalidPrice {
        /// Group the price belongs to
        group: String,

        /// The offending price string
        price: String,

        /// Underlying money parsing error
        #[source]
        source: MoneyError,
    },

    /// Catalog validation error
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// On-disk catalog document
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    /// ISO currency code shared by every option price
    pub currency: String,

    /// Demanded number of distinct configurations
    pub demand: u64,

    /// Component groups
    pub groups: Vec<GroupFile>,
}

/// One component group in a catalog document
#[derive(Debug, Deserialize)]
pub struct GroupFile {
    /// Group display name
    pub name: String,

    /// Option prices formatted for the document currency, e.g. `"12.50"`
    pub options: Vec<String>,
}

impl CatalogFile {
    /// Load a catalog document from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogFileError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogFileError> {
        let contents = fs::read_to_string(path)?;

        Self::parse(&contents)
    }

    /// Parse a catalog document from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogFileError::Yaml`] if the document does not parse.
    pub fn parse(contents: &str) -> Result<Self, CatalogFileError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Build the validated catalog and the demanded configuration count.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogFileError`] if the currency code is unknown, a
    /// price does not parse, or catalog validation fails.
    pub fn into_catalog(self) -> Result<(Catalog<'static>, u64), CatalogFileError> {
        let currency = iso::find(&self.currency)
            .ok_or_else(|| CatalogFileError::UnknownCurrency(self.currency.clone()))?;

        let mut keys = SlotMap::<GroupKey, ()>::with_key();
        let mut groups = Vec::with_capacity(self.groups.len());

        for group in self.groups {
            let mut options: SmallVec<[Money<'static, iso::Currency>; 8]> =
                SmallVec::with_capacity(group.options.len());

            for price in &group.options {
                let money =
                    Money::from_str(price, currency).map_err(|source| {
                        CatalogFileError::InvalidPrice {
                            group: group.name.clone(),
                            price: price.clone(),
                            source,
                        }
                    })?;

                options.push(money);
            }

            groups.push(ComponentGroup::new(keys.insert(()), group.name, options));
        }

        let catalog = Catalog::with_groups(groups, currency)?;

        Ok((catalog, self.demand))
    }
}
