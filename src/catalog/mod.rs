//! Component Catalog

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;
use smallvec::SmallVec;
use thiserror::Error;

pub mod file;
pub mod normal;

new_key_type! {
    /// Component Group Key
    pub struct GroupKey;
}

/// Errors related to catalog construction or normalization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no component groups.
    #[error("catalog has no component groups")]
    EmptyCatalog,

    /// A component group offers no options.
    #[error("component group {0:?} has no options")]
    EmptyGroup(String),

    /// An option's currency differs from the catalog currency (group, option currency, catalog currency).
    #[error("group {0:?} has an option in currency {1}, but the catalog currency is {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// An option price is zero or negative.
    #[error("group {0:?} has a non-positive option price")]
    NonPositivePrice(String),

    /// A minor-unit sum overflowed while normalizing the catalog.
    #[error("price arithmetic overflowed while normalizing the catalog")]
    PriceOverflow,
}

/// A named component offering mutually exclusive priced options.
///
/// Every configuration of the catalog buys exactly one option from each
/// group.
#[derive(Debug, Clone)]
pub struct ComponentGroup<'a> {
    key: GroupKey,
    name: String,
    options: SmallVec<[Money<'a, Currency>; 8]>,
}

impl<'a> ComponentGroup<'a> {
    /// Create a new component group with a key, display name and option prices.
    pub fn new(
        key: GroupKey,
        name: impl Into<String>,
        options: SmallVec<[Money<'a, Currency>; 8]>,
    ) -> Self {
        ComponentGroup {
            key,
            name: name.into(),
            options,
        }
    }

    /// Return the group key.
    #[must_use]
    pub fn key(&self) -> GroupKey {
        self.key
    }

    /// Return the group display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Option prices, in the order they were supplied.
    #[must_use]
    pub fn options(&self) -> &[Money<'a, Currency>] {
        &self.options
    }

    /// The cheapest option in the group, paid unconditionally by every
    /// configuration.
    #[must_use]
    pub fn baseline(&self) -> Option<&Money<'a, Currency>> {
        self.options
            .iter()
            .min_by_key(|option| option.to_minor_units())
    }

    /// Get the number of options in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Check if the group offers no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// A validated collection of component groups sharing one currency.
#[derive(Debug)]
pub struct Catalog<'a> {
    groups: Vec<ComponentGroup<'a>>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create a new catalog from the given groups.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the catalog is empty, a group is empty,
    /// an option price is not strictly positive, or an option's currency
    /// differs from the catalog currency.
    pub fn with_groups(
        groups: impl Into<Vec<ComponentGroup<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let groups = groups.into();

        if groups.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        groups.iter().try_for_each(|group| {
            if group.is_empty() {
                return Err(CatalogError::EmptyGroup(group.name().to_string()));
            }

            group.options().iter().try_for_each(|option| {
                let option_currency = option.currency();

                if option_currency != currency {
                    return Err(CatalogError::CurrencyMismatch(
                        group.name().to_string(),
                        option_currency.iso_alpha_code,
                        currency.iso_alpha_code,
                    ));
                }

                if option.to_minor_units() <= 0 {
                    return Err(CatalogError::NonPositivePrice(group.name().to_string()));
                }

                Ok(())
            })
        })?;

        Ok(Catalog { groups, currency })
    }

    /// Normalize the catalog for threshold search.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::PriceOverflow`] if a minor-unit sum
    /// overflows while accumulating baselines.
    pub fn normalize(&self) -> Result<normal::NormalizedCatalog, CatalogError> {
        normal::NormalizedCatalog::from_catalog(self)
    }

    /// Iterate over the component groups in input order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentGroup<'a>> {
        self.groups.iter()
    }

    /// Get the number of component groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the catalog has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Get the currency shared by every option price.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
