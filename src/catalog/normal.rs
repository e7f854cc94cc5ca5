//! Catalog Normalization
//!
//! Re-expresses a catalog in the form the threshold search consumes: every
//! group's cheapest option becomes part of an unconditional base price, and
//! the remaining options become ascending "upgrade" offsets above that
//! baseline.

use smallvec::SmallVec;

use crate::catalog::{Catalog, CatalogError, GroupKey};

/// A component group reduced to its paid-upgrade offsets.
///
/// Offsets ascend and at least one is positive. A zero offset means the group
/// carried a duplicate of its cheapest option alongside a costlier one; a
/// group with no costlier option at all is dropped during normalization
/// rather than stored.
#[derive(Debug, Clone)]
pub struct UpgradeGroup {
    key: GroupKey,
    offsets: SmallVec<[u64; 8]>,
}

impl UpgradeGroup {
    /// Return the originating component group's key.
    #[must_use]
    pub fn key(&self) -> GroupKey {
        self.key
    }

    /// Upgrade offsets above the group baseline, ascending.
    #[must_use]
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// The cheapest upgrade offset.
    #[must_use]
    pub fn cheapest(&self) -> u64 {
        self.offsets.first().copied().unwrap_or_default()
    }
}

/// A catalog normalized for threshold search.
///
/// Built once by [`Catalog::normalize`] and read-only afterwards. Groups are
/// sorted ascending by cheapest upgrade offset; the search's jump-ahead
/// pruning is only sound against that ordering.
#[derive(Debug)]
pub struct NormalizedCatalog {
    groups: Vec<UpgradeGroup>,
    cheapest_upgrades: Vec<u64>,
    base: u64,
    max_extra: u64,
}

impl NormalizedCatalog {
    pub(crate) fn from_catalog(catalog: &Catalog<'_>) -> Result<Self, CatalogError> {
        let mut base: u64 = 0;
        let mut max_extra: u64 = 0;
        let mut groups = Vec::with_capacity(catalog.len());

        for group in catalog.iter() {
            let mut prices: SmallVec<[u64; 8]> = group
                .options()
                .iter()
                .map(|option| minor_units(option.to_minor_units(), group.name()))
                .collect::<Result<_, _>>()?;

            prices.sort_unstable();

            let Some((&baseline, upgrades)) = prices.split_first() else {
                return Err(CatalogError::EmptyGroup(group.name().to_string()));
            };

            base = base
                .checked_add(baseline)
                .ok_or(CatalogError::PriceOverflow)?;

            let offsets: SmallVec<[u64; 8]> =
                upgrades.iter().map(|&price| price - baseline).collect();

            // A group with a single option, or whose options are all
            // identical, offers no paid upgrade and drops out of the search.
            match offsets.last() {
                Some(&top) if top > 0 => {
                    max_extra = max_extra
                        .checked_add(top)
                        .ok_or(CatalogError::PriceOverflow)?;

                    groups.push(UpgradeGroup {
                        key: group.key(),
                        offsets,
                    });
                }
                _ => {}
            }
        }

        groups.sort_by_key(UpgradeGroup::cheapest);

        let cheapest_upgrades = groups.iter().map(UpgradeGroup::cheapest).collect();

        Ok(NormalizedCatalog {
            groups,
            cheapest_upgrades,
            base,
            max_extra,
        })
    }

    /// Surviving groups, sorted ascending by cheapest upgrade offset.
    #[must_use]
    pub fn groups(&self) -> &[UpgradeGroup] {
        &self.groups
    }

    /// Each surviving group's cheapest upgrade offset, parallel to
    /// [`Self::groups`] and therefore ascending by construction.
    #[must_use]
    pub fn cheapest_upgrades(&self) -> &[u64] {
        &self.cheapest_upgrades
    }

    /// Sum of every group's baseline price in minor units, including groups
    /// dropped during normalization.
    #[must_use]
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Sum of every surviving group's most expensive upgrade offset: the
    /// largest extra spend any single configuration can reach.
    #[must_use]
    pub fn max_extra(&self) -> u64 {
        self.max_extra
    }

    /// Get the number of surviving groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no group survived normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Convert a validated option price to unsigned minor units.
fn minor_units(minor: i64, group: &str) -> Result<u64, CatalogError> {
    u64::try_from(minor).map_err(|_err| CatalogError::NonPositivePrice(group.to_string()))
}
