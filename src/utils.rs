//! Utils

use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::catalog::{ComponentGroup, GroupKey};

/// Create a new component group with a fresh key and the given option prices.
pub fn group<'a>(
    keys: &mut SlotMap<GroupKey, ()>,
    name: &str,
    options: impl IntoIterator<Item = Money<'a, Currency>>,
) -> ComponentGroup<'a> {
    let options: SmallVec<[Money<'a, Currency>; 8]> = options.into_iter().collect();

    ComponentGroup::new(keys.insert(()), name, options)
}
