//! Token Input
//!
//! The plain-text catalog format: whitespace-separated integers starting
//! with the group count and demand, followed by each group as an option
//! count and that many option prices in minor units.

use std::io::BufRead;

use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, ComponentGroup, GroupKey};

/// Token Input Errors
#[derive(Debug, Error)]
pub enum InputError {
    /// IO error reading the input
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended before the expected token
    #[error("input ended while expecting {expected}")]
    UnexpectedEof {
        /// What the missing token would have been
        expected: &'static str,
    },

    /// A token was not a number of the expected kind
    #[error("invalid token {token:?}")]
    InvalidToken {
        /// The offending token
        token: String,
    },

    /// Catalog validation error
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Read a catalog and demanded configuration count from the token format.
///
/// Prices are minor units of `currency`. Groups are named `group 1`,
/// `group 2`, … in input order.
///
/// # Errors
///
/// Returns an [`InputError`] if reading fails, a token is missing or
/// malformed, or catalog validation fails.
pub fn read_catalog(
    mut reader: impl BufRead,
    currency: &'static Currency,
) -> Result<(Catalog<'static>, u64), InputError> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;

    let mut tokens = contents.split_whitespace();

    let group_count: usize = next_number(&mut tokens, "group count")?;
    let demand: u64 = next_number(&mut tokens, "demand")?;

    let mut keys = SlotMap::<GroupKey, ()>::with_key();
    let mut groups = Vec::with_capacity(group_count);

    for index in 1..=group_count {
        let size: usize = next_number(&mut tokens, "option count")?;

        let mut options: SmallVec<[Money<'static, Currency>; 8]> = SmallVec::with_capacity(size);

        for _ in 0..size {
            let minor: i64 = next_number(&mut tokens, "option price")?;
            options.push(Money::from_minor(minor, currency));
        }

        groups.push(ComponentGroup::new(
            keys.insert(()),
            format!("group {index}"),
            options,
        ));
    }

    let catalog = Catalog::with_groups(groups, currency)?;

    Ok((catalog, demand))
}

fn next_number<'a, T: std::str::FromStr>(
    tokens: &mut impl Iterator<Item = &'a str>,
    expected: &'static str,
) -> Result<T, InputError> {
    let token = tokens.next().ok_or(InputError::UnexpectedEof { expected })?;

    token.parse().map_err(|_err| InputError::InvalidToken {
        token: token.to_string(),
    })
}
