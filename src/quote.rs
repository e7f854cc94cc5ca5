//! Quotes

use std::io;

use rusty_money::{Money, iso::Currency};
use slotmap::SecondaryMap;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::{
        Catalog, GroupKey,
        normal::{NormalizedCatalog, UpgradeGroup},
    },
    solvers::SolverResult,
};

/// Errors that can occur when building or rendering a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Price arithmetic overflowed while totalling the quote.
    #[error("price arithmetic overflowed while totalling the quote")]
    Overflow,

    /// IO error while writing the quote.
    #[error("IO error")]
    Io(#[from] io::Error),
}

/// Priced outcome of a threshold search.
///
/// The unit price is the base price plus the found threshold; the total is
/// what the demanded configurations cost altogether once the savings of
/// configurations undercutting the threshold are deducted.
#[derive(Debug, Clone)]
pub struct Quote<'a> {
    demand: u64,
    threshold: u64,
    base: Money<'a, Currency>,
    unit_price: Money<'a, Currency>,
    savings: Money<'a, Currency>,
    total: Money<'a, Currency>,
    currency: &'static Currency,
}

impl<'a> Quote<'a> {
    /// Build a quote from a normalized catalog and solver result.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError::Overflow`] if the totals exceed the
    /// representable minor-unit range.
    pub fn from_solver_result(
        catalog: &NormalizedCatalog,
        demand: u64,
        result: SolverResult,
        currency: &'static Currency,
    ) -> Result<Self, QuoteError> {
        let unit = catalog
            .base()
            .checked_add(result.threshold)
            .ok_or(QuoteError::Overflow)?;

        let gross = unit.checked_mul(demand).ok_or(QuoteError::Overflow)?;
        let total = gross.checked_sub(result.savings).ok_or(QuoteError::Overflow)?;

        Ok(Quote {
            demand,
            threshold: result.threshold,
            base: to_money(catalog.base(), currency)?,
            unit_price: to_money(unit, currency)?,
            savings: to_money(result.savings, currency)?,
            total: to_money(total, currency)?,
            currency,
        })
    }

    /// Demanded number of distinct configurations.
    #[must_use]
    pub fn demand(&self) -> u64 {
        self.demand
    }

    /// Minimal extra spend above the base price, in minor units.
    #[must_use]
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Sum of every group's baseline price.
    #[must_use]
    pub fn base(&self) -> Money<'a, Currency> {
        self.base
    }

    /// Price covering any of the demanded configurations: base plus
    /// threshold.
    #[must_use]
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// Aggregate amount by which configurations cheaper than the unit price
    /// undercut it.
    #[must_use]
    pub fn savings(&self) -> Money<'a, Currency> {
        self.savings
    }

    /// Total cost of the demanded configurations.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Total cost in minor units.
    #[must_use]
    pub fn total_minor(&self) -> i64 {
        self.total.to_minor_units()
    }

    /// Currency used for all monetary values.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Write a per-group breakdown table and summary block.
    ///
    /// # Errors
    ///
    /// Returns a [`QuoteError::Io`] if writing fails.
    pub fn write_to(
        &self,
        mut out: impl io::Write,
        catalog: &Catalog<'_>,
        normalized: &NormalizedCatalog,
    ) -> Result<(), QuoteError> {
        let upgrades: SecondaryMap<GroupKey, &UpgradeGroup> = normalized
            .groups()
            .iter()
            .map(|group| (group.key(), group))
            .collect();

        let mut builder = Builder::default();

        builder.push_record(["Group", "Baseline", "Options", "Cheapest upgrade"]);

        for group in catalog.iter() {
            let baseline = group
                .baseline()
                .map(|price| format!("{price}"))
                .unwrap_or_default();

            let cheapest_upgrade = match upgrades.get(group.key()) {
                Some(upgrade) => format!("{}", to_money(upgrade.cheapest(), self.currency)?),
                None => "baseline only".to_string(),
            };

            builder.push_record([
                group.name().to_string(),
                baseline,
                group.len().to_string(),
                cheapest_upgrade,
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..), Alignment::right());

        writeln!(out, "\n{table}")?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), QuoteError> {
        let rows = [
            ("Configurations:", self.demand.to_string()),
            ("Base:", format!("{}", self.base)),
            ("Unit price:", format!("{}", self.unit_price)),
            ("Savings:", format!("{}", self.savings)),
            ("Total:", format!("{}", self.total)),
        ];

        let label_width = rows
            .iter()
            .map(|(label, _value)| label.len())
            .max()
            .unwrap_or_default();

        let value_width = rows
            .iter()
            .map(|(_label, value)| value.len())
            .max()
            .unwrap_or_default();

        for (label, value) in &rows {
            writeln!(out, " {label:<label_width$} {value:>value_width$}")?;
        }

        writeln!(out)?;

        Ok(())
    }
}

/// Convert unsigned minor units back to a money value.
fn to_money(minor: u64, currency: &'static Currency) -> Result<Money<'static, Currency>, QuoteError> {
    let minor = i64::try_from(minor).map_err(|_err| QuoteError::Overflow)?;

    Ok(Money::from_minor(minor, currency))
}
