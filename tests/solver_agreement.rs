//! Cross-checks the bisecting threshold solver against the exhaustive
//! reference solver on generated catalogs.

use anyhow::Result;
use rusty_money::{Money, iso::GBP};
use slotmap::SlotMap;

use strata::{
    catalog::{Catalog, GroupKey, normal::NormalizedCatalog},
    solvers::{Solver, exhaustive::ExhaustiveSolver, threshold::ThresholdSolver},
    utils::group,
};

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

fn generated_catalog(rng: &mut Lcg) -> Result<NormalizedCatalog> {
    let mut keys = SlotMap::<GroupKey, ()>::with_key();

    let group_count = 1 + rng.below(4);

    let groups: Vec<_> = (0..group_count)
        .map(|index| {
            let option_count = 1 + rng.below(4);

            let options: Vec<_> = (0..option_count)
                .map(|_| {
                    let minor = i64::try_from(1 + rng.below(30)).unwrap_or(1);
                    Money::from_minor(minor, GBP)
                })
                .collect();

            group(&mut keys, &format!("group {index}"), options)
        })
        .collect();

    Ok(Catalog::with_groups(groups, GBP)?.normalize()?)
}

fn configuration_count(catalog: &NormalizedCatalog) -> Result<u64> {
    let mut total: u64 = 1;

    for upgrades in catalog.groups() {
        total *= u64::try_from(upgrades.offsets().len())? + 1;
    }

    Ok(total)
}

#[test]
fn solvers_agree_on_generated_catalogs() -> Result<()> {
    let mut rng = Lcg(0x5EED);

    for case in 0..40 {
        let catalog = generated_catalog(&mut rng)?;
        let available = configuration_count(&catalog)?;

        for demand in 1..=available {
            let bisected = ThresholdSolver::solve(&catalog, demand)?;
            let enumerated = ExhaustiveSolver::solve(&catalog, demand)?;

            assert_eq!(
                bisected, enumerated,
                "solvers disagree on case {case} at demand {demand}"
            );
        }
    }

    Ok(())
}

#[test]
fn threshold_is_monotone_in_demand() -> Result<()> {
    let mut rng = Lcg(0xBEEF);

    for _case in 0..10 {
        let catalog = generated_catalog(&mut rng)?;
        let available = configuration_count(&catalog)?;

        let mut previous = 0;

        for demand in 1..=available {
            let result = ThresholdSolver::solve(&catalog, demand)?;

            assert!(
                result.threshold >= previous,
                "threshold dropped from {previous} to {} at demand {demand}",
                result.threshold
            );

            previous = result.threshold;
        }
    }

    Ok(())
}

#[test]
fn both_solvers_reject_excess_demand_identically() -> Result<()> {
    let mut rng = Lcg(0xFACE);

    let catalog = generated_catalog(&mut rng)?;
    let available = configuration_count(&catalog)?;

    let bisected = ThresholdSolver::solve(&catalog, available + 1);
    let enumerated = ExhaustiveSolver::solve(&catalog, available + 1);

    assert_eq!(bisected, enumerated);

    Ok(())
}
