//! Threshold Solver
//!
//! Finds the minimal extra spend at which a demanded number of distinct
//! configurations becomes affordable, by bisecting over candidate budgets and
//! counting affordable configurations under each. Counting walks the groups
//! recursively from the last (most expensive cheapest-upgrade) group down,
//! and relies on the normalized ordering to skip whole runs of unaffordable
//! groups in one binary search.

use crate::{
    catalog::normal::{NormalizedCatalog, UpgradeGroup},
    solvers::{Solver, SolverError, SolverResult},
};

/// Solver using bisection over spend budgets with sorted-prefix pruning
#[derive(Debug)]
pub struct ThresholdSolver;

impl Solver for ThresholdSolver {
    fn solve(catalog: &NormalizedCatalog, demand: u64) -> Result<SolverResult, SolverError> {
        if demand == 0 {
            return Err(SolverError::ZeroDemand);
        }

        let available = affordable_within(catalog, catalog.max_extra(), demand);

        if available < demand {
            return Err(SolverError::DemandUnreachable { demand, available });
        }

        let mut lo = 0u64;
        let mut hi = catalog.max_extra();

        // Affordability is monotone in the budget: a larger budget only ever
        // admits more configurations, so bisection converges on the minimal
        // threshold reaching the demand.
        while lo < hi {
            let mid = lo + (hi - lo) / 2;

            if affordable_within(catalog, mid, demand) < demand {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        let savings = match lo.checked_sub(1) {
            Some(below) => savings_below(catalog, below),
            None => 0,
        };

        Ok(SolverResult {
            threshold: lo,
            savings,
        })
    }
}

/// Count configurations whose extra spend fits within `budget`.
///
/// Stops counting once `ceiling` is reached: the bisection only needs to know
/// whether the demand is met, not the exact count beyond it.
fn affordable_within(catalog: &NormalizedCatalog, budget: u64, ceiling: u64) -> u64 {
    let mut count = 0;

    count_affordable(
        catalog.groups(),
        catalog.cheapest_upgrades(),
        budget,
        ceiling,
        &mut count,
    );

    count
}

fn count_affordable(
    groups: &[UpgradeGroup],
    cheapest: &[u64],
    budget: u64,
    ceiling: u64,
    count: &mut u64,
) {
    if *count >= ceiling {
        return;
    }

    let (groups, cheapest) = prune_unaffordable(groups, cheapest, budget);

    let Some((group, rest)) = groups.split_last() else {
        // Every group decided: exactly one affordable configuration.
        *count += 1;
        return;
    };

    // `cheapest` parallels `groups`.
    let rest_cheapest = cheapest.get(..rest.len()).unwrap_or_default();

    count_affordable(rest, rest_cheapest, budget, ceiling, count);

    for &offset in group
        .offsets()
        .iter()
        .take_while(|&&offset| offset <= budget)
    {
        count_affordable(rest, rest_cheapest, budget - offset, ceiling, count);
    }
}

/// Total the amount by which every configuration affordable within `budget`
/// undercuts `budget + 1`.
///
/// Called with the found threshold minus one, this yields the aggregate
/// savings of all configurations costing strictly less than the threshold.
fn savings_below(catalog: &NormalizedCatalog, budget: u64) -> u64 {
    let mut savings = 0;

    accrue_savings(
        catalog.groups(),
        catalog.cheapest_upgrades(),
        budget,
        &mut savings,
    );

    savings
}

fn accrue_savings(groups: &[UpgradeGroup], cheapest: &[u64], budget: u64, savings: &mut u64) {
    let (groups, cheapest) = prune_unaffordable(groups, cheapest, budget);

    let Some((group, rest)) = groups.split_last() else {
        // The remaining budget is how far this configuration's cost fell
        // below the probed threshold.
        *savings += budget + 1;
        return;
    };

    let rest_cheapest = cheapest.get(..rest.len()).unwrap_or_default();

    accrue_savings(rest, rest_cheapest, budget, savings);

    for &offset in group
        .offsets()
        .iter()
        .take_while(|&&offset| offset <= budget)
    {
        accrue_savings(rest, rest_cheapest, budget - offset, savings);
    }
}

/// Drop every trailing group whose cheapest upgrade exceeds the budget.
///
/// When the deciding group's cheapest upgrade is unaffordable, so is every
/// group after the last affordable position, since groups ascend by cheapest
/// upgrade. All of them deterministically take the baseline, and the
/// traversal resumes at the last group whose cheapest upgrade still fits.
fn prune_unaffordable<'a>(
    groups: &'a [UpgradeGroup],
    cheapest: &'a [u64],
    budget: u64,
) -> (&'a [UpgradeGroup], &'a [u64]) {
    match cheapest.last() {
        Some(&min) if min > budget => {
            let affordable = cheapest.partition_point(|&offset| offset <= budget);

            (
                groups.get(..affordable).unwrap_or_default(),
                cheapest.get(..affordable).unwrap_or_default(),
            )
        }
        _ => (groups, cheapest),
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::GBP};
    use slotmap::SlotMap;
    use testresult::TestResult;

    use crate::catalog::{Catalog, ComponentGroup};

    use super::*;

    fn normalized(prices: &[&[i64]]) -> TestResult<NormalizedCatalog> {
        let mut keys = SlotMap::with_key();

        let groups: Vec<ComponentGroup<'_>> = prices
            .iter()
            .enumerate()
            .map(|(index, options)| {
                let options = options
                    .iter()
                    .map(|&price| Money::from_minor(price, GBP))
                    .collect();

                ComponentGroup::new(keys.insert(()), format!("group {index}"), options)
            })
            .collect();

        Ok(Catalog::with_groups(groups, GBP)?.normalize()?)
    }

    /// Count affordable configurations by full enumeration, without pruning
    /// or early termination.
    fn count_by_enumeration(catalog: &NormalizedCatalog, budget: u64) -> u64 {
        let mut costs = vec![0u64];

        for group in catalog.groups() {
            let mut next = Vec::with_capacity(costs.len() * (group.offsets().len() + 1));

            for &cost in &costs {
                next.push(cost);
                next.extend(group.offsets().iter().map(|&offset| cost + offset));
            }

            costs = next;
        }

        u64::try_from(costs.iter().filter(|&&cost| cost <= budget).count()).unwrap_or(u64::MAX)
    }

    #[test]
    fn full_budget_counts_every_configuration() -> TestResult {
        // Surviving groups offer 2 and 3 upgrades; with the baseline choice
        // that is (2 + 1) * (3 + 1) configurations.
        let catalog = normalized(&[&[10, 30, 50], &[20, 25, 35, 60]])?;

        let count = affordable_within(&catalog, catalog.max_extra(), u64::MAX);

        assert_eq!(count, 12);

        Ok(())
    }

    #[test]
    fn count_is_monotone_in_budget() -> TestResult {
        let catalog = normalized(&[&[10, 17, 50], &[20, 26], &[5, 9, 40]])?;

        let mut previous = 0;

        for budget in 0..=catalog.max_extra() {
            let count = affordable_within(&catalog, budget, u64::MAX);

            assert!(
                count >= previous,
                "count dropped from {previous} to {count} at budget {budget}"
            );

            previous = count;
        }

        Ok(())
    }

    #[test]
    fn pruned_count_matches_enumeration() -> TestResult {
        let catalog = normalized(&[&[10, 17, 50], &[20, 26], &[5, 9, 40], &[3, 3, 8]])?;

        for budget in 0..=catalog.max_extra() {
            assert_eq!(
                affordable_within(&catalog, budget, u64::MAX),
                count_by_enumeration(&catalog, budget),
                "mismatch at budget {budget}"
            );
        }

        Ok(())
    }

    #[test]
    fn ceiling_caps_the_count() -> TestResult {
        let catalog = normalized(&[&[10, 30, 50], &[20, 25, 35, 60]])?;

        let count = affordable_within(&catalog, catalog.max_extra(), 5);

        assert_eq!(count, 5);

        Ok(())
    }

    #[test]
    fn threshold_is_minimal() -> TestResult {
        let catalog = normalized(&[&[10, 17, 50], &[20, 26], &[5, 9, 40]])?;

        for demand in 1..=affordable_within(&catalog, catalog.max_extra(), u64::MAX) {
            let result = ThresholdSolver::solve(&catalog, demand)?;

            assert!(affordable_within(&catalog, result.threshold, u64::MAX) >= demand);

            if let Some(below) = result.threshold.checked_sub(1) {
                assert!(
                    affordable_within(&catalog, below, u64::MAX) < demand,
                    "threshold {} not minimal for demand {demand}",
                    result.threshold
                );
            }
        }

        Ok(())
    }

    #[test]
    fn worked_example_single_group() -> TestResult {
        // Options 1, 2, 3: baseline 1, upgrades [1, 2]. Two configurations
        // fit within an extra spend of 1, and the baseline configuration
        // undercuts that threshold by 1.
        let catalog = normalized(&[&[1, 2, 3]])?;

        let result = ThresholdSolver::solve(&catalog, 2)?;

        assert_eq!(result.threshold, 1);
        assert_eq!(result.savings, 1);

        Ok(())
    }

    #[test]
    fn worked_example_degenerate_group() -> TestResult {
        let catalog = normalized(&[&[5, 5], &[2, 4]])?;

        let result = ThresholdSolver::solve(&catalog, 1)?;

        assert_eq!(result.threshold, 0);
        assert_eq!(result.savings, 0);

        Ok(())
    }

    #[test]
    fn zero_demand_is_rejected() -> TestResult {
        let catalog = normalized(&[&[1, 2]])?;

        let result = ThresholdSolver::solve(&catalog, 0);

        assert_eq!(result, Err(SolverError::ZeroDemand));

        Ok(())
    }

    #[test]
    fn unreachable_demand_is_rejected() -> TestResult {
        let catalog = normalized(&[&[1, 2]])?;

        let result = ThresholdSolver::solve(&catalog, 3);

        assert_eq!(
            result,
            Err(SolverError::DemandUnreachable {
                demand: 3,
                available: 2
            })
        );

        Ok(())
    }

    #[test]
    fn empty_normalized_catalog_has_one_configuration() -> TestResult {
        let catalog = normalized(&[&[500], &[200, 200]])?;

        let result = ThresholdSolver::solve(&catalog, 1)?;

        assert_eq!(result.threshold, 0);
        assert_eq!(result.savings, 0);

        Ok(())
    }

    #[test]
    fn repeated_solves_agree() -> TestResult {
        let catalog = normalized(&[&[10, 17, 50], &[20, 26], &[5, 9, 40]])?;

        let first = ThresholdSolver::solve(&catalog, 7)?;
        let second = ThresholdSolver::solve(&catalog, 7)?;

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn duplicate_minimum_counts_as_distinct_configuration() -> TestResult {
        // Group [5, 5, 6] keeps a zero offset for the duplicated minimum, so
        // two distinct configurations cost nothing extra.
        let catalog = normalized(&[&[5, 5, 6]])?;

        assert_eq!(affordable_within(&catalog, 0, u64::MAX), 2);

        Ok(())
    }
}
