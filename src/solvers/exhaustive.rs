//! Exhaustive Reference Solver

use crate::{
    catalog::normal::NormalizedCatalog,
    solvers::{Solver, SolverError, SolverResult},
};

/// Solver that materializes the cost of every configuration.
///
/// The cost list grows with the product of group sizes, so this is only
/// viable for small catalogs. It reads the threshold and savings straight off
/// the sorted costs, which makes it the reference the bisecting solver is
/// checked against.
#[derive(Debug)]
pub struct ExhaustiveSolver;

impl Solver for ExhaustiveSolver {
    fn solve(catalog: &NormalizedCatalog, demand: u64) -> Result<SolverResult, SolverError> {
        if demand == 0 {
            return Err(SolverError::ZeroDemand);
        }

        let mut costs = vec![0u64];

        for group in catalog.groups() {
            let mut next = Vec::with_capacity(costs.len() * (group.offsets().len() + 1));

            for &cost in &costs {
                next.push(cost);

                for &offset in group.offsets() {
                    next.push(
                        cost.checked_add(offset)
                            .ok_or(SolverError::Overflow)?,
                    );
                }
            }

            costs = next;
        }

        costs.sort_unstable();

        let demanded = usize::try_from(demand).map_err(|_err| SolverError::Overflow)?;

        if costs.len() < demanded {
            return Err(SolverError::DemandUnreachable {
                demand,
                available: u64::try_from(costs.len()).unwrap_or(u64::MAX),
            });
        }

        // The threshold is the cost of the demanded-th cheapest
        // configuration; savings accrue from every configuration strictly
        // below it.
        let threshold = costs.iter().take(demanded).last().copied().unwrap_or(0);

        let savings = costs
            .iter()
            .take_while(|&&cost| cost < threshold)
            .map(|&cost| threshold - cost)
            .sum();

        Ok(SolverResult { threshold, savings })
    }
}
