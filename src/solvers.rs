//! Solvers for Configuration Quotes

use thiserror::Error;

use crate::catalog::normal::NormalizedCatalog;

pub mod exhaustive;
pub mod threshold;

/// Solver Errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// The demanded configuration count is zero.
    #[error("demand must be at least one configuration")]
    ZeroDemand,

    /// The catalog cannot produce the demanded number of distinct configurations.
    #[error("catalog offers {available} distinct configurations, but {demand} were demanded")]
    DemandUnreachable {
        /// Demanded configuration count
        demand: u64,

        /// Distinct configurations the catalog can actually produce
        available: u64,
    },

    /// A count or cost exceeded the representable range.
    #[error("configuration count or cost exceeded the representable range")]
    Overflow,
}

/// Result of a threshold search over a normalized catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverResult {
    /// Minimal extra spend above the base price at which the demanded number
    /// of distinct configurations becomes affordable
    pub threshold: u64,

    /// Aggregate amount by which configurations costing strictly less than
    /// the threshold undercut it
    pub savings: u64,
}

/// Trait for finding the minimal affordable spend threshold for a demanded
/// number of distinct configurations
pub trait Solver {
    /// Find the threshold and savings for `demand` configurations.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] if the demand is zero or exceeds what the
    /// catalog can produce.
    fn solve(catalog: &NormalizedCatalog, demand: u64) -> Result<SolverResult, SolverError>;
}
