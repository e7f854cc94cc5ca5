//! Strata prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{
        Catalog, CatalogError, ComponentGroup, GroupKey,
        file::{CatalogFile, CatalogFileError, GroupFile},
        normal::{NormalizedCatalog, UpgradeGroup},
    },
    input::{InputError, read_catalog},
    quote::{Quote, QuoteError},
    solvers::{
        Solver, SolverError, SolverResult, exhaustive::ExhaustiveSolver,
        threshold::ThresholdSolver,
    },
};
