//! Pure policy evaluation and record building (no IO).
//!
//! Input: a device profile and a frozen rule catalog.
//! Output: a verdict, and a content-addressed log record ready for the ledger.

#![forbid(unsafe_code)]

pub mod canonical;
pub mod catalog;
pub mod checks;
pub mod network;
pub mod policy;
pub mod record;

mod evaluator;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use catalog::{CatalogError, Check, RuleCatalog, RuleCatalogBuilder};
pub use evaluator::evaluate;
pub use checks::{builtin_catalog, builtin_check_ids};
pub use record::IntegrityError;
