//! Awardboard - employee award nominations dashboard.
//!
//! The library holds an in-memory nomination collection generated from a
//! seed, and exposes the dashboard operations over it: paginated search,
//! metrics aggregation, insights, status review, submission and export.

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod query;
pub mod report;
pub mod store;
pub mod submission;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::MockApi;
pub use error::{AwardsError, Result};
pub use query::{NominationFilters, NominationQuery, Page};
pub use store::NominationStore;
