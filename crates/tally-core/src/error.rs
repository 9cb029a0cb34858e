//! Error types for Tally
//!
//! Data-quality problems (bad dates, zero budgets, short series) are modeled
//! as data in the result types, not as errors. The variants here cover
//! programming errors and serialization only.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Moving-average window must be at least 1")]
    InvalidWindow,

    #[error("Goal timeline must be at least 1 month")]
    InvalidTimeline,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
