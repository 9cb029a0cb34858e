//! Analysis modules - variance, trend, recommendations, and the snapshot
//! engine
//!
//! Every operation here is a pure function of its arguments: no clock, no
//! I/O, no shared state. Identical inputs always produce identical results,
//! so callers can cache or memoize freely.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::analysis::{AnalysisRequest, SnapshotEngine};
//!
//! let request = AnalysisRequest::new(records, as_of)
//!     .with_budget(budgets)
//!     .with_income(4000.0);
//! let snapshot = SnapshotEngine::new().analyze(&request)?;
//! ```

pub mod engine;
pub mod recommend;
pub mod trend;
pub mod types;
pub mod variance;

pub use engine::{AnalysisRequest, SavingsGoal, SnapshotEngine};
pub use recommend::{goal_based_adjustment, optimize_allocation};
pub use trend::{
    forecast, moving_average, seasonal_factors, trend_direction, DEFAULT_PERIODS_AHEAD,
    DEFAULT_WINDOW,
};
pub use types::{
    BudgetStatus, CategoryVariance, ForecastResult, GoalAdjustment, GoalInfeasibleReason,
    OptimizationPlan, OptimizationStatus, Recommendation, Significance, SpendingSnapshot,
    TrendDirection, VarianceResult,
};
pub use variance::{calculate_variance, category_variance};

/// Round a reported figure to 2 decimal places, half away from zero
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round a slope to 4 decimal places, half away from zero
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
