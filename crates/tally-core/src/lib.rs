//! Tally Core Library
//!
//! Deterministic spending analysis for Tally:
//! - Rule-based transaction categorization
//! - Monthly spending aggregation
//! - Budget variance scoring
//! - Trend detection and spending forecasts
//! - Budget-optimization recommendations
//! - A snapshot engine bundling the full pipeline per request
//!
//! The library is the computation layer behind a language-model assistant:
//! the model decides what to ask and how to phrase the answer, while every
//! number it cites comes from here. Everything is a pure, synchronous
//! function of its inputs (no network, no storage, no clock) so results
//! are reproducible and auditable.

pub mod aggregate;
pub mod analysis;
pub mod categorize;
pub mod error;
pub mod models;

pub use aggregate::MonthlySpending;
pub use analysis::{
    calculate_variance, category_variance, forecast, goal_based_adjustment, moving_average,
    optimize_allocation, seasonal_factors, trend_direction, AnalysisRequest, BudgetStatus,
    CategoryVariance, ForecastResult, GoalAdjustment, GoalInfeasibleReason, OptimizationPlan,
    OptimizationStatus, Recommendation, SavingsGoal, Significance, SnapshotEngine,
    SpendingSnapshot, TrendDirection, VarianceResult,
};
pub use categorize::{Categorizer, CATEGORY_RULES};
pub use error::{Error, Result};
pub use models::{CategorizedTransaction, Category, TransactionRecord};
