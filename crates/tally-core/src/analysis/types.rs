//! Result types for the analysis modules

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Category;

/// Budget status relative to actual spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// No budget configured for the category
    NoBudgetSet,
    /// More than 10% over the budgeted amount
    OverBudget,
    /// More than 10% under the budgeted amount
    UnderBudget,
    /// Within 10% either way
    OnTrack,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoBudgetSet => "no_budget_set",
            Self::OverBudget => "over_budget",
            Self::UnderBudget => "under_budget",
            Self::OnTrack => "on_track",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BudgetStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "no_budget_set" => Ok(Self::NoBudgetSet),
            "over_budget" => Ok(Self::OverBudget),
            "under_budget" => Ok(Self::UnderBudget),
            "on_track" => Ok(Self::OnTrack),
            _ => Err(format!("Unknown budget status: {}", s)),
        }
    }
}

/// How notable a variance is, independent of its status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    /// No budget to compare against
    Unknown,
    /// Within 15% either way
    Minor,
    /// More than 15% off budget
    Significant,
}

impl Significance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Minor => "minor",
            Self::Significant => "significant",
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Significance {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            "minor" => Ok(Self::Minor),
            "significant" => Ok(Self::Significant),
            _ => Err(format!("Unknown significance: {}", s)),
        }
    }
}

/// Direction of a spending series, classified from its regression slope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Fewer than two data points
    InsufficientData,
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InsufficientData => "insufficient_data",
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrendDirection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "insufficient_data" => Ok(Self::InsufficientData),
            "increasing" => Ok(Self::Increasing),
            "decreasing" => Ok(Self::Decreasing),
            "stable" => Ok(Self::Stable),
            _ => Err(format!("Unknown trend direction: {}", s)),
        }
    }
}

/// Budget-vs-actual variance for a single amount pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceResult {
    /// Signed percentage over/under budget, rounded to 2 decimals
    pub variance_percentage: f64,
    /// Signed dollar difference, rounded to 2 decimals
    pub variance_amount: f64,
    pub status: BudgetStatus,
    /// Reported alongside status even though the two are correlated
    pub significance: Significance,
}

/// Per-category variance, augmented with the category's average monthly
/// spending (the value the variance was computed against)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryVariance {
    #[serde(flatten)]
    pub variance: VarianceResult,
    pub average_spending: f64,
}

/// Spending forecast with an approximate 95% confidence interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Forecast point, clamped to zero and rounded to 2 decimals
    pub forecast: f64,
    /// `(low, high)`; the lower bound is clamped to zero
    pub confidence_interval: (f64, f64),
    pub trend: TrendDirection,
    /// Regression slope, rounded to 4 decimals
    pub slope: f64,
}

/// Outcome of a budget-optimization pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationStatus {
    /// Spending plus the savings goal already fits the income
    BudgetBalanced,
    /// A reduction is required; recommendations are attached
    OptimizationNeeded,
}

impl OptimizationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetBalanced => "budget_balanced",
            Self::OptimizationNeeded => "optimization_needed",
        }
    }
}

impl fmt::Display for OptimizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single suggested category reduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: Category,
    pub current_spending: f64,
    pub suggested_reduction: f64,
    pub new_budget: f64,
}

/// Suggested reduction plan across discretionary categories
///
/// `potential_savings` may undershoot `required_reduction`; the per-category
/// caps are intentional policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationPlan {
    pub status: OptimizationStatus,
    pub required_reduction: f64,
    /// In discretionary-priority order (dining, entertainment, shopping)
    pub recommendations: Vec<Recommendation>,
    pub potential_savings: f64,
}

/// Why a savings goal is infeasible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalInfeasibleReason {
    /// No current spending to reduce
    NoSpendingData,
}

impl GoalInfeasibleReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoSpendingData => "no_spending_data",
        }
    }
}

impl fmt::Display for GoalInfeasibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending adjustment needed to meet a savings goal over a timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalAdjustment {
    /// True when the required reduction stays within the 30% ceiling
    pub feasible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<GoalInfeasibleReason>,
    pub monthly_savings_needed: f64,
    pub reduction_percentage: f64,
    pub timeline_months: u32,
    pub total_goal: f64,
}

/// The bundled result of one analysis request
///
/// Plain data for the external formatting layer; the core never renders
/// natural-language text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSnapshot {
    /// Processing date the request was analyzed against
    pub as_of: NaiveDate,
    pub transaction_count: usize,
    /// How many records had their date substituted with `as_of`
    pub date_substitutions: usize,
    /// Sum of positive raw amounts
    pub income: f64,
    /// Magnitude sum of negative raw amounts
    pub expenses: f64,
    /// Sum of all aggregated magnitudes
    pub total_spending: f64,
    /// Total spending divided by the number of active months, 2 decimals
    pub monthly_average: f64,
    pub category_breakdown: BTreeMap<Category, f64>,
    pub monthly_totals: BTreeMap<String, f64>,
    pub category_variance: BTreeMap<Category, CategoryVariance>,
    pub trend: TrendDirection,
    pub forecast: ForecastResult,
    pub optimization: OptimizationPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_adjustment: Option<GoalAdjustment>,
    /// Month spending relative to the overall mean; all 1.0 under a year
    /// of history
    pub seasonal_factors: BTreeMap<String, f64>,
}

impl SpendingSnapshot {
    /// Serialize to the JSON value handed to the formatting layer
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(BudgetStatus::NoBudgetSet.as_str(), "no_budget_set");
        assert_eq!(
            BudgetStatus::from_str("over_budget").unwrap(),
            BudgetStatus::OverBudget
        );
        assert_eq!(
            serde_json::to_string(&BudgetStatus::OnTrack).unwrap(),
            "\"on_track\""
        );
    }

    #[test]
    fn test_trend_direction_round_trip() {
        for s in ["insufficient_data", "increasing", "decreasing", "stable"] {
            assert_eq!(TrendDirection::from_str(s).unwrap().as_str(), s);
        }
        assert!(TrendDirection::from_str("sideways").is_err());
    }

    #[test]
    fn test_category_variance_flattens() {
        let cv = CategoryVariance {
            variance: VarianceResult {
                variance_percentage: 25.0,
                variance_amount: 50.0,
                status: BudgetStatus::OverBudget,
                significance: Significance::Significant,
            },
            average_spending: 250.0,
        };

        let value = serde_json::to_value(&cv).unwrap();
        assert_eq!(value["variance_percentage"], 25.0);
        assert_eq!(value["status"], "over_budget");
        assert_eq!(value["average_spending"], 250.0);
    }

    #[test]
    fn test_goal_adjustment_omits_empty_reason() {
        let adjustment = GoalAdjustment {
            feasible: true,
            reason: None,
            monthly_savings_needed: 500.0,
            reduction_percentage: 25.0,
            timeline_months: 6,
            total_goal: 3000.0,
        };

        let value = serde_json::to_value(&adjustment).unwrap();
        assert!(value.get("reason").is_none());
    }
}
