//! Snapshot engine - runs the full analysis pipeline over one request
//!
//! Categorize → aggregate → variance → trend/forecast → optimization, with
//! the results bundled into a single `SpendingSnapshot`. The engine never
//! reads the clock or touches anything outside the request, so identical
//! requests always produce identical snapshots.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::aggregate::MonthlySpending;
use crate::categorize::Categorizer;
use crate::error::Result;
use crate::models::{Category, TransactionRecord};

use super::recommend::{goal_based_adjustment, optimize_allocation};
use super::trend::{forecast, seasonal_factors, DEFAULT_PERIODS_AHEAD};
use super::types::SpendingSnapshot;
use super::variance::category_variance;
use super::round2;

/// A savings goal with a timeline, for feasibility analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsGoal {
    pub amount: f64,
    pub timeline_months: u32,
}

/// Everything one analysis needs, including the processing date
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub records: Vec<TransactionRecord>,
    pub budget_by_category: BTreeMap<Category, f64>,
    /// Target monthly savings used by the optimizer
    pub monthly_savings_goal: f64,
    pub total_income: f64,
    /// Optional longer-term goal; adds a feasibility adjustment to the
    /// snapshot
    pub savings_goal: Option<SavingsGoal>,
    /// Processing date; also the fallback for unparseable record dates
    pub as_of: NaiveDate,
}

impl AnalysisRequest {
    pub fn new(records: Vec<TransactionRecord>, as_of: NaiveDate) -> Self {
        Self {
            records,
            budget_by_category: BTreeMap::new(),
            monthly_savings_goal: 0.0,
            total_income: 0.0,
            savings_goal: None,
            as_of,
        }
    }

    pub fn with_budget(mut self, budget_by_category: BTreeMap<Category, f64>) -> Self {
        self.budget_by_category = budget_by_category;
        self
    }

    pub fn with_monthly_savings_goal(mut self, goal: f64) -> Self {
        self.monthly_savings_goal = goal;
        self
    }

    pub fn with_income(mut self, total_income: f64) -> Self {
        self.total_income = total_income;
        self
    }

    pub fn with_savings_goal(mut self, amount: f64, timeline_months: u32) -> Self {
        self.savings_goal = Some(SavingsGoal {
            amount,
            timeline_months,
        });
        self
    }
}

/// The engine that turns an analysis request into a spending snapshot
pub struct SnapshotEngine {
    categorizer: Categorizer,
    forecast_periods: u32,
}

impl SnapshotEngine {
    pub fn new() -> Self {
        Self {
            categorizer: Categorizer::new(),
            forecast_periods: DEFAULT_PERIODS_AHEAD,
        }
    }

    /// Use a custom categorizer (e.g. an injected rule table)
    pub fn with_categorizer(categorizer: Categorizer) -> Self {
        Self {
            categorizer,
            forecast_periods: DEFAULT_PERIODS_AHEAD,
        }
    }

    pub fn with_forecast_periods(mut self, periods: u32) -> Self {
        self.forecast_periods = periods;
        self
    }

    /// Run the full pipeline over one request
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<SpendingSnapshot> {
        let categorized = self
            .categorizer
            .categorize(&request.records, request.as_of);
        let date_substitutions = categorized.iter().filter(|t| t.date_substituted).count();
        debug!(
            transactions = categorized.len(),
            date_substitutions, "Categorization complete"
        );

        let monthly = MonthlySpending::from_transactions(&categorized);
        let monthly_totals = monthly.monthly_totals();
        debug!(months = monthly_totals.len(), "Aggregation complete");

        let variance = category_variance(&monthly, &request.budget_by_category);

        let totals: Vec<f64> = monthly_totals.iter().map(|(_, total)| *total).collect();
        let spending_forecast = forecast(&totals, self.forecast_periods);
        debug!(
            trend = spending_forecast.trend.as_str(),
            forecast = spending_forecast.forecast,
            "Trend analysis complete"
        );

        // The optimizer and the batch variance agree on one number per
        // category: average monthly spending.
        let average_spending: BTreeMap<Category, f64> = variance
            .iter()
            .map(|(category, v)| (*category, v.average_spending))
            .collect();
        let optimization = optimize_allocation(
            &average_spending,
            request.monthly_savings_goal,
            request.total_income,
        );

        let goal_adjustment = match request.savings_goal {
            Some(goal) => Some(goal_based_adjustment(
                &average_spending,
                goal.amount,
                goal.timeline_months,
            )?),
            None => None,
        };

        let income: f64 = request
            .records
            .iter()
            .filter(|r| r.amount > 0.0)
            .map(|r| r.amount)
            .sum();
        let expenses: f64 = request
            .records
            .iter()
            .filter(|r| r.amount < 0.0)
            .map(|r| -r.amount)
            .sum();

        let total_spending: f64 = categorized.iter().map(|t| t.amount).sum();
        let monthly_average = if totals.is_empty() {
            0.0
        } else {
            round2(total_spending / totals.len() as f64)
        };

        let snapshot = SpendingSnapshot {
            as_of: request.as_of,
            transaction_count: categorized.len(),
            date_substitutions,
            income,
            expenses,
            total_spending,
            monthly_average,
            category_breakdown: monthly.category_totals(),
            monthly_totals: monthly_totals.iter().cloned().collect(),
            category_variance: variance,
            trend: spending_forecast.trend,
            forecast: spending_forecast,
            optimization,
            goal_adjustment,
            seasonal_factors: seasonal_factors(&monthly_totals),
        };

        info!(
            transactions = snapshot.transaction_count,
            months = snapshot.monthly_totals.len(),
            optimization = snapshot.optimization.status.as_str(),
            "Spending analysis complete"
        );

        Ok(snapshot)
    }
}

impl Default for SnapshotEngine {
    fn default() -> Self {
        Self::new()
    }
}
