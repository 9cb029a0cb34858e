//! Budget-optimization recommendations
//!
//! The optimizer is a capped heuristic, not a solver: it walks the
//! discretionary categories in priority order and proposes bounded
//! reductions. The plan may undershoot the required reduction; the caps
//! are intentional policy and stay as-is.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::Category;

use super::types::{
    GoalAdjustment, GoalInfeasibleReason, OptimizationPlan, OptimizationStatus, Recommendation,
};
use super::round2;

/// Discretionary categories, in reduction-priority order
const DISCRETIONARY_CATEGORIES: [Category; 3] = [
    Category::Dining,
    Category::Entertainment,
    Category::Shopping,
];

/// Cap on a single category's reduction, as a fraction of its spending
const CATEGORY_REDUCTION_CAP: f64 = 0.15;
/// Cap on a single category's share of the total required reduction
const REQUIRED_SHARE_CAP: f64 = 0.4;
/// Largest total-spending reduction considered feasible, in percent
const FEASIBLE_REDUCTION_CEILING: f64 = 30.0;

/// Propose reductions so spending plus the savings goal fits the income
///
/// `required_reduction = max(0, spending + goal - income)`; when zero the
/// budget is already balanced. Each discretionary category with positive
/// spending gets a reduction of `min(15% of its spending, 40% of the
/// required reduction)`.
pub fn optimize_allocation(
    current_spending: &BTreeMap<Category, f64>,
    monthly_savings_goal: f64,
    total_income: f64,
) -> OptimizationPlan {
    let total_spending: f64 = current_spending.values().sum();
    let required_reduction = (total_spending + monthly_savings_goal - total_income).max(0.0);

    if required_reduction == 0.0 {
        return OptimizationPlan {
            status: OptimizationStatus::BudgetBalanced,
            required_reduction: 0.0,
            recommendations: Vec::new(),
            potential_savings: 0.0,
        };
    }

    let mut recommendations = Vec::new();
    for category in DISCRETIONARY_CATEGORIES {
        let Some(&spending) = current_spending.get(&category) else {
            continue;
        };
        if spending <= 0.0 {
            continue;
        }

        let suggested =
            (spending * CATEGORY_REDUCTION_CAP).min(required_reduction * REQUIRED_SHARE_CAP);

        recommendations.push(Recommendation {
            category,
            current_spending: spending,
            suggested_reduction: round2(suggested),
            new_budget: round2(spending - suggested),
        });
    }

    let potential_savings = round2(
        recommendations
            .iter()
            .map(|r| r.suggested_reduction)
            .sum(),
    );

    OptimizationPlan {
        status: OptimizationStatus::OptimizationNeeded,
        required_reduction: round2(required_reduction),
        recommendations,
        potential_savings,
    }
}

/// Spending adjustment needed to reach a savings goal over a timeline
///
/// Feasible while the implied reduction stays within the 30% ceiling. A
/// zero timeline is a programming error.
pub fn goal_based_adjustment(
    current_spending: &BTreeMap<Category, f64>,
    savings_goal: f64,
    timeline_months: u32,
) -> Result<GoalAdjustment> {
    if timeline_months == 0 {
        return Err(Error::InvalidTimeline);
    }

    let monthly_savings_needed = savings_goal / timeline_months as f64;
    let total_current_spending: f64 = current_spending.values().sum();

    if total_current_spending == 0.0 {
        return Ok(GoalAdjustment {
            feasible: false,
            reason: Some(GoalInfeasibleReason::NoSpendingData),
            monthly_savings_needed: round2(monthly_savings_needed),
            reduction_percentage: 0.0,
            timeline_months,
            total_goal: savings_goal,
        });
    }

    let reduction_percentage = monthly_savings_needed / total_current_spending * 100.0;

    Ok(GoalAdjustment {
        feasible: reduction_percentage <= FEASIBLE_REDUCTION_CEILING,
        reason: None,
        monthly_savings_needed: round2(monthly_savings_needed),
        reduction_percentage: round2(reduction_percentage),
        timeline_months,
        total_goal: savings_goal,
    })
}
