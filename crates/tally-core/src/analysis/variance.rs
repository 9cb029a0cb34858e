//! Budget variance analysis

use std::collections::BTreeMap;

use crate::aggregate::MonthlySpending;
use crate::models::Category;

use super::types::{BudgetStatus, CategoryVariance, Significance, VarianceResult};
use super::round2;

/// Over/under threshold for budget status, in percent
const STATUS_THRESHOLD: f64 = 10.0;
/// Threshold for a variance to count as significant, in percent
const SIGNIFICANCE_THRESHOLD: f64 = 15.0;

/// Variance of actual spending against a budgeted amount
///
/// A zero budget maps to `no_budget_set` with the full actual amount as the
/// variance; division by zero never propagates.
pub fn calculate_variance(actual: f64, budgeted: f64) -> VarianceResult {
    if budgeted == 0.0 {
        return VarianceResult {
            variance_percentage: 0.0,
            variance_amount: actual,
            status: BudgetStatus::NoBudgetSet,
            significance: Significance::Unknown,
        };
    }

    let variance_amount = actual - budgeted;
    let variance_percentage = variance_amount / budgeted * 100.0;

    let status = if variance_percentage > STATUS_THRESHOLD {
        BudgetStatus::OverBudget
    } else if variance_percentage < -STATUS_THRESHOLD {
        BudgetStatus::UnderBudget
    } else {
        BudgetStatus::OnTrack
    };

    // Computed independently of status; both axes are reported.
    let significance = if variance_percentage.abs() > SIGNIFICANCE_THRESHOLD {
        Significance::Significant
    } else {
        Significance::Minor
    };

    VarianceResult {
        variance_percentage: round2(variance_percentage),
        variance_amount: round2(variance_amount),
        status,
        significance,
    }
}

/// Variance per category, computed on each category's average monthly
/// spending
///
/// Categories absent from the buckets are skipped, not zero-filled; the
/// average covers only the months the category appears in.
pub fn category_variance(
    monthly: &MonthlySpending,
    budget_by_category: &BTreeMap<Category, f64>,
) -> BTreeMap<Category, CategoryVariance> {
    let mut analysis = BTreeMap::new();

    for (category, amounts) in monthly.category_month_series() {
        let average = amounts.iter().sum::<f64>() / amounts.len() as f64;
        let budgeted = budget_by_category.get(&category).copied().unwrap_or(0.0);

        analysis.insert(
            category,
            CategoryVariance {
                variance: calculate_variance(average, budgeted),
                average_spending: round2(average),
            },
        );
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategorizedTransaction;
    use chrono::NaiveDate;

    #[test]
    fn test_zero_budget_is_no_budget_set() {
        let result = calculate_variance(173.25, 0.0);

        assert_eq!(result.status, BudgetStatus::NoBudgetSet);
        assert_eq!(result.variance_percentage, 0.0);
        assert_eq!(result.variance_amount, 173.25);
        assert_eq!(result.significance, Significance::Unknown);
    }

    #[test]
    fn test_over_budget() {
        let result = calculate_variance(250.0, 200.0);

        assert_eq!(result.variance_percentage, 25.0);
        assert_eq!(result.variance_amount, 50.0);
        assert_eq!(result.status, BudgetStatus::OverBudget);
        assert_eq!(result.significance, Significance::Significant);
    }

    #[test]
    fn test_under_budget() {
        let result = calculate_variance(150.0, 200.0);

        assert_eq!(result.variance_percentage, -25.0);
        assert_eq!(result.status, BudgetStatus::UnderBudget);
        assert_eq!(result.significance, Significance::Significant);
    }

    #[test]
    fn test_exactly_ten_percent_is_on_track() {
        let result = calculate_variance(220.0, 200.0);

        assert_eq!(result.variance_percentage, 10.0);
        assert_eq!(result.status, BudgetStatus::OnTrack);
    }

    #[test]
    fn test_just_over_ten_percent_is_over_budget() {
        let result = calculate_variance(220.02, 200.0);

        assert_eq!(result.variance_percentage, 10.01);
        assert_eq!(result.status, BudgetStatus::OverBudget);
    }

    #[test]
    fn test_significance_is_independent_of_status() {
        // 12% over: past the status threshold, inside the significance one.
        let result = calculate_variance(224.0, 200.0);

        assert_eq!(result.status, BudgetStatus::OverBudget);
        assert_eq!(result.significance, Significance::Minor);
    }

    #[test]
    fn test_small_variance_is_on_track_and_minor() {
        let result = calculate_variance(188.75, 200.0);

        assert_eq!(result.variance_percentage, -5.63);
        assert_eq!(result.variance_amount, -11.25);
        assert_eq!(result.status, BudgetStatus::OnTrack);
        assert_eq!(result.significance, Significance::Minor);
    }

    fn txn(date: &str, amount: f64, category: Category) -> CategorizedTransaction {
        CategorizedTransaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            merchant: String::new(),
            description: String::new(),
            category,
            date_substituted: false,
        }
    }

    #[test]
    fn test_category_variance_averages_present_months_only() {
        let monthly = MonthlySpending::from_transactions(&[
            txn("2024-09-10", 180.0, Category::Dining),
            txn("2024-10-10", 220.0, Category::Dining),
            // Groceries appears in one of the two months.
            txn("2024-10-12", 300.0, Category::Groceries),
        ]);

        let budgets = BTreeMap::from([(Category::Dining, 200.0)]);
        let analysis = category_variance(&monthly, &budgets);

        let dining = &analysis[&Category::Dining];
        assert_eq!(dining.average_spending, 200.0);
        assert_eq!(dining.variance.status, BudgetStatus::OnTrack);

        let groceries = &analysis[&Category::Groceries];
        assert_eq!(groceries.average_spending, 300.0);
        assert_eq!(groceries.variance.status, BudgetStatus::NoBudgetSet);

        assert!(!analysis.contains_key(&Category::Shopping));
    }
}
