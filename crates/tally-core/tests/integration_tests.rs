//! Integration tests for tally-core
//!
//! These tests exercise the full categorize → aggregate → analyze workflow
//! on realistic transaction batches.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use tally_core::{
    calculate_variance, forecast, AnalysisRequest, BudgetStatus, Category, Categorizer,
    MonthlySpending, OptimizationStatus, Significance, SnapshotEngine, TransactionRecord,
    TrendDirection,
};

fn record(date: &str, amount: f64, merchant: &str, description: &str) -> TransactionRecord {
    TransactionRecord {
        date: date.to_string(),
        amount,
        merchant: merchant.to_string(),
        description: description.to_string(),
    }
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
}

/// One October of dining out, just under a $200 budget
fn october_dining() -> Vec<TransactionRecord> {
    vec![
        record("2024-10-02", 28.75, "Pizza Palace", ""),
        record("2024-10-07", 95.00, "Fine Dining Restaurant", ""),
        record("2024-10-15", 65.00, "Sushi Bar", "Japanese restaurant"),
    ]
}

#[test]
fn test_dining_budget_workflow() {
    let categorizer = Categorizer::new();
    let categorized = categorizer.categorize(&october_dining(), as_of());

    assert!(categorized.iter().all(|t| t.category == Category::Dining));

    let monthly = MonthlySpending::from_transactions(&categorized);
    let total = monthly.get("2024-10", Category::Dining).unwrap();
    assert!((total - 188.75).abs() < 1e-9);

    let variance = calculate_variance(total, 200.0);
    assert_eq!(variance.variance_percentage, -5.63);
    assert_eq!(variance.variance_amount, -11.25);
    assert_eq!(variance.status, BudgetStatus::OnTrack);
    assert_eq!(variance.significance, Significance::Minor);
}

#[test]
fn test_overspend_scenario() {
    let variance = calculate_variance(250.0, 200.0);

    assert_eq!(variance.variance_percentage, 25.0);
    assert_eq!(variance.variance_amount, 50.0);
    assert_eq!(variance.status, BudgetStatus::OverBudget);
    assert_eq!(variance.significance, Significance::Significant);
}

#[test]
fn test_three_month_forecast_scenario() {
    let result = forecast(&[180.50, 195.75, 188.75], 1);

    assert_eq!(result.slope, 4.125);
    assert!((result.forecast - 196.58).abs() < 0.01);
    assert!((result.confidence_interval.0 - 178.78).abs() < 0.01);
    assert!((result.confidence_interval.1 - 214.39).abs() < 0.01);
    assert!(result.confidence_interval.0 >= 0.0);
    assert_eq!(result.trend, TrendDirection::Increasing);
}

#[test]
fn test_full_snapshot_workflow() {
    let mut records = october_dining();
    records.extend([
        record("2024-08-09", 41.20, "Corner Cafe", "lunch"),
        record("2024-08-23", 112.40, "Safeway Supermarket", "weekly run"),
        record("2024-09-04", 17.50, "AMC Theater", "movie night"),
        record("2024-09-12", 96.10, "Costco", ""),
        record("2024-09-30", 54.00, "Uber", "airport ride"),
        record("2024-10-05", 15.49, "Netflix", "subscription"),
        record("2024-10-28", 84.30, "Amazon", "household order"),
    ]);

    let request = AnalysisRequest::new(records, as_of())
        .with_budget(BTreeMap::from([
            (Category::Dining, 200.0),
            (Category::Groceries, 250.0),
        ]))
        .with_monthly_savings_goal(400.0)
        .with_income(500.0);

    let snapshot = SnapshotEngine::new().analyze(&request).unwrap();

    assert_eq!(snapshot.transaction_count, 10);
    assert_eq!(snapshot.date_substitutions, 0);
    assert_eq!(snapshot.monthly_totals.len(), 3);

    // Every category that appears carries a variance entry.
    for category in snapshot.category_breakdown.keys() {
        assert!(snapshot.category_variance.contains_key(category));
    }
    // Budgetless categories surface as such instead of dividing by zero.
    assert_eq!(
        snapshot.category_variance[&Category::Entertainment]
            .variance
            .status,
        BudgetStatus::NoBudgetSet
    );

    // Spending plus the goal exceeds income, so the optimizer proposes
    // discretionary reductions in priority order.
    assert_eq!(
        snapshot.optimization.status,
        OptimizationStatus::OptimizationNeeded
    );
    let first = &snapshot.optimization.recommendations[0];
    assert_eq!(first.category, Category::Dining);
    assert!(first.suggested_reduction > 0.0);
    assert!(snapshot.optimization.potential_savings > 0.0);

    // Under a year of history: flat seasonal factors.
    assert!(snapshot.seasonal_factors.values().all(|f| *f == 1.0));
}

#[test]
fn test_snapshot_is_idempotent() {
    let request = AnalysisRequest::new(october_dining(), as_of())
        .with_budget(BTreeMap::from([(Category::Dining, 200.0)]))
        .with_income(3000.0);

    let engine = SnapshotEngine::new();
    let first = engine.analyze(&request).unwrap().to_value().unwrap();
    let second = engine.analyze(&request).unwrap().to_value().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_malformed_records_never_abort_the_batch() {
    let records = vec![
        record("", 0.0, "", ""),
        record("garbage", -12.0, "Pizza Palace", ""),
        record("2024-10-02", 30.0, "Starbucks", ""),
    ];

    let request = AnalysisRequest::new(records, as_of());
    let snapshot = SnapshotEngine::new().analyze(&request).unwrap();

    assert_eq!(snapshot.transaction_count, 3);
    assert_eq!(snapshot.date_substitutions, 2);
    // The empty record contributes zero spending in the as-of month.
    assert_eq!(snapshot.category_breakdown[&Category::Dining], 42.0);
}
