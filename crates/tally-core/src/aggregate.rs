//! Monthly spending aggregation

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{CategorizedTransaction, Category};

/// Month-bucket key format (`YYYY-MM`)
const MONTH_KEY_FORMAT: &str = "%Y-%m";

/// Spending totals grouped by month and category
///
/// Built once per analysis request. Months with no activity have no entry;
/// callers must not assume a dense series. BTreeMap keys keep iteration and
/// serialization chronological and reproducible.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MonthlySpending {
    buckets: BTreeMap<String, BTreeMap<Category, f64>>,
}

impl MonthlySpending {
    /// Sum transaction magnitudes into month x category buckets
    pub fn from_transactions(transactions: &[CategorizedTransaction]) -> Self {
        let mut buckets: BTreeMap<String, BTreeMap<Category, f64>> = BTreeMap::new();

        for txn in transactions {
            let month = txn.date.format(MONTH_KEY_FORMAT).to_string();
            *buckets
                .entry(month)
                .or_default()
                .entry(txn.category)
                .or_insert(0.0) += txn.amount;
        }

        Self { buckets }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn month_count(&self) -> usize {
        self.buckets.len()
    }

    /// Amount for one month x category bucket, if present
    pub fn get(&self, month: &str, category: Category) -> Option<f64> {
        self.buckets.get(month)?.get(&category).copied()
    }

    /// Chronological `(month, total)` series summed across categories
    pub fn monthly_totals(&self) -> Vec<(String, f64)> {
        self.buckets
            .iter()
            .map(|(month, categories)| (month.clone(), categories.values().sum()))
            .collect()
    }

    /// Per-category totals across all months
    pub fn category_totals(&self) -> BTreeMap<Category, f64> {
        let mut totals: BTreeMap<Category, f64> = BTreeMap::new();
        for categories in self.buckets.values() {
            for (category, amount) in categories {
                *totals.entry(*category).or_insert(0.0) += amount;
            }
        }
        totals
    }

    /// Per-category chronological series of month totals
    ///
    /// A category's series covers only the months it appears in, so series
    /// lengths differ between categories.
    pub fn category_month_series(&self) -> BTreeMap<Category, Vec<f64>> {
        let mut series: BTreeMap<Category, Vec<f64>> = BTreeMap::new();
        for categories in self.buckets.values() {
            for (category, amount) in categories {
                series.entry(*category).or_default().push(*amount);
            }
        }
        series
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<Category, f64>)> {
        self.buckets.iter()
    }
}
