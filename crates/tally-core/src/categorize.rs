//! Rule-based transaction categorization
//!
//! Categories are resolved with an ordered keyword table: the first rule
//! with a substring match against the lowercased merchant or description
//! wins, and unmatched transactions fall through to `Category::Other`.
//! Rule order is load-bearing where keyword sets overlap ("pizza store" is
//! dining, not shopping), so the table must stay in priority order.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{CategorizedTransaction, Category, TransactionRecord};

/// Date format accepted on raw records
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ordered categorization rules, highest priority first
///
/// Process-wide static configuration; never mutated at runtime.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Dining,
        &["restaurant", "cafe", "food", "pizza", "burger", "starbucks", "mcdonald"],
    ),
    (
        Category::Groceries,
        &["grocery", "supermarket", "walmart", "target", "costco", "whole foods"],
    ),
    (
        Category::Transportation,
        &["gas", "uber", "lyft", "taxi", "parking", "metro", "bus"],
    ),
    (
        Category::Entertainment,
        &["movie", "netflix", "spotify", "game", "theater", "concert"],
    ),
    (
        Category::Shopping,
        &["amazon", "mall", "store", "shop", "retail", "clothing"],
    ),
    (
        Category::Utilities,
        &["electric", "water", "internet", "phone", "cable", "utility"],
    ),
    (
        Category::Healthcare,
        &["doctor", "pharmacy", "hospital", "medical", "dental"],
    ),
];

/// Rule-based transaction categorizer
pub struct Categorizer {
    rules: Vec<(Category, Vec<String>)>,
}

impl Categorizer {
    /// Create a categorizer with the built-in rule table
    pub fn new() -> Self {
        Self::with_rules(
            CATEGORY_RULES
                .iter()
                .map(|(category, keywords)| {
                    (*category, keywords.iter().map(|k| k.to_string()).collect())
                })
                .collect(),
        )
    }

    /// Create a categorizer with a custom ordered rule table
    pub fn with_rules(rules: Vec<(Category, Vec<String>)>) -> Self {
        Self { rules }
    }

    /// Categorize a batch of records, preserving length and order
    ///
    /// `as_of` is the processing date used when a record's date fails to
    /// parse; the substitution is flagged on the output transaction.
    pub fn categorize(
        &self,
        records: &[TransactionRecord],
        as_of: NaiveDate,
    ) -> Vec<CategorizedTransaction> {
        records
            .iter()
            .map(|record| self.categorize_one(record, as_of))
            .collect()
    }

    fn categorize_one(
        &self,
        record: &TransactionRecord,
        as_of: NaiveDate,
    ) -> CategorizedTransaction {
        let category = self.resolve_category(&record.merchant, &record.description);

        let (date, date_substituted) = match NaiveDate::parse_from_str(&record.date, DATE_FORMAT) {
            Ok(date) => (date, false),
            Err(_) => {
                debug!(
                    date = %record.date,
                    merchant = %record.merchant,
                    "Unparseable transaction date, substituting as-of date"
                );
                (as_of, true)
            }
        };

        CategorizedTransaction {
            date,
            amount: record.amount.abs(),
            merchant: record.merchant.clone(),
            description: record.description.clone(),
            category,
            date_substituted,
        }
    }

    /// Resolve a category from merchant and description text
    ///
    /// First rule with any keyword present in either field wins.
    pub fn resolve_category(&self, merchant: &str, description: &str) -> Category {
        let merchant = merchant.to_lowercase();
        let description = description.to_lowercase();

        for (category, keywords) in &self.rules {
            if keywords
                .iter()
                .any(|keyword| merchant.contains(keyword) || description.contains(keyword))
            {
                return *category;
            }
        }

        Category::Other
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new()
    }
}
