//! Domain models for Tally

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Spending categories
///
/// The set is fixed; transactions that match no categorization rule land in
/// `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dining,
    Groceries,
    Transportation,
    Entertainment,
    Shopping,
    Utilities,
    Healthcare,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dining => "dining",
            Self::Groceries => "groceries",
            Self::Transportation => "transportation",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::Utilities => "utilities",
            Self::Healthcare => "healthcare",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dining" => Ok(Self::Dining),
            "groceries" => Ok(Self::Groceries),
            "transportation" => Ok(Self::Transportation),
            "entertainment" => Ok(Self::Entertainment),
            "shopping" => Ok(Self::Shopping),
            "utilities" => Ok(Self::Utilities),
            "healthcare" => Ok(Self::Healthcare),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A raw transaction record as supplied by the caller
///
/// Every field carries a serde default so a sparse or partially malformed
/// record deserializes to safe values instead of failing the whole batch:
/// a missing amount becomes 0.0 and a missing or unparseable date falls
/// back to the request's as-of date during categorization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Calendar date as `YYYY-MM-DD` text
    #[serde(default)]
    pub date: String,
    /// Signed amount; analysis uses the magnitude
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub merchant: String,
    #[serde(default)]
    pub description: String,
}

/// A transaction after rule-based categorization
///
/// Owned by the caller for the duration of one analysis request and never
/// mutated afterward.
#[derive(Debug, Clone, Serialize)]
pub struct CategorizedTransaction {
    pub date: NaiveDate,
    /// Magnitude of the raw amount; always non-negative
    pub amount: f64,
    pub merchant: String,
    pub description: String,
    pub category: Category,
    /// True when the raw date failed to parse and the as-of date was used
    pub date_substituted: bool,
}
