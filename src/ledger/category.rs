use std::fmt;

use serde::{Deserialize, Serialize};

/// Spending buckets suggested for free-text transaction descriptions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SpendingCategory {
    FoodAndDining,
    Transportation,
    Entertainment,
    Shopping,
    BillsAndUtilities,
    Healthcare,
    Income,
    Other,
}

impl SpendingCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SpendingCategory::FoodAndDining => "Food & Dining",
            SpendingCategory::Transportation => "Transportation",
            SpendingCategory::Entertainment => "Entertainment",
            SpendingCategory::Shopping => "Shopping",
            SpendingCategory::BillsAndUtilities => "Bills & Utilities",
            SpendingCategory::Healthcare => "Healthcare",
            SpendingCategory::Income => "Income",
            SpendingCategory::Other => "Other",
        }
    }
}

impl fmt::Display for SpendingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Checked in order; the first bucket with a matching keyword wins.
const KEYWORDS: &[(SpendingCategory, &[&str])] = &[
    (
        SpendingCategory::FoodAndDining,
        &["grocery", "food", "restaurant", "coffee", "lunch", "dinner"],
    ),
    (
        SpendingCategory::Transportation,
        &["gas", "fuel", "uber", "lyft", "parking", "transit"],
    ),
    (
        SpendingCategory::Entertainment,
        &["movie", "netflix", "spotify", "game", "concert", "bar"],
    ),
    (
        SpendingCategory::Shopping,
        &["amazon", "walmart", "target", "clothing", "shirt", "shoes"],
    ),
    (
        SpendingCategory::BillsAndUtilities,
        &["electric", "water", "internet", "phone", "rent", "mortgage"],
    ),
    (
        SpendingCategory::Healthcare,
        &["doctor", "pharmacy", "medical", "dental", "vision"],
    ),
    (
        SpendingCategory::Income,
        &["salary", "payroll", "deposit", "refund", "bonus"],
    ),
];

/// Suggests a category from substring keywords, case-insensitively.
pub fn categorize_description(description: &str) -> SpendingCategory {
    let lowered = description.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| lowered.contains(word)))
        .map(|(category, _)| *category)
        .unwrap_or(SpendingCategory::Other)
}
