//! The closed set of spending categories the categorizer may assign.

use serde::{Deserialize, Serialize};

/// Spending category for a transaction description.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SpendCategory {
    Shopping,
    FoodAndDining,
    Travel,
    Utilities,
    Entertainment,
    HealthAndWellness,
    Groceries,
    Other,
}

impl SpendCategory {
    /// All categories, in the order they are offered to the model.
    pub const ALL: [SpendCategory; 8] = [
        SpendCategory::Shopping,
        SpendCategory::FoodAndDining,
        SpendCategory::Travel,
        SpendCategory::Utilities,
        SpendCategory::Entertainment,
        SpendCategory::HealthAndWellness,
        SpendCategory::Groceries,
        SpendCategory::Other,
    ];

    /// The display label, exactly as it appears on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            SpendCategory::Shopping => "Shopping",
            SpendCategory::FoodAndDining => "Food & Dining",
            SpendCategory::Travel => "Travel",
            SpendCategory::Utilities => "Utilities",
            SpendCategory::Entertainment => "Entertainment",
            SpendCategory::HealthAndWellness => "Health & Wellness",
            SpendCategory::Groceries => "Groceries",
            SpendCategory::Other => "Other",
        }
    }

    /// Parse a label back into a category.
    pub fn from_label(label: &str) -> Option<SpendCategory> {
        Self::ALL.iter().copied().find(|c| c.label() == label.trim())
    }

    /// Comma-separated label list for prompt construction.
    pub fn label_list() -> String {
        Self::ALL
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for SpendCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
