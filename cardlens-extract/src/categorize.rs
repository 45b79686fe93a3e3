//! Transaction categorization: one label from the closed category set per
//! transaction description, positionally aligned.

use std::sync::Arc;

use cardlens_core::{SpendCategory, Transaction};
use serde::Deserialize;

use crate::model::{GenerativeModel, ModelError};
use crate::schema::categorization_schema;

pub struct Categorizer {
    model: Arc<dyn GenerativeModel>,
}

impl Categorizer {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Classify each non-empty transaction description.
    ///
    /// Returns an empty sequence without any external call when no
    /// description survives filtering. The caller is responsible for checking
    /// that the returned length matches [`eligible_count`]; this component
    /// passes the model's answer through untouched.
    pub async fn categorize(&self, transactions: &[Transaction])
        -> Result<Vec<String>, ModelError>
    {
        let descriptions = eligible_descriptions(transactions);
        if descriptions.is_empty() {
            return Ok(Vec::new());
        }

        let encoded = serde_json::to_string(&descriptions)
            .map_err(|e| ModelError::Malformed(format!("encode descriptions: {e}")))?;
        let prompt = build_prompt(&encoded);

        let reply = self
            .model
            .generate_json(&prompt, categorization_schema())
            .await?;

        #[derive(Deserialize)]
        struct Reply {
            categories: Vec<String>,
        }

        let parsed: Reply = serde_json::from_str(&reply)
            .map_err(|e| ModelError::Malformed(format!("parse categorization reply: {e}")))?;
        Ok(parsed.categories)
    }
}

/// Descriptions that will be submitted for classification.
fn eligible_descriptions(transactions: &[Transaction]) -> Vec<&str> {
    transactions
        .iter()
        .map(|t| t.description.trim())
        .filter(|d| !d.is_empty())
        .collect()
}

/// Number of descriptions the categorizer will submit for `transactions`.
/// The pipeline compares the model's answer against this count.
pub fn eligible_count(transactions: &[Transaction]) -> usize {
    eligible_descriptions(transactions).len()
}

fn build_prompt(encoded_descriptions: &str) -> String {
    format!(
        "Categorize each of these transaction descriptions into one of these categories: \
         {}. Return a JSON object with a 'categories' array containing the category for \
         each description in the same order. Descriptions: {}",
        SpendCategory::label_list(),
        encoded_descriptions
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests_support::RecordingModel;
    use serde_json::json;

    fn txn(description: &str) -> Transaction {
        Transaction {
            date: "01/01".to_string(),
            description: description.to_string(),
            amount: "₹100".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_external_call() {
        let model = Arc::new(RecordingModel::replying("unused".to_string()));
        let categorizer = Categorizer::new(model.clone());

        let categories = categorizer.categorize(&[]).await.unwrap();
        assert!(categories.is_empty());
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_descriptions_make_no_external_call() {
        let model = Arc::new(RecordingModel::replying("unused".to_string()));
        let categorizer = Categorizer::new(model.clone());

        let categories = categorizer
            .categorize(&[txn(""), txn("   ")])
            .await
            .unwrap();
        assert!(categories.is_empty());
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_labels_come_back_in_order() {
        let reply = json!({"categories": ["Groceries", "Food & Dining"]}).to_string();
        let model = Arc::new(RecordingModel::replying(reply));
        let categorizer = Categorizer::new(model.clone());

        let categories = categorizer
            .categorize(&[txn("BIGBASKET"), txn("SWIGGY ORDER")])
            .await
            .unwrap();
        assert_eq!(categories, vec!["Groceries", "Food & Dining"]);
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_offers_the_closed_category_set() {
        let reply = json!({"categories": ["Other"]}).to_string();
        let model = Arc::new(RecordingModel::replying(reply));
        let categorizer = Categorizer::new(model.clone());

        categorizer.categorize(&[txn("UNKNOWN MERCHANT")]).await.unwrap();

        let prompt = model.last_prompt();
        for cat in SpendCategory::ALL {
            assert!(prompt.contains(cat.label()), "prompt missing {}", cat.label());
        }
        assert!(prompt.contains("[\"UNKNOWN MERCHANT\"]"));
        assert!(prompt.contains("same order"));
    }

    #[tokio::test]
    async fn test_blank_descriptions_are_filtered_from_prompt() {
        let reply = json!({"categories": ["Travel"]}).to_string();
        let model = Arc::new(RecordingModel::replying(reply));
        let categorizer = Categorizer::new(model.clone());

        categorizer
            .categorize(&[txn(""), txn("UBER RIDES")])
            .await
            .unwrap();

        assert!(model.last_prompt().contains("[\"UBER RIDES\"]"));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_malformed() {
        let model = Arc::new(RecordingModel::replying("[]".to_string()));
        let categorizer = Categorizer::new(model);

        let err = categorizer.categorize(&[txn("x")]).await.unwrap_err();
        assert!(matches!(err, ModelError::Malformed(_)));
    }

    #[test]
    fn test_eligible_count_skips_blanks() {
        let txns = [txn("a"), txn(" "), txn("b"), txn("")];
        assert_eq!(eligible_count(&txns), 2);
    }
}
