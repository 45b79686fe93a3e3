//! Statement field extraction: truncate statement text to the input budget,
//! send it with the extraction schema, and parse the reply.

use std::sync::Arc;

use cardlens_core::ExtractionResult;

use crate::model::{GenerativeModel, ModelError};
use crate::schema::extraction_schema;

/// Character budget for statement text sent to the model. Longer statements
/// are silently clipped; the model has a bounded input context and cost
/// scales with input size.
pub const MAX_INPUT_CHARS: usize = 30_000;

pub struct FieldExtractor {
    model: Arc<dyn GenerativeModel>,
    max_input_chars: usize,
}

impl FieldExtractor {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self::with_budget(model, MAX_INPUT_CHARS)
    }

    pub fn with_budget(model: Arc<dyn GenerativeModel>, max_input_chars: usize) -> Self {
        Self {
            model,
            max_input_chars,
        }
    }

    /// Extract summary fields and the transaction list from statement text.
    pub async fn extract(&self, text: &str) -> Result<ExtractionResult, ModelError> {
        let clipped = truncate_chars(text, self.max_input_chars);
        let prompt = build_prompt(clipped);

        let reply = self
            .model
            .generate_json(&prompt, extraction_schema())
            .await?;

        serde_json::from_str(&reply)
            .map_err(|e| ModelError::Malformed(format!("parse extraction reply: {e}")))
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        "From the credit card statement text provided, you MUST extract both the summary \
         details AND a complete list of all individual transactions. It is critical that \
         the 'transactions' array is populated. If no transactions are found, return an \
         empty array for the transactions field. For all other fields, return \"Not Found\" \
         if the data is missing. Format all currency values with the Indian Rupee symbol \
         (₹). Text: --- {text} ---"
    )
}

/// Clip to at most `budget` characters, on a char boundary.
fn truncate_chars(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
