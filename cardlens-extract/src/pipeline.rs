//! End-to-end statement ingestion: password check, text extraction, field
//! extraction, categorization merge.
//!
//! One pipeline instance serves many requests; each request runs the steps
//! strictly in order and shares no mutable state with other requests.

use std::sync::Arc;

use cardlens_core::{CategorizedResult, ProcessError};
use cardlens_ingest::extract_text;
use tracing::debug;

use crate::categorize::{eligible_count, Categorizer};
use crate::fields::FieldExtractor;
use crate::model::{GenerativeModel, ModelError};

pub struct Pipeline {
    fields: FieldExtractor,
    categorizer: Categorizer,
}

impl Pipeline {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            fields: FieldExtractor::new(model.clone()),
            categorizer: Categorizer::new(model),
        }
    }

    /// Override the statement-text character budget.
    pub fn with_input_budget(model: Arc<dyn GenerativeModel>, max_input_chars: usize) -> Self {
        Self {
            fields: FieldExtractor::with_budget(model.clone(), max_input_chars),
            categorizer: Categorizer::new(model),
        }
    }

    /// Process one uploaded statement.
    ///
    /// Fails with [`ProcessError::PasswordRequired`] when the document is
    /// encrypted and the password is missing or wrong; every other failure
    /// maps to one of the generic processing variants.
    pub async fn process(&self, bytes: &[u8], password: Option<&str>)
        -> Result<CategorizedResult, ProcessError>
    {
        let text = extract_text(bytes, password).map_err(|e| {
            if e.needs_password() {
                ProcessError::PasswordRequired
            } else {
                ProcessError::Extraction(e.to_string())
            }
        })?;
        debug!(chars = text.len(), "extracted statement text");

        let extraction = self.fields.extract(&text).await.map_err(model_err)?;
        debug!(transactions = extraction.transactions.len(), "extracted fields");

        let categories = if extraction.transactions.is_empty() {
            Vec::new()
        } else {
            let expected = eligible_count(&extraction.transactions);
            let categories = self
                .categorizer
                .categorize(&extraction.transactions)
                .await
                .map_err(model_err)?;
            // The model does not always honor the same-length instruction;
            // positional zipping would be undefined, so surface it.
            if categories.len() != expected {
                return Err(ProcessError::CategoryCountMismatch {
                    expected,
                    got: categories.len(),
                });
            }
            categories
        };

        Ok(CategorizedResult {
            extraction,
            categories,
        })
    }
}

fn model_err(e: ModelError) -> ProcessError {
    match e {
        ModelError::Service(msg) => ProcessError::ExternalService(msg),
        ModelError::Malformed(msg) => ProcessError::MalformedResponse(msg),
    }
}
