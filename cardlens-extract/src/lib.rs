//! cardlens-extract: schema-constrained AI extraction and categorization of
//! statement text, plus the pipeline that sequences the whole ingestion.

pub mod categorize;
pub mod fields;
pub mod model;
pub mod pipeline;
pub mod schema;

pub use categorize::Categorizer;
pub use fields::{FieldExtractor, MAX_INPUT_CHARS};
pub use model::{GeminiClient, GenerativeModel, ModelError};
pub use pipeline::Pipeline;
