//! cardlens-core: Core types for the statement ingestion pipeline

pub mod category;
pub mod error;
pub mod statement;

pub use category::SpendCategory;
pub use error::ProcessError;
pub use statement::{
    CategorizedResult, ExtractionResult, StatementSummary, Transaction, NOT_FOUND,
};
