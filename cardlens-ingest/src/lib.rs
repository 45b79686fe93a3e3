//! cardlens-ingest: PDF text extraction for uploaded statements.

pub mod pdf_text;

pub use pdf_text::{extract_text, PdfTextError};
