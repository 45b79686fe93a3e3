//! Extract plain text from statement PDFs.
//!
//! Encrypted documents are signalled distinctly from every other failure so
//! the caller can prompt for a password instead of reporting a generic error.
//! Layout fidelity is best-effort: column order and whitespace are whatever
//! the page content streams yield.

use lopdf::Document;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfTextError {
    #[error("failed to load PDF: {0}")]
    Load(String),

    #[error("password required for encrypted PDF")]
    PasswordRequired,

    #[error("invalid password for PDF")]
    InvalidPassword,

    #[error("failed to extract text: {0}")]
    Extraction(String),
}

impl PdfTextError {
    /// Both the missing-password and wrong-password cases are recoverable the
    /// same way: ask the user for a password and retry.
    pub fn needs_password(&self) -> bool {
        matches!(
            self,
            PdfTextError::PasswordRequired | PdfTextError::InvalidPassword
        )
    }
}

/// Extract the concatenated text of all pages from raw PDF bytes.
///
/// Pure transformation of bytes (+ optional password) to text; nothing is
/// written to disk.
pub fn extract_text(bytes: &[u8], password: Option<&str>) -> Result<String, PdfTextError> {
    let mut doc = match Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            let msg = e.to_string();
            // Some encrypted documents fail at load rather than reporting
            // is_encrypted() afterwards.
            if msg.contains("encrypt") || msg.contains("password") {
                return Err(PdfTextError::PasswordRequired);
            }
            return Err(PdfTextError::Load(msg));
        }
    };

    if doc.is_encrypted() {
        match password {
            Some(pwd) => {
                if doc.decrypt(pwd).is_err() {
                    return Err(PdfTextError::InvalidPassword);
                }
            }
            None => return Err(PdfTextError::PasswordRequired),
        }
    }

    let mut text = String::new();
    for (page_num, _page_id) in doc.get_pages() {
        let page_text = doc
            .extract_text(&[page_num])
            .map_err(|e| PdfTextError::Extraction(e.to_string()))?;
        text.push_str(&page_text);
        text.push('\n');
    }

    normalize(&text).map_err(|e| PdfTextError::Extraction(e.to_string()))
}

/// Collapse extraction artifacts: runs of blank lines and trailing spaces.
fn normalize(text: &str) -> Result<String, regex::Error> {
    let trailing = Regex::new(r"[ \t]+\n")?;
    let blank_runs = Regex::new(r"\n{3,}")?;
    let text = trailing.replace_all(text, "\n");
    let text = blank_runs.replace_all(&text, "\n\n");
    Ok(text.trim().to_string())
}
