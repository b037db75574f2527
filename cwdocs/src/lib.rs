//! Turns uploaded documents into plain text for prompt templates.
//!
//! PDFs are parsed page by page; anything else is treated as UTF-8 text so
//! markdown or plain-text requirement documents can be supplied directly.
//!
//! ```rust
//! let text = cwdocs::extract_text(Some(b"As a user I can log in".as_slice()))
//!     .expect("plain text always extracts");
//! assert_eq!(text, "As a user I can log in");
//!
//! assert_eq!(cwdocs::extract_text(None).expect("absent file"), "");
//! ```

mod error;

use std::path::Path;

use lopdf::Document;

pub use error::{ExtractError, ExtractErrorKind};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extracts text from an optional document body. An absent document yields
/// an empty string.
pub fn extract_text(bytes: Option<&[u8]>) -> Result<String, ExtractError> {
    let Some(bytes) = bytes else {
        return Ok(String::new());
    };

    if is_pdf(bytes) {
        extract_pdf_text(bytes)
    } else {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Reads `path` and extracts its text.
pub fn extract_file(path: impl AsRef<Path>) -> Result<String, ExtractError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|err| ExtractError::io(format!("failed to read {}: {err}", path.display())))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "extracting document");
    extract_text(Some(&bytes))
}

pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let document = Document::load_mem(bytes)
        .map_err(|err| ExtractError::pdf(format!("failed to parse PDF: {err}")))?;

    // BTreeMap keys keep pages in document order.
    let pages = document.get_pages();
    let mut texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        let text = document.extract_text(&[*page_number]).map_err(|err| {
            ExtractError::pdf(format!("failed to read text of page {page_number}: {err}"))
        })?;
        texts.push(text.trim_end_matches('\n').to_string());
    }

    tracing::debug!(pages = texts.len(), "extracted PDF text");
    Ok(texts.join("\n"))
}
