use tracing::{error, warn};

use crate::errors::BotError;

/// Splits a PDF into per-page text. Pages without a text layer come back empty.
pub trait PdfParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<String>, BotError>;
}

/// `PdfParser` backed by the `pdf-extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractParser;

impl PdfParser for PdfExtractParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<String>, BotError> {
        // pdf-extract panics on some malformed inputs instead of returning Err
        match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes)) {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(BotError::PdfError(e.to_string())),
            Err(_) => {
                warn!("pdf-extract panicked while parsing document");
                Err(BotError::PdfError("parser panicked on malformed document".to_string()))
            }
        }
    }
}

/// Joins the non-empty pages with newlines and trims the result.
///
/// Returns `None` when the document cannot be parsed or holds no text at all;
/// the cause is logged here and never propagated.
pub fn extract_text_from_pdf(parser: &dyn PdfParser, bytes: &[u8]) -> Option<String> {
    let pages = match parser.parse(bytes) {
        Ok(pages) => pages,
        Err(e) => {
            error!("PDF extraction error: {}", e);
            return None;
        }
    };

    let joined = pages
        .iter()
        .filter(|page| !page.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    let text = joined.trim();

    if text.is_empty() {
        error!("PDF extraction error: no extractable text in {} page(s)", pages.len());
        None
    } else {
        Some(text.to_string())
    }
}
