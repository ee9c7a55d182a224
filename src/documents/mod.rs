//! Document text extraction

pub mod pdf;

pub use pdf::{PdfExtractParser, PdfParser, extract_text_from_pdf};
