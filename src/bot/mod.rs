//! Platform-neutral message handling

pub mod dispatcher;

pub use dispatcher::{Dispatcher, ReplyChannel};

/// Sent when text cannot be pulled out of an attached PDF.
pub const PDF_EXTRACTION_FAILED: &str = "Could not extract text from PDF.";

/// Sent when the extracted PDF text could not be summarized.
pub const PDF_SUMMARY_FAILED: &str = "Failed to summarize PDF content.";

pub const IMAGE_GENERATION_UNSUPPORTED: &str = "Image generation is not supported by the configured model. \
     Contact administrator to enable a compatible model.";

/// Assistant turn recorded in history after refusing an image request.
pub const IMAGE_GENERATION_HISTORY_NOTE: &str = "Image generation not supported.";
