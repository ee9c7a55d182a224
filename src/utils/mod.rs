//! Small text helpers shared by the dispatcher and the Discord adapter

pub mod chunking;
pub mod filters;

pub use chunking::{MAX_CHUNK, split_message};
pub use filters::{classify_attachment, is_image_generation_request, strip_mention};
