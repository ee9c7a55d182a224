/// Discord rejects messages longer than this many characters.
pub const MAX_CHUNK: usize = 2000;

/// Slices `text` into consecutive pieces of at most `limit` characters.
///
/// Splits ignore word boundaries, so a chunk may end mid-word. Concatenating
/// the chunks gives back `text` exactly. Empty input yields no chunks.
#[must_use]
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::with_capacity(text.len() / limit + 1);
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == limit {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
