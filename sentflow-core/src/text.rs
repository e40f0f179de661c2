//! Small text helpers shared by the splitters and the engine

/// Number of whitespace separated words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Collapse every whitespace run into a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Length in characters, not bytes
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset where the last whitespace separated word of `text` starts.
///
/// Returns `None` when the text holds fewer than two words.
pub fn last_word_start(text: &str) -> Option<usize> {
    let trimmed = text.trim_end();
    let start = trimmed
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map(|(i, ch)| i + ch.len_utf8())?;
    if trimmed[..start].trim().is_empty() {
        return None;
    }
    Some(start)
}

/// Byte offset just past the first `count` non-whitespace characters of `text`.
///
/// Used to cut an emitted unit out of the raw buffer when the unit was
/// produced from a whitespace-normalized copy.
pub fn offset_after_non_whitespace(text: &str, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let mut seen = 0;
    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            continue;
        }
        seen += 1;
        if seen == count {
            return i + ch.len_utf8();
        }
    }
    text.len()
}

/// Count of non-whitespace characters
pub fn non_whitespace_len(text: &str) -> usize {
    text.chars().filter(|ch| !ch.is_whitespace()).count()
}
