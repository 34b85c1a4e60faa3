//! Small string helpers shared by the extractors

/// Largest char boundary `<= index`
pub fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut i = index;
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary `>= index`
pub fn ceil_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut i = index;
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Split text into sentences.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace. A dot between
/// two digits never ends a sentence, so "5.5 kw" stays intact.
pub fn split_sentences(text: &str) -> Vec<&str> {
    sentence_spans(text)
        .into_iter()
        .map(|(start, end)| &text[start..end])
        .collect()
}

/// Byte ranges of the trimmed, non-empty sentences of `text`
pub fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(_, next)) = chars.peek() {
                let decimal = c == '.'
                    && prev.is_some_and(|p| p.is_ascii_digit())
                    && next.is_ascii_digit();
                if next.is_whitespace() && !decimal {
                    let end = i + c.len_utf8();
                    push_trimmed(text, start, end, &mut spans);
                    start = end;
                }
            }
        }
        prev = Some(c);
    }

    push_trimmed(text, start, text.len(), &mut spans);
    spans
}

fn push_trimmed(text: &str, start: usize, end: usize, spans: &mut Vec<(usize, usize)>) {
    let slice = &text[start..end];
    let trimmed_start = start + (slice.len() - slice.trim_start().len());
    let trimmed_end = start + slice.trim_end().len();
    if trimmed_start < trimmed_end {
        spans.push((trimmed_start, trimmed_end));
    }
}

/// Whether `needle` occurs in `haystack` as a whole-word sequence
pub fn contains_words(haystack: &str, needle: &str) -> bool {
    let needle: Vec<&str> = needle.split_whitespace().collect();
    if needle.is_empty() {
        return false;
    }
    let words: Vec<&str> = haystack
        .split(|c: char| c.is_whitespace() || matches!(c, '[' | ']' | '(' | ')' | ','))
        .filter(|w| !w.is_empty())
        .collect();
    words.windows(needle.len()).any(|window| window == needle.as_slice())
}
