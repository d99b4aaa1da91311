/// Splits `text` into consecutive pieces of at most `max_len` characters.
///
/// The split is greedy and ignores word boundaries, so a piece may end mid-word.
/// Concatenating the pieces gives back `text`; empty input gives no pieces.
/// A `max_len` of zero is treated as one.
pub fn chunks(text: &str, max_len: usize) -> Chunks<'_> {
    Chunks {
        rest: text,
        max_len: max_len.max(1),
    }
}

/// Owned form of [`chunks`], ready to hand to the dispatcher.
pub fn split(text: &str, max_len: usize) -> Vec<String> {
    chunks(text, max_len).map(str::to_owned).collect()
}

#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    max_len: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .char_indices()
            .nth(self.max_len)
            .map(|(idx, _)| idx)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(head)
    }
}
