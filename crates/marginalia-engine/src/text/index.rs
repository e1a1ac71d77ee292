use super::span::Span;

/// Offset lookups for a borrowed text, in UTF-16 code units.
///
/// Regex matches come back as UTF-8 byte offsets while every span in the
/// engine is measured in UTF-16 code units. This index converts between the
/// two and answers line queries, without copying the text.
#[derive(Debug, Clone)]
pub struct TextIndex<'a> {
    text: &'a str,
    /// `(byte, utf16)` pairs recorded after every non-ASCII char. Empty for ASCII text.
    checkpoints: Vec<(usize, usize)>,
    /// UTF-16 offset of the first unit of every line.
    line_starts: Vec<usize>,
}

impl<'a> TextIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut checkpoints = Vec::new();
        let mut line_starts = vec![0];
        let mut utf16 = 0;

        for (byte, ch) in text.char_indices() {
            utf16 += ch.len_utf16();
            if !ch.is_ascii() {
                checkpoints.push((byte + ch.len_utf8(), utf16));
            }
            if ch == '\n' {
                line_starts.push(utf16);
            }
        }

        Self {
            text,
            checkpoints,
            line_starts,
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Length of the text in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        self.to_utf16(self.text.len())
    }

    /// Converts a UTF-8 byte offset (on a char boundary) to UTF-16 code units.
    pub fn to_utf16(&self, byte: usize) -> usize {
        let idx = self.checkpoints.partition_point(|&(b, _)| b <= byte);
        match idx.checked_sub(1).map(|i| self.checkpoints[i]) {
            Some((b, u)) => u + (byte - b),
            None => byte,
        }
    }

    /// Converts a byte range to a span in UTF-16 code units.
    pub fn span_of(&self, range: std::ops::Range<usize>) -> Span {
        Span {
            from: self.to_utf16(range.start),
            to: self.to_utf16(range.end),
        }
    }

    /// Zero-based line containing the UTF-16 offset.
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }
}
