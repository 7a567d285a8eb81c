use text_size::TextSize;

use super::Position;

/// Maps byte offsets to 0-based line / UTF-16 column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first character of every line after the first.
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let line_starts = text
            .match_indices('\n')
            .map(|(offset, _)| TextSize::from((offset + 1) as u32))
            .collect();
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len() + 1
    }

    /// Position of `offset` within `text`. Offsets past the end clamp to the end.
    pub fn position(&self, text: &str, offset: TextSize) -> Position {
        let offset = offset.min(TextSize::of(text));
        let line = self.line_starts.partition_point(|start| *start <= offset);
        let line_start = if line == 0 {
            TextSize::from(0)
        } else {
            self.line_starts[line - 1]
        };
        let prefix = &text[usize::from(line_start)..usize::from(offset)];
        Position::new(line, prefix.encode_utf16().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_across_lines() {
        let text = "rule R1 {\n  var a\n}";
        let index = LineIndex::new(text);
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.position(text, 0.into()), Position::new(0, 0));
        assert_eq!(index.position(text, 9.into()), Position::new(0, 9));
        assert_eq!(index.position(text, 10.into()), Position::new(1, 0));
        assert_eq!(index.position(text, 14.into()), Position::new(1, 4));
        assert_eq!(index.position(text, 18.into()), Position::new(2, 0));
    }

    #[test]
    fn columns_count_utf16_units() {
        let text = "\"\u{1F600}\" x";
        let index = LineIndex::new(text);
        // quote + surrogate pair + quote + space
        assert_eq!(index.position(text, TextSize::of(text) - TextSize::from(1)), Position::new(0, 5));
    }

    #[test]
    fn offset_past_end_clamps() {
        let text = "ab";
        let index = LineIndex::new(text);
        assert_eq!(index.position(text, 99.into()), Position::new(0, 2));
    }
}
