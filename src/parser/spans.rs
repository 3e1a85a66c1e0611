//! Span bookkeeping for the extraction pipeline
//!
//! The input is never rewritten while stages run. Each stage sees a masked copy
//! in which consumed bytes are blanked out, so offsets always refer to the
//! original input. The title is cut once, at the very end.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Clone)]
pub struct Spans<'a> {
    input: &'a str,
    consumed: Vec<Range<usize>>,
    /// Hidden from later stages but left in the title
    shielded: Vec<Range<usize>>,
}

impl<'a> Spans<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, consumed: Vec::new(), shielded: Vec::new() }
    }

    /// Record a consumed byte range. Empty or out-of-bounds ranges are ignored.
    pub fn consume(&mut self, span: Range<usize>) {
        if !self.in_bounds(&span) {
            return;
        }
        debug!("Consuming '{}' at {:?}", &self.input[span.clone()], span);
        self.consumed.push(span);
    }

    /// Keep a range away from later stages without cutting it from the title
    pub fn shield(&mut self, span: Range<usize>) {
        if !self.in_bounds(&span) {
            return;
        }
        debug!("Shielding '{}' at {:?}", &self.input[span.clone()], span);
        self.shielded.push(span);
    }

    fn in_bounds(&self, span: &Range<usize>) -> bool {
        span.start < span.end && span.end <= self.input.len()
    }

    /// The input with every consumed byte replaced by a space
    pub fn masked(&self) -> String {
        let mut bytes = self.input.as_bytes().to_vec();
        for span in self.consumed.iter().chain(&self.shielded) {
            bytes[span.clone()].fill(b' ');
        }
        // Spans come from regex matches on char boundaries, so blanking whole
        // spans never splits a multi-byte character.
        String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }

    /// Excise all consumed spans in position order and sanitize the remainder
    pub fn finish(&self) -> String {
        let mut spans = self.consumed.clone();
        spans.sort_by_key(|s| s.start);

        let mut out = String::with_capacity(self.input.len());
        let mut cursor = 0;
        for span in spans {
            if span.start > cursor {
                out.push_str(&self.input[cursor..span.start]);
                // Keep words on either side of a cut apart
                out.push(' ');
            }
            cursor = cursor.max(span.end);
        }
        if cursor < self.input.len() {
            out.push_str(&self.input[cursor..]);
        }
        sanitize_title(&out)
    }
}

/// Collapse whitespace runs into single spaces and trim both ends
pub fn sanitize_title(title: &str) -> String {
    WHITESPACE_RUN.replace_all(title, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masking_preserves_offsets() {
        let mut spans = Spans::new("call mom tomorrow at 3pm");
        spans.consume(9..17);
        let masked = spans.masked();
        assert_eq!(masked.len(), "call mom tomorrow at 3pm".len());
        assert_eq!(masked, "call mom          at 3pm");
        assert_eq!(&masked[18..24], "at 3pm");
    }

    #[test]
    fn test_finish_excises_in_position_order() {
        let mut spans = Spans::new("Submit report tomorrow 3-4pm !!! #work");
        // Recorded out of order on purpose
        spans.consume(33..38);
        spans.consume(14..22);
        spans.consume(23..28);
        spans.consume(29..32);
        assert_eq!(spans.finish(), "Submit report");
    }

    #[test]
    fn test_finish_merges_overlaps() {
        let mut spans = Spans::new("abc def ghi");
        spans.consume(2..6);
        spans.consume(4..8);
        assert_eq!(spans.finish(), "ab ghi");
    }

    #[test]
    fn test_cut_inside_word_keeps_neighbours_apart() {
        let mut spans = Spans::new("wow!!!now");
        spans.consume(3..6);
        assert_eq!(spans.finish(), "wow now");
    }

    #[test]
    fn test_ignores_invalid_spans() {
        let mut spans = Spans::new("abc");
        spans.consume(2..2);
        spans.consume(1..10);
        spans.shield(2..2);
        assert_eq!(spans.masked(), "abc");
        assert_eq!(spans.finish(), "abc");
    }

    #[test]
    fn test_shielded_text_stays_in_title() {
        let mut spans = Spans::new("Meet 3pm-3pm today");
        spans.shield(5..12);
        spans.consume(13..18);
        let masked = spans.masked();
        assert_eq!(masked.len(), 18);
        assert_eq!(masked.trim_end(), "Meet");
        assert_eq!(spans.finish(), "Meet 3pm-3pm");
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("  Buy   milk \t now  "), "Buy milk now");
        assert_eq!(sanitize_title(""), "");
    }
}
