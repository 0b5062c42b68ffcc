use super::{MarkedPair, Renderer};
use crate::{DiffSegment, SegmentKind};
use unicode_width::UnicodeWidthStr;

/// Terminal-friendly rendering with `{-removed-}` and `{+added+}` markers.
///
/// The opposite side gets blanks of the same display width, so wide (CJK)
/// characters stay lined up in a monospace view. Line breaks are kept.
/// `{`, `}` and `\` in the text are backslash-escaped so input can never
/// open or close a marker.
#[derive(Debug, Clone)]
pub struct PlainRenderer {
    removed: (String, String),
    added: (String, String),
}

impl Default for PlainRenderer {
    fn default() -> Self {
        Self {
            removed: ("{-".to_string(), "-}".to_string()),
            added: ("{+".to_string(), "+}".to_string()),
        }
    }
}

impl PlainRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers placed around removed text
    pub fn removed_markers(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.removed = (open.into(), close.into());
        self
    }

    /// Markers placed around added text
    pub fn added_markers(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.added = (open.into(), close.into());
        self
    }
}

/// Backslash-escape the characters the default markers are built from.
pub fn escape_plain(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '{' | '}' | '\\') {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

fn wrap(markers: &(String, String), text: &str) -> String {
    format!("{}{}{}", markers.0, escape_plain(text), markers.1)
}

/// Blank out every line of `marked` while keeping its display width.
fn placeholder(marked: &str) -> String {
    marked
        .split('\n')
        .map(|line| " ".repeat(line.width()))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Renderer for PlainRenderer {
    fn render(&self, segments: &[DiffSegment]) -> MarkedPair {
        let mut pair = MarkedPair::default();
        for segment in segments {
            match segment.kind {
                SegmentKind::Common => {
                    let text = escape_plain(&segment.text);
                    pair.old.push_str(&text);
                    pair.new.push_str(&text);
                }
                SegmentKind::Removed => {
                    let marked = wrap(&self.removed, &segment.text);
                    pair.new.push_str(&placeholder(&marked));
                    pair.old.push_str(&marked);
                }
                SegmentKind::Added => {
                    let marked = wrap(&self.added, &segment.text);
                    pair.old.push_str(&placeholder(&marked));
                    pair.new.push_str(&marked);
                }
            }
        }
        pair
    }
}
