use super::{MarkedPair, Renderer};
use crate::{DiffSegment, SegmentKind};

/// Side-by-side HTML: removed and added text wrapped in classed spans, with a
/// placeholder span on the opposite side so both columns keep the same flow.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    removed_class: String,
    added_class: String,
    placeholder_class: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            removed_class: "diff-removed".to_string(),
            added_class: "diff-added".to_string(),
            placeholder_class: "diff-phantom".to_string(),
        }
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// CSS class for removed text on the old side
    pub fn removed_class(mut self, class: impl Into<String>) -> Self {
        self.removed_class = class.into();
        self
    }

    /// CSS class for added text on the new side
    pub fn added_class(mut self, class: impl Into<String>) -> Self {
        self.added_class = class.into();
        self
    }

    /// CSS class for the invisible stand-in on the opposite side
    pub fn placeholder_class(mut self, class: impl Into<String>) -> Self {
        self.placeholder_class = class.into();
        self
    }

    fn span(&self, class: &str, markup: &str) -> String {
        format!(r#"<span class="{}">{}</span>"#, escape_html(class), markup)
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, segments: &[DiffSegment]) -> MarkedPair {
        let mut pair = MarkedPair::default();
        for segment in segments {
            let markup = escape_html(&segment.text).replace('\n', "<br>");
            match segment.kind {
                SegmentKind::Common => {
                    pair.old.push_str(&markup);
                    pair.new.push_str(&markup);
                }
                SegmentKind::Removed => {
                    pair.old.push_str(&self.span(&self.removed_class, &markup));
                    pair.new.push_str(&self.span(&self.placeholder_class, &markup));
                }
                SegmentKind::Added => {
                    pair.old.push_str(&self.span(&self.placeholder_class, &markup));
                    pair.new.push_str(&self.span(&self.added_class, &markup));
                }
            }
        }
        pair
    }
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(ch),
        }
    }
    result
}
