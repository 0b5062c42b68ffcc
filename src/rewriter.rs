use crate::{Range, Replacement};
use std::borrow::Cow;
use tracing::{debug, warn};

/// The batch rule engine.
///
/// Ranges are applied first, then replacements, each rule against the output
/// of the one before it. Trimming the final result is opt-in.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    trim: bool,
}

impl Rewriter {
    /// Create a rewriter that returns its result untrimmed
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim leading and trailing whitespace from the final result
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Apply all rules to `text` in order and return the rewritten text.
    pub fn apply(&self, text: &str, ranges: &[Range], replacements: &[Replacement]) -> String {
        let mut current = text.to_string();

        for range in ranges {
            current = delete_range(current, range);
        }

        for replacement in replacements {
            current = replace_all(current, replacement);
        }

        if self.trim {
            let trimmed = current.trim();
            if trimmed.len() != current.len() {
                return trimmed.to_string();
            }
        }
        current
    }
}

/// Apply ranges then replacements to `text` without trimming.
pub fn apply_rules(text: &str, ranges: &[Range], replacements: &[Replacement]) -> String {
    Rewriter::new().apply(text, ranges, replacements)
}

fn delete_range(text: String, range: &Range) -> String {
    if !range.is_active() {
        debug!(start = %range.start, end = %range.end, "skipping incomplete range");
        return text;
    }

    let matcher = match range.matcher() {
        Ok(matcher) => matcher,
        Err(err) => {
            warn!(%range, %err, "skipping range that cannot be matched");
            return text;
        }
    };

    if let Cow::Owned(result) = matcher.replace_all(&text, "") {
        return result;
    }
    text
}

fn replace_all(text: String, replacement: &Replacement) -> String {
    if !replacement.is_active() {
        debug!("skipping replacement with empty search text");
        return text;
    }

    if text.contains(&replacement.find) {
        text.replace(&replacement.find, &replacement.replace)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rules_is_identity() {
        let text = "  some text\nwith lines  ";
        assert_eq!(apply_rules(text, &[], &[]), text);
        assert_eq!(apply_rules("", &[], &[]), "");
    }

    #[test]
    fn test_range_is_non_greedy() {
        let ranges = [Range::new("[", "]")];
        assert_eq!(apply_rules("[a][b]", &ranges, &[]), "");
        assert_eq!(apply_rules("x[a]y[b]z", &ranges, &[]), "xyz");
    }

    #[test]
    fn test_range_spans_lines() {
        let ranges = [Range::new("<think>", "</think>")];
        let text = "before<think>\nline one\nline two\n</think>after";
        assert_eq!(apply_rules(text, &ranges, &[]), "beforeafter");
    }

    #[test]
    fn test_range_markers_are_literal() {
        let ranges = [Range::new("a.b", "c*d")];
        assert_eq!(apply_rules("xa.bMIDc*dy", &ranges, &[]), "xy");
        // `.` must not match an arbitrary character
        assert_eq!(apply_rules("xaXbMIDc*dy", &ranges, &[]), "xaXbMIDc*dy");

        let ranges = [Range::new("(", ")"), Range::new("$", "^")];
        assert_eq!(apply_rules("f(x) = $cost^2", &ranges, &[]), "f = 2");
    }

    #[test]
    fn test_range_without_end_is_untouched() {
        let ranges = [Range::new("<<", ">>")];
        assert_eq!(apply_rules("open << only", &ranges, &[]), "open << only");
        assert_eq!(apply_rules(">> before <<", &ranges, &[]), ">> before <<");
    }

    #[test]
    fn test_same_marker_pairs_with_next_occurrence() {
        let ranges = [Range::new("**", "**")];
        assert_eq!(apply_rules("a**b**c", &ranges, &[]), "ac");
        assert_eq!(apply_rules("lonely ** marker", &ranges, &[]), "lonely ** marker");
    }

    #[test]
    fn test_incomplete_rules_are_skipped() {
        let ranges = [Range::new("[", ""), Range::new("", "]")];
        let replacements = [Replacement::new("", "x")];
        assert_eq!(apply_rules("[a]", &ranges, &replacements), "[a]");
    }

    #[test]
    fn test_replacement_chaining() {
        let replacements = [Replacement::new("cat", "dog"), Replacement::new("dog", "fish")];
        assert_eq!(apply_rules("cat", &[], &replacements), "fish");
    }

    #[test]
    fn test_replacement_is_literal_and_case_sensitive() {
        let replacements = [Replacement::new("$1.00", "$2"), Replacement::new("Cat", "")];
        assert_eq!(
            apply_rules("costs $1.00 for a Cat or cat", &[], &replacements),
            "costs $2 for a  or cat"
        );
    }

    #[test]
    fn test_replacement_is_non_overlapping() {
        let replacements = [Replacement::new("aa", "b")];
        assert_eq!(apply_rules("aaa", &[], &replacements), "ba");
    }

    #[test]
    fn test_ranges_run_before_replacements() {
        // The replacement would destroy the range's end marker if it ran first.
        let ranges = [Range::new("<", ">")];
        let replacements = [Replacement::new(">", "]")];
        assert_eq!(apply_rules("a<b>c>", &ranges, &replacements), "ac]");

        let replaced_first = apply_rules(&apply_rules("a<b>c>", &[], &replacements), &ranges, &[]);
        assert_eq!(replaced_first, "a<b]c]");
    }

    #[test]
    fn test_later_ranges_see_earlier_output() {
        let ranges = [Range::new("(", ")"), Range::new("[", "]")];
        // Removing "(x)" joins "[" and "]" into a deletable span.
        assert_eq!(apply_rules("1[(x)]2", &ranges, &[]), "12");
    }

    #[test]
    fn test_trim_is_opt_in() {
        let ranges = [Range::new("<", ">")];
        assert_eq!(apply_rules("<tag> body ", &ranges, &[]), " body ");
        let rewriter = Rewriter::new().trim(true);
        assert_eq!(rewriter.apply("<tag> body ", &ranges, &[]), "body");
    }

    #[test]
    fn test_multibyte_markers() {
        let ranges = [Range::new("【", "】")];
        let replacements = [Replacement::new("안녕", "hello")];
        assert_eq!(
            apply_rules("안녕【메모】하세요", &ranges, &replacements),
            "hello하세요"
        );
    }
}
