use crate::Error;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// A pair of literal markers delimiting a span to delete, markers included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: String,
    pub end: String,
}

/// A literal find/replace pair. An empty `replace` deletes every match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Replacement {
    pub find: String,
    #[serde(default)]
    pub replace: String,
}

/// Ordered range and replacement rules, as stored in a JSON preset file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub ranges: Vec<Range>,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

impl Range {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// A range only applies when both markers are present.
    pub fn is_active(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }

    /// Build the matcher for this range.
    ///
    /// Both markers are escaped so they match as literal text, and the body is
    /// lazy so each span ends at the nearest `end` after its `start`.
    pub(crate) fn matcher(&self) -> Result<Regex, regex::Error> {
        Regex::new(&format!(
            "(?s){}.*?{}",
            regex::escape(&self.start),
            regex::escape(&self.end)
        ))
    }
}

impl Replacement {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.find.is_empty()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.start, self.end)
    }
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.find, self.replace)
    }
}

impl RuleSet {
    pub fn new(ranges: Vec<Range>, replacements: Vec<Replacement>) -> Self {
        Self {
            ranges,
            replacements,
        }
    }

    /// Parse a rule preset from JSON
    pub fn parse(content: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a rule preset from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty() && self.replacements.is_empty()
    }

    /// Append another set's rules after this set's, keeping both orders.
    pub fn extend(&mut self, other: RuleSet) {
        self.ranges.extend(other.ranges);
        self.replacements.extend(other.replacements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_activity() {
        assert!(Range::new("[", "]").is_active());
        assert!(!Range::new("[", "").is_active());
        assert!(!Range::new("", "]").is_active());
        assert!(Replacement::new("a", "").is_active());
        assert!(!Replacement::new("", "b").is_active());
    }

    #[test]
    fn test_matcher_escapes_markers() {
        let re = Range::new("a.b", "c*d").matcher().unwrap();
        assert!(re.is_match("a.bXc*d"));
        assert!(!re.is_match("aXbXccd"));
    }

    #[test]
    fn test_parse_preset_with_defaults() {
        let json = r#"{
            "ranges": [{"start": "<!--", "end": "-->"}],
            "replacements": [{"find": "colour"}, {"find": "teh", "replace": "the"}]
        }"#;
        let rules = RuleSet::parse(json).unwrap();
        assert_eq!(rules.ranges, vec![Range::new("<!--", "-->")]);
        assert_eq!(
            rules.replacements,
            vec![Replacement::new("colour", ""), Replacement::new("teh", "the")]
        );

        let empty = RuleSet::parse("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_parse_preset_rejects_bad_json() {
        assert!(matches!(
            RuleSet::parse("{\"ranges\": 3}"),
            Err(Error::JsonError(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Range::new("<", ">").to_string(), "<~>");
        assert_eq!(Replacement::new("cat", "dog").to_string(), "cat→dog");
    }
}
