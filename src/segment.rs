use serde::{Deserialize, Serialize};

/// How a run of characters relates the old text to the new text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Common,
    Added,
    Removed,
}

/// A maximal run of characters sharing one [`SegmentKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    pub text: String,
}

impl SegmentKind {
    /// `Added` and `Removed` are changes, `Common` is not
    pub fn is_change(self) -> bool {
        !matches!(self, SegmentKind::Common)
    }
}

impl DiffSegment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn common(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Common, text)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Added, text)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Removed, text)
    }

    /// Length in Unicode scalar values, the unit the differ works in
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Append `text` to `segments`, extending the last segment when it has the
/// same kind.
pub(crate) fn push_text(segments: &mut Vec<DiffSegment>, kind: SegmentKind, text: &str) {
    if text.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(last) if last.kind == kind => last.text.push_str(text),
        _ => segments.push(DiffSegment::new(kind, text)),
    }
}

/// Merge single-character atoms into maximal same-kind runs.
pub(crate) fn coalesce<I>(atoms: I) -> Vec<DiffSegment>
where
    I: IntoIterator<Item = (SegmentKind, char)>,
{
    let mut segments: Vec<DiffSegment> = Vec::new();
    for (kind, ch) in atoms {
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push(ch),
            _ => segments.push(DiffSegment::new(kind, ch)),
        }
    }
    segments
}

/// Rebuild the old text from an alignment (`Common` and `Removed` runs).
pub fn reconstruct_old(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Added)
        .map(|s| s.text.as_str())
        .collect()
}

/// Rebuild the new text from an alignment (`Common` and `Added` runs).
pub fn reconstruct_new(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != SegmentKind::Removed)
        .map(|s| s.text.as_str())
        .collect()
}
