use super::{DiffAlgorithm, Differ};
use crate::segment::push_text;
use crate::{DiffSegment, SegmentKind};
use similar::{Algorithm as SimilarAlgorithm, ChangeTag, TextDiff};

/// Char alignment backed by the Myers implementation in `similar`.
///
/// Runs in linear space, so it suits inputs too large for the LCS table.
/// Equal-length alignments may be chosen differently from [`super::LcsDiffer`].
pub struct SimilarDiffer<'a> {
    differ: &'a Differ,
}

impl<'a> SimilarDiffer<'a> {
    pub fn new(differ: &'a Differ) -> Self {
        Self { differ }
    }
}

impl DiffAlgorithm for SimilarDiffer<'_> {
    fn align(&self) -> Vec<DiffSegment> {
        let diff = TextDiff::configure()
            .algorithm(SimilarAlgorithm::Myers)
            .diff_chars(&self.differ.old, &self.differ.new);

        let mut segments = Vec::new();
        for change in diff.iter_all_changes() {
            let kind = match change.tag() {
                ChangeTag::Equal => SegmentKind::Common,
                ChangeTag::Delete => SegmentKind::Removed,
                ChangeTag::Insert => SegmentKind::Added,
            };
            push_text(&mut segments, kind, change.value());
        }
        segments
    }
}
