use crate::differ::DiffAlgorithm;
use crate::segment::coalesce;
use crate::{DiffSegment, Differ, SegmentKind};
use std::cmp::max;
use tracing::debug;

/// The LCS differ implementation that aligns text character by character
pub struct LcsDiffer<'a> {
    differ: &'a Differ,
}

impl<'a> LcsDiffer<'a> {
    /// Create a new LcsDiffer from a base Differ instance
    pub fn new(differ: &'a Differ) -> Self {
        Self { differ }
    }
}

/// Prefix LCS lengths: `cell(i, j)` is the LCS length of `old[..i]` and `new[..j]`.
///
/// Cells are `u32`; callers bound the table through [`Differ::lcs_table_cells`]
/// long before an LCS length could overflow it.
struct LcsTable {
    width: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    fn build(old: &[char], new: &[char]) -> Self {
        let width = new.len() + 1;
        let mut cells = vec![0; (old.len() + 1) * width];

        for i in 1..=old.len() {
            for j in 1..=new.len() {
                cells[i * width + j] = if old[i - 1] == new[j - 1] {
                    cells[(i - 1) * width + (j - 1)] + 1
                } else {
                    max(cells[(i - 1) * width + j], cells[i * width + (j - 1)])
                };
            }
        }

        Self { width, cells }
    }

    fn cell(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.width + j]
    }

    /// Walk back from the bottom-right corner, emitting one atom per step.
    ///
    /// On a tie between dropping a new char and dropping an old char the new
    /// char is taken as `Added`. Output stability depends on this order.
    fn backtrace(&self, old: &[char], new: &[char]) -> Vec<(SegmentKind, char)> {
        let mut atoms = Vec::with_capacity(old.len() + new.len());
        let mut i = old.len();
        let mut j = new.len();

        while i > 0 || j > 0 {
            if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
                atoms.push((SegmentKind::Common, old[i - 1]));
                i -= 1;
                j -= 1;
            } else if j > 0 && (i == 0 || self.cell(i, j - 1) >= self.cell(i - 1, j)) {
                atoms.push((SegmentKind::Added, new[j - 1]));
                j -= 1;
            } else {
                atoms.push((SegmentKind::Removed, old[i - 1]));
                i -= 1;
            }
        }

        atoms.reverse();
        atoms
    }
}

impl DiffAlgorithm for LcsDiffer<'_> {
    fn align(&self) -> Vec<DiffSegment> {
        let old: Vec<char> = self.differ.old.chars().collect();
        let new: Vec<char> = self.differ.new.chars().collect();

        let table = LcsTable::build(&old, &new);
        debug!(
            old_chars = old.len(),
            new_chars = new.len(),
            common = table.cell(old.len(), new.len()),
            "built lcs table"
        );

        coalesce(table.backtrace(&old, &new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::DiffAlgorithmType;
    use crate::segment::{reconstruct_new, reconstruct_old};

    fn raw(old: &str, new: &str) -> Vec<DiffSegment> {
        let differ = Differ::new_with_algorithm(old, new, DiffAlgorithmType::Lcs);
        LcsDiffer::new(&differ).align()
    }

    fn brute_lcs(a: &[char], b: &[char]) -> usize {
        match (a.split_first(), b.split_first()) {
            (Some((x, ra)), Some((y, rb))) => {
                if x == y {
                    1 + brute_lcs(ra, rb)
                } else {
                    max(brute_lcs(ra, b), brute_lcs(a, rb))
                }
            }
            _ => 0,
        }
    }

    #[test]
    fn test_identical_is_single_common() {
        assert_eq!(raw("abc", "abc"), vec![DiffSegment::common("abc")]);
        assert!(raw("", "").is_empty());
    }

    #[test]
    fn test_empty_sides() {
        assert_eq!(raw("", "new"), vec![DiffSegment::added("new")]);
        assert_eq!(raw("old", ""), vec![DiffSegment::removed("old")]);
    }

    #[test]
    fn test_tie_prefers_added_on_backtrace() {
        // "a" -> "b": both single-step paths score zero; backtrace takes the
        // added char first, so the removal ends up in front.
        assert_eq!(
            raw("a", "b"),
            vec![DiffSegment::removed("a"), DiffSegment::added("b")]
        );
        // "ab" -> "ba": either char could be kept; the tie keeps the "b".
        assert_eq!(
            raw("ab", "ba"),
            vec![
                DiffSegment::removed("a"),
                DiffSegment::common("b"),
                DiffSegment::added("a"),
            ]
        );
    }

    #[test]
    fn test_multibyte_chars_are_atoms() {
        let segments = raw("가나다", "가라다");
        assert_eq!(
            segments,
            vec![
                DiffSegment::common("가"),
                DiffSegment::removed("나"),
                DiffSegment::added("라"),
                DiffSegment::common("다"),
            ]
        );
    }

    #[test]
    fn test_common_length_is_optimal() {
        let cases = [
            ("kitten", "sitting"),
            ("abcbdab", "bdcaba"),
            ("intention", "execution"),
            ("aaa", "a"),
            ("xyz", "abc"),
        ];
        for (old, new) in cases {
            let segments = raw(old, new);
            let common: usize = segments
                .iter()
                .filter(|s| s.kind == SegmentKind::Common)
                .map(DiffSegment::char_len)
                .sum();
            let a: Vec<char> = old.chars().collect();
            let b: Vec<char> = new.chars().collect();
            assert_eq!(common, brute_lcs(&a, &b), "{old} -> {new}");
            assert_eq!(reconstruct_old(&segments), old);
            assert_eq!(reconstruct_new(&segments), new);
        }
    }
}
