mod cleanup;
mod lcs;
mod similar;

use crate::render::{HtmlRenderer, MarkedPair, Renderer};
use crate::DiffSegment;
use tracing::warn;

pub use cleanup::{semantic_cleanup, DEFAULT_ABSORB_BELOW, DEFAULT_CLEANUP_PASSES};
pub use lcs::LcsDiffer;
pub use similar::SimilarDiffer;

/// Largest LCS table (in cells) built by default: 4000 x 4000 chars, 64 MB.
pub const DEFAULT_MAX_TABLE_CELLS: usize = 16_000_000;

/// Trait for different alignment algorithms
pub trait DiffAlgorithm {
    /// Align the old and new content into coalesced character runs
    fn align(&self) -> Vec<DiffSegment>;
}

/// Enum to specify which alignment algorithm to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiffAlgorithmType {
    /// Full LCS table with the added-first tie-break
    #[default]
    Lcs,
    /// Myers char diff from the `similar` crate
    Similar,
}

/// The base Differ struct that orchestrates alignment, cleanup and rendering
#[derive(Debug, Clone)]
pub struct Differ {
    pub(crate) algorithm: DiffAlgorithmType,
    pub(crate) old: String,
    pub(crate) new: String,
    pub(crate) cleanup_passes: usize,
    pub(crate) absorb_below: usize,
}

impl Differ {
    /// Create a new Differ with the old and new content using the default algorithm (LCS).
    pub fn new(old: &str, new: &str) -> Self {
        Self::new_with_algorithm(old, new, DiffAlgorithmType::Lcs)
    }

    /// Create a new Differ with the old and new content and a specified algorithm.
    pub fn new_with_algorithm(old: &str, new: &str, algorithm: DiffAlgorithmType) -> Self {
        Self {
            algorithm,
            old: old.to_string(),
            new: new.to_string(),
            cleanup_passes: DEFAULT_CLEANUP_PASSES,
            absorb_below: DEFAULT_ABSORB_BELOW,
        }
    }

    /// Set how many semantic cleanup passes to run. Zero disables cleanup.
    pub fn cleanup_passes(mut self, passes: usize) -> Self {
        self.cleanup_passes = passes;
        self
    }

    /// Set the length (in chars) below which a common run gets absorbed
    /// into a neighbouring change.
    pub fn absorb_below(mut self, chars: usize) -> Self {
        self.absorb_below = chars;
        self
    }

    /// Number of cells the LCS table for these inputs would hold.
    ///
    /// Saturates instead of overflowing, so the result can always be
    /// compared against a limit.
    pub fn lcs_table_cells(&self) -> usize {
        let rows = self.old.chars().count().saturating_add(1);
        let columns = self.new.chars().count().saturating_add(1);
        rows.saturating_mul(columns)
    }

    /// Switch from `Lcs` to `Similar` when the LCS table would hold more
    /// than `max_cells` cells.
    pub fn fallback_above(mut self, max_cells: usize) -> Self {
        if self.algorithm == DiffAlgorithmType::Lcs {
            let cells = self.lcs_table_cells();
            if cells > max_cells {
                warn!(
                    cells,
                    limit = max_cells,
                    "input too large for the lcs table, using the similar aligner"
                );
                self.algorithm = DiffAlgorithmType::Similar;
            }
        }
        self
    }

    pub fn algorithm(&self) -> DiffAlgorithmType {
        self.algorithm
    }

    /// Coalesced alignment without semantic cleanup
    pub fn align_raw(&self) -> Vec<DiffSegment> {
        match self.algorithm {
            DiffAlgorithmType::Lcs => LcsDiffer::new(self).align(),
            DiffAlgorithmType::Similar => SimilarDiffer::new(self).align(),
        }
    }

    /// Render the cleaned alignment with the given renderer
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &R) -> MarkedPair {
        renderer.render(&self.align())
    }

    /// Render the cleaned alignment as side-by-side HTML
    pub fn compute(&self) -> MarkedPair {
        self.render(&HtmlRenderer::default())
    }
}

impl DiffAlgorithm for Differ {
    /// Alignment after semantic cleanup
    fn align(&self) -> Vec<DiffSegment> {
        semantic_cleanup(self.align_raw(), self.cleanup_passes, self.absorb_below)
    }
}

/// Diff two texts with the default settings and render both sides as HTML.
pub fn diff(old: &str, new: &str) -> MarkedPair {
    Differ::new(old, new).compute()
}

/// Diff two texts with the default settings and return the cleaned segments.
pub fn align(old: &str, new: &str) -> Vec<DiffSegment> {
    Differ::new(old, new).align()
}
