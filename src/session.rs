use crate::differ::{DiffAlgorithmType, Differ, DEFAULT_CLEANUP_PASSES, DEFAULT_MAX_TABLE_CELLS};
use crate::render::{HtmlRenderer, MarkedPair, Renderer};
use crate::{Error, Range, Replacement, Rewriter, RuleHistory, TranslationStore};
use tracing::{debug, info};

/// Settings for one editing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Trim the result after each `process` call
    pub trim: bool,
    /// Refuse to diff when either side has more chars than this
    pub max_diff_chars: Option<usize>,
    /// Refuse an LCS diff whose table would hold more cells than this
    pub max_table_cells: Option<usize>,
    pub cleanup_passes: usize,
    pub algorithm: DiffAlgorithmType,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            trim: true,
            max_diff_chars: Some(20_000),
            max_table_cells: Some(DEFAULT_MAX_TABLE_CELLS),
            cleanup_passes: DEFAULT_CLEANUP_PASSES,
            algorithm: DiffAlgorithmType::Lcs,
        }
    }
}

/// Editing state for a single message.
///
/// Holds the untouched original next to the working text. Rules always run
/// against the working text, so repeated `process` calls accumulate.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: String,
    current: String,
    compare_mode: bool,
    options: SessionOptions,
}

impl EditSession {
    pub fn new(original: &str) -> Self {
        Self::with_options(original, SessionOptions::default())
    }

    pub fn with_options(original: &str, options: SessionOptions) -> Self {
        Self {
            original: original.to_string(),
            current: original.to_string(),
            compare_mode: false,
            options,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Replace the working text with a free-form edit
    pub fn set_current(&mut self, text: &str) {
        self.current = text.to_string();
    }

    /// Throw away all edits
    pub fn reset(&mut self) {
        self.current = self.original.clone();
        self.compare_mode = false;
    }

    /// Apply rules to the working text and return the new working text.
    pub fn process(&mut self, ranges: &[Range], replacements: &[Replacement]) -> &str {
        let rewriter = Rewriter::new().trim(self.options.trim);
        self.current = rewriter.apply(&self.current, ranges, replacements);
        debug!(
            ranges = ranges.len(),
            replacements = replacements.len(),
            chars = self.current.chars().count(),
            "processed rules"
        );
        &self.current
    }

    /// Flip compare mode and return the new state
    pub fn toggle_compare(&mut self) -> bool {
        self.compare_mode = !self.compare_mode;
        self.compare_mode
    }

    pub fn is_compare_mode(&self) -> bool {
        self.compare_mode
    }

    /// Diff the original against the working text as HTML.
    pub fn compare(&self) -> Result<MarkedPair, Error> {
        self.compare_with(&HtmlRenderer::default())
    }

    /// Diff the original against the working text with any renderer.
    pub fn compare_with<R: Renderer + ?Sized>(&self, renderer: &R) -> Result<MarkedPair, Error> {
        Ok(self.differ()?.render(renderer))
    }

    fn differ(&self) -> Result<Differ, Error> {
        if let Some(limit) = self.options.max_diff_chars {
            for text in [&self.original, &self.current] {
                let chars = text.chars().count();
                if chars > limit {
                    return Err(Error::InputTooLarge { chars, limit });
                }
            }
        }
        let differ =
            Differ::new_with_algorithm(&self.original, &self.current, self.options.algorithm)
                .cleanup_passes(self.options.cleanup_passes);

        // Only the LCS aligner allocates the full table.
        if let (DiffAlgorithmType::Lcs, Some(limit)) =
            (self.options.algorithm, self.options.max_table_cells)
        {
            let cells = differ.lcs_table_cells();
            if cells > limit {
                return Err(Error::TableTooLarge { cells, limit });
            }
        }
        Ok(differ)
    }

    /// Remember the rules that produced this result and hand back the final text.
    pub fn commit(
        &self,
        history: &mut RuleHistory,
        ranges: &[Range],
        replacements: &[Replacement],
    ) -> &str {
        history.record_rules(ranges, replacements);
        &self.current
    }

    /// Store the working text as the translation of the original.
    pub fn commit_translation<S: TranslationStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<(), Error> {
        if self.current.trim().is_empty() {
            return Err(Error::EmptyTranslation);
        }
        let existed = store.get(&self.original)?.is_some();
        store.put(&self.original, &self.current)?;
        info!(updated = existed, "saved translation");
        Ok(())
    }
}
