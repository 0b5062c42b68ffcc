use thiserror::Error;

pub mod differ;
mod history;
pub mod render;
mod rewriter;
mod rule;
mod segment;
mod session;
mod store;

// Re-export the engines and their collaborators for convenience
pub use differ::{align, diff, DiffAlgorithm, DiffAlgorithmType, Differ, LcsDiffer, SimilarDiffer};
pub use history::{HistoryEntry, RuleHistory, DEFAULT_HISTORY_CAPACITY};
pub use render::{HtmlRenderer, MarkedPair, PlainRenderer, Renderer};
pub use rewriter::{apply_rules, Rewriter};
pub use rule::{Range, Replacement, RuleSet};
pub use segment::{reconstruct_new, reconstruct_old, DiffSegment, SegmentKind};
pub use session::{EditSession, SessionOptions};
pub use store::{JsonFileStore, MemoryStore, TranslationRecord, TranslationStore};

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Input of {chars} characters exceeds the diff limit of {limit}")]
    InputTooLarge { chars: usize, limit: usize },

    #[error("LCS table of {cells} cells exceeds the limit of {limit}")]
    TableTooLarge { cells: usize, limit: usize },

    #[error("History index {index} out of range for {len} entries")]
    HistoryIndexOutOfRange { index: usize, len: usize },

    #[error("Nothing to save: the edited text is empty")]
    EmptyTranslation,
}
