mod html;
mod plain;

use crate::DiffSegment;
use serde::Serialize;

pub use html::{escape_html, HtmlRenderer};
pub use plain::{escape_plain, PlainRenderer};

/// The old-side and new-side renderings of one alignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkedPair {
    pub old: String,
    pub new: String,
}

/// Turns an alignment into two parallel marked-up texts.
///
/// Implementations do their own escaping. They never see the input texts,
/// only the segments, so alignment and presentation stay independent.
pub trait Renderer {
    fn render(&self, segments: &[DiffSegment]) -> MarkedPair;
}
