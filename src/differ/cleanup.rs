//! Semantic cleanup: fold short common islands into the edits around them so
//! a rendered diff shows whole changed blocks instead of confetti.
//!
//! The pass count is a fixed bound rather than a fixpoint loop. Three passes
//! settle chat-message sized text; inputs with many short islands are not
//! guaranteed to reach a global fixpoint.

use crate::segment::push_text;
use crate::{DiffSegment, SegmentKind};

/// Number of cleanup passes run by default
pub const DEFAULT_CLEANUP_PASSES: usize = 3;

/// Common runs shorter than this many chars are absorbed by default
pub const DEFAULT_ABSORB_BELOW: usize = 4;

/// A common run or a change block (maximal run of non-common segments).
#[derive(Debug)]
enum Piece {
    Common(String),
    Change { removed: String, added: String },
}

/// Run `passes` rounds of semantic cleanup over an alignment.
///
/// A common run shorter than `absorb_below` chars that touches a change block
/// joins the preceding block, or the following one when nothing precedes it.
/// The absorbed text lands on both the removed and the added side of the
/// block, so both inputs can still be rebuilt from the result. Every change
/// block comes out as one `Removed` segment followed by one `Added` segment
/// (either may be missing when empty).
///
/// The reordering applies to every block, including ones that absorbed
/// nothing: `[Added "1", Removed "2", Added "3"]` becomes
/// `[Removed "2", Added "13"]`, not the interleaved order of the raw
/// alignment. With `passes == 0` the input is returned as is.
pub fn semantic_cleanup(
    segments: Vec<DiffSegment>,
    passes: usize,
    absorb_below: usize,
) -> Vec<DiffSegment> {
    if passes == 0 {
        return segments;
    }

    let mut pieces = into_pieces(segments);
    for _ in 0..passes {
        pieces = absorb_pass(pieces, absorb_below);
    }
    into_segments(pieces)
}

fn push_piece(pieces: &mut Vec<Piece>, piece: Piece) {
    let piece = match (pieces.last_mut(), piece) {
        (Some(Piece::Common(last)), Piece::Common(text)) => {
            last.push_str(&text);
            return;
        }
        (
            Some(Piece::Change { removed, added }),
            Piece::Change {
                removed: more_removed,
                added: more_added,
            },
        ) => {
            removed.push_str(&more_removed);
            added.push_str(&more_added);
            return;
        }
        (_, piece) => piece,
    };
    pieces.push(piece);
}

fn into_pieces(segments: Vec<DiffSegment>) -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(segments.len());
    for segment in segments {
        let piece = match segment.kind {
            SegmentKind::Common => Piece::Common(segment.text),
            SegmentKind::Removed => Piece::Change {
                removed: segment.text,
                added: String::new(),
            },
            SegmentKind::Added => Piece::Change {
                removed: String::new(),
                added: segment.text,
            },
        };
        push_piece(&mut pieces, piece);
    }
    pieces
}

fn absorb_pass(pieces: Vec<Piece>, absorb_below: usize) -> Vec<Piece> {
    let mut cleaned: Vec<Piece> = Vec::with_capacity(pieces.len());
    let mut rest = pieces.into_iter().peekable();

    while let Some(piece) = rest.next() {
        match piece {
            Piece::Common(text) if text.chars().count() < absorb_below => {
                if let Some(Piece::Change { removed, added }) = cleaned.last_mut() {
                    removed.push_str(&text);
                    added.push_str(&text);
                } else if let Some(Piece::Change { removed, added }) = rest.peek_mut() {
                    removed.insert_str(0, &text);
                    added.insert_str(0, &text);
                } else {
                    push_piece(&mut cleaned, Piece::Common(text));
                }
            }
            piece => push_piece(&mut cleaned, piece),
        }
    }
    cleaned
}

fn into_segments(pieces: Vec<Piece>) -> Vec<DiffSegment> {
    let mut segments = Vec::with_capacity(pieces.len() * 2);
    for piece in pieces {
        match piece {
            Piece::Common(text) => push_text(&mut segments, SegmentKind::Common, &text),
            Piece::Change { removed, added } => {
                push_text(&mut segments, SegmentKind::Removed, &removed);
                push_text(&mut segments, SegmentKind::Added, &added);
            }
        }
    }
    segments
}
