//! Candidate ordering before label assignment.
//!
//! The label tree hands its shortest labels to the front of the candidate
//! list, so the ranker's job is to decide who stands at the front.

use crate::candidate::Candidate;
use crate::view::TextView;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Upper bound for the caret quantization bin width.
pub const MAX_CARET_SENSITIVITY: usize = (i32::MAX >> 2) as usize;

/// How labels are distributed over the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingMode {
    /// Scan order: left to right, top to bottom
    #[default]
    Sequential,
    /// Nearest to the caret first, so nearby targets get the shortest labels
    CaretRelative,
}

/// Caret position used for distance computation.
///
/// A caret outside `range` (inclusive of `range.end`) is moved to the start
/// of the line holding the middle of the range. The result is then snapped
/// into bins of `sensitivity + 1` characters so small caret movements do not
/// reshuffle the labels.
pub fn effective_caret<V: TextView + ?Sized>(
    view: &V,
    range: &Range<usize>,
    sensitivity: usize,
) -> usize {
    let mut caret = view.caret();
    if caret < range.start || caret > range.end {
        let middle = range.start + range.end.saturating_sub(range.start) / 2;
        caret = view.line_start(middle);
    }

    let bin = sensitivity.min(MAX_CARET_SENSITIVITY) + 1;
    (caret / bin) * bin + bin / 2
}

/// Order `candidates` for label assignment.
///
/// For [`RankingMode::CaretRelative`] every candidate gets its
/// `distance_to_caret` and the list is stably sorted nearest first.
pub fn rank(mut candidates: Vec<Candidate>, mode: RankingMode, caret: usize) -> Vec<Candidate> {
    match mode {
        RankingMode::Sequential => candidates,
        RankingMode::CaretRelative => {
            for candidate in &mut candidates {
                candidate.distance_to_caret = candidate.position.abs_diff(caret);
            }
            candidates.sort_by_key(|c| c.distance_to_caret);
            candidates
        }
    }
}
