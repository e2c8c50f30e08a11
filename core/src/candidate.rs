//! Jump target candidates produced by the scanner.

use crate::view::Rect;
use serde::{Deserialize, Serialize};

/// A text position eligible to receive a jump label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Absolute character offset in the buffer
    pub position: usize,
    /// The character after `position` is a control character (typically a
    /// line terminator) and the character at `position` is not
    pub next_is_control: bool,
    /// Distance to the effective caret; only filled in by caret-relative
    /// ranking
    pub distance_to_caret: usize,
    /// Where the view renders the character at `position`
    pub bounds: Rect,
}

impl Candidate {
    pub fn new(position: usize, next_is_control: bool, bounds: Rect) -> Self {
        Candidate {
            position,
            next_is_control,
            distance_to_caret: 0,
            bounds,
        }
    }
}
