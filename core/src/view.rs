//! Text view abstraction consumed by the scanner and ranker.
//!
//! The host editor implements [`TextView`] over its own buffer and layout.
//! [`StrView`] is a self-contained implementation over an in-memory string
//! with a monospace grid, used by the terminal front end and the tests.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Screen-space rectangle of a rendered character.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// What the jump engine needs to know about an editor view.
///
/// Positions are absolute character offsets into the buffer.
pub trait TextView {
    /// Character range currently visible, start inclusive, end exclusive.
    fn visible_range(&self) -> Range<usize>;

    /// Current caret offset. May lie outside the visible range.
    fn caret(&self) -> usize;

    /// Character at `pos`, or `None` past the end of the buffer.
    fn char_at(&self, pos: usize) -> Option<char>;

    /// Geometry of the character at `pos`, or `None` when it is not
    /// rendered (folded region, scrolled out, ...).
    fn char_bounds(&self, pos: usize) -> Option<Rect>;

    /// Offset of the first character of the line containing `pos`.
    fn line_start(&self, pos: usize) -> usize;
}

/// In-memory view over a string laid out on a fixed-size character grid.
#[derive(Debug, Clone)]
pub struct StrView {
    chars: Vec<char>,
    /// Char offset of the first character of every line
    line_starts: Vec<usize>,
    first_line: usize,
    visible_lines: usize,
    caret: usize,
    /// Folded line ranges (line indices)
    folded: Vec<Range<usize>>,
    cell_width: f64,
    cell_height: f64,
}

impl StrView {
    /// Create a view showing the whole text with the caret at offset 0.
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut line_starts = vec![0];
        for (i, &ch) in chars.iter().enumerate() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        let visible_lines = line_starts.len();
        Self {
            chars,
            line_starts,
            first_line: 0,
            visible_lines,
            caret: 0,
            folded: Vec::new(),
            cell_width: 1.0,
            cell_height: 1.0,
        }
    }

    /// Restrict the visible window to `lines` lines starting at `first_line`.
    pub fn with_viewport(mut self, first_line: usize, lines: usize) -> Self {
        self.first_line = first_line.min(self.line_starts.len().saturating_sub(1));
        self.visible_lines = lines.max(1);
        self
    }

    pub fn with_caret(mut self, caret: usize) -> Self {
        self.caret = caret;
        self
    }

    pub fn with_cell_size(mut self, width: f64, height: f64) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    /// Fold the given lines: their characters stay in the buffer but have no
    /// geometry.
    pub fn fold(mut self, lines: Range<usize>) -> Self {
        self.folded.push(lines);
        self
    }

    /// Width and height of one character cell.
    pub fn cell_size(&self) -> (f64, f64) {
        (self.cell_width, self.cell_height)
    }

    /// First visible line.
    pub fn first_line(&self) -> usize {
        self.first_line
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret;
    }

    /// Number of characters in the buffer.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Index of the line containing `pos`.
    pub fn line_of(&self, pos: usize) -> usize {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        }
    }

    /// Zero-based `(line, column)` of `pos`.
    pub fn line_col(&self, pos: usize) -> (usize, usize) {
        let line = self.line_of(pos);
        (line, pos - self.line_starts[line])
    }

    /// Offset just past the last content character of `line`, excluding the
    /// line terminator.
    pub fn line_end(&self, line: usize) -> usize {
        match self.line_starts.get(line + 1) {
            Some(&next) => {
                let mut end = next - 1; // '\n'
                if end > self.line_starts[line] && self.chars[end - 1] == '\r' {
                    end -= 1;
                }
                end
            }
            None => self.chars.len(),
        }
    }

    /// Text of `line` without its terminator.
    pub fn line_text(&self, line: usize) -> String {
        self.chars[self.line_starts[line]..self.line_end(line)]
            .iter()
            .collect()
    }

    /// Visible line indices, in order.
    pub fn visible_line_indices(&self) -> Range<usize> {
        let last = (self.first_line + self.visible_lines).min(self.line_starts.len());
        self.first_line..last
    }

    fn is_folded(&self, line: usize) -> bool {
        self.folded.iter().any(|r| r.contains(&line))
    }
}

impl TextView for StrView {
    fn visible_range(&self) -> Range<usize> {
        let lines = self.visible_line_indices();
        if lines.is_empty() {
            return 0..0;
        }
        self.line_starts[lines.start]..self.line_end(lines.end - 1)
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    fn char_bounds(&self, pos: usize) -> Option<Rect> {
        if !self.visible_range().contains(&pos) {
            return None;
        }
        let (line, col) = self.line_col(pos);
        if self.is_folded(line) {
            return None;
        }
        let row = line - self.first_line;
        Some(Rect::new(
            col as f64 * self.cell_width,
            row as f64 * self.cell_height,
            self.cell_width,
            self.cell_height,
        ))
    }

    fn line_start(&self, pos: usize) -> usize {
        self.line_starts[self.line_of(pos)]
    }
}
