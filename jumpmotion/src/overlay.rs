//! Text rendering of the label overlay and machine-readable reports.
//!
//! Labels are drawn over the characters they point at, the way an editor
//! adornment covers the glyph of the jump target.

use jumpmotion_core::{Color, JumpSession, JumpTarget, LabelEntity, StrView};
use serde::Serialize;

/// One visible label, as printed by `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetReport {
    pub label: String,
    pub remaining: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub rendered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub consumed: String,
    pub unrendered: usize,
    pub targets: Vec<TargetReport>,
}

/// Where the caret lands after a jump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JumpReport {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    /// Caret offset after the move, one past `offset` when a selection is
    /// extended onto a line-end target
    pub caret: usize,
}

pub fn session_report(view: &StrView, session: &JumpSession) -> SessionReport {
    let consumed = session.consumed();
    let targets = session
        .associations()
        .iter()
        .map(|a| {
            let (line, column) = view.line_col(a.position);
            TargetReport {
                label: a.label.clone(),
                remaining: a.remaining(consumed).to_string(),
                offset: a.position,
                line,
                column,
                rendered: a.handle.is_some(),
            }
        })
        .collect();
    SessionReport {
        consumed: consumed.to_string(),
        unrendered: session.unrendered(),
        targets,
    }
}

pub fn jump_report(view: &StrView, target: JumpTarget, extend_selection: bool) -> JumpReport {
    let (line, column) = view.line_col(target.position);
    JumpReport {
        offset: target.position,
        line,
        column,
        caret: target.caret_position(extend_selection),
    }
}

/// Render the visible lines of `view` with `labels` drawn on top.
///
/// With `ansi` set, labels carry 24-bit terminal colours from their entity.
pub fn render_overlay<'a, I>(view: &StrView, labels: I, ansi: bool) -> Vec<String>
where
    I: IntoIterator<Item = &'a LabelEntity>,
{
    let (cell_width, cell_height) = view.cell_size();
    let lines = view.visible_line_indices();
    let mut rows: Vec<Vec<(usize, &LabelEntity)>> = vec![Vec::new(); lines.len()];
    for entity in labels {
        let row = (entity.bounds.y / cell_height).round() as usize;
        let col = (entity.bounds.x / cell_width).round() as usize;
        if let Some(row) = rows.get_mut(row) {
            row.push((col, entity));
        }
    }

    lines
        .zip(rows)
        .map(|(line, mut labels)| {
            labels.sort_by_key(|(col, _)| *col);
            draw_line(&view.line_text(line), &labels, ansi)
        })
        .collect()
}

fn draw_line(text: &str, labels: &[(usize, &LabelEntity)], ansi: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for &(col, entity) in labels {
        let start = col.max(cursor);
        let skip = start - col;
        let label: String = entity.text.chars().skip(skip).collect();
        if label.is_empty() {
            continue;
        }
        push_text(&mut out, &chars, cursor, start);
        if ansi {
            out.push_str(&paint(&label, entity.colors.foreground, entity.colors.background));
        } else {
            out.push_str(&label);
        }
        cursor = start + label.chars().count();
    }
    if cursor < chars.len() {
        out.extend(&chars[cursor..]);
    }
    out
}

/// Append `chars[from..to]`, padding with spaces past the end of the line.
fn push_text(out: &mut String, chars: &[char], from: usize, to: usize) {
    for i in from..to {
        out.push(match chars.get(i) {
            Some('\t') | None => ' ',
            Some(&ch) => ch,
        });
    }
}

fn paint(text: &str, fg: Color, bg: Color) -> String {
    format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}\x1b[0m",
        fg.r, fg.g, fg.b, bg.r, bg.g, bg.b, text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jumpmotion_core::{LabelColors, Rect};

    fn entity(text: &str, col: usize, row: usize) -> LabelEntity {
        LabelEntity {
            text: text.to_string(),
            bounds: Rect::new(col as f64, row as f64, 1.0, 1.0),
            colors: LabelColors {
                foreground: Color::rgb(0, 0, 0),
                background: Color::rgb(255, 255, 255),
            },
            font_size: 14.0,
        }
    }

    #[test]
    fn test_labels_cover_target_glyphs() {
        let view = StrView::new("one two\nthree");
        let labels = [entity("a", 0, 0), entity("bc", 4, 0), entity("d", 0, 1)];
        assert_eq!(
            render_overlay(&view, labels.iter(), false),
            vec!["ane bco", "dhree"]
        );
    }

    #[test]
    fn test_label_past_line_end_pads() {
        let view = StrView::new("ab");
        let labels = [entity("xyz", 1, 0)];
        assert_eq!(render_overlay(&view, labels.iter(), false), vec!["axyz"]);
    }

    #[test]
    fn test_overlapping_labels_keep_first() {
        let view = StrView::new("abcdef");
        let labels = [entity("xyz", 0, 0), entity("uv", 2, 0)];
        assert_eq!(render_overlay(&view, labels.iter(), false), vec!["xyzvef"]);
    }

    #[test]
    fn test_ansi_paint() {
        let view = StrView::new("ab");
        let labels = [entity("q", 0, 0)];
        let rendered = render_overlay(&view, labels.iter(), true);
        assert_eq!(
            rendered[0],
            "\x1b[38;2;0;0;0m\x1b[48;2;255;255;255mq\x1b[0mb"
        );
    }
}
