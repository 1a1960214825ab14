//! Drawing instructions handed to the host renderer.
//!
//! The engine never paints. After each dispatch it describes the smallest repaint it can infer
//! from the old and new line tables; the renderer applies the instructions in order.

use crate::line_index::{LineTable, Position};
use crate::viewport::ScrollWindow;

/// One repaint step. Line numbers are visual line indices into the whole line table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawInstruction {
    /// Repaint a single line.
    UpdateLine {
        /// Visual line index.
        line: usize,
        /// New text of the line.
        text: String,
    },
    /// Clear from `line` to the bottom of the window and paint `lines` starting there.
    RedrawFrom {
        /// First visual line to repaint.
        line: usize,
        /// Lines from `line` to the bottom of the scroll window.
        lines: Vec<String>,
    },
    /// Place the caret.
    SetCaret {
        /// Visual line index.
        line: usize,
        /// Column in characters.
        column: usize,
    },
}

impl DrawInstruction {
    /// Caret placement for a position.
    pub fn caret(position: Position) -> Self {
        DrawInstruction::SetCaret {
            line: position.line,
            column: position.column,
        }
    }
}

/// Lines from `from` to the bottom of `window`.
pub fn redraw_from(lines: &LineTable, from: usize, window: ScrollWindow) -> DrawInstruction {
    let end = window.visible_range().end.min(lines.len());
    let start = from.min(end);
    DrawInstruction::RedrawFrom {
        line: start,
        lines: lines.lines()[start..end].to_vec(),
    }
}

/// Full window repaint plus caret, used at mount.
pub fn full_redraw(
    lines: &LineTable,
    window: ScrollWindow,
    caret: Position,
) -> Vec<DrawInstruction> {
    vec![
        redraw_from(lines, window.draw_from_line, window),
        DrawInstruction::caret(caret),
    ]
}

/// Instructions for a content change.
///
/// A same-length table with a single differing line gets an `UpdateLine`; anything else is
/// repainted from the first differing line down.
pub fn diff_lines(
    old: &LineTable,
    new: &LineTable,
    old_window: ScrollWindow,
    new_window: ScrollWindow,
    caret: Position,
) -> Vec<DrawInstruction> {
    let mut out = Vec::with_capacity(2);

    if old_window.draw_from_line != new_window.draw_from_line {
        out.push(redraw_from(new, new_window.draw_from_line, new_window));
        out.push(DrawInstruction::caret(caret));
        return out;
    }

    let first_diff = old
        .lines()
        .iter()
        .zip(new.lines())
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| old.len().min(new.len()));

    let single_line = old.len() == new.len()
        && first_diff < new.len()
        && old.lines()[first_diff + 1..]
            .iter()
            .zip(&new.lines()[first_diff + 1..])
            .all(|(a, b)| a == b);

    if single_line {
        if new_window.contains(first_diff) {
            out.push(DrawInstruction::UpdateLine {
                line: first_diff,
                text: new.lines()[first_diff].clone(),
            });
        }
    } else if first_diff < new_window.visible_range().end {
        let from = first_diff.max(new_window.draw_from_line);
        out.push(redraw_from(new, from, new_window));
    }

    out.push(DrawInstruction::caret(caret));
    out
}

/// Instructions for a caret move that left the content unchanged.
pub fn caret_moved(
    lines: &LineTable,
    previous: Position,
    old_window: ScrollWindow,
    new_window: ScrollWindow,
    caret: Position,
) -> Vec<DrawInstruction> {
    let mut out = Vec::with_capacity(2);

    if old_window.draw_from_line != new_window.draw_from_line {
        out.push(redraw_from(lines, new_window.draw_from_line, new_window));
    } else if previous.line != caret.line && new_window.contains(previous.line) {
        // Repainting the line the caret left erases the old caret.
        if let Some(text) = lines.line(previous.line) {
            out.push(DrawInstruction::UpdateLine {
                line: previous.line,
                text: text.to_string(),
            });
        }
    }

    out.push(DrawInstruction::caret(caret));
    out
}
