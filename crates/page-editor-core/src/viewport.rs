//! Scroll window tracking.
//!
//! The window is the contiguous range of visual lines the host renders. It is nudged by one
//! line when the caret touches an edge and only recomputed when the caret leaves it entirely,
//! which keeps redraws small on ordinary typing and arrow-key movement.

use crate::config::SCROLL_CONTEXT_LINES;
use std::ops::Range;

/// First rendered visual line plus the window height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollWindow {
    /// First visual line currently rendered.
    pub draw_from_line: usize,
    /// Number of visual lines rendered (at least 1).
    pub visible_line_count: usize,
}

impl ScrollWindow {
    /// Create a window starting at line 0.
    pub fn new(visible_line_count: usize) -> Self {
        Self {
            draw_from_line: 0,
            visible_line_count: visible_line_count.max(1),
        }
    }

    /// Visible line range (may extend past the last line of a short document).
    pub fn visible_range(&self) -> Range<usize> {
        self.draw_from_line..self.draw_from_line + self.visible_line_count
    }

    /// Whether `line` is inside the window.
    pub fn contains(&self, line: usize) -> bool {
        self.visible_range().contains(&line)
    }

    /// Window after the caret moved to `caret_line`.
    ///
    /// - caret outside the window: jump so that up to [`SCROLL_CONTEXT_LINES`] lines precede it
    /// - caret on the bottom edge: scroll forward by one
    /// - caret moved up onto the top edge (and not at the top of the document): scroll back by one
    ///
    /// `previous_line` is the caret line before the command. A caret that merely rests on the
    /// top edge, e.g. right after a forward nudge in a two-line window, leaves the window alone.
    pub fn follow_caret(self, previous_line: usize, caret_line: usize) -> Self {
        let height = self.visible_line_count;
        let from = self.draw_from_line;

        let draw_from_line = if !self.contains(caret_line) {
            let context = SCROLL_CONTEXT_LINES.min(height - 1);
            let from = caret_line.saturating_sub(context);
            log::debug!("scroll window jump: {} -> {}", self.draw_from_line, from);
            from
        } else if height > 1 && caret_line == from + height - 1 {
            from + 1
        } else if height > 1 && caret_line == from && from > 0 && caret_line < previous_line {
            from - 1
        } else {
            from
        };

        Self {
            draw_from_line,
            ..self
        }
    }
}
