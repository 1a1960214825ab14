//! Visual Line Index
//!
//! Converts between absolute character offsets into the content and `(line, column)` positions
//! in the visual line table produced by [`crate::layout::wrap`].
//!
//! Every boundary between two visual lines stands for exactly one content character (a `'\n'`
//! paragraph break or the space consumed by a soft wrap), so an offset is always
//!
//! ```text
//! absolute = sum(len(lines[i]) + 1 for i in 0..line) + column
//! ```
//!
//! These functions are the only place offset arithmetic happens; the engine routes all caret
//! moves through them.

use std::cmp::Ordering;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Caret position, in both visual coordinates and content offset.
///
/// `line` and `column` index the line table; `absolute` indexes the content. All three count
/// `char`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based visual line index.
    pub line: usize,
    /// Zero-based column in characters within the visual line.
    pub column: usize,
    /// Zero-based character offset into the content.
    pub absolute: usize,
}

impl Position {
    /// Create a position from its three coordinates.
    pub fn new(line: usize, column: usize, absolute: usize) -> Self {
        Self {
            line,
            column,
            absolute,
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.absolute.cmp(&other.absolute)
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Map an absolute offset onto the line table.
///
/// An offset that sits exactly at a line end maps to that line's end (`column == len`); the
/// next offset maps to column 0 of the following line. Offsets past the content end clamp to
/// the last line's end.
pub fn position_from_absolute<S: AsRef<str>>(lines: &[S], absolute: usize) -> Position {
    let mut line_start = 0usize;

    for (line, text) in lines.iter().enumerate() {
        let len = char_len(text.as_ref());
        if absolute <= line_start + len {
            return Position::new(line, absolute - line_start, absolute);
        }
        line_start += len + 1;
    }

    // Past the end: clamp to the end of the last line.
    match lines.last() {
        Some(last) => {
            let len = char_len(last.as_ref());
            let line_start = line_start.saturating_sub(len + 1);
            Position::new(lines.len() - 1, len, line_start + len)
        }
        None => Position::default(),
    }
}

/// Map a `(line, column)` pair onto an absolute offset.
///
/// `line` is clamped to the table and `column` to the line length.
pub fn absolute_from_position<S: AsRef<str>>(lines: &[S], line: usize, column: usize) -> usize {
    if lines.is_empty() {
        return 0;
    }

    let line = line.min(lines.len() - 1);
    let preceding: usize = lines[..line]
        .iter()
        .map(|text| char_len(text.as_ref()) + 1)
        .sum();

    preceding + column.min(char_len(lines[line].as_ref()))
}

/// The visual line table derived from the content.
///
/// Never mutated in place. Clones share the lines; an edit builds a new table with
/// [`LineTable::replace_lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable {
    lines: Arc<Vec<String>>,
}

impl LineTable {
    /// Wrap a table around wrapped lines. An empty vector is normalized to a single empty line.
    pub fn new(mut lines: Vec<String>) -> Self {
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines: Arc::new(lines),
        }
    }

    /// New table with the visual lines in `range` replaced by `replacement`.
    ///
    /// `range` is clamped to the table; the result is normalized like [`LineTable::new`].
    pub fn replace_lines(&self, range: RangeInclusive<usize>, replacement: Vec<String>) -> Self {
        let last = (*range.end()).min(self.lines.len() - 1);
        let first = (*range.start()).min(last);

        let kept = self.lines.len() - (last - first + 1);
        let mut lines = Vec::with_capacity(kept + replacement.len());
        lines.extend_from_slice(&self.lines[..first]);
        lines.extend(replacement);
        lines.extend_from_slice(&self.lines[last + 1..]);
        Self::new(lines)
    }

    /// All visual lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of visual lines (always at least 1).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always `false`: a table has at least one (possibly empty) line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of a visual line.
    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    /// Length of a visual line in characters (0 for out-of-range lines).
    pub fn line_len(&self, line: usize) -> usize {
        self.line(line).map(char_len).unwrap_or(0)
    }

    /// Whether a visual line is blank (empty).
    pub fn is_blank(&self, line: usize) -> bool {
        self.line(line).is_some_and(str::is_empty)
    }

    /// Number of content characters covered by the table, separators included.
    pub fn total_len(&self) -> usize {
        let text: usize = self.lines.iter().map(|l| char_len(l)).sum();
        text + self.lines.len() - 1
    }

    /// Position of the document end.
    pub fn last_position(&self) -> Position {
        let line = self.lines.len() - 1;
        let column = self.line_len(line);
        Position::new(line, column, self.total_len())
    }

    /// See [`position_from_absolute`].
    pub fn position_from_absolute(&self, absolute: usize) -> Position {
        position_from_absolute(&self.lines[..], absolute)
    }

    /// See [`absolute_from_position`]. The returned position has clamped coordinates.
    pub fn position_from_line_column(&self, line: usize, column: usize) -> Position {
        let line = line.min(self.lines.len() - 1);
        let column = column.min(self.line_len(line));
        Position::new(line, column, absolute_from_position(&self.lines[..], line, column))
    }

    /// Lines that start a paragraph: line 0, and every non-blank line that follows a blank one.
    pub fn paragraph_starts(&self) -> Vec<usize> {
        let mut starts = vec![0];
        for line in 1..self.lines.len() {
            if !self.is_blank(line) && self.is_blank(line - 1) {
                starts.push(line);
            }
        }
        starts
    }
}

impl Default for LineTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
