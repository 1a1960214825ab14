//! Command Interface Layer
//!
//! Editing and navigation commands, and the pure transition function that applies them.
//!
//! # Overview
//!
//! [`dispatch`] takes the current [`EditorState`] and one [`Command`] and returns a
//! [`Transition`]: the next state, an [`Effect`] tag saying what kind of change happened, and the
//! [`DrawInstruction`]s the renderer needs. Nothing is mutated in place and nothing can fail:
//! commands that cannot apply (backspace at the document start, moving above the first line,
//! ...) come back as [`Effect::Noop`] with the state untouched.
//!
//! # Example
//!
//! ```rust
//! use page_editor_core::{CharCount, Command, DispatchContext, EditorState, Effect, dispatch};
//!
//! let state = EditorState::from_text("ab", 1, 80, 16, &CharCount, 0);
//! let ctx = DispatchContext::new(80, 150, 0, &CharCount);
//!
//! let next = dispatch(&state, Command::InsertNewline, &ctx);
//! assert_eq!(next.state.text(), "a\nb");
//! assert!(matches!(next.effect, Effect::TextChanged { .. }));
//! ```

use crate::draw::{self, DrawInstruction};
use crate::layout::{Measure, wrap};
use crate::line_index::{LineTable, Position};
use crate::state::EditorState;
use ropey::Rope;

/// Editing and navigation commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Insert a character at the caret.
    InsertChar(char),
    /// Delete the character before the caret.
    DeleteBackward,
    /// Delete the word before the caret.
    DeleteWordBackward,
    /// Split the paragraph at the caret.
    InsertNewline,
    /// Caret one visual line up, column clamped.
    MoveLineUp,
    /// Caret one visual line down, column clamped.
    MoveLineDown,
    /// Caret one character left, wrapping to the previous line.
    MoveCharLeft,
    /// Caret one character right, wrapping to the next line.
    MoveCharRight,
    /// Caret to the previous word start (line start on double-press).
    MoveWordLeft,
    /// Caret to the next word end (line end on double-press).
    MoveWordRight,
    /// Caret to the previous paragraph start (document start on double-press).
    MoveParagraphUp,
    /// Caret to the next paragraph start (document end on double-press).
    MoveParagraphDown,
}

impl Command {
    /// Whether the command may change the content.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Command::InsertChar(_)
                | Command::DeleteBackward
                | Command::DeleteWordBackward
                | Command::InsertNewline
        )
    }

    /// Double-press class of the command, if it has one.
    pub fn motion_class(&self) -> Option<MotionClass> {
        match self {
            Command::MoveWordLeft => Some(MotionClass::WordLeft),
            Command::MoveWordRight => Some(MotionClass::WordRight),
            Command::MoveParagraphUp => Some(MotionClass::ParagraphUp),
            Command::MoveParagraphDown => Some(MotionClass::ParagraphDown),
            _ => None,
        }
    }
}

/// Navigation commands that escalate when pressed twice in quick succession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionClass {
    /// Word left, escalating to line start.
    WordLeft,
    /// Word right, escalating to line end.
    WordRight,
    /// Paragraph up, escalating to document start.
    ParagraphUp,
    /// Paragraph down, escalating to document end.
    ParagraphDown,
}

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Content was mutated.
    TextChanged {
        /// Full content after the change (LF line endings).
        content: String,
        /// Caret after the change.
        position: Position,
    },
    /// Only the caret moved.
    PositionChanged {
        /// Caret after the move.
        position: Position,
    },
    /// Nothing happened.
    Noop,
}

impl Effect {
    /// Whether the effect is [`Effect::Noop`].
    pub fn is_noop(&self) -> bool {
        matches!(self, Effect::Noop)
    }

    /// Caret after the dispatch, if it changed.
    pub fn position(&self) -> Option<Position> {
        match self {
            Effect::TextChanged { position, .. } | Effect::PositionChanged { position } => {
                Some(*position)
            }
            Effect::Noop => None,
        }
    }
}

/// Result of applying one command.
#[derive(Debug, Clone)]
pub struct Transition {
    /// State after the command.
    pub state: EditorState,
    /// Effect tag.
    pub effect: Effect,
    /// Repaint instructions (empty for [`Effect::Noop`]).
    pub draw: Vec<DrawInstruction>,
}

/// Everything [`dispatch`] needs besides the state.
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<'a, M: ?Sized> {
    /// Wrap width in measure units.
    pub max_width: usize,
    /// Double-press window.
    pub double_press_threshold_ms: u64,
    /// Clock reading taken at dispatch time.
    pub now_ms: u64,
    /// Width measure used for wrapping.
    pub measure: &'a M,
}

impl<'a, M: Measure + ?Sized> DispatchContext<'a, M> {
    /// Bundle dispatch inputs.
    pub fn new(
        max_width: usize,
        double_press_threshold_ms: u64,
        now_ms: u64,
        measure: &'a M,
    ) -> Self {
        Self {
            max_width,
            double_press_threshold_ms,
            now_ms,
            measure,
        }
    }
}

/// Intermediate outcome of a command handler.
enum Outcome {
    Edit {
        content: Rope,
        absolute: usize,
        splice: Splice,
    },
    Move {
        position: Position,
        motion: Option<MotionClass>,
    },
    Noop,
}

/// Old content range `start..old_end` replaced by `inserted` characters.
#[derive(Debug, Clone, Copy)]
struct Splice {
    start: usize,
    old_end: usize,
    inserted: usize,
}

/// Apply `command` to `state`.
pub fn dispatch<M>(
    state: &EditorState,
    command: Command,
    ctx: &DispatchContext<'_, M>,
) -> Transition
where
    M: Measure + ?Sized,
{
    log::trace!("dispatch {:?} at {:?}", command, state.position());

    let outcome = match command {
        Command::InsertChar(ch) => insert_char(state, ch),
        Command::DeleteBackward => delete_backward(state),
        Command::DeleteWordBackward => delete_word_backward(state),
        Command::InsertNewline => insert_char(state, '\n'),
        Command::MoveLineUp => move_line(state, -1),
        Command::MoveLineDown => move_line(state, 1),
        Command::MoveCharLeft => move_char_left(state),
        Command::MoveCharRight => move_char_right(state),
        Command::MoveWordLeft => {
            move_word_left(state, is_double_press(state, MotionClass::WordLeft, ctx))
        }
        Command::MoveWordRight => {
            move_word_right(state, is_double_press(state, MotionClass::WordRight, ctx))
        }
        Command::MoveParagraphUp => {
            move_paragraph_up(state, is_double_press(state, MotionClass::ParagraphUp, ctx))
        }
        Command::MoveParagraphDown => {
            move_paragraph_down(state, is_double_press(state, MotionClass::ParagraphDown, ctx))
        }
    };

    match outcome {
        Outcome::Edit {
            content,
            absolute,
            splice,
        } => commit_edit(state, content, absolute, splice, ctx),
        Outcome::Move { position, motion } if position != state.position() => {
            commit_move(state, position, motion, ctx)
        }
        Outcome::Move { .. } | Outcome::Noop => noop(state),
    }
}

fn noop(state: &EditorState) -> Transition {
    Transition {
        state: state.clone(),
        effect: Effect::Noop,
        draw: Vec::new(),
    }
}

fn is_double_press<M: ?Sized>(
    state: &EditorState,
    class: MotionClass,
    ctx: &DispatchContext<'_, M>,
) -> bool {
    state.last_motion() == Some(class)
        && ctx.now_ms.saturating_sub(state.last_positioning_ms()) < ctx.double_press_threshold_ms
}

fn commit_edit<M>(
    state: &EditorState,
    content: Rope,
    absolute: usize,
    splice: Splice,
    ctx: &DispatchContext<'_, M>,
) -> Transition
where
    M: Measure + ?Sized,
{
    let lines = rewrap_paragraphs(state, &content, splice, ctx);
    debug_assert_eq!(lines.total_len(), content.len_chars());

    let position = lines.position_from_absolute(absolute);
    let window = state
        .scroll_window()
        .follow_caret(state.position().line, position.line);
    let draw = draw::diff_lines(state.lines(), &lines, state.scroll_window(), window, position);

    let next = state
        .clone()
        .with_content(content, lines)
        .with_position(position, None, ctx.now_ms)
        .with_scroll_window(window);
    let text = next.text();

    Transition {
        state: next,
        effect: Effect::TextChanged {
            content: text,
            position,
        },
        draw,
    }
}

fn commit_move<M: ?Sized>(
    state: &EditorState,
    position: Position,
    motion: Option<MotionClass>,
    ctx: &DispatchContext<'_, M>,
) -> Transition {
    let window = state
        .scroll_window()
        .follow_caret(state.position().line, position.line);
    let draw = draw::caret_moved(
        state.lines(),
        state.position(),
        state.scroll_window(),
        window,
        position,
    );

    let next = state
        .clone()
        .with_position(position, motion, ctx.now_ms)
        .with_scroll_window(window);

    Transition {
        state: next,
        effect: Effect::PositionChanged { position },
        draw,
    }
}

/// Re-wrap the paragraphs an edit touched and splice them into the old table.
///
/// Every other paragraph wraps independently of the edit, so its visual lines are reused.
fn rewrap_paragraphs<M>(
    state: &EditorState,
    content: &Rope,
    splice: Splice,
    ctx: &DispatchContext<'_, M>,
) -> LineTable
where
    M: Measure + ?Sized,
{
    let old = state.content();
    let para_start = paragraph_start(old, splice.start);
    let para_end = paragraph_end(old, splice.old_end);

    // A paragraph's first line starts at `para_start` and its last line ends at `para_end`.
    let first = state.lines().position_from_absolute(para_start).line;
    let last = state.lines().position_from_absolute(para_end).line;

    let new_end = para_end - (splice.old_end - splice.start) + splice.inserted;
    let text = content.slice(para_start..new_end).to_string();
    let wrapped = wrap(&text, ctx.max_width, ctx.measure);

    if wrapped.len() != last - first + 1 {
        log::debug!(
            "reflow lines {}..={}: {} -> {} visual lines",
            first,
            last,
            last - first + 1,
            wrapped.len()
        );
    }

    state.lines().replace_lines(first..=last, wrapped)
}

fn paragraph_start(content: &Rope, mut i: usize) -> usize {
    while i > 0 && content.char(i - 1) != '\n' {
        i -= 1;
    }
    i
}

fn paragraph_end(content: &Rope, mut i: usize) -> usize {
    let len = content.len_chars();
    while i < len && content.char(i) != '\n' {
        i += 1;
    }
    i
}

fn is_boundary(ch: char) -> bool {
    ch.is_whitespace()
}

/// Whitespace inside a paragraph.
fn is_blank(ch: char) -> bool {
    ch != '\n' && ch.is_whitespace()
}

fn insert_char(state: &EditorState, ch: char) -> Outcome {
    if ch.is_control() && ch != '\n' && ch != '\t' {
        return Outcome::Noop;
    }

    let absolute = state.position().absolute;
    let mut content = state.content().clone();
    content.insert_char(absolute, ch);
    Outcome::Edit {
        content,
        absolute: absolute + 1,
        splice: Splice {
            start: absolute,
            old_end: absolute,
            inserted: 1,
        },
    }
}

fn remove(state: &EditorState, start: usize, end: usize) -> Outcome {
    let mut content = state.content().clone();
    content.remove(start..end);
    Outcome::Edit {
        content,
        absolute: start,
        splice: Splice {
            start,
            old_end: end,
            inserted: 0,
        },
    }
}

fn delete_backward(state: &EditorState) -> Outcome {
    let absolute = state.position().absolute;
    if absolute == 0 {
        return Outcome::Noop;
    }

    remove(state, absolute - 1, absolute)
}

/// Delete back over a run of blanks and the word before it, without crossing a paragraph break.
/// Right after a `'\n'` the break itself is deleted, joining the paragraphs.
fn delete_word_backward(state: &EditorState) -> Outcome {
    let absolute = state.position().absolute;
    if absolute == 0 {
        return Outcome::Noop;
    }

    let content = state.content();
    let mut start = absolute;
    while start > 0 && is_blank(content.char(start - 1)) {
        start -= 1;
    }
    while start > 0 && !is_boundary(content.char(start - 1)) {
        start -= 1;
    }

    if start == absolute {
        return delete_backward(state);
    }
    remove(state, start, absolute)
}

fn move_line(state: &EditorState, delta: isize) -> Outcome {
    let Position { line, column, .. } = state.position();
    let target = match line.checked_add_signed(delta) {
        Some(target) if target < state.lines().len() => target,
        _ => return Outcome::Noop,
    };

    Outcome::Move {
        position: state.lines().position_from_line_column(target, column),
        motion: None,
    }
}

fn move_char_left(state: &EditorState) -> Outcome {
    let absolute = state.position().absolute;
    if absolute == 0 {
        return Outcome::Noop;
    }

    Outcome::Move {
        position: state.lines().position_from_absolute(absolute - 1),
        motion: None,
    }
}

fn move_char_right(state: &EditorState) -> Outcome {
    let absolute = state.position().absolute;
    if absolute >= state.lines().total_len() {
        return Outcome::Noop;
    }

    Outcome::Move {
        position: state.lines().position_from_absolute(absolute + 1),
        motion: None,
    }
}

fn move_word_left(state: &EditorState, escalate: bool) -> Outcome {
    let position = state.position();
    let lines = state.lines();

    let target = if escalate {
        lines.position_from_line_column(position.line, 0)
    } else {
        // Back to the whitespace before the caret's word, then over it and the previous word.
        let content = state.content();
        let mut i = position.absolute;
        while i > 0 && !is_boundary(content.char(i - 1)) {
            i -= 1;
        }
        if i > 0 {
            while i > 0 && is_boundary(content.char(i - 1)) {
                i -= 1;
            }
            while i > 0 && !is_boundary(content.char(i - 1)) {
                i -= 1;
            }
        }
        lines.position_from_absolute(i)
    };

    Outcome::Move {
        position: target,
        motion: Some(MotionClass::WordLeft),
    }
}

fn move_word_right(state: &EditorState, escalate: bool) -> Outcome {
    let position = state.position();
    let lines = state.lines();

    let target = if escalate {
        lines.position_from_line_column(position.line, usize::MAX)
    } else {
        let content = state.content();
        let len = content.len_chars();
        let mut i = position.absolute;
        while i < len && is_boundary(content.char(i)) {
            i += 1;
        }
        while i < len && !is_boundary(content.char(i)) {
            i += 1;
        }
        lines.position_from_absolute(i)
    };

    Outcome::Move {
        position: target,
        motion: Some(MotionClass::WordRight),
    }
}

fn move_paragraph_up(state: &EditorState, escalate: bool) -> Outcome {
    let position = state.position();
    let lines = state.lines();

    let target = if escalate {
        Some(0)
    } else {
        lines
            .paragraph_starts()
            .into_iter()
            .rev()
            .find(|&start| {
                start < position.line || (start == position.line && position.column > 0)
            })
    };

    match target {
        Some(line) => Outcome::Move {
            position: lines.position_from_line_column(line, 0),
            motion: Some(MotionClass::ParagraphUp),
        },
        None => Outcome::Noop,
    }
}

fn move_paragraph_down(state: &EditorState, escalate: bool) -> Outcome {
    let position = state.position();
    let lines = state.lines();

    let next_start = if escalate {
        None
    } else {
        lines
            .paragraph_starts()
            .into_iter()
            .find(|&start| start > position.line)
    };

    let target = match next_start {
        Some(line) => lines.position_from_line_column(line, 0),
        None => lines.last_position(),
    };

    Outcome::Move {
        position: target,
        motion: Some(MotionClass::ParagraphDown),
    }
}
