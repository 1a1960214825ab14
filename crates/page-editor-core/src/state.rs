//! Editor State and Engine
//!
//! [`EditorState`] is the immutable snapshot the pure [`dispatch`] function works on.
//! [`EditEngine`] owns the current snapshot together with the injected measure and clock, and
//! fans every dispatch result out to the host callbacks.
//!
//! # Overview
//!
//! Data flows one way per event:
//!
//! ```text
//! key event -> Command -> EditEngine::dispatch -> { state, effect, draw } -> callbacks
//! ```
//!
//! - draw callbacks receive every [`DrawInstruction`]
//! - change callbacks receive the full text once per committed mutation, never for navigation
//! - position callbacks receive the caret after every successful edit or move
//!
//! # Example
//!
//! ```rust
//! use page_editor_core::{Command, EditEngine, EditorConfig};
//! use std::sync::{Arc, Mutex};
//!
//! let mut engine = EditEngine::new(EditorConfig::new("ab").with_max_width(40)).unwrap();
//!
//! let saved = Arc::new(Mutex::new(Vec::new()));
//! let sink = saved.clone();
//! engine.on_change(move |text| sink.lock().unwrap().push(text.to_string()));
//!
//! engine.dispatch(Command::MoveCharRight);
//! engine.dispatch(Command::InsertNewline);
//!
//! assert_eq!(engine.text(), "a\nb");
//! assert_eq!(*saved.lock().unwrap(), vec!["a\nb".to_string()]);
//! ```

use crate::clock::{Clock, MonotonicClock};
use crate::commands::{Command, DispatchContext, Effect, MotionClass, dispatch};
use crate::config::{CaretSpec, ConfigError, EditorConfig};
use crate::draw::{self, DrawInstruction};
use crate::input::{KeyEvent, command_for_key};
use crate::layout::{CharCount, Measure, wrap};
use crate::line_ending::LineEnding;
use crate::line_index::{LineTable, Position};
use crate::viewport::ScrollWindow;
use ropey::Rope;

/// Snapshot of everything the engine tracks.
///
/// The line table and position are always derived from the content; the builder-style
/// `with_*` methods used by [`dispatch`] keep them in step.
#[derive(Debug, Clone)]
pub struct EditorState {
    content: Rope,
    lines: LineTable,
    position: Position,
    last_positioning_ms: u64,
    last_motion: Option<MotionClass>,
    window: ScrollWindow,
}

impl EditorState {
    /// Build a state from LF-normalized text with the caret at a character offset.
    pub fn from_text<M>(
        text: &str,
        absolute: usize,
        max_width: usize,
        visible_line_count: usize,
        measure: &M,
        now_ms: u64,
    ) -> Self
    where
        M: Measure + ?Sized,
    {
        let lines = LineTable::new(wrap(text, max_width, measure));
        let position = lines.position_from_absolute(absolute);
        let window =
            ScrollWindow::new(visible_line_count).follow_caret(position.line, position.line);

        Self {
            content: Rope::from_str(text),
            lines,
            position,
            last_positioning_ms: now_ms,
            last_motion: None,
            window,
        }
    }

    /// Document content.
    pub fn content(&self) -> &Rope {
        &self.content
    }

    /// Document content as a `String` (LF line endings).
    pub fn text(&self) -> String {
        self.content.to_string()
    }

    /// Visual line table.
    pub fn lines(&self) -> &LineTable {
        &self.lines
    }

    /// Caret.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Clock reading of the last successful caret move.
    pub fn last_positioning_ms(&self) -> u64 {
        self.last_positioning_ms
    }

    /// Double-press class of the last successful caret move, if it had one.
    pub fn last_motion(&self) -> Option<MotionClass> {
        self.last_motion
    }

    /// Current scroll window.
    pub fn scroll_window(&self) -> ScrollWindow {
        self.window
    }

    pub(crate) fn with_content(mut self, content: Rope, lines: LineTable) -> Self {
        self.content = content;
        self.lines = lines;
        self
    }

    pub(crate) fn with_position(
        mut self,
        position: Position,
        motion: Option<MotionClass>,
        now_ms: u64,
    ) -> Self {
        debug_assert!(position.line < self.lines.len());
        debug_assert!(position.column <= self.lines.line_len(position.line));
        self.position = position;
        self.last_motion = motion;
        self.last_positioning_ms = now_ms;
        self
    }

    pub(crate) fn with_scroll_window(mut self, window: ScrollWindow) -> Self {
        self.window = window;
        self
    }

    /// Re-wrap at a new width, keeping the caret on the same content offset.
    pub(crate) fn rewrap<M>(mut self, max_width: usize, measure: &M) -> Self
    where
        M: Measure + ?Sized,
    {
        let previous_line = self.position.line;
        self.lines = LineTable::new(wrap(&self.content.to_string(), max_width, measure));
        self.position = self.lines.position_from_absolute(self.position.absolute);
        self.window = self.window.follow_caret(previous_line, self.position.line);
        self
    }
}

/// Draw instruction callback function type
pub type DrawCallback = Box<dyn FnMut(&DrawInstruction) + Send>;

/// Content change callback function type
pub type ChangeCallback = Box<dyn FnMut(&str) + Send>;

/// Caret change callback function type
pub type PositionCallback = Box<dyn FnMut(Position) + Send>;

/// Editor engine
///
/// `EditEngine` owns the document for the lifetime of an editor mount. Hosts feed it commands
/// (or raw key events through [`handle_key`](EditEngine::handle_key)) and observe it through
/// callbacks; nothing outside the engine mutates the content.
///
/// The measure `M` and clock `C` are injected so hosts can wrap by pixel width and tests can
/// drive time by hand.
pub struct EditEngine<M = CharCount, C = MonotonicClock> {
    state: EditorState,
    max_width: usize,
    double_press_threshold_ms: u64,
    measure: M,
    clock: C,
    line_ending: LineEnding,
    /// Number of committed content mutations.
    version: u64,
    draw_callbacks: Vec<DrawCallback>,
    change_callbacks: Vec<ChangeCallback>,
    position_callbacks: Vec<PositionCallback>,
}

impl EditEngine {
    /// Create an engine that wraps by character count and reads the monotonic clock.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        Self::with_measure_and_clock(config, CharCount, MonotonicClock::new())
    }
}

impl<M, C> EditEngine<M, C>
where
    M: Measure,
    C: Clock,
{
    /// Create an engine with an explicit measure and clock.
    pub fn with_measure_and_clock(
        config: EditorConfig,
        measure: M,
        clock: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let (line_ending, text) = LineEnding::split_source(&config.initial_content);

        let lines = LineTable::new(wrap(&text, config.max_width, &measure));
        let absolute = match config.initial_position {
            CaretSpec::Absolute { absolute } => absolute,
            CaretSpec::LineColumn { line, column } => {
                if line >= lines.len() || column > lines.line_len(line) {
                    log::warn!(
                        "initial caret {}:{} outside the document, clamping",
                        line,
                        column
                    );
                }
                lines.position_from_line_column(line, column).absolute
            }
        };
        if absolute > lines.total_len() {
            log::warn!(
                "initial caret offset {} past the document end ({}), clamping",
                absolute,
                lines.total_len()
            );
        }

        let state = EditorState::from_text(
            &text,
            absolute,
            config.max_width,
            config.visible_line_count,
            &measure,
            clock.now_ms(),
        );

        Ok(Self {
            state,
            max_width: config.max_width,
            double_press_threshold_ms: config.double_press_threshold_ms,
            measure,
            clock,
            line_ending,
            version: 0,
            draw_callbacks: Vec::new(),
            change_callbacks: Vec::new(),
            position_callbacks: Vec::new(),
        })
    }

    /// Current snapshot.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Document content with LF line endings.
    pub fn text(&self) -> String {
        self.state.text()
    }

    /// Document content in the line ending the page was loaded with.
    pub fn text_for_saving(&self) -> String {
        self.line_ending.restore(&self.state.text())
    }

    /// Line ending detected at mount.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Visual line table.
    pub fn lines(&self) -> &LineTable {
        self.state.lines()
    }

    /// Caret.
    pub fn position(&self) -> Position {
        self.state.position()
    }

    /// Scroll window.
    pub fn scroll_window(&self) -> ScrollWindow {
        self.state.scroll_window()
    }

    /// Number of committed content mutations since mount.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Wrap width.
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// Subscribe to draw instructions.
    pub fn on_draw<F>(&mut self, callback: F)
    where
        F: FnMut(&DrawInstruction) + Send + 'static,
    {
        self.draw_callbacks.push(Box::new(callback));
    }

    /// Subscribe to committed content changes.
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.change_callbacks.push(Box::new(callback));
    }

    /// Subscribe to caret changes.
    pub fn on_position_change<F>(&mut self, callback: F)
    where
        F: FnMut(Position) + Send + 'static,
    {
        self.position_callbacks.push(Box::new(callback));
    }

    /// Paint the whole scroll window and the caret, e.g. right after mount.
    pub fn initial_draw(&mut self) -> Vec<DrawInstruction> {
        let instructions = draw::full_redraw(
            self.state.lines(),
            self.state.scroll_window(),
            self.state.position(),
        );
        self.notify_draw(&instructions);
        instructions
    }

    /// Apply one command and notify subscribers.
    pub fn dispatch(&mut self, command: Command) -> Effect {
        let ctx = DispatchContext::new(
            self.max_width,
            self.double_press_threshold_ms,
            self.clock.now_ms(),
            &self.measure,
        );
        let transition = dispatch(&self.state, command, &ctx);

        self.state = transition.state;
        self.notify_draw(&transition.draw);

        match &transition.effect {
            Effect::TextChanged { content, position } => {
                self.version += 1;
                let saved = self.line_ending.restore(content);
                for callback in &mut self.change_callbacks {
                    callback(&saved);
                }
                self.notify_position(*position);
            }
            Effect::PositionChanged { position } => self.notify_position(*position),
            Effect::Noop => {}
        }

        transition.effect
    }

    /// Translate a key event and dispatch it. Keys without a command return `None`.
    pub fn handle_key(&mut self, event: KeyEvent) -> Option<Effect> {
        command_for_key(event).map(|command| self.dispatch(command))
    }

    /// Change the wrap width and repaint the window.
    ///
    /// The caret keeps its content offset; its line and column follow the reflow.
    pub fn set_max_width(&mut self, max_width: usize) -> Result<(), ConfigError> {
        if max_width == 0 {
            return Err(ConfigError::ZeroMaxWidth);
        }
        if max_width == self.max_width {
            return Ok(());
        }

        self.max_width = max_width;
        self.state = self.state.clone().rewrap(max_width, &self.measure);
        log::debug!(
            "max width set to {}: {} visual lines",
            max_width,
            self.state.lines().len()
        );
        self.initial_draw();
        Ok(())
    }

    fn notify_draw(&mut self, instructions: &[DrawInstruction]) {
        for instruction in instructions {
            for callback in &mut self.draw_callbacks {
                callback(instruction);
            }
        }
    }

    fn notify_position(&mut self, position: Position) {
        for callback in &mut self.position_callbacks {
            callback(position);
        }
    }
}
