#![warn(missing_docs)]
//! Page Editor Core - Headless Reflow and Caret Navigation Engine
//!
//! # Overview
//!
//! `page-editor-core` is the text engine behind the page editor of a book-authoring app. It owns
//! a flat text buffer, word-wraps it into visual lines, maps between character offsets and
//! `(line, column)` positions, and applies editing and navigation commands.
//! It does not paint anything: the host renderer receives drawing instructions and supplies
//! text measurement.
//!
//! # Core Features
//!
//! - **Greedy Word Wrap**: paragraph-aware, pure, pluggable width measure (chars, cells, pixels)
//! - **Exact Offset Mapping**: every visual line boundary stands for one content character
//! - **Pure Dispatch**: `dispatch(state, command) -> { state, effect, draw }`, no-op instead of errors
//! - **Double-Press Escalation**: word -> line, paragraph -> document, driven by an injected clock
//! - **Scroll Window Tracking**: edge nudging with a context-preserving jump
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  EditEngine (callbacks, config, key input)  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  dispatch + DrawInstruction + ScrollWindow  │  ← Command handling
//! ├─────────────────────────────────────────────┤
//! │  Line Index (offset <-> line/column)        │  ← Position mapping
//! ├─────────────────────────────────────────────┤
//! │  Layout (word wrap, Measure)                │  ← Line breaking
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use page_editor_core::{CaretSpec, Command, EditEngine, EditorConfig, Position};
//!
//! let config = EditorConfig::new("hello world foo")
//!     .with_max_width(10)
//!     .with_initial_position(CaretSpec::Absolute { absolute: 15 });
//! let mut engine = EditEngine::new(config).unwrap();
//!
//! assert_eq!(engine.lines().lines(), ["hello", "world", "foo"]);
//! assert_eq!(engine.position(), Position::new(2, 3, 15));
//!
//! engine.dispatch(Command::MoveLineUp);
//! assert_eq!(engine.position(), Position::new(1, 3, 9));
//! ```
//!
//! # Module Description
//!
//! - [`layout`] - word-wrap line breaker and width measures
//! - [`line_index`] - offset/position mapping over the line table
//! - [`commands`] - commands, effects and the pure dispatch function
//! - [`state`] - editor state snapshot and the callback-driven engine
//! - [`viewport`] - scroll window heuristic
//! - [`draw`] - drawing instructions for the host renderer
//! - [`input`] - key event to command mapping
//! - [`config`] - mount configuration and documented constants
//! - [`clock`] - injected monotonic clock

pub mod clock;
pub mod commands;
pub mod config;
pub mod draw;
pub mod input;
pub mod layout;
pub mod line_ending;
pub mod line_index;
pub mod state;
pub mod viewport;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use commands::{Command, DispatchContext, Effect, MotionClass, Transition, dispatch};
pub use config::{
    CaretSpec, ConfigError, DEFAULT_DOUBLE_PRESS_THRESHOLD_MS, DEFAULT_MAX_WIDTH,
    DEFAULT_VISIBLE_LINE_COUNT, EditorConfig, SCROLL_CONTEXT_LINES,
};
pub use draw::DrawInstruction;
pub use input::{Key, KeyEvent, command_for_key};
pub use layout::{CellWidth, CharCount, Measure, wrap, wrap_paragraph};
pub use line_ending::LineEnding;
pub use line_index::{LineTable, Position, absolute_from_position, position_from_absolute};
pub use state::{ChangeCallback, DrawCallback, EditEngine, EditorState, PositionCallback};
pub use viewport::ScrollWindow;
