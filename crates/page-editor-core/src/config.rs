//! Editor configuration.
//!
//! All values are plain data supplied by the embedding page; the only defaults are the
//! documented constants below. The struct derives `serde` traits so a host can keep it in a
//! JSON settings file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default wrap width, in measure units (characters for [`crate::CharCount`]).
pub const DEFAULT_MAX_WIDTH: usize = 75;

/// Two same-class navigation commands closer than this escalate
/// (word -> line, paragraph -> document).
pub const DEFAULT_DOUBLE_PRESS_THRESHOLD_MS: u64 = 150;

/// Default number of visual lines rendered at once.
pub const DEFAULT_VISIBLE_LINE_COUNT: usize = 16;

/// Lines of context kept above the caret when the scroll window has to jump.
pub const SCROLL_CONTEXT_LINES: usize = 10;

/// Initial caret placement, in either of the two equivalent coordinate systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaretSpec {
    /// Visual line and column.
    LineColumn {
        /// Visual line index.
        line: usize,
        /// Column in characters.
        column: usize,
    },
    /// Character offset into the content.
    Absolute {
        /// Character offset.
        absolute: usize,
    },
}

impl Default for CaretSpec {
    fn default() -> Self {
        CaretSpec::Absolute { absolute: 0 }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Wrapping needs a positive width.
    #[error("max_width must be greater than 0")]
    ZeroMaxWidth,
    /// The scroll window needs at least one line.
    #[error("visible_line_count must be greater than 0")]
    ZeroVisibleLines,
}

/// Editor mount configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Wrap width in measure units.
    pub max_width: usize,
    /// Double-press window in milliseconds.
    pub double_press_threshold_ms: u64,
    /// Number of visual lines the host renders.
    pub visible_line_count: usize,
    /// Document content at mount.
    pub initial_content: String,
    /// Caret at mount; clamped into the document.
    pub initial_position: CaretSpec,
}

impl EditorConfig {
    /// Configuration with default constants and the given content.
    pub fn new(initial_content: impl Into<String>) -> Self {
        Self {
            initial_content: initial_content.into(),
            ..Self::default()
        }
    }

    /// Set the wrap width.
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Set the double-press threshold.
    pub fn with_double_press_threshold_ms(mut self, threshold_ms: u64) -> Self {
        self.double_press_threshold_ms = threshold_ms;
        self
    }

    /// Set the scroll window height.
    pub fn with_visible_line_count(mut self, count: usize) -> Self {
        self.visible_line_count = count;
        self
    }

    /// Set the initial caret.
    pub fn with_initial_position(mut self, position: CaretSpec) -> Self {
        self.initial_position = position;
        self
    }

    /// Check the values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width == 0 {
            return Err(ConfigError::ZeroMaxWidth);
        }
        if self.visible_line_count == 0 {
            return Err(ConfigError::ZeroVisibleLines);
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            double_press_threshold_ms: DEFAULT_DOUBLE_PRESS_THRESHOLD_MS,
            visible_line_count: DEFAULT_VISIBLE_LINE_COUNT,
            initial_content: String::new(),
            initial_position: CaretSpec::default(),
        }
    }
}
