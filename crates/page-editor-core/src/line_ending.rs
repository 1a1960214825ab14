//! Line ending helpers.
//!
//! The engine works on LF (`'\n'`) content only: a `"\r\n"` pair would otherwise count as two
//! characters of which only one is a paragraph break. Page text is split into its line ending
//! and LF content at mount, and the line ending is restored on the text handed to the change
//! callback.

/// The newline sequence a page is stored with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineEnding {
    /// Split stored page text into its line ending and the LF content the engine edits.
    ///
    /// Any `"\r\n"` marks the page as CRLF. Stray `'\r'` characters are dropped either way so
    /// they never end up as zero-width glyphs inside a visual line.
    pub fn split_source(text: &str) -> (Self, String) {
        let ending = if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        };
        let content = text.replace("\r\n", "\n").replace('\r', "");
        (ending, content)
    }

    /// Turn LF content back into stored page text.
    pub fn restore(self, content: &str) -> String {
        match self {
            Self::Lf => content.to_string(),
            Self::Crlf => content.replace('\n', "\r\n"),
        }
    }
}
