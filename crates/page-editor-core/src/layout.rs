//! Line Breaking (Headless Word-Wrap Reflow)
//!
//! Turns the flat document content into the table of visual lines shown to the user.
//!
//! Content is split into paragraphs on `'\n'` first; each paragraph is then packed greedily
//! into visual lines at single-space word boundaries. The space at a wrap point is *consumed*
//! by the break, exactly like `'\n'` is consumed by a paragraph break, so every boundary between
//! two visual lines stands for one content character:
//!
//! ```text
//! content: "hello world foo\n\nbar"        (max_width = 10, char measure)
//! lines:   ["hello", "world", "foo", "", "bar"]
//! ```
//!
//! Widths are obtained through an injected [`Measure`] capability so the same algorithm serves
//! character-count wrapping, terminal cell wrapping and pixel-accurate wrapping driven by the
//! host rendering surface.

use unicode_width::UnicodeWidthChar;

/// Text measurement capability consumed by the line breaker.
///
/// Implementations must be pure: the same input always yields the same width. Line tables are
/// recomputed after every edit, and a non-deterministic measure would make the caret jump
/// between visual lines.
pub trait Measure {
    /// Width of `text` in the unit `max_width` is expressed in (characters, cells or pixels).
    fn width(&self, text: &str) -> usize;
}

/// Measure text by counting `char`s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharCount;

impl Measure for CharCount {
    fn width(&self, text: &str) -> usize {
        text.chars().count()
    }
}

/// Measure text in terminal display cells (UAX #11: CJK and most emoji take 2 cells).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellWidth;

impl Measure for CellWidth {
    fn width(&self, text: &str) -> usize {
        str_width(text)
    }
}

/// Any `Fn(&str) -> usize` is a measure, e.g. a host callback returning ceil'd pixel widths.
impl<F> Measure for F
where
    F: Fn(&str) -> usize,
{
    fn width(&self, text: &str) -> usize {
        self(text)
    }
}

/// Calculate visual width of a character (based on UAX #11)
///
/// Return value:
/// - 1: Narrow character (ASCII, etc.)
/// - 2: Wide character (CJK, fullwidth, etc.)
/// - 0: Zero-width character (combining characters, etc.)
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Calculate total visual width of a string
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Wrap a whole document into visual lines.
///
/// Paragraphs are separated by `'\n'`. An empty paragraph yields one empty visual line, so a
/// document with `N` newlines always produces at least `N + 1` visual lines.
pub fn wrap<M>(content: &str, max_width: usize, measure: &M) -> Vec<String>
where
    M: Measure + ?Sized,
{
    let mut lines = Vec::new();
    for paragraph in content.split('\n') {
        wrap_paragraph_into(paragraph, max_width, measure, &mut lines);
    }
    lines
}

/// Wrap a single paragraph (text without `'\n'`) into visual lines.
///
/// Joining the result with `' '` reproduces `paragraph` exactly.
pub fn wrap_paragraph<M>(paragraph: &str, max_width: usize, measure: &M) -> Vec<String>
where
    M: Measure + ?Sized,
{
    let mut lines = Vec::new();
    wrap_paragraph_into(paragraph, max_width, measure, &mut lines);
    lines
}

fn wrap_paragraph_into<M>(paragraph: &str, max_width: usize, measure: &M, out: &mut Vec<String>)
where
    M: Measure + ?Sized,
{
    debug_assert!(!paragraph.contains('\n'), "paragraph must not contain newlines");

    // `split(' ')` keeps empty words for runs of spaces; rejoining with ' ' is lossless.
    let mut words = paragraph.split(' ');
    let mut current = words.next().unwrap_or_default().to_string();
    let mut candidate = String::new();

    for word in words {
        candidate.clear();
        candidate.push_str(&current);
        candidate.push(' ');
        candidate.push_str(word);

        if fits(&candidate, max_width, measure) {
            std::mem::swap(&mut current, &mut candidate);
        } else {
            // Over-wide words are never split: they simply occupy a line of their own.
            out.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    out.push(current);
}

/// A packed line fits when it, plus the separator cell that follows it, stays under the width.
fn fits<M>(candidate: &str, max_width: usize, measure: &M) -> bool
where
    M: Measure + ?Sized,
{
    measure.width(candidate) + measure.width(" ") < max_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_char_width() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width(' '), 1);
        assert_eq!(char_width('你'), 2);
        assert_eq!(char_width('🦀'), 2);
    }

    #[test]
    fn test_str_width() {
        assert_eq!(str_width("hello"), 5);
        assert_eq!(str_width("你好"), 4);
        assert_eq!(str_width("hello你好"), 9);
    }

    #[test]
    fn test_wrap_hello_world_foo_at_ten() {
        let lines = wrap("hello world foo", 10, &CharCount);
        assert_eq!(lines, vec!["hello", "world", "foo"]);
    }

    #[test]
    fn test_wrap_packs_words_that_fit() {
        let lines = wrap("a bb ccc dddd", 10, &CharCount);
        // "a bb ccc " is 9 cells, "a bb ccc dddd " would be 14.
        assert_eq!(lines, vec!["a bb ccc", "dddd"]);
    }

    #[test]
    fn test_wrap_empty_content_is_one_empty_line() {
        assert_eq!(wrap("", 10, &CharCount), vec![""]);
    }

    #[test]
    fn test_wrap_blank_paragraphs_round_trip() {
        let lines = wrap("ab\n\ncd\n", 10, &CharCount);
        assert_eq!(lines, vec!["ab", "", "cd", ""]);
    }

    #[test]
    fn test_wrap_over_wide_word_stays_whole() {
        let lines = wrap("a supercalifragilistic b", 8, &CharCount);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_space_runs_are_preserved() {
        let paragraph = "one  two   three";
        let lines = wrap_paragraph(paragraph, 6, &CharCount);
        assert_eq!(lines.join(" "), paragraph);
    }

    #[test]
    fn test_wrap_with_cell_width_measure() {
        // Each CJK char is 2 cells: "你好 世界" is 9 cells, plus the separator is 10.
        let lines = wrap("你好 世界", 10, &CellWidth);
        assert_eq!(lines, vec!["你好", "世界"]);

        let lines = wrap("你好 世界", 11, &CellWidth);
        assert_eq!(lines, vec!["你好 世界"]);
    }

    #[test]
    fn test_wrap_with_closure_measure() {
        // A fake proportional font: 'm' is wide, everything else is narrow.
        let pixels = |text: &str| -> usize {
            text.chars().map(|c| if c == 'm' { 12 } else { 6 }).sum()
        };
        let lines = wrap("mmm ab cd", 60, &pixels);
        // "mmm ab" = 36 + 6 + 12 = 54 px, plus a 6 px separator hits 60.
        assert_eq!(lines, vec!["mmm", "ab cd"]);
    }

    #[test]
    fn test_wrap_is_deterministic() {
        let text = "the quick brown fox jumps over the lazy dog";
        assert_eq!(wrap(text, 12, &CharCount), wrap(text, 12, &CharCount));
    }
}
