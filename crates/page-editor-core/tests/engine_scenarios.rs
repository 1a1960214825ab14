//! End-to-end engine sessions
//!
//! Drives `EditEngine` through its public surface (commands, key events, callbacks) with a
//! manual clock so double-press timing is deterministic.

use page_editor_core::{
    CaretSpec, CharCount, Clock, Command, DrawInstruction, EditEngine, EditorConfig, Effect, Key,
    KeyEvent, ManualClock, Measure, Position,
};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn engine_at(
    text: &str,
    absolute: usize,
    max_width: usize,
    visible: usize,
) -> (EditEngine<CharCount, ManualClock>, ManualClock) {
    let clock = ManualClock::new(10_000);
    let config = EditorConfig::new(text)
        .with_max_width(max_width)
        .with_visible_line_count(visible)
        .with_initial_position(CaretSpec::Absolute { absolute });
    let engine = EditEngine::with_measure_and_clock(config, CharCount, clock.clone()).unwrap();
    (engine, clock)
}

fn record_draws<M: Measure, C: Clock>(
    engine: &mut EditEngine<M, C>,
) -> Arc<Mutex<Vec<DrawInstruction>>> {
    let draws = Arc::new(Mutex::new(Vec::new()));
    let sink = draws.clone();
    engine.on_draw(move |d| sink.lock().unwrap().push(d.clone()));
    draws
}

fn take(draws: &Arc<Mutex<Vec<DrawInstruction>>>) -> Vec<DrawInstruction> {
    std::mem::take(&mut *draws.lock().unwrap())
}

fn strings(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_wrap_at_width_ten() {
    let (engine, _) = engine_at("hello world foo", 0, 10, 16);
    assert_eq!(engine.lines().lines(), ["hello", "world", "foo"]);
}

#[test]
fn test_wrap_by_pixel_width() {
    // Fixed 7px advance, 70px column: same breaks as 10 characters.
    let pixels = |s: &str| s.chars().count() * 7;
    let config = EditorConfig::new("hello world foo").with_max_width(70);
    let engine = EditEngine::with_measure_and_clock(config, pixels, ManualClock::new(0)).unwrap();
    assert_eq!(engine.lines().lines(), ["hello", "world", "foo"]);
}

#[test]
fn test_newline_splits_line() {
    let (mut engine, _) = engine_at("ab", 1, 80, 16);
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = changes.clone();
    engine.on_change(move |text| sink.lock().unwrap().push(text.to_string()));

    let effect = engine.dispatch(Command::InsertNewline);

    assert_eq!(
        effect,
        Effect::TextChanged {
            content: "a\nb".to_string(),
            position: Position::new(1, 0, 2),
        }
    );
    assert_eq!(engine.position(), Position::new(1, 0, 2));
    assert_eq!(*changes.lock().unwrap(), vec!["a\nb".to_string()]);
}

#[test]
fn test_boundary_commands_are_silent_noops() {
    let (mut engine, _) = engine_at("ab\ncd", 0, 80, 16);
    let draws = record_draws(&mut engine);
    let positions = Arc::new(Mutex::new(Vec::new()));
    let sink = positions.clone();
    engine.on_position_change(move |p| sink.lock().unwrap().push(p));

    for command in [
        Command::DeleteBackward,
        Command::DeleteWordBackward,
        Command::MoveCharLeft,
        Command::MoveLineUp,
        Command::MoveWordLeft,
        Command::MoveParagraphUp,
    ] {
        assert_eq!(engine.dispatch(command), Effect::Noop, "{:?}", command);
    }

    assert_eq!(engine.text(), "ab\ncd");
    assert_eq!(engine.position(), Position::new(0, 0, 0));
    assert_eq!(engine.version(), 0);
    assert!(take(&draws).is_empty());
    assert!(positions.lock().unwrap().is_empty());
}

#[test]
fn test_word_left_slow_presses_step_by_word() {
    let (mut engine, clock) = engine_at("the quick fox", 13, 80, 16);

    let mut stops = Vec::new();
    for _ in 0..2 {
        clock.advance(1_000);
        engine.dispatch(Command::MoveWordLeft);
        stops.push(engine.position().absolute);
    }

    assert_eq!(stops, vec![4, 0]);
}

#[test]
fn test_word_left_double_press_reaches_line_start() {
    let (mut engine, clock) = engine_at("one two three four", 18, 80, 16);

    clock.advance(1_000);
    engine.dispatch(Command::MoveWordLeft);
    assert_eq!(engine.position().absolute, 8);

    clock.advance(100);
    engine.dispatch(Command::MoveWordLeft);
    assert_eq!(engine.position().absolute, 0);
}

#[test]
fn test_double_press_threshold_is_exclusive() {
    let (mut engine, clock) = engine_at("one two three four", 18, 80, 16);

    clock.advance(1_000);
    engine.dispatch(Command::MoveWordLeft);
    clock.advance(150);
    engine.dispatch(Command::MoveWordLeft);

    assert_eq!(engine.position().absolute, 4);
}

#[test]
fn test_paragraph_double_press_reaches_document_end() {
    let (mut engine, clock) = engine_at("one\n\ntwo\n\nthree", 0, 80, 16);

    clock.advance(1_000);
    engine.dispatch(Command::MoveParagraphDown);
    assert_eq!(engine.position(), Position::new(2, 0, 5));

    clock.advance(50);
    engine.dispatch(Command::MoveParagraphDown);
    assert_eq!(engine.position(), Position::new(4, 5, 15));
}

#[test]
fn test_typing_reflows_and_reports_each_change() {
    let (mut engine, clock) = engine_at("", 0, 10, 16);
    let changes = Arc::new(Mutex::new(0usize));
    let sink = changes.clone();
    engine.on_change(move |_| *sink.lock().unwrap() += 1);

    for ch in "hello world".chars() {
        clock.advance(30);
        engine.dispatch(Command::InsertChar(ch));
    }

    assert_eq!(engine.text(), "hello world");
    assert_eq!(engine.lines().lines(), ["hello", "world"]);
    assert_eq!(engine.position(), Position::new(1, 5, 11));
    assert_eq!(*changes.lock().unwrap(), 11);
    assert_eq!(engine.version(), 11);
}

#[test]
fn test_key_session() {
    let (mut engine, _) = engine_at("ab", 0, 80, 16);

    assert!(engine.handle_key(KeyEvent::plain(Key::Right)).is_some());
    engine.handle_key(KeyEvent::plain(Key::Enter));
    engine.handle_key(KeyEvent::plain(Key::Char('x')));
    assert_eq!(engine.text(), "a\nxb");

    assert_eq!(engine.handle_key(KeyEvent::with_modifier(Key::Char('s'))), None);
    assert_eq!(engine.handle_key(KeyEvent::plain(Key::Other)), None);

    engine.handle_key(KeyEvent::with_modifier(Key::Backspace));
    assert_eq!(engine.text(), "a\nb");
    assert_eq!(engine.position(), Position::new(1, 0, 2));
}

#[test]
fn test_word_delete_takes_trailing_spaces_with_the_word() {
    let (mut engine, _) = engine_at("one two   ", 10, 80, 16);

    engine.dispatch(Command::DeleteWordBackward);

    assert_eq!(engine.text(), "one ");
    assert_eq!(engine.position(), Position::new(0, 4, 4));
}

#[test]
fn test_two_line_window_does_not_scroll_while_caret_stays_on_line() {
    let (mut engine, _) = engine_at("aaa\nbbbbbb", 4, 80, 2);
    assert_eq!(engine.scroll_window().draw_from_line, 1);
    let draws = record_draws(&mut engine);

    let mut history = Vec::new();
    for _ in 0..5 {
        engine.dispatch(Command::MoveCharRight);
        history.push(engine.scroll_window().draw_from_line);
    }

    assert_eq!(history, vec![1, 1, 1, 1, 1]);
    assert!(
        take(&draws)
            .iter()
            .all(|d| matches!(d, DrawInstruction::SetCaret { line: 1, .. }))
    );
}

#[test]
fn test_caret_nudges_window_at_edges() {
    let (mut engine, _) = engine_at("a\nb\nc\nd\ne\nf", 0, 10, 4);
    let draws = record_draws(&mut engine);

    engine.dispatch(Command::MoveLineDown);
    assert_eq!(
        take(&draws),
        vec![
            DrawInstruction::UpdateLine {
                line: 0,
                text: "a".to_string(),
            },
            DrawInstruction::SetCaret { line: 1, column: 0 },
        ]
    );

    engine.dispatch(Command::MoveLineDown);
    take(&draws);
    engine.dispatch(Command::MoveLineDown);
    assert_eq!(engine.scroll_window().draw_from_line, 1);
    assert_eq!(
        take(&draws).first(),
        Some(&DrawInstruction::RedrawFrom {
            line: 1,
            lines: strings(&["b", "c", "d", "e"]),
        })
    );

    engine.dispatch(Command::MoveLineDown);
    assert_eq!(engine.scroll_window().draw_from_line, 2);
    take(&draws);
    engine.dispatch(Command::MoveLineDown);
    assert_eq!(engine.scroll_window().draw_from_line, 3);
    assert_eq!(
        take(&draws),
        vec![
            DrawInstruction::RedrawFrom {
                line: 3,
                lines: strings(&["d", "e", "f"]),
            },
            DrawInstruction::SetCaret { line: 5, column: 0 },
        ]
    );

    engine.dispatch(Command::MoveLineUp);
    assert_eq!(engine.scroll_window().draw_from_line, 3);
    engine.dispatch(Command::MoveLineUp);
    assert_eq!(engine.scroll_window().draw_from_line, 2);
}

#[test]
fn test_far_jump_keeps_context_above_caret() {
    let text = vec!["x"; 30].join("\n");
    let (mut engine, _) = engine_at(&text, 0, 10, 4);
    let draws = record_draws(&mut engine);

    engine.dispatch(Command::MoveParagraphDown);

    assert_eq!(engine.position(), Position::new(29, 1, 59));
    assert_eq!(engine.scroll_window().draw_from_line, 26);
    assert_eq!(
        take(&draws),
        vec![
            DrawInstruction::RedrawFrom {
                line: 26,
                lines: strings(&["x", "x", "x", "x"]),
            },
            DrawInstruction::SetCaret { line: 29, column: 1 },
        ]
    );
}

#[test]
fn test_edit_inside_line_updates_single_line() {
    let (mut engine, _) = engine_at("ab\ncd", 5, 80, 16);
    let draws = record_draws(&mut engine);

    engine.dispatch(Command::InsertChar('e'));

    assert_eq!(
        take(&draws),
        vec![
            DrawInstruction::UpdateLine {
                line: 1,
                text: "cde".to_string(),
            },
            DrawInstruction::SetCaret { line: 1, column: 3 },
        ]
    );
}

#[test]
fn test_resize_keeps_caret_offset() {
    let (mut engine, _) = engine_at("hello world foo", 13, 10, 16);
    assert_eq!(engine.position(), Position::new(2, 1, 13));

    engine.set_max_width(13).unwrap();
    assert_eq!(engine.lines().lines(), ["hello world", "foo"]);
    assert_eq!(engine.position(), Position::new(1, 1, 13));
}
