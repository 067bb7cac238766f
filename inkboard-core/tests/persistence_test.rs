//! Integration tests for the persistence boundary
//!
//! Verifies the scene-graph JSON contract, that saves capture the state
//! current at call-issue time, and that a failed save never costs local
//! edits or undo history.

use inkboard_core::board::Board;
use inkboard_core::editor::{Editor, Modifiers};
use inkboard_core::error::{CoreError, StoreError};
use inkboard_core::store::{
    board_to_record, BoardRecord, BoardStore, MemoryStore, OpenGate,
};
use inkboard_core::style::Color;
use inkboard_core::tool::Tool;
use kurbo::Point;
use uuid::Uuid;

fn drag(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
    editor.pointer_down(Point::new(from.0, from.1), Modifiers::default());
    editor.pointer_move(Point::new(to.0, to.1));
    editor.pointer_up(Point::new(to.0, to.1));
}

/// Store that always fails with a retryable error
struct FlakyStore {
    attempts: usize,
    fail_first: usize,
    inner: MemoryStore,
}

impl FlakyStore {
    fn failing_first(fail_first: usize) -> Self {
        Self {
            attempts: 0,
            fail_first,
            inner: MemoryStore::new(),
        }
    }
}

impl BoardStore for FlakyStore {
    fn save(&mut self, record: &BoardRecord) -> Result<(), StoreError> {
        self.attempts += 1;
        if self.attempts <= self.fail_first {
            return Err(StoreError::Unavailable("connection dropped".into()));
        }
        self.inner.save(record)
    }

    fn load(&self, board_id: &Uuid) -> Result<BoardRecord, StoreError> {
        self.inner.load(board_id)
    }
}

#[test]
fn test_scene_json_contract_shape() {
    let mut editor = Editor::new(Board::new("Contract"));
    editor.set_tool(Tool::StickyNote);
    editor.pointer_down(Point::new(40.0, 40.0), Modifiers::default());
    editor.commit_text_edit("ship it");
    editor.set_tool(Tool::Rectangle);
    drag(&mut editor, (10.0, 10.0), (110.0, 60.0));

    let record = board_to_record(editor.board()).unwrap();
    let scene = record.scene.as_array().expect("scene is an ordered array");
    assert_eq!(scene.len(), 2);

    let sticky = &scene[0];
    assert_eq!(sticky["type"], "sticky-note");
    assert_eq!(sticky["data"]["text"], "ship it");
    assert!(sticky["data"]["fontSize"].is_number());
    assert_eq!(sticky["zIndex"], 0);

    let rect = &scene[1];
    assert_eq!(rect["type"], "rectangle");
    assert_eq!(rect["x"], 10.0);
    assert_eq!(rect["width"], 100.0);
    assert!(rect["strokeWidth"].is_number());
    assert!(rect["fill"].as_str().unwrap().starts_with('#'));
    assert_eq!(rect["zIndex"], 1);
}

#[test]
fn test_save_captures_state_at_call_issue_time() {
    let mut editor = Editor::new(Board::new("Capture"));
    editor.set_tool(Tool::Rectangle);
    drag(&mut editor, (0.0, 0.0), (50.0, 50.0));

    // The record is built from the scene as it stands right now; edits made
    // after this point must not leak into it.
    let record = board_to_record(editor.board()).unwrap();
    drag(&mut editor, (100.0, 0.0), (150.0, 50.0));

    assert_eq!(record.scene.as_array().unwrap().len(), 1);
    assert_eq!(editor.scene().len(), 2);
}

#[test]
fn test_failed_save_keeps_local_edits_and_history() {
    let mut store = FlakyStore::failing_first(2);
    let mut editor = Editor::new(Board::new("Resilient"));
    editor.set_tool(Tool::Rectangle);
    drag(&mut editor, (0.0, 0.0), (50.0, 50.0));
    drag(&mut editor, (60.0, 0.0), (110.0, 50.0));

    // Two failures in a row; the board and its history must be untouched
    for _ in 0..2 {
        let err = editor.save(&mut store, &OpenGate).unwrap_err();
        match err {
            CoreError::Store(store_err) => assert!(store_err.is_retryable()),
            other => panic!("expected store error, got {other:?}"),
        }
        assert_eq!(editor.scene().len(), 2);
        assert_eq!(editor.undo_depth(), 2);
    }

    // Third attempt succeeds with no data loss
    editor.save(&mut store, &OpenGate).unwrap();
    let loaded = Editor::load(&store, &editor.board().id).unwrap();
    assert_eq!(loaded.scene().len(), 2);

    // Undo still works after the failures
    assert!(editor.undo());
    assert_eq!(editor.scene().len(), 1);
}

#[test]
fn test_loaded_session_starts_a_fresh_history() {
    let mut store = MemoryStore::new();
    let mut editor = Editor::new(Board::new("Reload"));
    editor.set_tool(Tool::Ellipse);
    drag(&mut editor, (0.0, 0.0), (80.0, 80.0));
    editor.save(&mut store, &OpenGate).unwrap();

    let mut reloaded = Editor::load(&store, &editor.board().id).unwrap();
    assert_eq!(reloaded.scene().len(), 1);

    // History does not carry across sessions
    assert!(!reloaded.can_undo());

    // But new edits on the reloaded board are undoable as usual
    reloaded.set_tool(Tool::Rectangle);
    drag(&mut reloaded, (100.0, 100.0), (140.0, 140.0));
    assert!(reloaded.can_undo());
}

#[test]
fn test_loaded_colors_roundtrip_as_hex() {
    let mut store = MemoryStore::new();
    let board = Board::new("Colors").with_background(Color::from_hex("#1e1e2e").unwrap());
    let mut editor = Editor::new(board);
    editor.set_fill_color(Color::from_hex("#ff8800").unwrap());
    editor.set_tool(Tool::Rectangle);
    drag(&mut editor, (0.0, 0.0), (40.0, 40.0));
    editor.save(&mut store, &OpenGate).unwrap();

    let reloaded = Editor::load(&store, &editor.board().id).unwrap();
    assert_eq!(reloaded.board().background_color.to_hex(), "#1e1e2e");
    assert_eq!(reloaded.scene().objects()[0].fill.to_hex(), "#ff8800");
}
