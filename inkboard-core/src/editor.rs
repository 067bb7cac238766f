//! Interactive editing session
//!
//! The `Editor` owns one board plus its session state: undo/redo history,
//! the current selection, the active tool and in-flight gesture, and the
//! brush (the style applied to newly drawn primitives). Pointer events drive
//! a tool state machine; every completed mutating gesture commits exactly one
//! history snapshot. All mutation happens synchronously on the calling
//! thread; only `save`/`load` cross the persistence boundary.

use crate::board::Board;
use crate::error::CoreError;
use crate::geometry::{diamond_points, hexagon_points, star_points, triangle_points};
use crate::history::History;
use crate::hit_test;
use crate::primitive::{Primitive, PrimitiveData, PrimitiveKind, PrimitivePatch};
use crate::scene::{Reorder, SceneGraph};
use crate::selection::Selection;
use crate::store::{load_board, save_board, AccessGate, BoardStore};
use crate::style::{Color, Style};
use crate::tool::{Tool, ToolState};
use kurbo::{Point, Rect};
use std::collections::HashMap;
use uuid::Uuid;

/// Pointer modifier keys relevant to the editor
#[derive(Clone, Copy, Debug, Default)]
pub struct Modifiers {
    /// Multi-select modifier (shift held)
    pub shift: bool,
}

/// Tunable editing parameters
///
/// Polygon generation constants are configuration, not invariants; the
/// defaults match the usual five-point star with a 0.5 inner/outer ratio.
#[derive(Clone, Copy, Debug)]
pub struct EditorConfig {
    /// Number of retained history snapshots
    pub history_capacity: usize,
    /// Outer vertex count for star shapes
    pub star_points: usize,
    /// Inner/outer radius ratio for star shapes
    pub star_inner_ratio: f64,
    /// Extra pixels around stroke outlines when hit testing
    pub hit_tolerance: f64,
    /// Drafts smaller than this in both axes are discarded on pointer-up
    pub min_draft_extent: f64,
    /// Font size for newly created text content
    pub default_font_size: f64,
    /// Initial frame for text primitives
    pub text_box_size: (f64, f64),
    /// Initial frame for sticky notes
    pub sticky_note_size: (f64, f64),
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: crate::history::DEFAULT_CAPACITY,
            star_points: 5,
            star_inner_ratio: 0.5,
            hit_tolerance: 4.0,
            min_draft_extent: 2.0,
            default_font_size: 16.0,
            text_box_size: (200.0, 48.0),
            sticky_note_size: (160.0, 160.0),
        }
    }
}

/// One editing session over a board
pub struct Editor {
    board: Board,
    history: History,
    selection: Selection,
    tool: Tool,
    tool_state: ToolState,
    brush: Style,
    pending_image_src: Option<String>,
    config: EditorConfig,
}

impl Editor {
    /// Start a session on a board
    pub fn new(board: Board) -> Self {
        Self::with_config(board, EditorConfig::default())
    }

    /// Start a session with custom parameters
    pub fn with_config(board: Board, config: EditorConfig) -> Self {
        let history = History::with_capacity(&board.scene, config.history_capacity);
        Self {
            board,
            history,
            selection: Selection::new(),
            tool: Tool::default(),
            tool_state: ToolState::Idle,
            brush: Style::default(),
            pending_image_src: None,
            config,
        }
    }

    /// Load a board from the store and start a session on it
    pub fn load(store: &dyn BoardStore, board_id: &Uuid) -> Result<Self, CoreError> {
        let board = load_board(store, board_id)?;
        Ok(Self::new(board))
    }

    /// Persist the board through the adapter
    ///
    /// The scene is serialized before the adapter runs, so the saved state is
    /// the one current right now. Failure leaves the board, selection and
    /// history untouched; the caller may retry.
    pub fn save(&self, store: &mut dyn BoardStore, gate: &dyn AccessGate) -> Result<(), CoreError> {
        save_board(store, gate, &self.board)
    }

    // === READ ACCESS ===

    /// The board being edited
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The board's scene graph
    pub fn scene(&self) -> &SceneGraph {
        &self.board.scene
    }

    /// The current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The active tool
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// The in-flight gesture state
    pub fn tool_state(&self) -> &ToolState {
        &self.tool_state
    }

    /// The style applied to newly drawn primitives
    pub fn brush(&self) -> Style {
        self.brush
    }

    /// The editing parameters
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // === TOOL MODE ===

    /// Switch the active tool
    ///
    /// Returns false and changes nothing while a gesture or inline edit is in
    /// progress; every gesture must complete before the mode can change.
    /// Switching tools clears the selection.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        if self.tool_state.is_active() {
            return false;
        }
        if tool != self.tool {
            self.tool = tool;
            self.selection.clear();
        }
        true
    }

    /// Clear the selection without switching tools
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Source reference stamped onto the next image drawn with the image tool
    pub fn set_pending_image_src(&mut self, src: Option<String>) {
        self.pending_image_src = src;
    }

    // === POINTER EVENTS ===

    /// Handle pointer-down at a board position
    pub fn pointer_down(&mut self, point: Point, modifiers: Modifiers) {
        if self.tool_state.is_active() {
            return;
        }
        match self.tool {
            Tool::Select => self.begin_select(point, modifiers),
            Tool::Eraser => {
                let erased = self.erase_at(point);
                self.tool_state = ToolState::Erasing { erased };
            }
            Tool::Text | Tool::StickyNote => self.begin_text(point),
            _ => self.begin_draw(point),
        }
    }

    /// Handle pointer-move at a board position
    pub fn pointer_move(&mut self, point: Point) {
        match &self.tool_state {
            ToolState::Drawing { anchor, draft } => {
                let (anchor, draft) = (*anchor, *draft);
                self.resize_draft(&draft, anchor, point);
            }
            ToolState::DraggingSelection {
                start,
                original_positions,
                ..
            } => {
                let delta = point - *start;
                let updates: Vec<(Uuid, f64, f64)> = original_positions
                    .iter()
                    .map(|(id, (ox, oy))| (*id, ox + delta.x, oy + delta.y))
                    .collect();
                for (id, x, y) in updates {
                    self.board
                        .scene
                        .update(&id, &PrimitivePatch::new().position(x, y));
                }
                if delta.x != 0.0 || delta.y != 0.0 {
                    if let ToolState::DraggingSelection { moved, .. } = &mut self.tool_state {
                        *moved = true;
                    }
                }
            }
            ToolState::Marquee { start, .. } => {
                let start = *start;
                self.tool_state = ToolState::Marquee {
                    start,
                    current: point,
                };
            }
            ToolState::Erasing { erased } => {
                let erased = *erased;
                let erased = erased + self.erase_at(point);
                self.tool_state = ToolState::Erasing { erased };
            }
            ToolState::EditingText { .. } | ToolState::Idle => {}
        }
    }

    /// Handle pointer-up at a board position
    ///
    /// Completes the gesture: finalizes or discards a draft, resolves a
    /// marquee, and commits one history snapshot per mutating gesture.
    pub fn pointer_up(&mut self, point: Point) {
        match std::mem::take(&mut self.tool_state) {
            ToolState::Drawing { anchor, draft } => {
                self.resize_draft(&draft, anchor, point);
                if self.draft_is_degenerate(&draft) {
                    self.board.scene.remove(&draft);
                } else {
                    self.commit();
                }
            }
            ToolState::DraggingSelection { moved, .. } => {
                if moved {
                    self.commit();
                }
            }
            ToolState::Marquee { start, .. } => {
                let rect = Rect::from_points(start, point);
                let hits = hit_test::objects_in_rect(&self.board.scene, rect);
                self.selection.set(&hits);
            }
            ToolState::Erasing { erased } => {
                if erased > 0 {
                    self.commit();
                }
            }
            // Inline editing continues until the edit is committed
            state @ ToolState::EditingText { .. } => self.tool_state = state,
            ToolState::Idle => {}
        }
    }

    // === TEXT EDITING ===

    /// Commit the inline text edit with the final content
    ///
    /// Finalizes the primitive and records one history snapshot. An empty
    /// text primitive is discarded instead (a sticky note keeps empty
    /// content; it still reads as a colored note).
    pub fn commit_text_edit(&mut self, text: impl Into<String>) -> bool {
        let target = match &self.tool_state {
            ToolState::EditingText { target } => *target,
            _ => return false,
        };
        self.tool_state = ToolState::Idle;

        let text = text.into();
        let is_plain_text = self
            .board
            .scene
            .get(&target)
            .map(|o| o.kind == PrimitiveKind::Text)
            .unwrap_or(false);

        if text.trim().is_empty() && is_plain_text {
            self.board.scene.remove(&target);
            return false;
        }

        match self.board.scene.get_mut(&target) {
            Some(object) => {
                if let PrimitiveData::Text { text: content, .. } = &mut object.data {
                    *content = text;
                }
                self.commit();
                true
            }
            None => false,
        }
    }

    /// Abandon the inline text edit and discard the primitive
    pub fn cancel_text_edit(&mut self) {
        if let ToolState::EditingText { target } = &self.tool_state {
            let target = *target;
            self.board.scene.remove(&target);
            self.tool_state = ToolState::Idle;
        }
    }

    // === EDIT OPERATIONS ===

    /// Delete every selected object; one history snapshot for the lot
    pub fn delete_selected(&mut self) -> usize {
        let ids: Vec<Uuid> = self.selection.ids().to_vec();
        let mut removed = 0;
        for id in &ids {
            if self.board.scene.remove(id).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            self.selection.prune(&self.board.scene);
            self.commit();
        }
        removed
    }

    /// Undo the last committed gesture
    pub fn undo(&mut self) -> bool {
        if self.tool_state.is_active() {
            return false;
        }
        let restored = self.history.undo(&mut self.board.scene);
        if restored {
            self.selection.prune(&self.board.scene);
            self.board.touch();
        }
        restored
    }

    /// Redo the last undone gesture
    pub fn redo(&mut self) -> bool {
        if self.tool_state.is_active() {
            return false;
        }
        let restored = self.history.redo(&mut self.board.scene);
        if restored {
            self.selection.prune(&self.board.scene);
            self.board.touch();
        }
        restored
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of gestures reachable by undoing
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    /// Number of gestures reachable by redoing
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    // === PROPERTIES (apply to selection, or set drawing defaults) ===

    /// Set the fill color of every selected object
    ///
    /// The brush always picks up the color too, so subsequently drawn
    /// primitives match. With an empty selection only the brush changes and
    /// nothing is committed; the call never fails.
    pub fn set_fill_color(&mut self, color: Color) {
        self.apply_to_selection(
            |brush| brush.fill = color,
            PrimitivePatch::new().fill(color),
        );
    }

    /// Set the stroke color of every selected object (or the brush)
    pub fn set_stroke_color(&mut self, color: Color) {
        self.apply_to_selection(
            |brush| brush.stroke = color,
            PrimitivePatch::new().stroke(color),
        );
    }

    /// Set the stroke width of every selected object (or the brush)
    pub fn set_stroke_width(&mut self, width: f64) {
        self.apply_to_selection(
            |brush| brush.stroke_width = width,
            PrimitivePatch::new().stroke_width(width),
        );
    }

    fn apply_to_selection(&mut self, set_default: impl FnOnce(&mut Style), patch: PrimitivePatch) {
        set_default(&mut self.brush);
        if self.selection.is_empty() {
            return;
        }
        let ids: Vec<Uuid> = self.selection.ids().to_vec();
        for id in &ids {
            self.board.scene.update(id, &patch);
        }
        self.commit();
    }

    // === Z-ORDER (selection moves as a block) ===

    /// Move the selection above everything
    pub fn bring_to_front(&mut self) {
        self.reorder_selection(Reorder::Front);
    }

    /// Step the selection up one place
    pub fn bring_forward(&mut self) {
        self.reorder_selection(Reorder::Forward);
    }

    /// Step the selection down one place
    pub fn send_backward(&mut self) {
        self.reorder_selection(Reorder::Backward);
    }

    /// Move the selection below everything
    pub fn send_to_back(&mut self) {
        self.reorder_selection(Reorder::Back);
    }

    fn reorder_selection(&mut self, direction: Reorder) {
        if self.selection.is_empty() {
            return;
        }
        let ids: Vec<Uuid> = self.selection.ids().to_vec();
        if self.board.scene.reorder(&ids, direction) {
            self.commit();
        }
    }

    // === GESTURE INTERNALS ===

    fn begin_draw(&mut self, point: Point) {
        let Some(kind) = self.tool.shape_kind() else {
            return;
        };
        let mut draft = Primitive::new(kind, point.x, point.y).with_style(self.brush);
        match kind {
            PrimitiveKind::FreehandPath => {
                draft.data = PrimitiveData::Points {
                    points: vec![[0.0, 0.0]],
                };
            }
            PrimitiveKind::Image => {
                draft.data = PrimitiveData::Image {
                    src: self.pending_image_src.clone().unwrap_or_default(),
                };
            }
            _ => {}
        }
        let draft = self.board.scene.add(draft);
        self.tool_state = ToolState::Drawing {
            anchor: point,
            draft,
        };
    }

    fn begin_select(&mut self, point: Point, modifiers: Modifiers) {
        match hit_test::hit_test_scene(&self.board.scene, point, self.config.hit_tolerance) {
            Some(hit) => {
                if modifiers.shift {
                    self.selection.toggle(hit);
                } else if !self.selection.contains(&hit) {
                    self.selection.select_only(hit);
                }
                let original_positions: HashMap<Uuid, (f64, f64)> = self
                    .selection
                    .ids()
                    .iter()
                    .filter_map(|id| self.board.scene.get(id).map(|o| (*id, (o.x, o.y))))
                    .collect();
                self.tool_state = ToolState::DraggingSelection {
                    start: point,
                    original_positions,
                    moved: false,
                };
            }
            None => {
                if !modifiers.shift {
                    self.selection.clear();
                }
                self.tool_state = ToolState::Marquee {
                    start: point,
                    current: point,
                };
            }
        }
    }

    fn begin_text(&mut self, point: Point) {
        let kind = if self.tool == Tool::Text {
            PrimitiveKind::Text
        } else {
            PrimitiveKind::StickyNote
        };
        let (width, height) = if kind == PrimitiveKind::Text {
            self.config.text_box_size
        } else {
            self.config.sticky_note_size
        };
        let draft = Primitive::new(kind, point.x, point.y)
            .with_size(width, height)
            .with_style(self.brush)
            .with_data(PrimitiveData::Text {
                text: String::new(),
                font_size: self.config.default_font_size,
            });
        let target = self.board.scene.add(draft);
        self.tool_state = ToolState::EditingText { target };
    }

    /// Resize the in-progress draft relative to its anchor
    fn resize_draft(&mut self, draft: &Uuid, anchor: Point, point: Point) {
        let star_points_count = self.config.star_points;
        let star_inner_ratio = self.config.star_inner_ratio;
        let Some(object) = self.board.scene.get_mut(draft) else {
            return;
        };

        match object.kind {
            // Lines keep their anchor endpoint; the frame is the endpoint delta
            PrimitiveKind::Line | PrimitiveKind::Arrow => {
                object.x = anchor.x;
                object.y = anchor.y;
                object.width = point.x - anchor.x;
                object.height = point.y - anchor.y;
            }
            PrimitiveKind::FreehandPath => {
                if let PrimitiveData::Points { points } = &mut object.data {
                    points.push([point.x - anchor.x, point.y - anchor.y]);
                    let (mut min_x, mut min_y, mut max_x, mut max_y) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
                    for p in points.iter() {
                        min_x = min_x.min(p[0]);
                        min_y = min_y.min(p[1]);
                        max_x = max_x.max(p[0]);
                        max_y = max_y.max(p[1]);
                    }
                    object.width = max_x - min_x;
                    object.height = max_y - min_y;
                }
            }
            // Radial shapes scale uniformly with the pointer distance,
            // keeping the generated outline's proportions
            PrimitiveKind::Star => {
                let radius = anchor.distance(point);
                Self::fit_radial(object, anchor, radius);
                object.data = PrimitiveData::Points {
                    points: star_points(star_points_count, radius, radius * star_inner_ratio),
                };
            }
            PrimitiveKind::Hexagon => {
                let radius = anchor.distance(point);
                Self::fit_radial(object, anchor, radius);
                object.data = PrimitiveData::Points {
                    points: hexagon_points(radius),
                };
            }
            PrimitiveKind::Diamond => {
                let radius = anchor.distance(point);
                Self::fit_radial(object, anchor, radius);
                object.data = PrimitiveData::Points {
                    points: diamond_points(radius * 2.0, radius * 2.0),
                };
            }
            // Box shapes stretch between the anchor and the pointer
            _ => {
                object.x = anchor.x.min(point.x);
                object.y = anchor.y.min(point.y);
                object.width = (point.x - anchor.x).abs();
                object.height = (point.y - anchor.y).abs();
                if object.kind == PrimitiveKind::Triangle {
                    object.data = PrimitiveData::Points {
                        points: triangle_points(object.width, object.height),
                    };
                }
            }
        }
    }

    fn fit_radial(object: &mut Primitive, anchor: Point, radius: f64) {
        object.x = anchor.x - radius;
        object.y = anchor.y - radius;
        object.width = radius * 2.0;
        object.height = radius * 2.0;
    }

    /// A click without a real drag produces nothing worth keeping
    fn draft_is_degenerate(&self, draft: &Uuid) -> bool {
        let min = self.config.min_draft_extent;
        match self.board.scene.get(draft) {
            Some(object) => match object.kind {
                PrimitiveKind::FreehandPath => match &object.data {
                    PrimitiveData::Points { points } => {
                        points.len() < 2
                            || (object.width.abs() < min && object.height.abs() < min)
                    }
                    _ => true,
                },
                PrimitiveKind::Line | PrimitiveKind::Arrow => {
                    object.width.abs() < min && object.height.abs() < min
                }
                _ => object.width < min || object.height < min,
            },
            None => true,
        }
    }

    fn erase_at(&mut self, point: Point) -> usize {
        let hits = hit_test::objects_at_point(&self.board.scene, point);
        for id in &hits {
            self.board.scene.remove(id);
        }
        if !hits.is_empty() {
            self.selection.prune(&self.board.scene);
        }
        hits.len()
    }

    /// Close out a mutating gesture: stamp the board, record one snapshot
    fn commit(&mut self) {
        self.board.touch();
        self.history.snapshot(&self.board.scene);
    }
}
