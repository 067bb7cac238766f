//! Persistence boundary
//!
//! The core never talks to storage directly: it serializes a board into a
//! `BoardRecord` and hands it to a `BoardStore` implementation owned by the
//! surrounding application. The record is captured at call-issue time, so a
//! save always persists exactly the state the caller saw, regardless of what
//! the adapter does afterwards.
//!
//! Naming conventions differ on each side of this boundary: scene-graph
//! records use camelCase (`strokeWidth`, `zIndex`), board storage fields use
//! snake_case (`background_color`, `grid_enabled`). The mapping between the
//! two lives here and in the template instantiator, field by field.

use crate::board::Board;
use crate::error::{CoreError, StoreError};
use crate::primitive::Primitive;
use crate::style::Color;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Version tag written into every persisted record
pub const SCHEMA_VERSION: &str = "1.0.0";

/// A board in its storage form
///
/// Field names are the storage convention (snake_case); `scene` holds the
/// scene-graph JSON contract: an ordered array of primitive records.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardRecord {
    pub board_id: Uuid,
    pub name: String,
    pub background_color: Color,
    pub grid_enabled: bool,
    pub grid_spacing: f64,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub schema_version: String,
    pub scene: serde_json::Value,
}

/// External persistence adapter
///
/// Implementations own retry policy and durability. Two concurrent saves of
/// the same board resolve last-write-wins; the core does not arbitrate.
pub trait BoardStore {
    fn save(&mut self, record: &BoardRecord) -> Result<(), StoreError>;
    fn load(&self, board_id: &Uuid) -> Result<BoardRecord, StoreError>;
}

/// Authorization gate consulted before the save path
///
/// The core assumes mutation entry points are only invoked for boards the
/// actor may edit; the gate is re-checked only where edits leave the process.
pub trait AccessGate {
    fn can_edit(&self, board_id: &Uuid) -> bool;
}

/// Gate that permits everything; for tests and single-user embedding
pub struct OpenGate;

impl AccessGate for OpenGate {
    fn can_edit(&self, _board_id: &Uuid) -> bool {
        true
    }
}

/// Serialize a board into its storage record
///
/// The field-by-field mapping is deliberate: structural copying would
/// silently drop fields whenever the two naming conventions drift.
pub fn board_to_record(board: &Board) -> Result<BoardRecord, CoreError> {
    let scene = serde_json::to_value(board.scene.objects())?;
    Ok(BoardRecord {
        board_id: board.id,
        name: board.name.clone(),
        background_color: board.background_color,
        grid_enabled: board.grid_enabled,
        grid_spacing: board.grid_spacing,
        owner_id: board.owner_id,
        created_at: board.created_at,
        updated_at: board.updated_at,
        schema_version: SCHEMA_VERSION.to_string(),
        scene,
    })
}

/// Rebuild a board from its storage record
pub fn board_from_record(record: BoardRecord) -> Result<Board, CoreError> {
    let objects: Vec<Primitive> = serde_json::from_value(record.scene)?;
    let mut board = Board::new(record.name);
    board.id = record.board_id;
    board.background_color = record.background_color;
    board.grid_enabled = record.grid_enabled;
    board.grid_spacing = record.grid_spacing;
    board.owner_id = record.owner_id;
    board.created_at = record.created_at;
    board.updated_at = record.updated_at;
    board.scene.replace_all(objects);
    Ok(board)
}

/// Persist a board through the adapter
///
/// The record is built before the adapter is invoked, so the saved state is
/// the one current at call-issue time. A failed save surfaces the error and
/// leaves the board and its history untouched; the caller may retry.
pub fn save_board(
    store: &mut dyn BoardStore,
    gate: &dyn AccessGate,
    board: &Board,
) -> Result<(), CoreError> {
    if !gate.can_edit(&board.id) {
        return Err(CoreError::Forbidden(board.id));
    }
    let record = board_to_record(board)?;
    store.save(&record)?;
    log::debug!("saved board {} ({} objects)", board.id, board.scene.len());
    Ok(())
}

/// Load a board through the adapter
///
/// An unknown board id is a hard failure, unlike object-level stale ids.
pub fn load_board(store: &dyn BoardStore, board_id: &Uuid) -> Result<Board, CoreError> {
    let record = store.load(board_id)?;
    let board = board_from_record(record)?;
    log::debug!("loaded board {} ({} objects)", board.id, board.scene.len());
    Ok(board)
}

/// In-memory store for tests and offline use
#[derive(Default)]
pub struct MemoryStore {
    records: HashMap<Uuid, BoardRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored boards
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl BoardStore for MemoryStore {
    fn save(&mut self, record: &BoardRecord) -> Result<(), StoreError> {
        // Last-write-wins; no conflict arbitration at this boundary
        self.records.insert(record.board_id, record.clone());
        Ok(())
    }

    fn load(&self, board_id: &Uuid) -> Result<BoardRecord, StoreError> {
        self.records
            .get(board_id)
            .cloned()
            .ok_or(StoreError::NotFound(*board_id))
    }
}
