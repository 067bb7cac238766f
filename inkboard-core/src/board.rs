//! Board document structure
//!
//! A `Board` is one design-canvas document: its settings plus the scene
//! graph holding its visual content. Exactly one scene graph exists per board;
//! external collaborators only ever see it through the persistence layer.

use crate::scene::SceneGraph;
use crate::style::Color;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A design board: settings and scene
#[derive(Clone, Debug)]
pub struct Board {
    /// Unique identifier for this board
    pub id: Uuid,

    /// Board name
    pub name: String,

    /// Canvas background color
    pub background_color: Color,

    /// Whether the alignment grid is shown
    pub grid_enabled: bool,

    /// Grid spacing in pixels
    pub grid_spacing: f64,

    /// Owning entity (account, project), if any
    pub owner_id: Option<Uuid>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last-modified timestamp
    pub updated_at: DateTime<Utc>,

    /// The board's visual content
    pub scene: SceneGraph,
}

impl Board {
    /// Create a new empty board with default settings
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            background_color: Color::WHITE,
            grid_enabled: false,
            grid_spacing: 20.0,
            owner_id: None,
            created_at: now,
            updated_at: now,
            scene: SceneGraph::new(),
        }
    }

    /// Set the background color
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Enable the grid with a spacing
    pub fn with_grid(mut self, spacing: f64) -> Self {
        self.grid_enabled = true;
        self.grid_spacing = spacing;
        self
    }

    /// Set the owning entity
    pub fn with_owner(mut self, owner_id: Uuid) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Refresh the last-modified timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
