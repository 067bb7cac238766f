//! Primitive object model
//!
//! A `Primitive` is one visual element on a board: a shape, path, text block,
//! sticky note or image frame. Its serialized form (serde camelCase, `kind`
//! renamed to `type`) is exactly the record the persistence contract carries,
//! so a scene graph serializes to an ordered array of these with no separate
//! wire struct.

use crate::style::{Color, Style};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of drawable element types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveKind {
    Rectangle,
    Ellipse,
    Triangle,
    Star,
    Hexagon,
    Diamond,
    Line,
    Arrow,
    FreehandPath,
    Text,
    StickyNote,
    Image,
}

impl PrimitiveKind {
    /// Kinds whose outline is a point list (closed polygon)
    pub fn is_polygon(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Triangle
                | PrimitiveKind::Star
                | PrimitiveKind::Hexagon
                | PrimitiveKind::Diamond
        )
    }

    /// Kinds that carry editable text content
    pub fn has_text(self) -> bool {
        matches!(self, PrimitiveKind::Text | PrimitiveKind::StickyNote)
    }
}

/// Type-specific payload carried by a primitive
///
/// Serialized untagged: the wire form is `{text, fontSize}`, `{points: [..]}`,
/// `{src}` or `{}` depending on the kind. Point lists are stored relative to
/// the primitive origin so moving an object only touches `x`/`y`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimitiveData {
    Text {
        text: String,
        #[serde(rename = "fontSize")]
        font_size: f64,
    },
    Points {
        points: Vec<[f64; 2]>,
    },
    Image {
        src: String,
    },
    Empty {},
}

impl Default for PrimitiveData {
    fn default() -> Self {
        PrimitiveData::Empty {}
    }
}

impl PrimitiveData {
    /// Default payload for a freshly created primitive of the given kind
    pub fn default_for(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Text | PrimitiveKind::StickyNote => PrimitiveData::Text {
                text: String::new(),
                font_size: 16.0,
            },
            PrimitiveKind::FreehandPath => PrimitiveData::Points { points: Vec::new() },
            PrimitiveKind::Image => PrimitiveData::Image { src: String::new() },
            _ => PrimitiveData::Empty {},
        }
    }
}

/// One visual element on a board
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Primitive {
    /// Unique identifier
    pub id: Uuid,

    /// Element type tag (`type` on the wire)
    #[serde(rename = "type")]
    pub kind: PrimitiveKind,

    /// Position of the local origin in board space
    pub x: f64,
    pub y: f64,

    /// Frame size; for lines and arrows this is the endpoint delta and may be
    /// negative
    pub width: f64,
    pub height: f64,

    /// Rotation in degrees about the frame center
    pub rotation: f64,

    /// Uniform scale factor about the frame center
    pub scale: f64,

    /// Fill color
    pub fill: Color,

    /// Stroke color
    pub stroke: Color,

    /// Stroke width in pixels
    pub stroke_width: f64,

    /// Paint order; unique per board, highest paints frontmost
    pub z_index: i64,

    /// Type-specific payload
    #[serde(default)]
    pub data: PrimitiveData,
}

impl Primitive {
    /// Create a new primitive of the given kind at a position
    pub fn new(kind: PrimitiveKind, x: f64, y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            scale: 1.0,
            fill: Style::default().fill,
            stroke: Style::default().stroke,
            stroke_width: Style::default().stroke_width,
            z_index: 0,
            data: PrimitiveData::default_for(kind),
        }
    }

    /// Set the frame size
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Apply a whole style at once
    pub fn with_style(mut self, style: Style) -> Self {
        self.apply_style(&style);
        self
    }

    /// Set the payload
    pub fn with_data(mut self, data: PrimitiveData) -> Self {
        self.data = data;
        self
    }

    /// Set the rotation in degrees
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// The primitive's style as one value
    pub fn style(&self) -> Style {
        Style {
            fill: self.fill,
            stroke: self.stroke,
            stroke_width: self.stroke_width,
        }
    }

    /// Overwrite fill, stroke and stroke width from a style value
    pub fn apply_style(&mut self, style: &Style) {
        self.fill = style.fill;
        self.stroke = style.stroke;
        self.stroke_width = style.stroke_width;
    }
}

/// Partial update applied to a primitive through the scene graph
///
/// Unset fields leave the primitive untouched, so callers can patch a single
/// attribute without re-reading the object first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrimitivePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub scale: Option<f64>,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
    pub data: Option<PrimitiveData>,
}

impl PrimitivePatch {
    /// A patch that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new position
    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Resize the frame
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Change the fill color
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Change the stroke color
    pub fn stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    /// Change the stroke width
    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    /// Replace the payload
    pub fn data(mut self, data: PrimitiveData) -> Self {
        self.data = Some(data);
        self
    }

    /// Apply this patch to a primitive
    pub fn apply(&self, primitive: &mut Primitive) {
        if let Some(x) = self.x {
            primitive.x = x;
        }
        if let Some(y) = self.y {
            primitive.y = y;
        }
        if let Some(width) = self.width {
            primitive.width = width;
        }
        if let Some(height) = self.height {
            primitive.height = height;
        }
        if let Some(rotation) = self.rotation {
            primitive.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            primitive.scale = scale;
        }
        if let Some(fill) = self.fill {
            primitive.fill = fill;
        }
        if let Some(stroke) = self.stroke {
            primitive.stroke = stroke;
        }
        if let Some(stroke_width) = self.stroke_width {
            primitive.stroke_width = stroke_width;
        }
        if let Some(data) = &self.data {
            primitive.data = data.clone();
        }
    }
}
