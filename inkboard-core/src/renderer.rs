//! Rendering boards to Vello scenes
//!
//! Output-only lowering of a board onto a GPU-ready `vello::Scene`:
//! background, optional grid, then primitives in paint order. Nothing here
//! feeds back into core state, so any other drawing surface can replace this
//! by walking the scene graph the same way. Glyph layout for text content is
//! the embedding UI's concern; text-bearing primitives contribute only their
//! frames.

use crate::board::Board;
use crate::geometry::{local_transform, primitive_path};
use crate::primitive::{Primitive, PrimitiveKind};
use crate::scene::SceneGraph;
use crate::style::Color;
use kurbo::{Affine, Line, Rect, Stroke};
use vello::peniko::Fill;
use vello::Scene;

/// Grid line color
const GRID_COLOR: Color = Color { r: 0, g: 0, b: 0, a: 28 };

/// Image frames are drawn as a tinted placeholder until the UI layers the
/// decoded bitmap on top
const IMAGE_PLACEHOLDER: Color = Color { r: 225, g: 228, b: 233, a: 255 };

/// Render a board into a vello scene
///
/// `viewport` is the visible region in board coordinates; background and grid
/// cover it, primitives are drawn wherever they are.
pub fn render_board(board: &Board, viewport: Rect, scene: &mut Scene) {
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        board.background_color.to_peniko(),
        None,
        &viewport,
    );

    if board.grid_enabled && board.grid_spacing > 0.0 {
        render_grid(viewport, board.grid_spacing, scene);
    }

    render_scene_graph(&board.scene, scene);
}

/// Render the scene graph in paint order
pub fn render_scene_graph(graph: &SceneGraph, scene: &mut Scene) {
    for object in graph.iter() {
        render_primitive(object, scene);
    }
}

/// Render one primitive
pub fn render_primitive(primitive: &Primitive, scene: &mut Scene) {
    let path = primitive_path(primitive);
    let transform = local_transform(primitive);
    let stroke = Stroke::new(primitive.stroke_width);

    match primitive.kind {
        // Open outlines are stroke-only
        PrimitiveKind::Line | PrimitiveKind::Arrow | PrimitiveKind::FreehandPath => {
            scene.stroke(&stroke, transform, primitive.stroke.to_peniko(), None, &path);
        }
        // Text frames carry no paint of their own
        PrimitiveKind::Text => {}
        PrimitiveKind::Image => {
            scene.fill(
                Fill::NonZero,
                transform,
                IMAGE_PLACEHOLDER.to_peniko(),
                None,
                &path,
            );
            if primitive.stroke_width > 0.0 {
                scene.stroke(&stroke, transform, primitive.stroke.to_peniko(), None, &path);
            }
        }
        _ => {
            scene.fill(
                Fill::NonZero,
                transform,
                primitive.fill.to_peniko(),
                None,
                &path,
            );
            if primitive.stroke_width > 0.0 {
                scene.stroke(&stroke, transform, primitive.stroke.to_peniko(), None, &path);
            }
        }
    }
}

fn render_grid(viewport: Rect, spacing: f64, scene: &mut Scene) {
    let stroke = Stroke::new(1.0);
    let brush = GRID_COLOR.to_peniko();

    let mut x = (viewport.x0 / spacing).floor() * spacing;
    while x <= viewport.x1 {
        let line = Line::new((x, viewport.y0), (x, viewport.y1));
        scene.stroke(&stroke, Affine::IDENTITY, brush, None, &line);
        x += spacing;
    }

    let mut y = (viewport.y0 / spacing).floor() * spacing;
    while y <= viewport.y1 {
        let line = Line::new((viewport.x0, y), (viewport.x1, y));
        scene.stroke(&stroke, Affine::IDENTITY, brush, None, &line);
        y += spacing;
    }
}
