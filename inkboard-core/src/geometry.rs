//! Pure geometry helpers
//!
//! Point-list generators for the polygon-derived primitives and the
//! `Primitive` → `BezPath` lowering shared by hit testing and rendering.
//! Everything here is a pure function; the same generators feed live drawing
//! and template expansion.

use crate::primitive::{Primitive, PrimitiveData, PrimitiveKind};
use kurbo::{Affine, BezPath, Ellipse, Point, Rect, RoundedRect, Shape as KurboShape};

/// Corner radius used for sticky-note frames
pub const STICKY_CORNER_RADIUS: f64 = 8.0;

/// Generate a star outline
///
/// Vertices alternate between `outer_radius` and `inner_radius`, starting
/// with an outer vertex pointing up. The outline is centered inside a
/// `2 * outer_radius` square with its origin at the top-left corner, so the
/// returned points can be stored relative to a primitive origin directly.
pub fn star_points(point_count: usize, outer_radius: f64, inner_radius: f64) -> Vec<[f64; 2]> {
    let center = outer_radius;
    let step = std::f64::consts::PI / point_count as f64;
    (0..point_count * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            let angle = -std::f64::consts::FRAC_PI_2 + step * i as f64;
            [center + radius * angle.cos(), center + radius * angle.sin()]
        })
        .collect()
}

/// Generate a regular hexagon inside a `2 * radius` square
pub fn hexagon_points(radius: f64) -> Vec<[f64; 2]> {
    let center = radius;
    (0..6)
        .map(|i| {
            let angle = -std::f64::consts::FRAC_PI_2 + std::f64::consts::FRAC_PI_3 * i as f64;
            [center + radius * angle.cos(), center + radius * angle.sin()]
        })
        .collect()
}

/// Generate a diamond (rhombus) filling a `width x height` box
pub fn diamond_points(width: f64, height: f64) -> Vec<[f64; 2]> {
    vec![
        [width / 2.0, 0.0],
        [width, height / 2.0],
        [width / 2.0, height],
        [0.0, height / 2.0],
    ]
}

/// Generate an isosceles triangle filling a `width x height` box
pub fn triangle_points(width: f64, height: f64) -> Vec<[f64; 2]> {
    vec![[width / 2.0, 0.0], [width, height], [0.0, height]]
}

/// Build a path from a point list
pub fn polygon_path(points: &[[f64; 2]], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(Point::new(first[0], first[1]));
        for p in iter {
            path.line_to(Point::new(p[0], p[1]));
        }
        if closed {
            path.close_path();
        }
    }
    path
}

/// Default point list for a polygon-derived kind, sized to `width x height`
///
/// Used when a primitive definition (e.g. from a template) carries no explicit
/// point payload.
pub fn default_polygon_points(kind: PrimitiveKind, width: f64, height: f64) -> Vec<[f64; 2]> {
    match kind {
        PrimitiveKind::Triangle => triangle_points(width, height),
        PrimitiveKind::Diamond => diamond_points(width, height),
        PrimitiveKind::Star => {
            let radius = width.min(height) / 2.0;
            star_points(5, radius, radius * 0.5)
        }
        PrimitiveKind::Hexagon => {
            let radius = width.min(height) / 2.0;
            hexagon_points(radius)
        }
        _ => Vec::new(),
    }
}

/// Lower a primitive to a path in its local space (origin at the top-left)
pub fn primitive_path(primitive: &Primitive) -> BezPath {
    let w = primitive.width;
    let h = primitive.height;
    match primitive.kind {
        PrimitiveKind::Rectangle | PrimitiveKind::Text | PrimitiveKind::Image => {
            Rect::new(0.0, 0.0, w, h).to_path(0.1)
        }
        PrimitiveKind::StickyNote => {
            RoundedRect::new(0.0, 0.0, w, h, STICKY_CORNER_RADIUS).to_path(0.1)
        }
        PrimitiveKind::Ellipse => {
            Ellipse::new((w / 2.0, h / 2.0), (w / 2.0, h / 2.0), 0.0).to_path(0.1)
        }
        PrimitiveKind::Triangle
        | PrimitiveKind::Star
        | PrimitiveKind::Hexagon
        | PrimitiveKind::Diamond => match &primitive.data {
            PrimitiveData::Points { points } if !points.is_empty() => polygon_path(points, true),
            _ => polygon_path(&default_polygon_points(primitive.kind, w, h), true),
        },
        PrimitiveKind::FreehandPath => match &primitive.data {
            PrimitiveData::Points { points } => polygon_path(points, false),
            _ => BezPath::new(),
        },
        PrimitiveKind::Line => {
            let mut path = BezPath::new();
            path.move_to(Point::ORIGIN);
            path.line_to(Point::new(w, h));
            path
        }
        PrimitiveKind::Arrow => arrow_path(w, h),
    }
}

/// A line from the origin to `(dx, dy)` with a two-segment arrowhead
fn arrow_path(dx: f64, dy: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(Point::ORIGIN);
    let tip = Point::new(dx, dy);
    path.line_to(tip);

    let len = dx.hypot(dy);
    if len > f64::EPSILON {
        let head_len = (len * 0.3).min(14.0);
        let angle = dy.atan2(dx);
        for wing in [std::f64::consts::FRAC_PI_6, -std::f64::consts::FRAC_PI_6] {
            let theta = angle + std::f64::consts::PI + wing;
            path.move_to(tip);
            path.line_to(Point::new(
                tip.x + head_len * theta.cos(),
                tip.y + head_len * theta.sin(),
            ));
        }
    }
    path
}

/// Local-to-board transform for a primitive
///
/// Rotation and uniform scale are applied about the center of the primitive's
/// `width x height` frame.
pub fn local_transform(primitive: &Primitive) -> Affine {
    let center = Point::new(primitive.width / 2.0, primitive.height / 2.0);
    Affine::translate((primitive.x, primitive.y))
        * Affine::rotate_about(primitive.rotation.to_radians(), center)
        * Affine::scale_about(primitive.scale, center)
}

/// Bounding box of a primitive in board space
pub fn bounds(primitive: &Primitive) -> Rect {
    let path = primitive_path(primitive);
    local_transform(primitive).transform_rect_bbox(path.bounding_box())
}
