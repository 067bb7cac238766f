//! SVG export
//!
//! Writes a board out as a standalone SVG document sized to its content.
//! Like the vello renderer this is an output-only transformation; text
//! content is emitted as plain `<text>` elements and left to the viewer's
//! font stack.

use crate::board::Board;
use crate::geometry::{bounds, local_transform, primitive_path};
use crate::primitive::{Primitive, PrimitiveData, PrimitiveKind};
use kurbo::{Affine, Rect, Vec2};
use std::fmt::Write as _;

/// Padding around the content bounds, in pixels
const MARGIN: f64 = 20.0;

/// Canvas used when the board has no content
const EMPTY_CANVAS: Rect = Rect::new(0.0, 0.0, 640.0, 480.0);

/// Render a board to an SVG document string
pub fn board_to_svg(board: &Board) -> String {
    let content = board
        .scene
        .iter()
        .map(bounds)
        .reduce(|acc, b| acc.union(b))
        .unwrap_or(EMPTY_CANVAS);

    let width = (content.width() + 2.0 * MARGIN).ceil().max(1.0);
    let height = (content.height() + 2.0 * MARGIN).ceil().max(1.0);
    let offset = Vec2::new(MARGIN - content.x0, MARGIN - content.y0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    let _ = writeln!(
        out,
        "  <rect width=\"{width}\" height=\"{height}\" fill=\"{}\"/>",
        board.background_color.to_hex()
    );

    for object in board.scene.iter() {
        write_primitive(&mut out, object, offset);
    }

    out.push_str("</svg>\n");
    out
}

fn write_primitive(out: &mut String, primitive: &Primitive, offset: Vec2) {
    let transform = Affine::translate(offset) * local_transform(primitive);
    let [a, b, c, d, e, f] = transform.as_coeffs();
    let matrix = format!("matrix({a} {b} {c} {d} {e} {f})");

    match primitive.kind {
        PrimitiveKind::Line | PrimitiveKind::Arrow | PrimitiveKind::FreehandPath => {
            let _ = writeln!(
                out,
                "  <path d=\"{}\" transform=\"{matrix}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                primitive_path(primitive).to_svg(),
                primitive.stroke.to_hex(),
                primitive.stroke_width
            );
        }
        PrimitiveKind::Text => write_text(out, primitive, &matrix),
        _ => {
            let _ = writeln!(
                out,
                "  <path d=\"{}\" transform=\"{matrix}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                primitive_path(primitive).to_svg(),
                primitive.fill.to_hex(),
                primitive.stroke.to_hex(),
                primitive.stroke_width
            );
            if primitive.kind == PrimitiveKind::StickyNote {
                write_text(out, primitive, &matrix);
            }
        }
    }
}

fn write_text(out: &mut String, primitive: &Primitive, matrix: &str) {
    if let PrimitiveData::Text { text, font_size } = &primitive.data {
        if text.is_empty() {
            return;
        }
        let _ = writeln!(
            out,
            "  <text x=\"{}\" y=\"{}\" transform=\"{matrix}\" font-size=\"{font_size}\" fill=\"{}\">{}</text>",
            font_size / 2.0,
            font_size * 1.2,
            primitive.stroke.to_hex(),
            xml_escape(text)
        );
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, Style};

    #[test]
    fn test_empty_board_still_produces_a_document() {
        let svg = board_to_svg(&Board::new("Empty"));
        assert!(svg.starts_with("<svg xmlns"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_shapes_and_text_are_emitted() {
        let mut board = Board::new("Export");
        board.scene.add(
            Primitive::new(PrimitiveKind::Rectangle, 10.0, 10.0)
                .with_size(100.0, 50.0)
                .with_style(Style::default().with_fill(Color::rgb(255, 0, 0))),
        );
        board.scene.add(
            Primitive::new(PrimitiveKind::Text, 10.0, 80.0)
                .with_size(200.0, 40.0)
                .with_data(PrimitiveData::Text {
                    text: "a < b & c".to_string(),
                    font_size: 18.0,
                }),
        );

        let svg = board_to_svg(&board);
        assert!(svg.contains("fill=\"#ff0000\""));
        assert!(svg.contains("a &lt; b &amp; c"));
        assert!(!svg.contains("a < b"));
    }

    #[test]
    fn test_open_paths_have_no_fill() {
        let mut board = Board::new("Lines");
        board.scene.add(Primitive::new(PrimitiveKind::Line, 0.0, 0.0).with_size(100.0, 40.0));

        let svg = board_to_svg(&board);
        assert!(svg.contains("fill=\"none\""));
    }
}
