//! Integration tests for template instantiation
//!
//! Covers the settings translation between the template naming convention
//! and board storage, deep-copy independence of instantiated boards, and the
//! use-count contract.

use inkboard_core::editor::{Editor, Modifiers};
use inkboard_core::primitive::{Primitive, PrimitiveKind};
use inkboard_core::store::{load_board, BoardStore, MemoryStore};
use inkboard_core::style::{Color, Style};
use inkboard_core::template::{
    create_board_from_template, starter_templates, MemoryCatalog, Template, TemplateCatalog,
    TemplateCategory, TemplateSettings,
};
use inkboard_core::tool::Tool;
use kurbo::Point;

fn seeded_catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    for template in starter_templates() {
        catalog.insert(template);
    }
    catalog
}

#[test]
fn test_grid_setting_survives_storage_roundtrip() {
    // Template naming says `gridEnabled`; the stored board record must carry
    // the storage field, disabled, all the way through save and load.
    let mut catalog = MemoryCatalog::new();
    let template_id = catalog.insert(
        Template::new(
            TemplateCategory::Design,
            "Gridless frame",
            TemplateSettings {
                background_color: Color::rgb(12, 14, 18),
                grid_enabled: false,
            },
        )
        .with_objects(vec![
            Primitive::new(PrimitiveKind::Rectangle, 0.0, 0.0).with_size(320.0, 180.0),
        ]),
    );

    let template_json = serde_json::to_value(&catalog.get(&template_id).unwrap()).unwrap();
    assert_eq!(template_json["settings"]["gridEnabled"], false);

    let mut store = MemoryStore::new();
    let board =
        create_board_from_template(&mut catalog, &mut store, &template_id, "Frames", None)
            .unwrap();

    let record = store.load(&board.id).unwrap();
    let record_json = serde_json::to_value(&record).unwrap();
    assert_eq!(record_json["grid_enabled"], false);
    assert_eq!(record_json["background_color"], "#0c0e12");

    let reloaded = load_board(&store, &board.id).unwrap();
    assert!(!reloaded.grid_enabled);
    assert_eq!(reloaded.background_color, Color::rgb(12, 14, 18));
    assert_eq!(reloaded.scene.len(), 1);
}

#[test]
fn test_two_instantiations_are_disjoint() {
    let mut catalog = seeded_catalog();
    let mut store = MemoryStore::new();
    let template_id = catalog.list(Some(TemplateCategory::Brainstorm))[0].id;

    let a = create_board_from_template(&mut catalog, &mut store, &template_id, "Wall A", None)
        .unwrap();
    let b = create_board_from_template(&mut catalog, &mut store, &template_id, "Wall B", None)
        .unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(a.scene.len(), b.scene.len());

    // Structurally identical, ids disjoint
    let b_ids: Vec<_> = b.scene.iter().map(|o| o.id).collect();
    for (x, y) in a.scene.iter().zip(b.scene.iter()) {
        assert!(!b_ids.contains(&x.id));
        assert_eq!(x.kind, y.kind);
        assert_eq!((x.x, x.y), (y.x, y.y));
        assert_eq!(x.fill, y.fill);
    }

    assert_eq!(catalog.get(&template_id).unwrap().use_count, 2);
}

#[test]
fn test_editing_one_instantiation_leaves_the_other_alone() {
    let mut catalog = seeded_catalog();
    let mut store = MemoryStore::new();
    let template_id = catalog.list(Some(TemplateCategory::Brainstorm))[0].id;

    let a = create_board_from_template(&mut catalog, &mut store, &template_id, "Wall A", None)
        .unwrap();
    let b = create_board_from_template(&mut catalog, &mut store, &template_id, "Wall B", None)
        .unwrap();
    let b_before = b.scene.to_vec();

    // Recolor everything on board A through an editor session
    let mut editor = Editor::new(a);
    editor.set_tool(Tool::Select);
    let first = editor.scene().objects()[0].clone();
    editor.pointer_down(
        Point::new(first.x + 10.0, first.y + 10.0),
        Modifiers::default(),
    );
    editor.pointer_move(Point::new(first.x + 110.0, first.y + 60.0));
    editor.pointer_up(Point::new(first.x + 110.0, first.y + 60.0));
    editor.set_fill_color(Color::rgb(255, 0, 0));

    assert_eq!(b_before, b.scene.to_vec());
    assert_eq!(
        catalog.get(&template_id).unwrap().objects[0].style(),
        Style::default().with_fill(Color::rgb(255, 235, 160))
    );
}

#[test]
fn test_kanban_template_expands_fully() {
    let mut catalog = seeded_catalog();
    let mut store = MemoryStore::new();
    let template_id = catalog.list(Some(TemplateCategory::Planning))[0].id;

    let board =
        create_board_from_template(&mut catalog, &mut store, &template_id, "Sprint 12", None)
            .unwrap();

    assert!(board.grid_enabled);
    let rects = board
        .scene
        .iter()
        .filter(|o| o.kind == PrimitiveKind::Rectangle)
        .count();
    let labels = board
        .scene
        .iter()
        .filter(|o| o.kind == PrimitiveKind::Text)
        .count();
    assert_eq!(rects, 3);
    assert_eq!(labels, 3);

    // z-indices are a contiguous range after expansion
    let zs: Vec<i64> = board.scene.iter().map(|o| o.z_index).collect();
    let expected: Vec<i64> = (0..board.scene.len() as i64).collect();
    assert_eq!(zs, expected);
}
