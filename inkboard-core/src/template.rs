//! Board templates
//!
//! A template is an immutable starter scene: category, display metadata,
//! board settings and an ordered list of primitive definitions. Instantiating
//! one deep-copies its definitions into a fresh board; the template itself
//! only ever changes by its use-count ticking up after a successful
//! instantiation.
//!
//! Template settings use the catalog's camelCase naming; board storage uses
//! snake_case. The instantiator maps the fields one by one; structural
//! copying would silently drop a field the moment the conventions drift.

use crate::board::Board;
use crate::error::CoreError;
use crate::primitive::{Primitive, PrimitiveData, PrimitiveKind};
use crate::store::{board_to_record, BoardStore};
use crate::style::{Color, Style};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Template catalog categories
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateCategory {
    Moodboard,
    Brainstorm,
    Planning,
    Presentation,
    Design,
}

/// Board settings carried by a template
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSettings {
    pub background_color: Color,
    pub grid_enabled: bool,
}

/// An immutable starter scene definition
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: Uuid,
    pub category: TemplateCategory,
    pub name: String,
    pub description: String,
    pub featured: bool,
    pub settings: TemplateSettings,
    pub objects: Vec<Primitive>,
    pub use_count: u64,
}

impl Template {
    /// Create a template with empty content
    pub fn new(
        category: TemplateCategory,
        name: impl Into<String>,
        settings: TemplateSettings,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            name: name.into(),
            description: String::new(),
            featured: false,
            settings,
            objects: Vec::new(),
            use_count: 0,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark as featured in the catalog
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Set the primitive definitions
    pub fn with_objects(mut self, objects: Vec<Primitive>) -> Self {
        self.objects = objects;
        self
    }
}

/// External template catalog
pub trait TemplateCatalog {
    /// Templates in the catalog, optionally filtered by category
    fn list(&self, category: Option<TemplateCategory>) -> Vec<Template>;

    /// Fetch one template by id
    fn get(&self, id: &Uuid) -> Option<Template>;

    /// Record one successful instantiation (monotonic use-count)
    fn record_use(&mut self, id: &Uuid);
}

/// In-memory catalog for tests and seeding
#[derive(Default)]
pub struct MemoryCatalog {
    templates: Vec<Template>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template to the catalog
    pub fn insert(&mut self, template: Template) -> Uuid {
        let id = template.id;
        self.templates.push(template);
        id
    }
}

impl TemplateCatalog for MemoryCatalog {
    fn list(&self, category: Option<TemplateCategory>) -> Vec<Template> {
        self.templates
            .iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .cloned()
            .collect()
    }

    fn get(&self, id: &Uuid) -> Option<Template> {
        self.templates.iter().find(|t| &t.id == id).cloned()
    }

    fn record_use(&mut self, id: &Uuid) {
        if let Some(template) = self.templates.iter_mut().find(|t| &t.id == id) {
            template.use_count += 1;
        }
    }
}

/// Expand a template into a new, persisted board
///
/// The template's definitions are deep-copied with fresh ids, so boards made
/// from the same template never share objects. The use-count is recorded only
/// after the save succeeds; a failed save creates no board and counts no use.
pub fn create_board_from_template(
    catalog: &mut dyn TemplateCatalog,
    store: &mut dyn BoardStore,
    template_id: &Uuid,
    board_name: &str,
    owner_id: Option<Uuid>,
) -> Result<Board, CoreError> {
    let board_name = board_name.trim();
    if board_name.is_empty() {
        return Err(CoreError::validation("board name must not be empty"));
    }

    let template = catalog
        .get(template_id)
        .ok_or(CoreError::TemplateNotFound(*template_id))?;

    // Field-by-field settings translation onto the board
    let mut board = Board::new(board_name);
    board.background_color = template.settings.background_color;
    board.grid_enabled = template.settings.grid_enabled;
    board.owner_id = owner_id;

    // Independent deep copy: fresh ids, same geometry and styling
    let objects: Vec<Primitive> = template
        .objects
        .iter()
        .cloned()
        .map(|mut object| {
            object.id = Uuid::new_v4();
            object
        })
        .collect();
    board.scene.replace_all(objects);

    let record = board_to_record(&board)?;
    store.save(&record)?;
    catalog.record_use(template_id);
    log::debug!(
        "instantiated template {} into board {} ({} objects)",
        template_id,
        board.id,
        board.scene.len()
    );
    Ok(board)
}

/// Starter templates seeded into a fresh catalog
pub fn starter_templates() -> Vec<Template> {
    let note = |x: f64, y: f64, fill: Color| {
        Primitive::new(PrimitiveKind::StickyNote, x, y)
            .with_size(160.0, 160.0)
            .with_style(Style::default().with_fill(fill))
    };
    let column = |x: f64, label: &str| {
        [
            Primitive::new(PrimitiveKind::Rectangle, x, 80.0)
                .with_size(220.0, 520.0)
                .with_style(Style::default().with_fill(Color::rgb(240, 240, 245))),
            Primitive::new(PrimitiveKind::Text, x + 10.0, 40.0)
                .with_size(200.0, 32.0)
                .with_data(PrimitiveData::Text {
                    text: label.to_string(),
                    font_size: 20.0,
                }),
        ]
    };

    vec![
        Template::new(
            TemplateCategory::Planning,
            "Kanban board",
            TemplateSettings {
                background_color: Color::WHITE,
                grid_enabled: true,
            },
        )
        .with_description("Three-column to do / doing / done wall")
        .featured()
        .with_objects(
            column(40.0, "To do")
                .into_iter()
                .chain(column(300.0, "Doing"))
                .chain(column(560.0, "Done"))
                .collect(),
        ),
        Template::new(
            TemplateCategory::Brainstorm,
            "Sticky wall",
            TemplateSettings {
                background_color: Color::rgb(250, 250, 248),
                grid_enabled: false,
            },
        )
        .with_description("A spread of blank notes to start collecting ideas")
        .with_objects(vec![
            note(60.0, 60.0, Color::rgb(255, 235, 160)),
            note(260.0, 60.0, Color::rgb(255, 210, 160)),
            note(60.0, 260.0, Color::rgb(190, 230, 255)),
            note(260.0, 260.0, Color::rgb(200, 245, 190)),
        ]),
    ]
}
