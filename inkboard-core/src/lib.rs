// Inkboard Core Library
// Headless design-board editing engine: scene graph, history, tools,
// templates and the persistence contract.

pub mod board;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod history;
pub mod primitive;
pub mod renderer;
pub mod scene;
pub mod selection;
pub mod store;
pub mod style;
pub mod template;
pub mod tool;
