#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod document;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod shape;
pub mod view;

pub use app::SketchApp;
pub use document::{Document, Mutation};
pub use editor::{Editor, EditorPrefs, Interaction};
pub use error::{EditorError, EditorResult};
pub use history::History;
pub use input::{EditorEvent, PointerTranslator};
pub use renderer::Renderer;
pub use shape::{Shape, ShapeId, ShapeKind, ShapeStyle, Tool};
pub use view::ViewTransform;
