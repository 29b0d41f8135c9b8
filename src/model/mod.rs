//! # Document Model
//!
//! Boards own ordered pages; pages own z-stacked elements.

pub mod board;
pub mod element;
pub mod page;

pub use board::{Board, Skin};
pub use element::{Element, ElementDraft, ElementKind, ElementPatch, Geometry};
pub use page::Page;
