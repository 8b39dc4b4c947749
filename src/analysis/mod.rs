//! Heuristic classification of files and projects.

pub mod architecture;
pub mod purpose;

pub use architecture::{ArchitectureStyle, DesignPattern};
pub use purpose::{PurposeClassifier, PurposeInput, PurposeTag};
