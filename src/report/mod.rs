//! Report generation and export.

pub mod export;
pub mod generator;

pub use export::{export_nominations, ExportArtifact, ExportFormat};
pub use generator::*;
