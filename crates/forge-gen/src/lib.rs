//! Asset Forge generation engine
//!
//! A generic generate / select / undo / redo workflow over three asset
//! kinds (cards, map tiles and full maps), with pluggable generation
//! clients (Gemini, mock), layered configuration and PNG export.

pub mod card;
pub mod client;
pub mod clients;
pub mod config;
pub mod export;
pub mod history;
pub mod map;
pub mod options;
pub mod preview;
pub mod tile;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use card::{CardConfig, CardKind, CardResult, CardWorkflow};
pub use client::{ClientStatus, GenerationClient};
pub use config::ForgeConfig;
pub use export::{ExportedFile, Exporter, PngExporter};
pub use history::HistoryStore;
pub use map::{MapConfig, MapKind, MapResult, MapWorkflow};
pub use options::{ConfigFields, FieldKind, FieldSpec};
pub use preview::RenderSettings;
pub use tile::{TileConfig, TileKind, TileResult, TileWorkflow};
pub use workflow::{
    GenerateOutcome, GenerationWorkflow, LiveDraft, Snapshot, WorkflowKind, WorkflowState,
    WorkflowView,
};
