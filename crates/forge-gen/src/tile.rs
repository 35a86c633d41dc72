//! Map-tile workflow: several seamless tile candidates for one prompt

use crate::client::{GenerationClient, MapTileRequest};
use crate::options::*;
use crate::preview::{self, RenderSettings};
use crate::workflow::{Candidates, GenerationWorkflow, Snapshot, WorkflowKind, WorkflowView};
use forge_core::{ForgeError, Result};
use image::RgbaImage;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileConfig {
    pub prompt: String,
    pub art_keywords: String,
    pub shape: MapShape,
    /// Used for naming exports; the backend only sees the prompt
    pub terrain: Terrain,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            prompt: "a lush meadow crossed by a shallow stream".to_string(),
            art_keywords: "hand-painted, vibrant".to_string(),
            shape: MapShape::Square,
            terrain: Terrain::Grassland,
        }
    }
}

impl ConfigFields for TileConfig {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::choice::<MapShape>("shape", "Shape"),
            FieldSpec::choice::<Terrain>("terrain", "Terrain"),
            FieldSpec::text("art_keywords", "Art Keywords"),
            FieldSpec::text("prompt", "Prompt"),
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "prompt" => Some(self.prompt.clone()),
            "art_keywords" => Some(self.art_keywords.clone()),
            "shape" => Some(self.shape.to_string()),
            "terrain" => Some(self.terrain.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "prompt" => self.prompt = value.to_string(),
            "art_keywords" => self.art_keywords = value.to_string(),
            "shape" => self.shape = parse_choice(name, value)?,
            "terrain" => self.terrain = parse_choice(name, value)?,
            _ => return Err(ForgeError::UnknownField(name.to_string())),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileResult {
    pub tile_candidates: Vec<String>,
}

impl Candidates for TileResult {
    fn candidates(&self) -> &[String] {
        &self.tile_candidates
    }
}

pub struct TileKind;

impl WorkflowKind for TileKind {
    const NAME: &'static str = "tile";
    const EXPORT_FALLBACK: &'static str = "custom_tile";

    type Config = TileConfig;
    type Output = TileResult;

    fn default_config() -> TileConfig {
        TileConfig::default()
    }

    fn validate(config: &TileConfig) -> Result<()> {
        if config.prompt.trim().is_empty() {
            return Err(ForgeError::ValidationError(
                "Please fill in the prompt.".to_string(),
            ));
        }
        Ok(())
    }

    fn request(client: &dyn GenerationClient, config: &TileConfig) -> Result<TileResult> {
        let content = client.request_map_tile(&MapTileRequest {
            prompt: config.prompt.clone(),
            art_keywords: config.art_keywords.clone(),
        })?;

        if content.image_candidates.is_empty() {
            return Err(ForgeError::GenerationError(
                "Failed to generate map tile from AI. No images were returned.".to_string(),
            ));
        }
        Ok(TileResult {
            tile_candidates: content.image_candidates,
        })
    }

    fn export_base_name(snapshot: &Snapshot<TileConfig, TileResult>) -> String {
        let config = snapshot.config();
        let head: String = config.prompt.chars().take(20).collect();
        format!("{}_{}", config.terrain, head)
    }

    fn render(view: &WorkflowView<'_, Self>, settings: &RenderSettings) -> Result<RgbaImage> {
        preview::render_tile(view.config.shape, view.artifact_for_display, settings)
    }
}

pub type TileWorkflow = GenerationWorkflow<TileKind>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::TileContent;
    use crate::testing::{RecordingExporter, StubClient};

    fn stub_tiles(images: &[&str]) -> StubClient {
        StubClient::with_tiles(TileContent {
            image_candidates: images.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn test_prompt_required() {
        let mut wf = TileWorkflow::new();
        wf.set_field("prompt", "").unwrap();
        let client = stub_tiles(&["a"]);
        assert!(wf.generate(&client).is_err());
        assert_eq!(wf.last_error(), Some("Please fill in the prompt."));
        assert_eq!(client.calls(), 0);
    }

    #[test]
    fn test_empty_candidates_is_failure() {
        let mut wf = TileWorkflow::new();
        let err = wf.generate(&stub_tiles(&[])).unwrap_err();
        assert!(matches!(err, ForgeError::GenerationError(_)));
        assert!(wf.history().present().result().is_none());
        assert!(!wf.history().can_undo());
        assert!(wf.last_error().is_some());
    }

    #[test]
    fn test_generate_selects_first_tile() {
        let mut wf = TileWorkflow::new();
        wf.generate(&stub_tiles(&["t1", "t2", "t3", "t4"])).unwrap();
        assert_eq!(wf.draft().selected.as_deref(), Some("t1"));
        wf.select_artifact("t3").unwrap();
        assert_eq!(wf.view().artifact_for_display, Some("t3"));
    }

    #[test]
    fn test_export_name_uses_terrain_and_prompt_head() {
        let mut wf = TileWorkflow::new();
        wf.set_field("terrain", "volcanic").unwrap();
        wf.set_field("prompt", "rivers of glowing lava between basalt").unwrap();
        wf.generate(&stub_tiles(&["t1"])).unwrap();

        assert_eq!(
            TileKind::export_base_name(wf.history().present()),
            "Volcanic_rivers of glowing la"
        );
    }

    #[test]
    fn test_export_renders_without_mutating() {
        let mut wf = TileWorkflow::new();
        wf.set_field("shape", "Hexagon").unwrap();
        wf.generate(&stub_tiles(&["not-a-real-image"])).unwrap();
        let history = wf.history().clone();

        let exporter = RecordingExporter::default();
        let err = wf.export(&exporter, &RenderSettings::default()).unwrap_err();
        assert!(matches!(err, ForgeError::ExportError(_)));
        assert!(exporter.stems().is_empty());
        assert_eq!(*wf.history(), history);
    }

    #[test]
    fn test_manifest_lists_shapes_and_terrains() {
        let fields = TileConfig::fields();
        let terrain = fields.iter().find(|f| f.name == "terrain").unwrap();
        match terrain.kind {
            FieldKind::Choice(values) => assert_eq!(values.len(), 8),
            FieldKind::Text => panic!("terrain should be a choice"),
        }
    }
}
