//! Full-map workflow: one generated map image with an optional grid overlay

use crate::client::{GenerationClient, MapRequest};
use crate::options::*;
use crate::preview::{self, RenderSettings};
use crate::workflow::{Candidates, GenerationWorkflow, Snapshot, WorkflowKind, WorkflowView};
use forge_core::{ForgeError, Result};
use image::RgbaImage;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    pub prompt: String,
    pub map_type: MapType,
    pub map_style: MapStyle,
    /// Overlay drawn by the preview only
    pub grid_type: GridType,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            prompt: "a bustling port town with a large marketplace and a mysterious lighthouse"
                .to_string(),
            map_type: MapType::City,
            map_style: MapStyle::FantasyAtlas,
            grid_type: GridType::Square,
        }
    }
}

impl ConfigFields for MapConfig {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::choice::<MapType>("map_type", "Map Type"),
            FieldSpec::choice::<MapStyle>("map_style", "Style"),
            FieldSpec::choice::<GridType>("grid_type", "Grid"),
            FieldSpec::text("prompt", "Prompt"),
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "prompt" => Some(self.prompt.clone()),
            "map_type" => Some(self.map_type.to_string()),
            "map_style" => Some(self.map_style.to_string()),
            "grid_type" => Some(self.grid_type.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "prompt" => self.prompt = value.to_string(),
            "map_type" => self.map_type = parse_choice(name, value)?,
            "map_style" => self.map_style = parse_choice(name, value)?,
            "grid_type" => self.grid_type = parse_choice(name, value)?,
            _ => return Err(ForgeError::UnknownField(name.to_string())),
        }
        Ok(())
    }
}

/// A generated map. Its single image is also its only candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapResult {
    pub map_url: String,
}

impl Candidates for MapResult {
    fn candidates(&self) -> &[String] {
        std::slice::from_ref(&self.map_url)
    }
}

pub struct MapKind;

impl WorkflowKind for MapKind {
    const NAME: &'static str = "map";
    const EXPORT_FALLBACK: &'static str = "custom_map";

    type Config = MapConfig;
    type Output = MapResult;

    fn default_config() -> MapConfig {
        MapConfig::default()
    }

    fn validate(config: &MapConfig) -> Result<()> {
        if config.prompt.trim().is_empty() {
            return Err(ForgeError::ValidationError(
                "Please fill in the prompt.".to_string(),
            ));
        }
        Ok(())
    }

    fn request(client: &dyn GenerationClient, config: &MapConfig) -> Result<MapResult> {
        let content = client.request_map(&MapRequest {
            prompt: config.prompt.clone(),
            map_type: config.map_type,
            map_style: config.map_style,
        })?;

        if content.image_uri.trim().is_empty() {
            return Err(ForgeError::GenerationError(
                "Failed to generate map from AI. No image was returned.".to_string(),
            ));
        }
        Ok(MapResult {
            map_url: content.image_uri,
        })
    }

    fn export_base_name(snapshot: &Snapshot<MapConfig, MapResult>) -> String {
        let config = snapshot.config();
        let head: String = config.prompt.chars().take(20).collect();
        format!("{}_{}", config.map_type, head)
    }

    fn render(view: &WorkflowView<'_, Self>, settings: &RenderSettings) -> Result<RgbaImage> {
        preview::render_map(view.config.grid_type, view.artifact_for_display, settings)
    }
}

pub type MapWorkflow = GenerationWorkflow<MapKind>;
