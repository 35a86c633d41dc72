//! Card workflow: art candidates plus generated name, effect and flavour text

use crate::client::{CardContentRequest, CardText, GenerationClient};
use crate::options::*;
use crate::preview::{self, RenderSettings};
use crate::workflow::{Candidates, GenerationWorkflow, Snapshot, WorkflowKind, WorkflowView};
use forge_core::{ForgeError, Result};
use image::RgbaImage;
use serde::Serialize;

/// Everything the user can set before generating a card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardConfig {
    pub art_prompt: String,
    /// Theme prompt for the card text
    pub text_prompt: String,
    pub card_type: CardType,
    pub card_font: CardFont,
    pub card_frame: CardFrame,
    pub card_size: CardSize,
    pub card_format: CardFormat,
    pub art_style: ArtStyle,
    pub art_keywords: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            art_prompt: "A majestic dragon warrior, wielding a sword of pure energy".to_string(),
            text_prompt: "A powerful dragon-themed attack card".to_string(),
            card_type: CardType::Attack,
            card_font: CardFont::Fantasy,
            card_frame: CardFrame::Classic,
            card_size: CardSize::Standard,
            card_format: CardFormat::Portrait,
            art_style: ArtStyle::EpicFantasy,
            art_keywords: "hyperrealistic, 8k".to_string(),
        }
    }
}

impl CardConfig {
    pub fn aspect_ratio(&self) -> AspectRatio {
        aspect_ratio_for(self.card_size, self.card_format)
    }
}

impl ConfigFields for CardConfig {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::choice::<CardType>("card_type", "Type"),
            FieldSpec::choice::<CardFont>("card_font", "Font"),
            FieldSpec::choice::<CardFrame>("card_frame", "Frame"),
            FieldSpec::choice::<CardSize>("card_size", "Size"),
            FieldSpec::choice::<CardFormat>("card_format", "Format"),
            FieldSpec::choice::<ArtStyle>("art_style", "Style"),
            FieldSpec::text("art_keywords", "Art Keywords"),
            FieldSpec::text("art_prompt", "Art Prompt"),
            FieldSpec::text("text_prompt", "Text & Theme Prompt"),
        ]
    }

    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "art_prompt" => self.art_prompt.clone(),
            "text_prompt" => self.text_prompt.clone(),
            "card_type" => self.card_type.to_string(),
            "card_font" => self.card_font.to_string(),
            "card_frame" => self.card_frame.to_string(),
            "card_size" => self.card_size.to_string(),
            "card_format" => self.card_format.to_string(),
            "art_style" => self.art_style.to_string(),
            "art_keywords" => self.art_keywords.clone(),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "art_prompt" => self.art_prompt = value.to_string(),
            "text_prompt" => self.text_prompt = value.to_string(),
            "card_type" => self.card_type = parse_choice(name, value)?,
            "card_font" => self.card_font = parse_choice(name, value)?,
            "card_frame" => self.card_frame = parse_choice(name, value)?,
            "card_size" => self.card_size = parse_choice(name, value)?,
            "card_format" => self.card_format = parse_choice(name, value)?,
            "art_style" => self.art_style = parse_choice(name, value)?,
            "art_keywords" => self.art_keywords = value.to_string(),
            _ => return Err(ForgeError::UnknownField(name.to_string())),
        }
        Ok(())
    }
}

/// Committed outcome of one card generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardResult {
    pub generated_images: Vec<String>,
    pub selected_image: Option<String>,
    pub generated_text: CardText,
}

impl Candidates for CardResult {
    fn candidates(&self) -> &[String] {
        &self.generated_images
    }

    fn recorded_selection(&self) -> Option<&str> {
        self.selected_image.as_deref()
    }
}

pub struct CardKind;

impl WorkflowKind for CardKind {
    const NAME: &'static str = "card";
    const EXPORT_FALLBACK: &'static str = "custom_card";

    type Config = CardConfig;
    type Output = CardResult;

    fn default_config() -> CardConfig {
        CardConfig::default()
    }

    fn validate(config: &CardConfig) -> Result<()> {
        if config.art_prompt.trim().is_empty() || config.text_prompt.trim().is_empty() {
            return Err(ForgeError::ValidationError(
                "Please fill in both art and text prompts.".to_string(),
            ));
        }
        Ok(())
    }

    fn request(client: &dyn GenerationClient, config: &CardConfig) -> Result<CardResult> {
        let content = client.request_card_content(&CardContentRequest {
            art_prompt: config.art_prompt.clone(),
            text_prompt: config.text_prompt.clone(),
            art_style: config.art_style,
            art_keywords: config.art_keywords.clone(),
            aspect_ratio: config.aspect_ratio(),
        })?;

        Ok(CardResult {
            selected_image: content.image_candidates.first().cloned(),
            generated_images: content.image_candidates,
            generated_text: content.text,
        })
    }

    fn export_base_name(snapshot: &Snapshot<CardConfig, CardResult>) -> String {
        snapshot
            .result()
            .map(|r| r.generated_text.name.clone())
            .unwrap_or_default()
    }

    fn render(view: &WorkflowView<'_, Self>, settings: &RenderSettings) -> Result<RgbaImage> {
        preview::render_card(
            view.config.card_type,
            view.config.aspect_ratio(),
            view.config.card_format,
            view.artifact_for_display,
            settings,
        )
    }
}

pub type CardWorkflow = GenerationWorkflow<CardKind>;
