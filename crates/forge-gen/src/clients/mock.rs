//! Mock client for offline use and testing
//!
//! Returns solid-colour PNG data URIs whose colour is derived from the
//! prompt, and card text derived from the theme, without any network calls.

use crate::client::*;
use crate::config::ForgeConfig;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use forge_core::{ContentHash, ForgeError, Result};
use std::io::Cursor;

const MOCK_IMAGE_SIZE: u32 = 64;

/// A client that generates placeholder content locally
pub struct MockClient {
    card_candidates: u32,
    tile_candidates: u32,
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            card_candidates: 4,
            tile_candidates: 4,
        }
    }

    pub fn from_config(config: &ForgeConfig) -> Self {
        Self {
            card_candidates: config.generation.card_candidates,
            tile_candidates: config.generation.tile_candidates,
        }
    }

    fn candidates(&self, prompt: &str, count: u32) -> Result<Vec<String>> {
        (0..count)
            .map(|i| solid_png_data_uri(&format!("{}#{}", prompt, i)))
            .collect()
    }
}

impl GenerationClient for MockClient {
    fn name(&self) -> &str {
        "mock"
    }

    fn health_check(&self) -> Result<ClientStatus> {
        Ok(ClientStatus::Available)
    }

    fn request_card_content(&self, request: &CardContentRequest) -> Result<CardContent> {
        let art_prompt = format!(
            "{}|{}|{}|{}",
            request.art_prompt, request.art_style, request.art_keywords, request.aspect_ratio
        );
        Ok(CardContent {
            image_candidates: self.candidates(&art_prompt, self.card_candidates)?,
            text: card_text_for(&request.text_prompt),
        })
    }

    fn request_map_tile(&self, request: &MapTileRequest) -> Result<TileContent> {
        let prompt = format!("{}|{}", request.prompt, request.art_keywords);
        Ok(TileContent {
            image_candidates: self.candidates(&prompt, self.tile_candidates)?,
        })
    }

    fn request_map(&self, request: &MapRequest) -> Result<MapContent> {
        let prompt = format!("{}|{}|{}", request.prompt, request.map_type, request.map_style);
        Ok(MapContent {
            image_uri: solid_png_data_uri(&prompt)?,
        })
    }
}

/// Card text built from the first words of the theme
fn card_text_for(theme: &str) -> CardText {
    let name = theme
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .take(3)
        .map(capitalise)
        .collect::<Vec<_>>()
        .join(" ");

    CardText {
        name: if name.is_empty() {
            "Nameless Card".to_string()
        } else {
            name
        },
        description: format!("Resolve the effect of {}.", theme.trim()),
        flavor_text: "It was foretold, and still nobody was ready.".to_string(),
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Encode a solid-colour PNG keyed by `seed` as a `data:` URI
fn solid_png_data_uri(seed: &str) -> Result<String> {
    let hash = ContentHash::of_str(seed);
    let [r, g, b] = [hash.as_bytes()[0], hash.as_bytes()[1], hash.as_bytes()[2]];
    let img = image::RgbaImage::from_pixel(MOCK_IMAGE_SIZE, MOCK_IMAGE_SIZE, image::Rgba([r, g, b, 255]));

    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png)
        .map_err(|e| ForgeError::GenerationError(format!("Failed to encode PNG: {}", e)))?;

    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(bytes.into_inner())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardWorkflow;
    use crate::options::{ArtStyle, AspectRatio};
    use crate::preview::{decode_artifact, RenderSettings};

    fn card_request(art: &str) -> CardContentRequest {
        CardContentRequest {
            art_prompt: art.to_string(),
            text_prompt: "a swift lightning strike".to_string(),
            art_style: ArtStyle::Anime,
            art_keywords: "bold lines".to_string(),
            aspect_ratio: AspectRatio::Portrait,
        }
    }

    #[test]
    fn test_mock_client_health() {
        assert_eq!(MockClient::new().health_check().unwrap(), ClientStatus::Available);
    }

    #[test]
    fn test_card_content_is_deterministic() {
        let client = MockClient::new();
        let a = client.request_card_content(&card_request("storm mage")).unwrap();
        let b = client.request_card_content(&card_request("storm mage")).unwrap();
        let c = client.request_card_content(&card_request("ice mage")).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.image_candidates.len(), 4);
        assert_ne!(a.image_candidates, c.image_candidates);
        assert_eq!(a.text.name, "Swift Lightning Strike");
    }

    #[test]
    fn test_candidates_are_decodable_pngs() {
        let tiles = MockClient::new()
            .request_map_tile(&MapTileRequest {
                prompt: "sand dunes".to_string(),
                art_keywords: String::new(),
            })
            .unwrap();

        for uri in &tiles.image_candidates {
            assert!(uri.starts_with("data:image/png;base64,"));
            let img = decode_artifact(uri).unwrap();
            assert_eq!(img.width(), MOCK_IMAGE_SIZE);
        }
    }

    #[test]
    fn test_candidate_count_follows_config() {
        let mut config = ForgeConfig::default();
        config.generation.tile_candidates = 2;
        let tiles = MockClient::from_config(&config)
            .request_map_tile(&MapTileRequest {
                prompt: "reef".to_string(),
                art_keywords: String::new(),
            })
            .unwrap();
        assert_eq!(tiles.image_candidates.len(), 2);
    }

    #[test]
    fn test_empty_theme_still_names_card() {
        assert_eq!(card_text_for("  ").name, "Nameless Card");
    }

    #[test]
    fn test_card_workflow_exports_with_mock() {
        let dir = std::env::temp_dir().join(format!("forge_mock_test_{}", uuid::Uuid::new_v4()));
        let mut wf = CardWorkflow::new();
        wf.generate(&MockClient::new()).unwrap();

        let exporter = crate::export::PngExporter::new(&dir, 2);
        let settings = RenderSettings {
            card_width: 120,
            ..RenderSettings::default()
        };
        let file = wf.export(&exporter, &settings).unwrap();
        assert_eq!(file.path, dir.join("powerful_dragon-themed_attack.png"));

        let img = image::open(&file.path).unwrap();
        assert_eq!(img.width(), 240);
        assert_eq!(img.height(), 320);

        std::fs::remove_dir_all(&dir).ok();
    }
}
