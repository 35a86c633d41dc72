//! Generation client trait and request/response types

use crate::options::{ArtStyle, AspectRatio, MapStyle, MapType};
use forge_core::Result;
use serde::{Deserialize, Serialize};

/// Text generated for a card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardText {
    pub name: String,
    /// The card's game effect
    pub description: String,
    /// Short lore line
    pub flavor_text: String,
}

/// Request for card art candidates plus card text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardContentRequest {
    pub art_prompt: String,
    /// Theme prompt for the card text
    pub text_prompt: String,
    pub art_style: ArtStyle,
    pub art_keywords: String,
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardContent {
    /// Image URIs, possibly empty
    pub image_candidates: Vec<String>,
    pub text: CardText,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapTileRequest {
    pub prompt: String,
    pub art_keywords: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileContent {
    pub image_candidates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRequest {
    pub prompt: String,
    pub map_type: MapType,
    pub map_style: MapStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapContent {
    pub image_uri: String,
}

/// Status returned by a client health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientStatus {
    Available,
    Unavailable(String),
    NoApiKey,
}

/// Request/response boundary to a generative AI backend.
///
/// Clients are stateless: every call is independent and failures are
/// reported as `ForgeError::GenerationError` with a readable message.
pub trait GenerationClient: Send {
    /// Client name (e.g. "gemini", "mock")
    fn name(&self) -> &str;

    /// Check if the backend is usable (API key set, enabled)
    fn health_check(&self) -> Result<ClientStatus>;

    /// Generate card art candidates and card text
    fn request_card_content(&self, request: &CardContentRequest) -> Result<CardContent>;

    /// Generate map tile candidates
    fn request_map_tile(&self, request: &MapTileRequest) -> Result<TileContent>;

    /// Generate a single full map image
    fn request_map(&self, request: &MapRequest) -> Result<MapContent>;
}
