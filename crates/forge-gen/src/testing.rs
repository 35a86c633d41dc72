//! Test doubles shared by the unit tests

use crate::client::*;
use crate::export::{ExportedFile, Exporter};
use forge_core::{ContentHash, ForgeError, Result};
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Client returning canned payloads, or failing every call
#[derive(Default)]
pub struct StubClient {
    card: Option<CardContent>,
    tiles: Option<TileContent>,
    map: Option<MapContent>,
    failure: Option<String>,
    calls: AtomicUsize,
    last_card_request: Mutex<Option<CardContentRequest>>,
}

impl StubClient {
    pub fn with_card(card: CardContent) -> Self {
        Self {
            card: Some(card),
            ..Self::default()
        }
    }

    pub fn with_tiles(tiles: TileContent) -> Self {
        Self {
            tiles: Some(tiles),
            ..Self::default()
        }
    }

    pub fn with_map(map: MapContent) -> Self {
        Self {
            map: Some(map),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_card_request(&self) -> Option<CardContentRequest> {
        self.last_card_request.lock().unwrap().clone()
    }

    fn respond<T: Clone>(&self, payload: &Option<T>) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(ForgeError::GenerationError(message.clone()));
        }
        payload
            .clone()
            .ok_or_else(|| ForgeError::GenerationError("stub has no payload".to_string()))
    }
}

impl GenerationClient for StubClient {
    fn name(&self) -> &str {
        "stub"
    }

    fn health_check(&self) -> Result<ClientStatus> {
        Ok(ClientStatus::Available)
    }

    fn request_card_content(&self, request: &CardContentRequest) -> Result<CardContent> {
        *self.last_card_request.lock().unwrap() = Some(request.clone());
        self.respond(&self.card)
    }

    fn request_map_tile(&self, _request: &MapTileRequest) -> Result<TileContent> {
        self.respond(&self.tiles)
    }

    fn request_map(&self, _request: &MapRequest) -> Result<MapContent> {
        self.respond(&self.map)
    }
}

/// Exporter that records the file stems it was asked to write
#[derive(Default)]
pub struct RecordingExporter {
    stems: Mutex<Vec<String>>,
}

impl RecordingExporter {
    pub fn stems(&self) -> Vec<String> {
        self.stems.lock().unwrap().clone()
    }
}

impl Exporter for RecordingExporter {
    fn export_visual(&self, visual: &RgbaImage, file_stem: &str) -> Result<ExportedFile> {
        self.stems.lock().unwrap().push(file_stem.to_string());
        Ok(ExportedFile {
            path: PathBuf::from(format!("{}.png", file_stem)),
            hash: ContentHash::from_bytes(visual.as_raw()),
        })
    }
}
