//! PNG export of rendered visuals

use forge_core::{ContentHash, ForgeError, Result};
use image::imageops::FilterType;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Largest width or height an exported PNG may have
pub const MAX_EXPORT_DIMENSION: u32 = 16_384;

/// A file written by an exporter
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub hash: ContentHash,
}

/// Serialises a rendered visual to an image file
pub trait Exporter {
    fn export_visual(&self, visual: &RgbaImage, file_stem: &str) -> Result<ExportedFile>;
}

/// Writes `<output_dir>/<stem>.png`, upscaled by `pixel_ratio`
pub struct PngExporter {
    output_dir: PathBuf,
    pixel_ratio: u32,
}

impl PngExporter {
    pub fn new<P: AsRef<Path>>(output_dir: P, pixel_ratio: u32) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            pixel_ratio: pixel_ratio.max(1),
        }
    }
}

impl PngExporter {
    fn scaled_size(&self, visual: &RgbaImage) -> Result<(u32, u32)> {
        let scale = |side: u32| {
            side.checked_mul(self.pixel_ratio)
                .filter(|&scaled| scaled <= MAX_EXPORT_DIMENSION)
        };
        match (scale(visual.width()), scale(visual.height())) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(ForgeError::ExportError(format!(
                "{}x{} at pixel ratio {} exceeds {} pixels per side",
                visual.width(),
                visual.height(),
                self.pixel_ratio,
                MAX_EXPORT_DIMENSION
            ))),
        }
    }
}

impl Exporter for PngExporter {
    fn export_visual(&self, visual: &RgbaImage, file_stem: &str) -> Result<ExportedFile> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            ForgeError::ExportError(format!(
                "cannot create {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let path = self.output_dir.join(format!("{}.png", file_stem));
        let scaled;
        let output = if self.pixel_ratio > 1 {
            let (width, height) = self.scaled_size(visual)?;
            scaled = image::imageops::resize(visual, width, height, FilterType::Triangle);
            &scaled
        } else {
            visual
        };

        output
            .save(&path)
            .map_err(|e| ForgeError::ExportError(format!("Failed to save PNG: {}", e)))?;
        let hash = hash_exported(&path)?;

        tracing::info!(path = %path.display(), hash = %hash, "exported visual");
        Ok(ExportedFile { path, hash })
    }
}

fn hash_exported(path: &Path) -> Result<ContentHash> {
    ContentHash::from_file(path).map_err(|e| {
        ForgeError::ExportError(format!("cannot read back {}: {}", path.display(), e))
    })
}

/// Turn a suggested name into a file stem: whitespace runs become `_`,
/// letters are lowercased, path and reserved characters are dropped.
/// Falls back to `fallback` when nothing usable is left.
pub fn file_stem(suggested: &str, fallback: &str) -> String {
    let stem: String = suggested
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();

    if stem.trim_matches('.').is_empty() {
        fallback.to_string()
    } else {
        stem
    }
}
