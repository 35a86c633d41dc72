//! Rasterised previews used for export
//!
//! Previews are intentionally plain: a themed canvas with the selected
//! artwork placed into it, an optional hexagon mask for tiles and an
//! optional grid overlay for maps. Text is not rasterised.

use crate::options::{AspectRatio, CardFormat, CardType, GridType, MapShape};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use forge_core::{ForgeError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};

const PLACEHOLDER: Rgba<u8> = Rgba([55, 65, 81, 255]);
const GRID_LINE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GRID_ALPHA: f32 = 0.35;
const SQUARE_GRID_CELLS: u32 = 16;
const HEX_GRID_CELLS: f32 = 24.0;

/// Canvas sizes and colours for previews
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Canvas colour behind masked or empty regions
    pub background: Rgba<u8>,
    pub card_width: u32,
    pub tile_size: u32,
    pub map_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Rgba([0x11, 0x18, 0x27, 255]),
            card_width: 400,
            tile_size: 512,
            map_size: 768,
        }
    }
}

impl RenderSettings {
    pub fn with_background(mut self, hex: &str) -> Result<Self> {
        self.background = parse_hex_color(hex)?;
        Ok(self)
    }
}

/// Colours of a card frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardTheme {
    pub body: Rgba<u8>,
    pub border: Rgba<u8>,
    pub banner: Rgba<u8>,
}

fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
}

pub fn card_theme(card_type: CardType) -> CardTheme {
    let (body, border, banner) = match card_type {
        CardType::Attack => (0x7f1d1d, 0xef4444, 0x450a0a),
        CardType::Skill => (0x1e3a8a, 0x3b82f6, 0x172554),
        CardType::Resource => (0x14532d, 0x22c55e, 0x052e16),
        CardType::Creature => (0x713f12, 0xca8a04, 0x422006),
        CardType::Event => (0x581c87, 0xa855f7, 0x3b0764),
        CardType::Location => (0x1f2937, 0x6b7280, 0x111827),
        CardType::Equipment => (0x1e293b, 0x64748b, 0x0f172a),
        CardType::Clue => (0x134e4a, 0x14b8a6, 0x042f2e),
        CardType::Character => (0x0c4a6e, 0x0ea5e9, 0x082f49),
        CardType::Trap => (0x312e81, 0x6366f1, 0x1e1b4b),
        CardType::Item => (0x78350f, 0xd97706, 0x451a03),
    };
    CardTheme {
        body: rgb(body),
        border: rgb(border),
        banner: rgb(banner),
    }
}

/// Parse `#rrggbb` into an opaque colour
pub fn parse_hex_color(hex: &str) -> Result<Rgba<u8>> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return Err(ForgeError::ConfigError(format!("invalid colour '{}'", hex)));
    }
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| ForgeError::ConfigError(format!("invalid colour '{}'", hex)))?;
    Ok(rgb(value))
}

/// Decode an artifact URI (`data:` base64 payload or local path)
pub fn decode_artifact(uri: &str) -> Result<RgbaImage> {
    let image = if let Some(rest) = uri.strip_prefix("data:") {
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| ForgeError::ExportError("malformed data URI".to_string()))?;
        if !meta.ends_with(";base64") {
            return Err(ForgeError::ExportError(format!(
                "unsupported data URI encoding '{}'",
                meta
            )));
        }
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| ForgeError::ExportError(format!("invalid base64 artwork: {}", e)))?;
        image::load_from_memory(&bytes)
            .map_err(|e| ForgeError::ExportError(format!("unreadable artwork: {}", e)))?
    } else if uri.starts_with("http://") || uri.starts_with("https://") {
        return Err(ForgeError::ExportError(format!(
            "remote artwork must be downloaded before export: {}",
            uri
        )));
    } else {
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        image::open(path)
            .map_err(|e| ForgeError::ExportError(format!("cannot open artwork {}: {}", path, e)))?
    };
    Ok(image.to_rgba8())
}

/// Card canvas sized by aspect ratio, themed by card type
pub fn render_card(
    card_type: CardType,
    ratio: AspectRatio,
    format: CardFormat,
    art: Option<&str>,
    settings: &RenderSettings,
) -> Result<RgbaImage> {
    let (rw, rh) = ratio.parts();
    let width = settings.card_width.max(64);
    let height = width * rh / rw;
    let theme = card_theme(card_type);
    let border = (width / 50).max(2);
    let inset = border * 2;

    let mut canvas = RgbaImage::from_pixel(width, height, theme.border);
    fill_rect(
        &mut canvas,
        border,
        border,
        width - 2 * border,
        height - 2 * border,
        theme.body,
    );

    let (art_x, art_y, art_w, art_h) = match format {
        CardFormat::Portrait => {
            let banner_h = height / 10;
            fill_rect(&mut canvas, inset, inset, width - 2 * inset, banner_h, theme.banner);
            let art_y = inset * 2 + banner_h;
            let art_h = height * 3 / 5;
            fill_rect(
                &mut canvas,
                inset,
                art_y + art_h + inset,
                width - 2 * inset,
                height.saturating_sub(art_y + art_h + 2 * inset),
                theme.banner,
            );
            (inset, art_y, width - 2 * inset, art_h)
        }
        CardFormat::Horizontal => {
            let art_w = width / 2 - inset;
            fill_rect(
                &mut canvas,
                width / 2 + border,
                inset,
                width / 2 - border - inset,
                height - 2 * inset,
                theme.banner,
            );
            (inset, inset, art_w, height - 2 * inset)
        }
    };

    place_art(&mut canvas, art, art_x, art_y, art_w, art_h)?;
    Ok(canvas)
}

/// Square tile with optional hexagon mask
pub fn render_tile(shape: MapShape, art: Option<&str>, settings: &RenderSettings) -> Result<RgbaImage> {
    let size = settings.tile_size.max(16);
    let mut canvas = RgbaImage::from_pixel(size, size, settings.background);
    place_art(&mut canvas, art, 0, 0, size, size)?;

    if shape == MapShape::Hexagon {
        let extent = size as f32;
        for (x, y, px) in canvas.enumerate_pixels_mut() {
            let u = (x as f32 + 0.5) / extent;
            let v = (y as f32 + 0.5) / extent;
            if !inside_hexagon(u, v) {
                *px = settings.background;
            }
        }
    }
    Ok(canvas)
}

/// Full map with optional grid overlay
pub fn render_map(grid: GridType, art: Option<&str>, settings: &RenderSettings) -> Result<RgbaImage> {
    let size = settings.map_size.max(32);
    let mut canvas = RgbaImage::from_pixel(size, size, settings.background);
    place_art(&mut canvas, art, 0, 0, size, size)?;

    match grid {
        GridType::NoGrid => {}
        GridType::Square => {
            let step = (size / SQUARE_GRID_CELLS).max(1);
            for (x, y, px) in canvas.enumerate_pixels_mut() {
                if x % step == 0 || y % step == 0 {
                    blend(px, GRID_LINE, GRID_ALPHA);
                }
            }
        }
        GridType::Hex => {
            let radius = size as f32 / HEX_GRID_CELLS;
            for (x, y, px) in canvas.enumerate_pixels_mut() {
                let (fx, fy) = (x as f32, y as f32);
                let cell = hex_cell(fx, fy, radius);
                if cell != hex_cell(fx + 1.0, fy, radius) || cell != hex_cell(fx, fy + 1.0, radius)
                {
                    blend(px, GRID_LINE, GRID_ALPHA);
                }
            }
        }
    }
    Ok(canvas)
}

fn place_art(
    canvas: &mut RgbaImage,
    art: Option<&str>,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Ok(());
    }
    match art {
        Some(uri) => {
            let decoded = decode_artifact(uri)?;
            let fitted = DynamicImage::ImageRgba8(decoded)
                .resize_to_fill(width, height, FilterType::Triangle)
                .to_rgba8();
            image::imageops::replace(canvas, &fitted, i64::from(x), i64::from(y));
        }
        None => fill_rect(canvas, x, y, width, height, PLACEHOLDER),
    }
    Ok(())
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x_end = (x + width).min(canvas.width());
    let y_end = (y + height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn blend(px: &mut Rgba<u8>, over: Rgba<u8>, alpha: f32) {
    for i in 0..3 {
        let mixed = px[i] as f32 * (1.0 - alpha) + over[i] as f32 * alpha;
        px[i] = mixed.round() as u8;
    }
}

/// Flat-sided hexagon spanning the unit square: corners at
/// (25%, 0), (75%, 0), (100%, 50%), (75%, 100%), (25%, 100%), (0, 50%)
fn inside_hexagon(u: f32, v: f32) -> bool {
    let slant = 0.25 * (2.0 * v - 1.0).abs();
    u >= slant && u <= 1.0 - slant
}

/// Axial coordinates of the flat-top hex containing (x, y)
fn hex_cell(x: f32, y: f32, radius: f32) -> (i32, i32) {
    let q = (2.0 / 3.0 * x) / radius;
    let r = (-1.0 / 3.0 * x + 3f32.sqrt() / 3.0 * y) / radius;
    let s = -q - r;

    let (mut rq, mut rr, rs) = (q.round(), r.round(), s.round());
    let (dq, dr, ds) = ((rq - q).abs(), (rr - r).abs(), (rs - s).abs());
    if dq > dr && dq > ds {
        rq = -rr - rs;
    } else if dr > ds {
        rr = -rq - rs;
    }
    (rq as i32, rr as i32)
}
