//! Fallback product pictures: a grey disc with the product name on it.

use ab_glyph::{FontVec, PxScale};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageResult, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Width and height of every placeholder.
pub const SIZE: u32 = 600;
const CENTER: i32 = SIZE as i32 / 2;
const RADIUS: i32 = 150;
const OUTLINE: i32 = 2;
const LABEL_CENTER_Y: i32 = 280;
const LABEL_PX: f32 = 28.0;
const LINE_SPACING: i32 = 4;
const WATERMARK_CENTER_Y: i32 = 520;
const WATERMARK_PX: f32 = 18.0;
const JPEG_QUALITY: u8 = 90;

const BACKGROUND: Rgb<u8> = Rgb([245, 245, 245]);
const DISC: Rgb<u8> = Rgb([230, 230, 230]);
const DISC_OUTLINE: Rgb<u8> = Rgb([200, 200, 200]);
const LABEL: Rgb<u8> = Rgb([60, 60, 60]);
const WATERMARK: Rgb<u8> = Rgb([180, 180, 180]);

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// DejaVu Sans, used when neither a configured nor a system font loads.
const BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Renders placeholders.
///
/// ```
/// use storefront_images::placeholder::{self, Placeholder, SIZE};
///
/// let renderer = Placeholder::new(placeholder::bundled_font(), "Suedpfote.de");
/// let image = renderer.render("Wedo Lineal\n30cm");
/// assert_eq!(image.dimensions(), (SIZE, SIZE));
/// ```
pub struct Placeholder {
    font: FontVec,
    watermark: String,
}

impl Placeholder {
    pub fn new(font: FontVec, watermark: impl Into<String>) -> Self {
        Self {
            font,
            watermark: watermark.into(),
        }
    }

    /// Uses the configured font, the first system font that loads, or the
    /// bundled one.
    pub fn with_discovered_font(configured: Option<&Path>, watermark: impl Into<String>) -> Self {
        Self::new(discover_font(configured), watermark)
    }

    /// Draws the placeholder for `label`; lines are split on `\n`.
    pub fn render(&self, label: &str) -> RgbImage {
        let mut image = RgbImage::from_pixel(SIZE, SIZE, BACKGROUND);
        draw_filled_circle_mut(&mut image, (CENTER, CENTER), RADIUS, DISC_OUTLINE);
        draw_filled_circle_mut(&mut image, (CENTER, CENTER), RADIUS - OUTLINE, DISC);

        let lines: Vec<&str> = label.lines().collect();
        let line_height = LABEL_PX as i32;
        let block =
            lines.len() as i32 * line_height + (lines.len() as i32 - 1).max(0) * LINE_SPACING;
        let mut top = LABEL_CENTER_Y - block / 2;
        for line in lines {
            draw_centered(&mut image, &self.font, LABEL_PX, LABEL, top, line);
            top += line_height + LINE_SPACING;
        }

        let top = WATERMARK_CENTER_Y - WATERMARK_PX as i32 / 2;
        draw_centered(&mut image, &self.font, WATERMARK_PX, WATERMARK, top, &self.watermark);
        image
    }

    /// Renders `label` and writes it to `path` as JPEG. Returns the file size.
    pub fn write(&self, label: &str, path: &Path) -> ImageResult<u64> {
        let bytes = encode_jpeg(&self.render(label))?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, &bytes)?;
        Ok(bytes.len() as u64)
    }
}

fn draw_centered(image: &mut RgbImage, font: &FontVec, px: f32, color: Rgb<u8>, top: i32, text: &str) {
    let scale = PxScale::from(px);
    let (width, _) = text_size(scale, font, text);
    let left = CENTER - width as i32 / 2;
    draw_text_mut(image, color, left, top, scale, font, text);
}

pub fn encode_jpeg(image: &RgbImage) -> ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(image)?;
    Ok(bytes)
}

/// Loads a TrueType/OpenType font file.
pub fn load_font(path: &Path) -> Option<FontVec> {
    let data = std::fs::read(path).ok()?;
    FontVec::try_from_vec(data).ok()
}

/// The font compiled into the binary.
pub fn bundled_font() -> FontVec {
    FontVec::try_from_vec(BUNDLED_FONT.to_vec()).unwrap()
}

fn discover_font(configured: Option<&Path>) -> FontVec {
    let found = configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_FONTS.iter().map(|path| PathBuf::from(*path)))
        .find_map(|path| {
            let font = load_font(&path);
            if font.is_some() {
                debug!(path = %path.display(), "using font");
            }
            font
        });
    found.unwrap_or_else(|| {
        if let Some(path) = configured {
            warn!(path = %path.display(), "configured font unusable");
        }
        debug!("using bundled font");
        bundled_font()
    })
}
