//! Hint image rendering.
//!
//! One source photo yields three Gaussian-blurred renderings of decreasing
//! strength, each JPEG-encoded and base64'd so it can travel inside JSON.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

/// Stand-in for every hint image when the photo cannot be processed.
pub const PLACEHOLDER_IMAGE: &str = "placeholder_base64";

/// Blur strength of a hint image. Ordered from most to least blurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BlurLevel {
    Heavy,
    Medium,
    Light,
}

impl BlurLevel {
    pub const ALL: [BlurLevel; 3] = [BlurLevel::Heavy, BlurLevel::Medium, BlurLevel::Light];

    /// Gaussian sigma in pixels.
    pub fn sigma(self) -> f32 {
        match self {
            BlurLevel::Heavy => 30.0,
            BlurLevel::Medium => 10.0,
            BlurLevel::Light => 5.0,
        }
    }
}

/// The three hint images of one player. Either all rendered or all
/// [`PLACEHOLDER_IMAGE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintImages {
    heavy: String,
    medium: String,
    light: String,
}

impl HintImages {
    pub fn placeholder() -> Self {
        Self {
            heavy: PLACEHOLDER_IMAGE.to_string(),
            medium: PLACEHOLDER_IMAGE.to_string(),
            light: PLACEHOLDER_IMAGE.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        BlurLevel::ALL
            .iter()
            .all(|level| self.get(*level) == PLACEHOLDER_IMAGE)
    }

    pub fn get(&self, level: BlurLevel) -> &str {
        match level {
            BlurLevel::Heavy => &self.heavy,
            BlurLevel::Medium => &self.medium,
            BlurLevel::Light => &self.light,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HintError {
    #[error("Failed to process image: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode `source` and render all three hint levels.
///
/// CPU bound; async callers should run it on a blocking thread.
pub fn render_hints(source: &[u8]) -> Result<HintImages, HintError> {
    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(image::load_from_memory(source)?.to_rgb8());

    Ok(HintImages {
        heavy: render_level(&rgb, BlurLevel::Heavy)?,
        medium: render_level(&rgb, BlurLevel::Medium)?,
        light: render_level(&rgb, BlurLevel::Light)?,
    })
}

fn render_level(image: &DynamicImage, level: BlurLevel) -> Result<String, HintError> {
    let blurred = image.blur(level.sigma());
    let mut buf = Cursor::new(Vec::new());
    blurred.write_to(&mut buf, ImageFormat::Jpeg)?;
    Ok(STANDARD.encode(buf.into_inner()))
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;

    /// 128x128 black/white checkerboard with 16px squares, PNG-encoded.
    fn checkerboard_png() -> Vec<u8> {
        let img = RgbaImage::from_fn(128, 128, |x, y| {
            if (x / 16 + y / 16) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn luma_variance(encoded: &str) -> f64 {
        let bytes = STANDARD.decode(encoded).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_luma8();
        let n = f64::from(img.width() * img.height());
        let mean = img.pixels().map(|p| p.0[0] as f64).sum::<f64>() / n;
        img.pixels()
            .map(|p| (p.0[0] as f64 - mean).powi(2))
            .sum::<f64>()
            / n
    }

    #[test]
    fn renders_three_decodable_jpegs() {
        let hints = render_hints(&checkerboard_png()).unwrap();

        assert!(!hints.is_placeholder());
        for level in BlurLevel::ALL {
            let bytes = STANDARD.decode(hints.get(level)).unwrap();
            let format = image::guess_format(&bytes).unwrap();
            assert_eq!(format, ImageFormat::Jpeg);
        }
    }

    #[test]
    fn heavier_levels_are_blurrier() {
        let hints = render_hints(&checkerboard_png()).unwrap();

        let heavy = luma_variance(hints.get(BlurLevel::Heavy));
        let medium = luma_variance(hints.get(BlurLevel::Medium));
        let light = luma_variance(hints.get(BlurLevel::Light));

        assert!(heavy < medium, "heavy {heavy} vs medium {medium}");
        assert!(medium < light, "medium {medium} vs light {light}");
    }

    #[test]
    fn garbage_input_is_an_error() {
        assert!(render_hints(b"definitely not an image").is_err());
    }

    #[test]
    fn placeholder_is_uniform() {
        let hints = HintImages::placeholder();
        assert!(hints.is_placeholder());
        for level in BlurLevel::ALL {
            assert_eq!(hints.get(level), PLACEHOLDER_IMAGE);
        }
    }

    #[test]
    fn sigmas_strictly_decrease() {
        assert!(BlurLevel::Heavy.sigma() > BlurLevel::Medium.sigma());
        assert!(BlurLevel::Medium.sigma() > BlurLevel::Light.sigma());
    }
}
