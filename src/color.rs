use std::collections::HashMap;
use std::fmt;

use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Largest pixel area sampled; bigger bitmaps are scaled down first.
const MAX_SAMPLE_AREA: u32 = 112 * 112;
const QUANTIZE_BITS: u8 = 5;
const MIN_ALPHA: u8 = 128;
const BLACK_MAX_LIGHTNESS: f32 = 0.05;
const WHITE_MIN_LIGHTNESS: f32 = 0.95;

/// Color used when no dominant swatch can be computed.
pub const DEFAULT_SURFACE: Rgb = Rgb::new(0xFF, 0xFB, 0xFE);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Packed opaque ARGB value.
    pub fn to_argb(self) -> u32 {
        0xFF00_0000 | (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    fn lightness(self) -> f32 {
        let max = self.r.max(self.g).max(self.b) as f32 / 255.0;
        let min = self.r.min(self.g).min(self.b) as f32 / 255.0;
        (max + min) / 2.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Default)]
struct Bucket {
    population: u32,
    r: u64,
    g: u64,
    b: u64,
}

/// Most populated color of the bitmap, averaged within its 5-bit bucket.
///
/// Transparent, near-black and near-white pixels do not vote. Returns `None`
/// when nothing is left to vote.
pub fn dominant_color(bitmap: &RgbaImage) -> Option<Rgb> {
    let scaled;
    let bitmap = match scaled_dimensions(bitmap.width(), bitmap.height()) {
        Some((width, height)) => {
            scaled = imageops::resize(bitmap, width, height, FilterType::Triangle);
            &scaled
        }
        None => bitmap,
    };

    let shift = 8 - QUANTIZE_BITS;
    let mut buckets: HashMap<(u8, u8, u8), Bucket> = HashMap::new();

    for pixel in bitmap.pixels() {
        let [r, g, b, a] = pixel.0;
        if a < MIN_ALPHA {
            continue;
        }
        let lightness = Rgb::new(r, g, b).lightness();
        if lightness <= BLACK_MAX_LIGHTNESS || lightness >= WHITE_MIN_LIGHTNESS {
            continue;
        }

        let bucket = buckets.entry((r >> shift, g >> shift, b >> shift)).or_default();
        bucket.population += 1;
        bucket.r += u64::from(r);
        bucket.g += u64::from(g);
        bucket.b += u64::from(b);
    }

    // ties resolve on the bucket key so the result does not depend on map order
    let (_, bucket) = buckets
        .into_iter()
        .max_by(|(key_a, a), (key_b, b)| a.population.cmp(&b.population).then(key_b.cmp(key_a)))?;

    let population = u64::from(bucket.population);
    Some(Rgb::new(
        (bucket.r / population) as u8,
        (bucket.g / population) as u8,
        (bucket.b / population) as u8,
    ))
}

pub fn dominant_color_or_default(bitmap: &RgbaImage) -> Rgb {
    dominant_color(bitmap).unwrap_or(DEFAULT_SURFACE)
}

fn scaled_dimensions(width: u32, height: u32) -> Option<(u32, u32)> {
    let area = u64::from(width) * u64::from(height);
    if area <= u64::from(MAX_SAMPLE_AREA) {
        return None;
    }
    let ratio = (f64::from(MAX_SAMPLE_AREA) / area as f64).sqrt();
    let scale = |side: u32| ((f64::from(side) * ratio).ceil() as u32).max(1);
    Some((scale(width), scale(height)))
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn single_color_bitmap_returns_that_color() {
        let bitmap = solid(10, 10, [200, 40, 40, 255]);
        assert_eq!(dominant_color(&bitmap), Some(Rgb::new(200, 40, 40)));
    }

    #[test]
    fn larger_region_wins() {
        let mut bitmap = solid(10, 10, [30, 90, 200, 255]);
        for x in 0..3 {
            for y in 0..10 {
                bitmap.put_pixel(x, y, Rgba([240, 200, 20, 255]));
            }
        }
        assert_eq!(dominant_color(&bitmap), Some(Rgb::new(30, 90, 200)));
    }

    #[test]
    fn transparent_background_is_ignored() {
        let mut bitmap = solid(20, 20, [0, 0, 0, 0]);
        bitmap.put_pixel(5, 5, Rgba([120, 200, 80, 255]));
        assert_eq!(dominant_color(&bitmap), Some(Rgb::new(120, 200, 80)));
    }

    #[test]
    fn black_and_white_only_falls_back_to_surface() {
        let mut bitmap = solid(4, 4, [255, 255, 255, 255]);
        bitmap.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        assert_eq!(dominant_color(&bitmap), None);
        assert_eq!(dominant_color_or_default(&bitmap), DEFAULT_SURFACE);
    }

    #[test]
    fn large_bitmaps_are_downscaled_before_sampling() {
        assert_eq!(scaled_dimensions(100, 100), None);
        let (w, h) = scaled_dimensions(1000, 1000).unwrap();
        assert!(w * h <= MAX_SAMPLE_AREA + 2 * w);
        let bitmap = solid(600, 400, [10, 150, 90, 255]);
        assert_eq!(dominant_color(&bitmap), Some(Rgb::new(10, 150, 90)));
    }

    #[test]
    fn argb_and_hex_formatting() {
        let color = Rgb::from_hex(0x6390F0);
        assert_eq!(color.to_argb(), 0xFF63_90F0);
        assert_eq!(color.to_string(), "#6390F0");
    }
}
