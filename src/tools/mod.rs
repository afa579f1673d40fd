//! Helpers for the command line tool: image loading/saving and summaries

use image::{GrayImage, Luma};
use std::path::Path;

/// Load an image from disk and convert it to 8-bit grayscale.
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<GrayImage, image::ImageError> {
    Ok(image::open(path)?.to_luma8())
}

/// Save a grayscale image; the format follows the file extension.
pub fn save_gray<P: AsRef<Path>>(path: P, image: &GrayImage) -> Result<(), image::ImageError> {
    image.save(path)
}

/// Summary statistics for grayscale data.
#[derive(Debug, Clone, Copy)]
pub struct GrayStats {
    /// Minimum grayscale value.
    pub min: u8,
    /// Maximum grayscale value.
    pub max: u8,
    /// Average grayscale value.
    pub avg: u8,
}

/// Summary statistics for a binarized image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryStats {
    /// Count of pixels equal to the object value.
    pub object_pixels: usize,
    /// Total pixels in the image.
    pub total_pixels: usize,
    /// Ratio of object pixels to total pixels.
    pub object_ratio: f64,
}

/// Compute min/max/avg for grayscale values.
pub fn grayscale_stats(gray: &GrayImage) -> GrayStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &Luma([v]) in gray.pixels() {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let count = u64::from(gray.width()) * u64::from(gray.height());
    let avg = if count == 0 { 0 } else { (sum / count) as u8 };
    GrayStats { min, max, avg }
}

/// Count pixels carrying the `object` value.
pub fn binary_stats(binary: &GrayImage, object: u8) -> BinaryStats {
    let total = binary.width() as usize * binary.height() as usize;
    let objects = binary.pixels().filter(|p| p.0[0] == object).count();
    let ratio = if total == 0 {
        0.0
    } else {
        objects as f64 / total as f64
    };
    BinaryStats {
        object_pixels: objects,
        total_pixels: total,
        object_ratio: ratio,
    }
}
