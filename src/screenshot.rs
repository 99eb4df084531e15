//! Save the pixel buffer as a PNG

use crate::colors::to_rgba;
use chrono::Local;
use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `pixels` to `dir/screenshot-<timestamp>.png` and return the path
pub fn save(pixels: &[u32], width: usize, height: usize, dir: &Path) -> io::Result<PathBuf> {
    let image = to_image(pixels, width, height)?;
    let name = format!("screenshot-{}.png", Local::now().format("%Y-%m-%dT%H-%M-%S"));
    let path = dir.join(name);
    image
        .save(&path)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    info!(path = %path.display(), width, height, "screenshot saved");
    Ok(path)
}

fn to_image(pixels: &[u32], width: usize, height: usize) -> io::Result<RgbaImage> {
    let invalid = || io::Error::new(io::ErrorKind::InvalidInput, "pixel buffer does not match image size");
    let w = u32::try_from(width).map_err(|_| invalid())?;
    let h = u32::try_from(height).map_err(|_| invalid())?;
    let bytes: Vec<u8> = pixels.iter().flat_map(|&p| to_rgba(p)).collect();
    RgbaImage::from_raw(w, h, bytes).ok_or_else(invalid)
}
