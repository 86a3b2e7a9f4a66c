use egui::Color32;
use image::{ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{ExportError, ExportResult};
use crate::renderer::CANVAS_BACKGROUND;

/// Write a snapshot as PNG into `dir` under a random `<uuid>.png` name.
///
/// The file shows what the canvas shows: transparent pixels are laid over
/// the canvas background, so the result is fully opaque. Returns the path of
/// the written file.
pub fn save_png(snapshot: &RgbaImage, dir: &Path) -> ExportResult<PathBuf> {
    let (width, height) = snapshot.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::EmptySurface { width, height });
    }

    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.png", Uuid::new_v4()));
    flatten_onto(snapshot, CANVAS_BACKGROUND).save_with_format(&path, ImageFormat::Png)?;

    log::info!("Drawing saved: {} ({}x{})", path.display(), width, height);
    Ok(path)
}

/// Composite `image` over an opaque `background`
pub fn flatten_onto(image: &RgbaImage, background: Color32) -> RgbaImage {
    let [br, bg, bb, _] = background.to_array();
    let mut flat = image.clone();
    for pixel in flat.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let mix = |src: u8, dst: u8| {
            let a = a as u32;
            ((src as u32 * a + dst as u32 * (255 - a) + 127) / 255) as u8
        };
        *pixel = Rgba([mix(r, br), mix(g, bg), mix(b, bb), 255]);
    }
    flat
}
