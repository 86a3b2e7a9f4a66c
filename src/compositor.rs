//! Frame composition and raster replay.
//!
//! Committed strokes live in the raster; only the stroke still being drawn is
//! layered on top per frame. Since baked pixels cannot be taken back, undo
//! rebuilds the raster with [`replay_into`].

use crate::raster::RasterBuffer;
use crate::stroke::{MutableStroke, StrokeRef};

/// The raster with the in-progress stroke (if any) painted on top.
/// Neither input is modified.
pub fn compose_frame(raster: &RasterBuffer, in_progress: Option<&MutableStroke>) -> RasterBuffer {
    let mut frame = raster.clone();
    if let Some(stroke) = in_progress.filter(|s| !s.segments().is_empty()) {
        frame.stroke(&stroke.preview());
    }
    frame
}

/// Clear `raster` and stroke every entry of `strokes` in order
pub fn replay_into<'a>(
    raster: &mut RasterBuffer,
    strokes: impl IntoIterator<Item = &'a StrokeRef>,
) {
    raster.clear();
    for stroke in strokes {
        raster.stroke(stroke);
    }
}

/// A fresh raster of the given size holding exactly `strokes`
pub fn replay<'a>(
    width: u32,
    height: u32,
    strokes: impl IntoIterator<Item = &'a StrokeRef>,
) -> RasterBuffer {
    let mut raster = RasterBuffer::new(width, height);
    replay_into(&mut raster, strokes);
    raster
}
