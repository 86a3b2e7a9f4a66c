use egui::Color32;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::smoother::Segment;

/// How a stroke combines with the pixels already in the raster
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    /// Paint the stroke color over the existing pixels
    #[default]
    Normal,
    /// Clear the pixels under the stroke to transparent
    Erase,
}

/// Paint attributes snapshotted when a stroke begins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintStyle {
    pub color: Color32,
    pub stroke_width_px: f32,
    pub blend_mode: BlendMode,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(0x66, 0x00, 0x00),
            stroke_width_px: 20.0,
            blend_mode: BlendMode::Normal,
        }
    }
}

// Immutable stroke for sharing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    segments: Vec<Segment>,
    style: PaintStyle,
}

// Define a reference-counted type alias for Stroke
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(style: PaintStyle, segments: Vec<Segment>) -> Self {
        Self { segments, style }
    }

    pub fn new_ref(style: PaintStyle, segments: Vec<Segment>) -> StrokeRef {
        Arc::new(Self::new(style, segments))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn style(&self) -> &PaintStyle {
        &self.style
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Stroke under construction. Only the gesture that owns it can append to it;
/// [`MutableStroke::finalize`] hands out an immutable [`StrokeRef`] and leaves
/// a fresh empty buffer behind, so history entries never alias the editable one.
#[derive(Debug, Clone)]
pub struct MutableStroke {
    segments: Vec<Segment>,
    style: PaintStyle,
}

impl MutableStroke {
    pub fn new(style: PaintStyle) -> Self {
        Self {
            segments: Vec::new(),
            style,
        }
    }

    pub fn append(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Move the collected segments into an immutable stroke and reset
    pub fn finalize(&mut self) -> StrokeRef {
        let segments = std::mem::take(&mut self.segments);
        Stroke::new_ref(self.style, segments)
    }

    // Get a reference to the segments for preview
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn style(&self) -> &PaintStyle {
        &self.style
    }

    /// Borrow the in-progress path as a read-only stroke view for rendering
    pub fn preview(&self) -> Stroke {
        Stroke::new(self.style, self.segments.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn line(x: f32) -> Segment {
        Segment::Line {
            from: pos2(x, 0.0),
            to: pos2(x + 1.0, 0.0),
        }
    }

    #[test]
    fn test_finalize_resets_buffer() {
        let mut stroke = MutableStroke::new(PaintStyle::default());
        stroke.append(line(0.0));
        stroke.append(line(1.0));

        let finalized = stroke.finalize();
        assert_eq!(finalized.segments().len(), 2);
        assert!(stroke.segments().is_empty());

        // Further edits never reach the finalized snapshot
        stroke.append(line(5.0));
        assert_eq!(finalized.segments().len(), 2);
        assert_eq!(finalized.segments()[0], line(0.0));
    }

    #[test]
    fn test_style_is_snapshotted() {
        let style = PaintStyle {
            color: Color32::RED,
            stroke_width_px: 3.0,
            blend_mode: BlendMode::Erase,
        };
        let mut stroke = MutableStroke::new(style);
        stroke.append(line(0.0));
        let finalized = stroke.finalize();
        assert_eq!(*finalized.style(), style);
    }
}
