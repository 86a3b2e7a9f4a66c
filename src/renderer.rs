use egui::{Color32, ColorImage, Context, Painter, Rect, TextureHandle, TextureOptions, pos2, vec2};

/// Shown wherever the raster is transparent, on screen and in saved files
pub const CANVAS_BACKGROUND: Color32 = Color32::WHITE;

/// Uploads composed frames to the GPU and paints them into the canvas rect
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    // Size of the last uploaded frame, in pixels
    frame_size: [usize; 2],
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("frame_size", &self.frame_size)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame has been uploaded yet
    pub fn has_frame(&self) -> bool {
        self.texture.is_some()
    }

    /// Replace the displayed frame. Empty frames are skipped.
    pub fn upload(&mut self, ctx: &Context, frame: ColorImage) {
        if frame.size[0] == 0 || frame.size[1] == 0 {
            return;
        }
        self.frame_size = frame.size;
        match &mut self.texture {
            Some(texture) => texture.set(frame, TextureOptions::NEAREST),
            None => {
                let texture = ctx.load_texture("inkink_canvas", frame, TextureOptions::NEAREST);
                self.texture = Some(texture);
            }
        }
    }

    /// Paint the background and the last uploaded frame, anchored at the
    /// top-left corner of `rect`
    pub fn render(&self, painter: &Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, CANVAS_BACKGROUND);

        if let Some(texture) = &self.texture {
            let size = vec2(self.frame_size[0] as f32, self.frame_size[1] as f32);
            painter.image(
                texture.id(),
                Rect::from_min_size(rect.min, size),
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_creation() {
        let renderer = Renderer::new();
        assert!(!renderer.has_frame());
    }

    #[test]
    fn test_empty_frame_is_skipped() {
        let ctx = egui::Context::default();
        let mut renderer = Renderer::new();
        renderer.upload(&ctx, ColorImage::new([0, 0], Color32::TRANSPARENT));
        assert!(!renderer.has_frame());
    }

    #[test]
    fn test_render_basics() {
        let ctx = egui::Context::default();
        let mut renderer = Renderer::new();
        renderer.upload(&ctx, ColorImage::new([4, 4], Color32::RED));
        assert!(renderer.has_frame());

        let layer_id = egui::LayerId::background();
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let painter = Painter::new(ctx.clone(), layer_id, rect);
        renderer.render(&painter, rect);
    }
}
