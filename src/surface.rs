use egui::{Color32, Pos2};
use image::RgbaImage;

use crate::compositor::{compose_frame, replay, replay_into};
use crate::config::SurfaceConfig;
use crate::event::{EventBus, EventHandler, SurfaceEvent};
use crate::gesture::{DownOutcome, GestureController};
use crate::history::StrokeHistory;
use crate::input::{InputEvent, PointerId};
use crate::raster::RasterBuffer;
use crate::stroke::{BlendMode, PaintStyle, StrokeRef};

/// One drawing surface: the raster, the stroke history and the gesture in
/// progress, driven by pointer events and user commands.
///
/// Everything runs on the caller's thread in arrival order. Invalid input
/// and empty-stack commands are no-ops; nothing here fails.
#[derive(Debug)]
pub struct DrawingSurface {
    raster: RasterBuffer,
    history: StrokeHistory,
    gesture: GestureController,
    // Style the next gesture starts with
    style: PaintStyle,
    // Paint width to restore when leaving the eraser
    last_brush_size: f32,
    events: EventBus,
    needs_redraw: bool,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(0, 0, &SurfaceConfig::default())
    }
}

impl DrawingSurface {
    pub fn new(width: u32, height: u32, config: &SurfaceConfig) -> Self {
        let style = PaintStyle {
            color: config.initial_color,
            stroke_width_px: config.medium_brush,
            blend_mode: BlendMode::Normal,
        };
        Self {
            raster: RasterBuffer::new(width, height),
            history: StrokeHistory::new(),
            gesture: GestureController::new(config.smoothing_tolerance),
            style,
            last_brush_size: config.medium_brush,
            events: EventBus::new(),
            needs_redraw: true,
        }
    }

    /// Apply new tunables. Only the smoothing tolerance of future gestures is affected.
    pub fn apply_config(&mut self, config: &SurfaceConfig) {
        self.gesture.set_tolerance(config.smoothing_tolerance);
    }

    /// Subscribe a handler to every state change
    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    fn emit(&mut self, event: SurfaceEvent) {
        self.needs_redraw |= event.needs_redraw();
        self.events.emit(&event);
    }

    /// Returns whether a repaint was requested since the last call, and resets
    /// the request. Any number of changes collapse into one repaint.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Dispatch a translated pointer event
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { pointer, pos } => self.on_pointer_down(pointer, pos),
            InputEvent::PointerMove { pointer, pos } => self.on_pointer_move(pointer, pos),
            InputEvent::PointerUp { pointer } => self.on_pointer_up(pointer),
        }
    }

    /// Begin a stroke with the current style. Starting to draw permanently
    /// discards anything that could still be redone.
    pub fn on_pointer_down(&mut self, pointer: PointerId, pos: Pos2) -> bool {
        if self.gesture.pointer_down(pointer, pos, self.style) == DownOutcome::Ignored {
            return false;
        }

        let dropped = self.history.discard_redo();
        if dropped > 0 {
            log::debug!("Discarded {} undone strokes", dropped);
            self.emit(SurfaceEvent::RedoDiscarded { count: dropped });
        }
        self.emit(SurfaceEvent::StrokeStarted);
        true
    }

    /// Returns true if the sample extended the in-progress stroke
    pub fn on_pointer_move(&mut self, pointer: PointerId, pos: Pos2) -> bool {
        if self.gesture.pointer_move(pointer, pos).is_none() {
            return false;
        }
        self.emit(SurfaceEvent::SegmentAdded);
        true
    }

    /// Finish the stroke: bake it into the raster and commit it
    pub fn on_pointer_up(&mut self, pointer: PointerId) -> bool {
        match self.gesture.pointer_up(pointer) {
            Some(stroke) => {
                self.commit(stroke);
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, stroke: StrokeRef) {
        let segments = stroke.segments().len();
        self.raster.stroke(&stroke);
        self.history.commit(stroke);
        log::info!(
            "Committed stroke with {} segments ({} in history)",
            segments,
            self.history.committed().len()
        );
        self.emit(SurfaceEvent::StrokeCommitted { segments });
    }

    // Implicit pointer-up for resize and clear
    fn finish_gesture(&mut self) {
        if let Some(stroke) = self.gesture.finish() {
            log::debug!("Committing in-progress stroke before surface change");
            self.commit(stroke);
        }
    }

    /// Set the color and blend mode of future strokes
    pub fn set_style(&mut self, color: Color32, blend_mode: BlendMode) {
        self.style.color = color;
        self.style.blend_mode = blend_mode;
    }

    /// Set the width of future strokes. Non-positive or non-finite widths are ignored.
    pub fn set_stroke_width(&mut self, px: f32) -> bool {
        if !(px.is_finite() && px > 0.0) {
            log::warn!("Ignoring invalid stroke width: {}", px);
            return false;
        }
        self.style.stroke_width_px = px;
        true
    }

    pub fn set_last_brush_size(&mut self, px: f32) {
        self.last_brush_size = px;
    }

    pub fn last_brush_size(&self) -> f32 {
        self.last_brush_size
    }

    pub fn style(&self) -> &PaintStyle {
        &self.style
    }

    /// Take back the newest stroke and rebuild the raster from what remains
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            log::debug!("Nothing to undo");
            return false;
        }
        replay_into(&mut self.raster, self.history.committed().iter());
        log::info!("Undo ({} strokes remain)", self.history.committed().len());
        self.emit(SurfaceEvent::Undone);
        true
    }

    /// Restore the most recently undone stroke. It is stroked on top of the
    /// raster directly, which matches a full replay because it was the newest.
    pub fn redo(&mut self) -> bool {
        let Some(stroke) = self.history.redo() else {
            log::debug!("Nothing to redo");
            return false;
        };
        self.raster.stroke(&stroke);
        log::info!("Redo ({} strokes)", self.history.committed().len());
        self.emit(SurfaceEvent::Redone);
        true
    }

    /// Start a new drawing: any in-progress stroke is committed, then history
    /// and raster are wiped. Returns false if there was nothing to clear.
    pub fn clear_all(&mut self) -> bool {
        self.finish_gesture();
        if self.history.committed().is_empty() && self.history.undone().is_empty() {
            return false;
        }
        self.history.clear_all();
        self.raster.clear();
        log::info!("Cleared drawing");
        self.emit(SurfaceEvent::Cleared);
        true
    }

    /// Reallocate the raster for a new viewport size and rebuild it from history.
    /// An in-progress stroke is committed first.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.raster.size() == [width, height] {
            return false;
        }
        self.finish_gesture();
        self.raster.resize(width, height);
        replay_into(&mut self.raster, self.history.committed().iter());
        log::info!("Resized surface to {}x{}", width, height);
        self.emit(SurfaceEvent::Resized { width, height });
        true
    }

    /// The frame to display: raster plus the stroke being drawn
    pub fn frame(&self) -> RasterBuffer {
        compose_frame(&self.raster, self.gesture.in_progress())
    }

    /// Current composited frame for external persistence. Changes nothing.
    pub fn export_raster_snapshot(&self) -> RgbaImage {
        self.frame().snapshot()
    }

    /// A fresh raster rebuilt from the committed strokes alone
    pub fn replay_committed(&self) -> RasterBuffer {
        replay(self.raster.width(), self.raster.height(), self.history.committed().iter())
    }

    pub fn raster(&self) -> &RasterBuffer {
        &self.raster
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_active()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    const MOUSE: PointerId = PointerId::Mouse;

    #[test]
    fn test_redraw_requests_coalesce() {
        let mut surface = DrawingSurface::new(40, 40, &SurfaceConfig::default());
        assert!(surface.take_redraw());
        assert!(!surface.take_redraw());

        surface.on_pointer_down(MOUSE, pos2(5.0, 5.0));
        assert!(!surface.needs_redraw());
        surface.on_pointer_move(MOUSE, pos2(15.0, 5.0));
        surface.on_pointer_move(MOUSE, pos2(25.0, 5.0));
        surface.on_pointer_up(MOUSE);
        assert!(surface.take_redraw());
        assert!(!surface.take_redraw());
    }

    #[test]
    fn test_filtered_move_does_not_request_redraw() {
        let mut surface = DrawingSurface::new(40, 40, &SurfaceConfig::default());
        surface.take_redraw();
        surface.on_pointer_down(MOUSE, pos2(5.0, 5.0));
        assert!(!surface.on_pointer_move(MOUSE, pos2(6.0, 6.0)));
        assert!(!surface.needs_redraw());
    }

    #[test]
    fn test_invalid_width_is_ignored() {
        let mut surface = DrawingSurface::default();
        let before = surface.style().stroke_width_px;
        assert!(!surface.set_stroke_width(0.0));
        assert!(!surface.set_stroke_width(f32::NAN));
        assert_eq!(surface.style().stroke_width_px, before);
        assert!(surface.set_stroke_width(7.5));
        assert_eq!(surface.style().stroke_width_px, 7.5);
    }

    #[test]
    fn test_resize_to_same_size_is_noop() {
        let mut surface = DrawingSurface::new(40, 40, &SurfaceConfig::default());
        assert!(!surface.resize(40, 40));
        assert!(surface.resize(60, 30));
        assert_eq!(surface.raster().size(), [60, 30]);
    }
}
