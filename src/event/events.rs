/// State changes of a drawing surface, in the order they happened
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// A pointer-down began a new stroke
    StrokeStarted,
    /// The in-progress stroke grew by one smoothed segment
    SegmentAdded,
    /// A stroke was baked into the raster and pushed onto history
    StrokeCommitted { segments: usize },
    /// Undone strokes were dropped and can no longer be redone
    RedoDiscarded { count: usize },
    /// The newest stroke was undone and the raster replayed
    Undone,
    /// The most recently undone stroke was restored
    Redone,
    /// History and raster were wiped
    Cleared,
    /// The raster was reallocated for a new viewport size
    Resized { width: u32, height: u32 },
}

impl SurfaceEvent {
    /// Whether the visible frame changed and a repaint is due
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, SurfaceEvent::RedoDiscarded { .. } | SurfaceEvent::StrokeStarted)
    }
}
