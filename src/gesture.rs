use egui::Pos2;

use crate::input::PointerId;
use crate::smoother::{CurveSmoother, Segment};
use crate::stroke::{MutableStroke, PaintStyle, StrokeRef};

/// Lifecycle of a single pointer gesture
#[derive(Debug, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Active {
        pointer: PointerId,
        stroke: MutableStroke,
        smoother: CurveSmoother,
    },
}

/// What a pointer-down did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownOutcome {
    /// A new stroke began
    Started,
    /// Ignored: another pointer is already drawing, or the position is not finite
    Ignored,
}

/// Drives one stroke at a time from pointer-down to pointer-up.
///
/// Malformed sequences (move or up without a down, events from a second
/// pointer) are no-ops.
#[derive(Debug)]
pub struct GestureController {
    state: GestureState,
    tolerance: f32,
}

impl GestureController {
    pub fn new(tolerance: f32) -> Self {
        Self {
            state: GestureState::Idle,
            tolerance,
        }
    }

    pub fn set_tolerance(&mut self, tolerance: f32) {
        self.tolerance = tolerance;
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Active { .. })
    }

    /// The pointer currently drawing, if any
    pub fn active_pointer(&self) -> Option<PointerId> {
        match &self.state {
            GestureState::Active { pointer, .. } => Some(*pointer),
            GestureState::Idle => None,
        }
    }

    /// The stroke being drawn, for live preview
    pub fn in_progress(&self) -> Option<&MutableStroke> {
        match &self.state {
            GestureState::Active { stroke, .. } => Some(stroke),
            GestureState::Idle => None,
        }
    }

    /// IDLE -> ACTIVE. `style` is copied into the new stroke.
    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        pos: Pos2,
        style: PaintStyle,
    ) -> DownOutcome {
        if self.is_active() || !(pos.x.is_finite() && pos.y.is_finite()) {
            log::debug!("Ignoring pointer down from {:?} at {:?}", pointer, pos);
            return DownOutcome::Ignored;
        }

        let mut smoother = CurveSmoother::new(self.tolerance);
        smoother.begin(pos);
        self.state = GestureState::Active {
            pointer,
            stroke: MutableStroke::new(style),
            smoother,
        };
        DownOutcome::Started
    }

    /// Feed a sample to the active stroke. Returns the appended segment, or
    /// `None` if the sample was filtered or did not belong to the gesture.
    pub fn pointer_move(&mut self, pointer: PointerId, pos: Pos2) -> Option<Segment> {
        match &mut self.state {
            GestureState::Active {
                pointer: active,
                stroke,
                smoother,
            } if *active == pointer => {
                let segment = smoother.feed(pos)?;
                stroke.append(segment);
                Some(segment)
            }
            _ => None,
        }
    }

    /// ACTIVE -> IDLE. Appends the closing segment and hands back the
    /// finalized stroke for baking and commit.
    pub fn pointer_up(&mut self, pointer: PointerId) -> Option<StrokeRef> {
        if self.active_pointer() != Some(pointer) {
            log::debug!("Ignoring pointer up from {:?}", pointer);
            return None;
        }
        self.finish()
    }

    /// End the current gesture regardless of which pointer owns it.
    /// Used for implicit pointer-up on resize and clear.
    pub fn finish(&mut self) -> Option<StrokeRef> {
        match std::mem::take(&mut self.state) {
            GestureState::Active {
                mut stroke,
                mut smoother,
                ..
            } => {
                if let Some(closing) = smoother.finish() {
                    stroke.append(closing);
                }
                Some(stroke.finalize())
            }
            GestureState::Idle => None,
        }
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(crate::smoother::DEFAULT_TOLERANCE)
    }
}
