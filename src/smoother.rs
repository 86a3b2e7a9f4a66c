use egui::{Pos2, pos2};
use serde::{Deserialize, Serialize};

/// Minimum per-axis travel, in device-independent pixels, before a new sample
/// extends the curve.
pub const DEFAULT_TOLERANCE: f32 = 4.0;

// Upper bound on the number of line pieces a single curve segment flattens into
const MAX_FLATTEN_STEPS: f32 = 256.0;

/// One piece of a stroke path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    /// Quadratic curve from `from` to `to`, bent towards `ctrl`
    Quad { from: Pos2, ctrl: Pos2, to: Pos2 },
    /// Straight line, possibly zero length
    Line { from: Pos2, to: Pos2 },
}

impl Segment {
    pub fn start(&self) -> Pos2 {
        match *self {
            Segment::Quad { from, .. } | Segment::Line { from, .. } => from,
        }
    }

    pub fn end(&self) -> Pos2 {
        match *self {
            Segment::Quad { to, .. } | Segment::Line { to, .. } => to,
        }
    }

    /// Evaluate the segment at parameter `t` in `[0, 1]`
    pub fn sample(&self, t: f32) -> Pos2 {
        match *self {
            Segment::Quad { from, ctrl, to } => {
                let u = 1.0 - t;
                let a = u * u;
                let b = 2.0 * u * t;
                let c = t * t;
                pos2(
                    a * from.x + b * ctrl.x + c * to.x,
                    a * from.y + b * ctrl.y + c * to.y,
                )
            }
            Segment::Line { from, to } => pos2(
                from.x + (to.x - from.x) * t,
                from.y + (to.y - from.y) * t,
            ),
        }
    }

    /// Approximate the segment by a polyline whose pieces are at most
    /// `max_step` pixels long (measured along the control polygon).
    ///
    /// The result always starts at [`Segment::start`] and ends at
    /// [`Segment::end`], so a zero-length line yields two equal points.
    pub fn flatten(&self, max_step: f32) -> Vec<Pos2> {
        let length = match *self {
            Segment::Quad { from, ctrl, to } => from.distance(ctrl) + ctrl.distance(to),
            Segment::Line { from, to } => from.distance(to),
        };
        let steps = if max_step > 0.0 && length.is_finite() {
            (length / max_step).ceil().clamp(1.0, MAX_FLATTEN_STEPS) as usize
        } else {
            1
        };

        (0..=steps)
            .map(|i| self.sample(i as f32 / steps as f32))
            .collect()
    }
}

fn midpoint(a: Pos2, b: Pos2) -> Pos2 {
    pos2((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Turns raw pointer samples into quadratic segments through consecutive
/// midpoints, dropping samples that moved less than the tolerance on both axes.
#[derive(Debug, Clone)]
pub struct CurveSmoother {
    tolerance: f32,
    // Last accepted raw sample; control point of the next curve
    anchor: Option<Pos2>,
    // Where the path currently ends
    pen: Option<Pos2>,
}

impl Default for CurveSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl CurveSmoother {
    pub fn new(tolerance: f32) -> Self {
        Self {
            tolerance,
            anchor: None,
            pen: None,
        }
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Seed the anchor with the first sample of a gesture. Draws nothing.
    pub fn begin(&mut self, pos: Pos2) {
        self.anchor = Some(pos);
        self.pen = Some(pos);
    }

    /// Feed a raw sample. Returns the new curve segment if the sample moved
    /// far enough from the anchor, otherwise `None` and the sample is dropped.
    pub fn feed(&mut self, sample: Pos2) -> Option<Segment> {
        let anchor = self.anchor?;
        let pen = self.pen.unwrap_or(anchor);
        if !(sample.x.is_finite() && sample.y.is_finite()) {
            return None;
        }

        let dx = (sample.x - anchor.x).abs();
        let dy = (sample.y - anchor.y).abs();
        if !(dx >= self.tolerance || dy >= self.tolerance) {
            return None;
        }

        let to = midpoint(anchor, sample);
        self.anchor = Some(sample);
        self.pen = Some(to);
        Some(Segment::Quad {
            from: pen,
            ctrl: anchor,
            to,
        })
    }

    /// End the gesture: a straight segment from the pen to the last anchor.
    /// Resets the smoother; returns `None` if no gesture was begun.
    pub fn finish(&mut self) -> Option<Segment> {
        let anchor = self.anchor.take()?;
        let pen = self.pen.take().unwrap_or(anchor);
        Some(Segment::Line {
            from: pen,
            to: anchor,
        })
    }

    pub fn anchor(&self) -> Option<Pos2> {
        self.anchor
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }
}
