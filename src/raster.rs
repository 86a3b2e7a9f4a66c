use egui::{ColorImage, Pos2, pos2};
use image::{Rgba, RgbaImage};

use crate::stroke::{BlendMode, Stroke};

// Maximum length of one flattened piece of a curve, in pixels
const FLATTEN_STEP: f32 = 1.0;
// Strokes thinner than this still leave a visible hairline
const MIN_STROKE_WIDTH: f32 = 0.5;

/// Pixel store the committed strokes are baked into.
///
/// Starts fully transparent. Strokes are rasterized with round caps and
/// joins and one pixel of anti-aliasing; rasterization is deterministic, so
/// replaying the same strokes in the same order always reproduces the same
/// pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBuffer {
    pixels: RgbaImage,
}

impl RasterBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    /// Reallocate at a new size. Existing content is discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
    }

    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        self.pixels.pixels_mut().for_each(|p| *p = Rgba([0, 0, 0, 0]));
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p.0[3] == 0)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Copy of the pixels for external consumers
    pub fn snapshot(&self) -> RgbaImage {
        self.pixels.clone()
    }

    /// Pixels in the form egui uploads as a texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }

    /// Bake a stroke into the pixels using its paint style
    pub fn stroke(&mut self, stroke: &Stroke) {
        let polylines: Vec<Vec<Pos2>> = stroke
            .segments()
            .iter()
            .map(|segment| segment.flatten(FLATTEN_STEP))
            .collect();
        let all_points: Vec<Pos2> = polylines.iter().flatten().copied().collect();
        if all_points.is_empty() || self.width() == 0 || self.height() == 0 {
            return;
        }

        let style = stroke.style();
        let radius = style.stroke_width_px.max(MIN_STROKE_WIDTH) / 2.0;
        let Some(mask) = CoverageMask::new(&all_points, radius, self.width(), self.height()) else {
            return;
        };
        let mask = polylines
            .iter()
            .flat_map(|points| points.windows(2))
            .fold(mask, |mut mask, piece| {
                mask.add_piece(piece[0], piece[1], radius);
                mask
            });

        let color = style.color.to_srgba_unmultiplied();
        for (x, y, coverage) in mask.covered() {
            let dst = self.pixels.get_pixel_mut(x, y);
            dst.0 = match style.blend_mode {
                BlendMode::Normal => source_over(dst.0, color, coverage),
                BlendMode::Erase => erase(dst.0, coverage),
            };
        }
    }
}

/// Per-pixel coverage of one stroke, so overlapping pieces of the same stroke
/// do not blend twice.
struct CoverageMask {
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
    coverage: Vec<f32>,
}

impl CoverageMask {
    fn new(points: &[Pos2], radius: f32, max_w: u32, max_h: u32) -> Option<Self> {
        // Pixel span touched by the stroke, clipped to the raster
        let reach = radius + 1.0;
        let (lo, hi) = points.iter().fold(
            (pos2(f32::INFINITY, f32::INFINITY), pos2(f32::NEG_INFINITY, f32::NEG_INFINITY)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        );
        let x0 = (lo.x - reach).floor().max(0.0);
        let y0 = (lo.y - reach).floor().max(0.0);
        let x1 = (hi.x + reach).ceil().min(max_w as f32);
        let y1 = (hi.y + reach).ceil().min(max_h as f32);
        if !(x1 > x0 && y1 > y0) {
            return None;
        }

        let (x0, y0) = (x0 as u32, y0 as u32);
        let (width, height) = (x1 as u32 - x0, y1 as u32 - y0);
        Some(Self {
            x0,
            y0,
            width,
            height,
            coverage: vec![0.0; (width * height) as usize],
        })
    }

    fn add_piece(&mut self, a: Pos2, b: Pos2, radius: f32) {
        let pad = radius + 1.0;
        let min_x = (a.x.min(b.x) - pad).floor().max(self.x0 as f32) as u32;
        let min_y = (a.y.min(b.y) - pad).floor().max(self.y0 as f32) as u32;
        let max_x = ((a.x.max(b.x) + pad).ceil().max(0.0) as u32).min(self.x0 + self.width);
        let max_y = ((a.y.max(b.y) + pad).ceil().max(0.0) as u32).min(self.y0 + self.height);

        // Pixels farther than this from the piece get no coverage at all
        let outer_sq = (radius + 0.5) * (radius + 0.5);
        for y in min_y..max_y {
            for x in min_x..max_x {
                let center = pos2(x as f32 + 0.5, y as f32 + 0.5);
                let dist_sq = piece_distance_sq(center, a, b);
                if dist_sq >= outer_sq {
                    continue;
                }
                let value = (radius + 0.5 - dist_sq.sqrt()).min(1.0);
                if value > 0.0 {
                    let idx = ((y - self.y0) * self.width + (x - self.x0)) as usize;
                    if let Some(slot) = self.coverage.get_mut(idx) {
                        *slot = slot.max(value);
                    }
                }
            }
        }
    }

    fn covered(&self) -> impl Iterator<Item = (u32, u32, f32)> + '_ {
        self.coverage
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0.0)
            .map(|(idx, c)| {
                let idx = idx as u32;
                (self.x0 + idx % self.width, self.y0 + idx / self.width, *c)
            })
    }
}

/// Squared distance from a pixel center to the piece `a..b`. A zero-length
/// piece is a single point, which gives round caps and dots.
fn piece_distance_sq(center: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    let t = if len_sq > 0.0 {
        ((center - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (center - (a + ab * t)).length_sq()
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Unpremultiplied source-over of `src` scaled by `coverage`
fn source_over(dst: [u8; 4], src: [u8; 4], coverage: f32) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0 * coverage;
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let channel = |i: usize| {
        let s = src[i] as f32 / 255.0;
        let d = dst[i] as f32 / 255.0;
        to_u8((s * sa + d * da * (1.0 - sa)) / out_a)
    };
    [channel(0), channel(1), channel(2), to_u8(out_a)]
}

/// Remove `coverage` worth of alpha, clearing fully covered pixels
fn erase(dst: [u8; 4], coverage: f32) -> [u8; 4] {
    let alpha = to_u8(dst[3] as f32 / 255.0 * (1.0 - coverage));
    if alpha == 0 {
        [0, 0, 0, 0]
    } else {
        [dst[0], dst[1], dst[2], alpha]
    }
}
