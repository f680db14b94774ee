use isosculpt_geom::Vec3;

use crate::brush::BrushMode;

/// Step used when `radius * step_multiplier` collapses to zero or below.
pub const FALLBACK_STEP: f32 = 0.1;

/// Upper bound on brush applications in one stroke.
pub const MAX_STROKE_STEPS: usize = 4096;

/// A push of the brush along a ray, starting at the surface hit point.
///
/// Adding walks back toward the viewer (against `dir`), digging walks into the
/// surface. Depth is the brush strength, doubled for deep strokes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub hit: Vec3,
    pub dir: Vec3,
    pub radius: f32,
    pub depth: f32,
    pub step: f32,
    pub mode: BrushMode,
}

impl Stroke {
    pub fn new(
        hit: Vec3,
        dir: Vec3,
        radius: f32,
        strength: f32,
        step_multiplier: f32,
        mode: BrushMode,
        deep: bool,
    ) -> Self {
        let depth = if deep { strength * 2.0 } else { strength };
        let mut step = radius * step_multiplier;
        if !(step > 0.0) {
            step = FALLBACK_STEP;
        }
        Self {
            hit,
            dir,
            radius,
            depth,
            step,
            mode,
        }
    }

    /// Direction the brush centres travel in.
    #[inline]
    pub fn travel(&self) -> Vec3 {
        match self.mode {
            BrushMode::Add => -self.dir,
            BrushMode::Dig => self.dir,
        }
    }

    /// Number of brush applications: `ceil(depth / step)`, capped at
    /// `MAX_STROKE_STEPS`. Zero for a non-positive or NaN depth.
    pub fn step_count(&self) -> usize {
        let n = (self.depth / self.step).ceil();
        if !(n > 0.0) {
            return 0;
        }
        // Saturating cast; infinity lands on the cap
        (n as usize).min(MAX_STROKE_STEPS)
    }

    /// Brush centres at distances `0, step, 2*step, ...` while below `depth`.
    pub fn points(&self) -> StrokePoints {
        StrokePoints {
            origin: self.hit,
            travel: self.travel(),
            step: self.step,
            index: 0,
            count: self.step_count(),
        }
    }
}

/// Iterator over the centres of one stroke.
#[derive(Clone, Debug)]
pub struct StrokePoints {
    origin: Vec3,
    travel: Vec3,
    step: f32,
    index: usize,
    count: usize,
}

impl Iterator for StrokePoints {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        if self.index >= self.count {
            return None;
        }
        let p = self.origin + self.travel * (self.index as f32 * self.step);
        self.index += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.index;
        (left, Some(left))
    }
}
