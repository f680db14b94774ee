//! Height-to-hue vertex coloring for visualizing extracted terrain.

use isosculpt_geom::{Vec3, inverse_lerp, lerp};

use crate::constants::{HEIGHT_EQ_EPSILON, HUE_MAX, MIN_HEIGHT_SPAN, OPAQUE_ALPHA};

/// Vertical extent used to normalize vertex heights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightRange {
    pub min: f32,
    pub max: f32,
}

impl Default for HeightRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl HeightRange {
    /// Range over `points`; `[0, 1]` when empty, widened to one unit when flat.
    pub fn of_points(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for p in points {
            min = min.min(p.y);
            max = max.max(p.y);
        }
        let scale = min.abs().max(max.abs()).max(1.0);
        if (max - min).abs() <= HEIGHT_EQ_EPSILON * scale {
            max = min + MIN_HEIGHT_SPAN;
        }
        Self { min, max }
    }

    #[inline]
    pub fn normalize(&self, y: f32) -> f32 {
        inverse_lerp(self.min, self.max, y)
    }
}

/// HSV in `[0, 1]` to linear RGB. Hue wraps, saturation and value clamp.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    if s == 0.0 {
        return [v, v, v];
    }
    let h6 = h * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

#[inline]
pub fn height_color(range: &HeightRange, y: f32) -> [f32; 4] {
    let hue = lerp(0.0, HUE_MAX, range.normalize(y));
    let [r, g, b] = hsv_to_rgb(hue, 1.0, 1.0);
    [r, g, b, OPAQUE_ALPHA]
}

/// One RGBA color per vertex, ramped by height across the mesh's own range.
pub fn colorize(points: &[Vec3]) -> (HeightRange, Vec<[f32; 4]>) {
    let range = HeightRange::of_points(points);
    let colors = points.iter().map(|p| height_color(&range, p.y)).collect();
    (range, colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn hsv_primaries() {
        assert!(close(hsv_to_rgb(0.0, 1.0, 1.0), [1.0, 0.0, 0.0]));
        assert!(close(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), [0.0, 1.0, 0.0]));
        assert!(close(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), [0.0, 0.0, 1.0]));
        // 300 degrees is magenta
        assert!(close(hsv_to_rgb(300.0 / 360.0, 1.0, 1.0), [1.0, 0.0, 1.0]));
        // Hue wraps
        assert!(close(hsv_to_rgb(1.25, 1.0, 1.0), hsv_to_rgb(0.25, 1.0, 1.0)));
        assert!(close(hsv_to_rgb(0.4, 0.0, 0.5), [0.5, 0.5, 0.5]));
    }

    #[test]
    fn empty_range_defaults_to_unit() {
        let (range, cols) = colorize(&[]);
        assert_eq!(range, HeightRange { min: 0.0, max: 1.0 });
        assert!(cols.is_empty());
    }

    #[test]
    fn flat_range_widens_to_one_unit() {
        let pts = [Vec3::new(0.0, 2.5, 0.0), Vec3::new(4.0, 2.5, 1.0)];
        let range = HeightRange::of_points(&pts);
        assert_eq!(range.min, 2.5);
        assert_eq!(range.max, 3.5);
        let (_, cols) = colorize(&pts);
        // Both at the bottom of the ramp: red
        assert!(cols.iter().all(|c| close([c[0], c[1], c[2]], [1.0, 0.0, 0.0])));
    }

    #[test]
    fn ramp_runs_red_to_magenta() {
        let pts = [Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 3.0, 0.0)];
        let (range, cols) = colorize(&pts);
        assert_eq!(range, HeightRange { min: -1.0, max: 3.0 });
        assert!(close([cols[0][0], cols[0][1], cols[0][2]], [1.0, 0.0, 0.0]));
        assert!(close([cols[1][0], cols[1][1], cols[1][2]], [1.0, 0.0, 1.0]));
        assert_eq!(cols[1][3], 1.0);
    }
}
