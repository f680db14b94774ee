use isosculpt_geom::{GridBox, Vec3};
use isosculpt_volume::DensityVolume;

/// Samples a single brush application could reach, and how many it changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrushFootprint {
    pub bounds: GridBox,
    pub touched: usize,
}

impl BrushFootprint {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.touched == 0
    }
}

/// Whether a stroke builds material up or carves it away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BrushMode {
    /// Lowers density, growing the solid.
    Add,
    /// Raises density, carving the solid.
    Dig,
}

impl BrushMode {
    #[inline]
    pub fn is_additive(self) -> bool {
        matches!(self, BrushMode::Add)
    }

    #[inline]
    fn sign(self) -> f32 {
        match self {
            BrushMode::Add => -1.0,
            BrushMode::Dig => 1.0,
        }
    }
}

impl From<bool> for BrushMode {
    fn from(additive: bool) -> Self {
        if additive { BrushMode::Add } else { BrushMode::Dig }
    }
}

/// Clamped sample box around `local` with one sample of slack on each side.
pub fn brush_bounds(vol: &DensityVolume, local: Vec3, r: f32) -> GridBox {
    let cells = vol.cells();
    let lo = [local.x - r, local.y - r, local.z - r];
    let hi = [local.x + r, local.y + r, local.z + r];
    let mut min = [0usize; 3];
    let mut max = [0usize; 3];
    for a in 0..3 {
        let n = cells[a] as i64;
        // Float casts saturate, so the padding must too
        min[a] = (lo[a].floor() as i64).saturating_sub(1).clamp(0, n) as usize;
        max[a] = (hi[a].ceil() as i64).saturating_add(1).clamp(0, n) as usize;
    }
    GridBox::new(min, max)
}

/// Radial-falloff sculpt around `center` (world space). Weight runs from 1 at
/// the centre to 0 at `radius`; `Add` subtracts `strength * w` from each sample,
/// `Dig` adds it. The mesh is not rebuilt here.
pub fn apply(
    vol: &mut DensityVolume,
    center: Vec3,
    radius: f32,
    strength: f32,
    mode: BrushMode,
) -> BrushFootprint {
    if !(radius > 0.0) || !radius.is_finite() || !center.is_finite() {
        return BrushFootprint::default();
    }
    let local = vol.world_to_local(center);
    let r = radius / vol.voxel_size();
    let r2 = r * r;
    // Underflowed or overflowed radii would turn the falloff into NaN
    if !r2.is_normal() {
        return BrushFootprint::default();
    }
    let bounds = brush_bounds(vol, local, r);
    let sign = mode.sign();

    let mut touched = 0;
    for x in bounds.min[0]..=bounds.max[0] {
        for y in bounds.min[1]..=bounds.max[1] {
            for z in bounds.min[2]..=bounds.max[2] {
                let p = Vec3::new(x as f32, y as f32, z as f32);
                let d2 = (p - local).length_squared();
                if d2 > r2 {
                    continue;
                }
                let w = 1.0 - (d2 / r2).sqrt();
                vol.add(x, y, z, strength * w * sign);
                touched += 1;
            }
        }
    }
    log::trace!(
        "brush {:?} r={} s={} touched {} samples in {:?}",
        mode,
        radius,
        strength,
        touched,
        bounds
    );
    BrushFootprint { bounds, touched }
}
