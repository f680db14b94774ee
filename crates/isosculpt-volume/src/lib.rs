//! Dense density volume: the scalar grid the isosurface is extracted from.
#![forbid(unsafe_code)]

use isosculpt_geom::{Vec3, inverse_lerp};

/// Offsets of the 8 corners of a grid cube relative to its minimum sample.
/// Corners 0..4 walk the bottom face, 4..8 repeat the pattern one step up in y.
pub const CORNER_OFFSETS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 0, 1],
    [0, 0, 1],
    [0, 1, 0],
    [1, 1, 0],
    [1, 1, 1],
    [0, 1, 1],
];

/// Smallest grid size accepted per axis at the configuration boundary.
pub const MIN_CELLS_PER_AXIS: usize = 4;

/// World positions and densities of one cube's corners, in `CORNER_OFFSETS` order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeSample {
    pub pos: [Vec3; 8],
    pub val: [f32; 8],
}

/// `(cx+1) x (cy+1) x (cz+1)` scalar samples for a `cx x cy x cz` cube grid.
#[derive(Clone, Debug)]
pub struct DensityVolume {
    cells: [usize; 3],
    origin: Vec3,
    voxel_size: f32,
    data: Vec<f32>,
}

impl DensityVolume {
    pub fn new(sx: usize, sy: usize, sz: usize, voxel_size: f32, origin: Vec3) -> Self {
        let mut vol = Self {
            cells: [0; 3],
            origin,
            voxel_size,
            data: Vec::new(),
        };
        vol.allocate(sx, sy, sz);
        vol
    }

    /// Replaces the whole grid. Samples start at zero; callers fill them before extraction.
    pub fn allocate(&mut self, sx: usize, sy: usize, sz: usize) {
        self.cells = [sx, sy, sz];
        self.data = vec![0.0; (sx + 1) * (sy + 1) * (sz + 1)];
        log::debug!(
            "allocated density volume {}x{}x{} cells ({} samples)",
            sx,
            sy,
            sz,
            self.data.len()
        );
    }

    #[inline]
    pub fn cells(&self) -> [usize; 3] {
        self.cells
    }

    #[inline]
    pub fn samples(&self) -> [usize; 3] {
        [self.cells[0] + 1, self.cells[1] + 1, self.cells[2] + 1]
    }

    #[inline]
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    #[inline]
    pub fn set_voxel_size(&mut self, voxel_size: f32) {
        self.voxel_size = voxel_size;
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize, z: usize) -> bool {
        x <= self.cells[0] && y <= self.cells[1] && z <= self.cells[2]
    }

    /// Linear index, y-major: `(y * samples_z + z) * samples_x + x`.
    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        let [sx, _, sz] = self.samples();
        (y * sz + z) * sx + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        assert!(
            self.in_bounds(x, y, z),
            "density sample ({x},{y},{z}) outside {:?}",
            self.cells
        );
        self.data[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: f32) {
        assert!(
            self.in_bounds(x, y, z),
            "density sample ({x},{y},{z}) outside {:?}",
            self.cells
        );
        let i = self.idx(x, y, z);
        self.data[i] = value;
    }

    #[inline]
    pub fn add(&mut self, x: usize, y: usize, z: usize, delta: f32) {
        let v = self.get(x, y, z);
        self.set(x, y, z, v + delta);
    }

    /// Raw samples in `idx` order.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Overwrites every sample with `f(x, y, z)`.
    pub fn fill_with(&mut self, mut f: impl FnMut(usize, usize, usize) -> f32) {
        let [sx, sy, sz] = self.samples();
        for y in 0..sy {
            for z in 0..sz {
                for x in 0..sx {
                    let i = (y * sz + z) * sx + x;
                    self.data[i] = f(x, y, z);
                }
            }
        }
    }

    /// World-space height of sample row `y`.
    #[inline]
    pub fn world_y(&self, y: usize) -> f32 {
        self.origin.y + y as f32 * self.voxel_size
    }

    /// Fractional grid coordinates of a world position (not rounded).
    #[inline]
    pub fn world_to_local(&self, p: Vec3) -> Vec3 {
        (p - self.origin) / self.voxel_size
    }

    #[inline]
    pub fn local_to_world(&self, x: usize, y: usize, z: usize) -> Vec3 {
        self.origin + Vec3::new(x as f32, y as f32, z as f32) * self.voxel_size
    }

    /// Corner positions and densities of cell `(x, y, z)`; requires `x < cells_x` etc.
    pub fn cube(&self, x: usize, y: usize, z: usize) -> CubeSample {
        let mut pos = [Vec3::ZERO; 8];
        let mut val = [0.0f32; 8];
        for (i, o) in CORNER_OFFSETS.iter().enumerate() {
            let (cx, cy, cz) = (x + o[0], y + o[1], z + o[2]);
            pos[i] = self.local_to_world(cx, cy, cz);
            val[i] = self.get(cx, cy, cz);
        }
        CubeSample { pos, val }
    }

    /// One value per sample in `idx` order, remapped from `[lo, hi]` into `[0, 1]`.
    pub fn export_normalized(&self, lo: f32, hi: f32) -> Vec<f32> {
        self.data.iter().map(|&v| inverse_lerp(lo, hi, v)).collect()
    }
}
