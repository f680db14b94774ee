use std::time::Instant;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use isosculpt_geom::lerp;
use isosculpt_volume::DensityVolume;

use crate::worldgen::NoiseParams;

// Per-seed offset into the noise plane
const SEED_OFFSET_X: f32 = 0.1234;
const SEED_OFFSET_Z: f32 = 0.5678;

/// Floor on the height amplitude so very short grids still get relief.
const MIN_HEIGHT_AMP: f32 = 0.1;

/// 2D value noise remapped into `[0, 1]`, summed over octaves.
pub struct HeightNoise {
    noise: FastNoiseLite,
    octaves: u32,
}

impl HeightNoise {
    pub fn new(seed: i32, octaves: u32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::Value));
        // Coordinates arrive pre-scaled, so the lattice runs at unit frequency
        noise.set_frequency(Some(1.0));
        Self {
            noise,
            octaves: octaves.max(1),
        }
    }

    #[inline]
    fn sample01(&self, x: f32, z: f32) -> f32 {
        ((self.noise.get_noise_2d(x, z) + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Octave sum normalized by total weight; stays in `[0, 1]`.
    pub fn fractal01(&self, x: f32, z: f32) -> f32 {
        let (mut n, mut a, mut f, mut norm) = (0.0f32, 1.0f32, 1.0f32, 0.0f32);
        for _ in 0..self.octaves {
            n += self.sample01(x * f, z * f) * a;
            norm += a;
            a *= 0.5;
            f *= 2.0;
        }
        if norm > 0.0 { n / norm } else { n }
    }
}

/// Terrain surface height per column, before it is turned into densities.
pub struct HeightField<'a> {
    params: &'a NoiseParams,
    noise: HeightNoise,
    scale: f32,
    base: f32,
    amp: f32,
    center: (f32, f32),
    falloff_radius: (f32, f32),
}

impl<'a> HeightField<'a> {
    pub fn new(vol: &DensityVolume, params: &'a NoiseParams) -> Self {
        let [cx, cy, cz] = vol.cells();
        let world_h = cy as f32 * vol.voxel_size();
        let half = (cx as f32 * 0.5, cz as f32 * 0.5);
        Self {
            params,
            noise: HeightNoise::new(params.seed, params.octaves),
            scale: vol.voxel_size() * params.frequency,
            base: world_h * 0.5,
            amp: (world_h * 0.25).max(MIN_HEIGHT_AMP) * params.amplitude,
            center: half,
            falloff_radius: half,
        }
    }

    /// World-space surface height above sample column `(x, z)`.
    pub fn height(&self, x: usize, z: usize) -> f32 {
        let seed = self.params.seed as f32;
        let px = (x as f32 + seed * SEED_OFFSET_X) * self.scale;
        let pz = (z as f32 + seed * SEED_OFFSET_Z) * self.scale;
        let n = self.noise.fractal01(px, pz);

        let dx = (x as f32 - self.center.0) / self.falloff_radius.0;
        let dz = (z as f32 - self.center.1) / self.falloff_radius.1;
        let falloff = (dx * dx + dz * dz).sqrt().clamp(0.0, 1.0);
        let edge_drop = lerp(0.0, self.amp * 0.5, falloff);

        self.base + (n * 2.0 - 1.0) * self.amp - edge_drop
    }
}

/// Overwrites every sample with `world_y - H(x, z)` for a noise height field
/// that sags toward the grid edges.
pub fn generate(vol: &mut DensityVolume, params: &NoiseParams) {
    let start = Instant::now();
    let [sx, _, sz] = vol.samples();
    let heights: Vec<f32> = {
        let field = HeightField::new(vol, params);
        (0..sz)
            .flat_map(|z| (0..sx).map(move |x| (x, z)))
            .map(|(x, z)| field.height(x, z))
            .collect()
    };
    let origin_y = vol.origin().y;
    let vs = vol.voxel_size();
    vol.fill_with(|x, y, z| origin_y + y as f32 * vs - heights[z * sx + x]);
    log::info!(
        "generated terrain seed={} freq={} amp={} octaves={} in {:.2} ms",
        params.seed,
        params.frequency,
        params.amplitude,
        params.octaves,
        start.elapsed().as_secs_f32() * 1000.0
    );
}

/// Horizontal plane: `density = world_y - height` everywhere.
pub fn flatten(vol: &mut DensityVolume, height: f32) {
    let origin_y = vol.origin().y;
    let vs = vol.voxel_size();
    vol.fill_with(|_, y, _| origin_y + y as f32 * vs - height);
    log::info!("flattened terrain at height {height}");
}
