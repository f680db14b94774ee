//! Sculpting session: owns the density volume and keeps its mesh in sync.
#![forbid(unsafe_code)]

use std::time::Instant;

use isosculpt_edit::{BrushFootprint, BrushMode, BrushSettings, Stroke};
use isosculpt_geom::Vec3;
use isosculpt_mesh_cpu::{ExtractStats, SurfaceMesh, TriangleSoup, extract_into};
use isosculpt_volume::DensityVolume;
use isosculpt_world::{ConfigError, NoiseParams, TerrainConfig, flatten, generate, validate_grid};

/// Density range mapped onto `[0, 1]` by `density_export`.
pub const EXPORT_RANGE: (f32, f32) = (-2.0, 2.0);

/// One editable terrain. Every mutation rebuilds the mesh before returning, so
/// `mesh()` always reflects the current densities.
pub struct Sculptor {
    cfg: TerrainConfig,
    vol: DensityVolume,
    iso: f32,
    noise: NoiseParams,
    brush: BrushSettings,
    level: usize,
    scratch: TriangleSoup,
    mesh: SurfaceMesh,
    stats: ExtractStats,
    // Bumped on every rebuild so hosts can skip re-uploading an unchanged mesh
    revision: u64,
}

impl Sculptor {
    /// Validates `cfg`, allocates its grid, and seeds it with noise terrain.
    pub fn new(cfg: TerrainConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let g = &cfg.grid;
        let vol = DensityVolume::new(g.size_x, g.size_y, g.size_z, g.voxel_size, g.origin());
        let level = cfg.levels.default.min(cfg.levels.presets.len() - 1);
        let mut s = Self {
            iso: g.iso_level,
            noise: cfg.noise,
            brush: brush_from_config(&cfg),
            level,
            vol,
            cfg,
            scratch: TriangleSoup::default(),
            mesh: SurfaceMesh::default(),
            stats: ExtractStats::default(),
            revision: 0,
        };
        s.regenerate();
        Ok(s)
    }

    #[inline]
    pub fn config(&self) -> &TerrainConfig {
        &self.cfg
    }

    #[inline]
    pub fn volume(&self) -> &DensityVolume {
        &self.vol
    }

    #[inline]
    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    #[inline]
    pub fn stats(&self) -> ExtractStats {
        self.stats
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn iso_level(&self) -> f32 {
        self.iso
    }

    #[inline]
    pub fn noise_params(&self) -> &NoiseParams {
        &self.noise
    }

    #[inline]
    pub fn brush_settings(&self) -> &BrushSettings {
        &self.brush
    }

    #[inline]
    pub fn brush_settings_mut(&mut self) -> &mut BrushSettings {
        &mut self.brush
    }

    #[inline]
    pub fn density_level(&self) -> usize {
        self.level
    }

    /// Reallocates the grid and regenerates it with the current noise params.
    /// On error nothing changes.
    pub fn configure_grid(
        &mut self,
        sx: usize,
        sy: usize,
        sz: usize,
        voxel_size: f32,
    ) -> Result<(), ConfigError> {
        validate_grid([sx, sy, sz], voxel_size)?;
        log::info!("configuring grid {sx}x{sy}x{sz} voxel={voxel_size}");
        self.vol.set_voxel_size(voxel_size);
        self.vol.allocate(sx, sy, sz);
        self.regenerate();
        Ok(())
    }

    pub fn set_iso_level(&mut self, iso: f32) -> Result<(), ConfigError> {
        if !iso.is_finite() {
            return Err(ConfigError::InvalidIsoLevel(iso));
        }
        self.iso = iso;
        self.rebuild();
        Ok(())
    }

    /// Replaces the noise parameters and regenerates.
    pub fn generate_random(
        &mut self,
        seed: i32,
        frequency: f32,
        amplitude: f32,
        octaves: u32,
        cave_bias: f32,
    ) {
        self.noise = NoiseParams {
            seed,
            frequency,
            amplitude,
            octaves,
            cave_bias,
        };
        self.regenerate();
    }

    /// Regenerates with the current noise parameters.
    pub fn regenerate(&mut self) {
        generate(&mut self.vol, &self.noise);
        self.rebuild();
    }

    pub fn flatten(&mut self, height: f32) {
        flatten(&mut self.vol, height);
        self.rebuild();
    }

    /// Flattens at the configured height.
    pub fn flatten_default(&mut self) {
        self.flatten(self.cfg.flatten.height);
    }

    pub fn apply_brush(
        &mut self,
        point: Vec3,
        radius: f32,
        strength: f32,
        additive: bool,
    ) -> BrushFootprint {
        let fp = isosculpt_edit::apply(&mut self.vol, point, radius, strength, additive.into());
        self.rebuild();
        fp
    }

    /// Stroke from the current brush settings along `dir` from `hit`.
    pub fn stroke(&self, hit: Vec3, dir: Vec3, mode: BrushMode, deep: bool) -> Stroke {
        Stroke::new(
            hit,
            dir,
            self.brush.radius,
            self.brush.strength,
            self.brush.step_multiplier,
            mode,
            deep,
        )
    }

    /// Applies the brush at each stroke point with the per-step application
    /// power, rebuilding after every application. Returns the number applied.
    pub fn apply_stroke(&mut self, stroke: &Stroke) -> usize {
        let power = self.brush.application_power;
        let mut applied = 0;
        for p in stroke.points() {
            isosculpt_edit::apply(&mut self.vol, p, stroke.radius, power, stroke.mode);
            self.rebuild();
            applied += 1;
        }
        log::debug!("stroke {:?} applied {} steps", stroke.mode, applied);
        applied
    }

    /// One value in `[0, 1]` per sample, y-major, for volume textures.
    pub fn density_export(&self) -> Vec<f32> {
        self.vol.export_normalized(EXPORT_RANGE.0, EXPORT_RANGE.1)
    }

    /// Switches to preset `index` (clamped into range) and regenerates.
    pub fn set_density_level(&mut self, index: usize) -> usize {
        let presets = &self.cfg.levels.presets;
        let clamped = index.min(presets.len().saturating_sub(1));
        if clamped != index {
            log::warn!(
                "density level {index} out of range, using {clamped} of {}",
                presets.len()
            );
        }
        let Some(&[sx, sy, sz]) = presets.get(clamped) else {
            return self.level;
        };
        self.level = clamped;
        log::info!("density level {clamped}: {sx}x{sy}x{sz}");
        self.vol.allocate(sx, sy, sz);
        self.regenerate();
        clamped
    }

    /// Swaps in a new config and regenerates from it. On error the old one stays.
    pub fn reload_config(&mut self, cfg: TerrainConfig) -> Result<(), ConfigError> {
        cfg.validate()?;
        let g = &cfg.grid;
        self.vol.set_voxel_size(g.voxel_size);
        self.vol.set_origin(g.origin());
        self.vol.allocate(g.size_x, g.size_y, g.size_z);
        self.iso = g.iso_level;
        self.noise = cfg.noise;
        self.brush = brush_from_config(&cfg);
        self.level = cfg.levels.default.min(cfg.levels.presets.len() - 1);
        self.cfg = cfg;
        log::info!("reloaded config");
        self.regenerate();
        Ok(())
    }

    fn rebuild(&mut self) {
        let start = Instant::now();
        self.stats = extract_into(&self.vol, self.iso, &mut self.scratch);
        // The previous soup becomes next rebuild's scratch buffer
        std::mem::swap(&mut self.scratch, &mut self.mesh.soup);
        self.mesh.recolor();
        self.revision += 1;
        log::debug!(
            "rebuilt mesh rev={} verts={} in {:.2} ms",
            self.revision,
            self.mesh.vertex_count(),
            start.elapsed().as_secs_f32() * 1000.0
        );
    }
}

fn brush_from_config(cfg: &TerrainConfig) -> BrushSettings {
    let b = &cfg.brush;
    BrushSettings::new(b.radius, b.strength, b.application_power, b.step_multiplier)
}
