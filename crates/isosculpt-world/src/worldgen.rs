use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use isosculpt_geom::Vec3;
use isosculpt_volume::MIN_CELLS_PER_AXIS;

/// Everything a sculpting session is seeded from. Missing tables and keys fall
/// back to the defaults below, so an empty file is a valid config.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TerrainConfig {
    #[serde(default)]
    pub grid: Grid,
    #[serde(default)]
    pub noise: NoiseParams,
    #[serde(default)]
    pub flatten: Flatten,
    #[serde(default)]
    pub brush: Brush,
    #[serde(default)]
    pub levels: Levels,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Grid {
    #[serde(default = "default_size_x")]
    pub size_x: usize,
    #[serde(default = "default_size_y")]
    pub size_y: usize,
    #[serde(default = "default_size_z")]
    pub size_z: usize,
    #[serde(default = "default_voxel_size")]
    pub voxel_size: f32,
    #[serde(default)]
    pub iso_level: f32,
    #[serde(default)]
    pub origin: [f32; 3],
}
fn default_size_x() -> usize {
    64
}
fn default_size_y() -> usize {
    32
}
fn default_size_z() -> usize {
    64
}
fn default_voxel_size() -> f32 {
    0.5
}
impl Default for Grid {
    fn default() -> Self {
        Self {
            size_x: default_size_x(),
            size_y: default_size_y(),
            size_z: default_size_z(),
            voxel_size: default_voxel_size(),
            iso_level: 0.0,
            origin: [0.0; 3],
        }
    }
}

impl Grid {
    #[inline]
    pub fn cells(&self) -> [usize; 3] {
        [self.size_x, self.size_y, self.size_z]
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        Vec3::from(self.origin)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_grid(self.cells(), self.voxel_size)?;
        if !self.iso_level.is_finite() {
            return Err(ConfigError::InvalidIsoLevel(self.iso_level));
        }
        Ok(())
    }
}

/// Fractal noise inputs for `terrain::generate`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct NoiseParams {
    #[serde(default)]
    pub seed: i32,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_octaves")]
    pub octaves: u32,
    // Carried through config and CLI; the height field does not read it yet
    #[serde(default = "default_cave_bias")]
    pub cave_bias: f32,
}
fn default_frequency() -> f32 {
    0.08
}
fn default_amplitude() -> f32 {
    0.8
}
fn default_octaves() -> u32 {
    3
}
fn default_cave_bias() -> f32 {
    0.5
}
impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency: default_frequency(),
            amplitude: default_amplitude(),
            octaves: default_octaves(),
            cave_bias: default_cave_bias(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Flatten {
    #[serde(default)]
    pub height: f32,
}

/// Brush defaults; interactive clamping lives in `isosculpt_edit::BrushSettings`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Brush {
    #[serde(default = "default_brush_radius")]
    pub radius: f32,
    #[serde(default = "default_brush_strength")]
    pub strength: f32,
    #[serde(default = "default_step_multiplier")]
    pub step_multiplier: f32,
    #[serde(default = "default_application_power")]
    pub application_power: f32,
}
fn default_brush_radius() -> f32 {
    2.5
}
fn default_brush_strength() -> f32 {
    0.75
}
fn default_step_multiplier() -> f32 {
    0.4
}
fn default_application_power() -> f32 {
    1.5
}
impl Default for Brush {
    fn default() -> Self {
        Self {
            radius: default_brush_radius(),
            strength: default_brush_strength(),
            step_multiplier: default_step_multiplier(),
            application_power: default_application_power(),
        }
    }
}

/// Preset grid resolutions cycled with `level N`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Levels {
    #[serde(default = "default_presets")]
    pub presets: Vec<[usize; 3]>,
    #[serde(default = "default_level")]
    pub default: usize,
}
fn default_presets() -> Vec<[usize; 3]> {
    vec![[32, 16, 32], [64, 32, 64], [128, 64, 128]]
}
fn default_level() -> usize {
    1
}
impl Default for Levels {
    fn default() -> Self {
        Self {
            presets: default_presets(),
            default: default_level(),
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if self.levels.presets.is_empty() {
            return Err(ConfigError::NoPresets);
        }
        for preset in &self.levels.presets {
            validate_cells(*preset)?;
        }
        Ok(())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<TerrainConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: TerrainConfig = toml::from_str(&s)?;
    cfg.validate()?;
    Ok(cfg)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    GridTooSmall { axis: char, cells: usize },
    InvalidVoxelSize(f32),
    InvalidIsoLevel(f32),
    NoPresets,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GridTooSmall { axis, cells } => write!(
                f,
                "grid {axis} has {cells} cells, need at least {MIN_CELLS_PER_AXIS}"
            ),
            ConfigError::InvalidVoxelSize(v) => {
                write!(f, "voxel size must be finite and positive, got {v}")
            }
            ConfigError::InvalidIsoLevel(v) => write!(f, "iso level must be finite, got {v}"),
            ConfigError::NoPresets => write!(f, "density level list is empty"),
        }
    }
}

impl Error for ConfigError {}

fn validate_cells(cells: [usize; 3]) -> Result<(), ConfigError> {
    for (axis, n) in ['x', 'y', 'z'].into_iter().zip(cells) {
        if n < MIN_CELLS_PER_AXIS {
            return Err(ConfigError::GridTooSmall { axis, cells: n });
        }
    }
    Ok(())
}

/// Checks a grid request before any reallocation happens.
pub fn validate_grid(cells: [usize; 3], voxel_size: f32) -> Result<(), ConfigError> {
    validate_cells(cells)?;
    if !voxel_size.is_finite() || voxel_size <= 0.0 {
        return Err(ConfigError::InvalidVoxelSize(voxel_size));
    }
    Ok(())
}
