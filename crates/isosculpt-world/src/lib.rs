//! Terrain seeding for the density volume: noise height field, flat fill, and TOML config.
#![forbid(unsafe_code)]

pub mod terrain;
pub mod worldgen;

pub use terrain::{HeightField, HeightNoise, flatten, generate};
pub use worldgen::{
    Brush, ConfigError, Flatten, Grid, Levels, NoiseParams, TerrainConfig, load_config_from_path,
    validate_grid,
};
