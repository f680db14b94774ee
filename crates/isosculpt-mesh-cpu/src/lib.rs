//! CPU isosurface extraction: Marching Cubes over a density volume, plus height coloring.
#![forbid(unsafe_code)]

pub mod color;
pub mod constants;
mod marching;
mod soup;
pub mod tables;

pub use color::{HeightRange, colorize, height_color, hsv_to_rgb};
pub use marching::{
    ExtractStats, cube_config, extract, extract_into, extract_with_stats, interpolate_edge,
    polygonise_cube,
};
pub use soup::{SurfaceMesh, TriangleSoup};
