//! Shared constants for isosculpt-mesh-cpu. Centralizes common magic numbers.

// Edge interpolation snaps to a corner when within this distance of the iso level
pub const INTERP_EPSILON: f32 = 1e-5;

// Initial buffer reservation in triangles (avoids regrowth on mid-sized grids)
pub(crate) const INITIAL_TRI_CAPACITY: usize = 4096;

// Height ramp: hue sweeps from red (0 deg) to magenta (300 deg)
pub const HUE_MAX_DEGREES: f32 = 300.0;
pub(crate) const HUE_MAX: f32 = HUE_MAX_DEGREES / 360.0;

// Fallback spread when all vertices share one height
pub(crate) const MIN_HEIGHT_SPAN: f32 = 1.0;
// Two heights closer than this are treated as equal
pub(crate) const HEIGHT_EQ_EPSILON: f32 = 1e-6;

pub(crate) const OPAQUE_ALPHA: f32 = 1.0;
