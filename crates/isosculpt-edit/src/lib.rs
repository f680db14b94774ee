//! Density sculpting: radial brush kernel, ray strokes, and brush settings.
#![forbid(unsafe_code)]

mod brush;
mod settings;
mod stroke;

pub use brush::{BrushFootprint, BrushMode, apply, brush_bounds};
pub use settings::{
    BrushSettings, DEFAULT_APPLICATION_POWER, DEFAULT_STEP_MULTIPLIER, MAX_RADIUS, MAX_STRENGTH,
    MIN_RADIUS, MIN_STRENGTH, RADIUS_STEP, STRENGTH_STEP,
};
pub use stroke::{FALLBACK_STEP, MAX_STROKE_STEPS, Stroke, StrokePoints};
