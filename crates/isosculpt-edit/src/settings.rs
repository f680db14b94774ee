pub const MIN_RADIUS: f32 = 1.0;
pub const MAX_RADIUS: f32 = 50.0;
pub const RADIUS_STEP: f32 = 1.0;

pub const MIN_STRENGTH: f32 = 1.0;
pub const MAX_STRENGTH: f32 = 20.0;
pub const STRENGTH_STEP: f32 = 0.5;

pub const DEFAULT_APPLICATION_POWER: f32 = 1.5;
pub const DEFAULT_STEP_MULTIPLIER: f32 = 0.4;

/// Interactive brush state. `strength` doubles as stroke depth.
///
/// Starting values are taken as given; only `adjust_*` clamp, the way a scroll
/// wheel nudges them into range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushSettings {
    pub radius: f32,
    pub strength: f32,
    /// Strength of each individual application along a stroke.
    pub application_power: f32,
    pub step_multiplier: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            radius: 2.5,
            strength: 0.75,
            application_power: DEFAULT_APPLICATION_POWER,
            step_multiplier: DEFAULT_STEP_MULTIPLIER,
        }
    }
}

impl BrushSettings {
    pub fn new(radius: f32, strength: f32, application_power: f32, step_multiplier: f32) -> Self {
        Self {
            radius,
            strength,
            application_power,
            step_multiplier,
        }
    }

    /// Moves the radius by `ticks` steps, clamped to `[MIN_RADIUS, MAX_RADIUS]`.
    pub fn adjust_radius(&mut self, ticks: f32) -> f32 {
        self.radius = (self.radius + ticks * RADIUS_STEP).clamp(MIN_RADIUS, MAX_RADIUS);
        self.radius
    }

    pub fn adjust_strength(&mut self, ticks: f32) -> f32 {
        self.strength =
            (self.strength + ticks * STRENGTH_STEP).clamp(MIN_STRENGTH, MAX_STRENGTH);
        self.strength
    }
}
