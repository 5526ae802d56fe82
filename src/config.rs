//! Physics Configuration
//!
//! Centralized, validated physics constants. Replaces the scattered
//! pixel-era constants of older builds with a single struct in tile units;
//! invalid values are rejected when the simulation is constructed, never
//! discovered mid-frame.

use std::fmt;

/// Physics constants for the simulation, all in tile units.
///
/// One tile is one unit on X, Y and Z. `Default` matches the classic
/// 16-pixel-tile tuning (a 2 px collision margin becomes 0.125 tiles,
/// a 3 px gravity step becomes 0.1875 tiles, and so on).
///
/// # Example
///
/// ```ignore
/// use isoquest::PhysicsConfig;
///
/// // Floatier tuning for an underwater room
/// let config = PhysicsConfig {
///     gravity_step: 0.0625,
///     ..PhysicsConfig::default()
/// };
/// config.validate()?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Shrink applied to each side of an actor's footprint before any
    /// overlap test. Keeps edge-adjacent actors from registering as
    /// collisions.
    pub margin: f32,

    /// Distance an airborne actor falls per frame.
    pub gravity_step: f32,

    /// How far above a surface an actor's foot may be while still counting
    /// as standing on it (one minor unit, 1/16 tile).
    pub standing_tolerance: f32,

    /// Maximum height difference allowed between an actor and the terrain
    /// cell it drops an entity onto.
    pub step_threshold: f32,

    /// Distance the hero walks per frame at full input.
    pub walk_speed: f32,

    /// Vertical distance gained per frame during a jump's ascent.
    pub jump_step: f32,

    /// Total ascent of a jump before gravity takes over.
    pub max_jump: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            margin: 0.125,             // 2 px
            gravity_step: 0.1875,      // 3 px/frame
            standing_tolerance: 0.0625, // 1 px
            step_threshold: 2.0,
            walk_speed: 0.125,         // 2 px/frame
            jump_step: 0.125,          // 2 px/frame
            max_jump: 1.5,             // 24 px
        }
    }
}

impl PhysicsConfig {
    /// Checks that every constant is usable.
    ///
    /// Steps and speeds must be positive; tolerances must be non-negative.
    /// The margin must be positive but small enough that a one-tile
    /// footprint does not invert (see `Actor::new` for the per-actor check).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.margin > 0.0) {
            return Err(ConfigError::NotPositive("margin"));
        }
        if !(self.gravity_step > 0.0) {
            return Err(ConfigError::NotPositive("gravity_step"));
        }
        if !(self.standing_tolerance >= 0.0) {
            return Err(ConfigError::Negative("standing_tolerance"));
        }
        if !(self.step_threshold >= 0.0) {
            return Err(ConfigError::Negative("step_threshold"));
        }
        if !(self.walk_speed > 0.0) {
            return Err(ConfigError::NotPositive("walk_speed"));
        }
        if !(self.jump_step > 0.0) {
            return Err(ConfigError::NotPositive("jump_step"));
        }
        if !(self.max_jump > 0.0) {
            return Err(ConfigError::NotPositive("max_jump"));
        }
        Ok(())
    }
}

/// Rejected physics configuration.
///
/// The `NaN` comparisons above fail the positive/non-negative checks, so a
/// NaN field reports through the same variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Field must be strictly positive.
    NotPositive(&'static str),
    /// Field must be zero or positive.
    Negative(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPositive(field) => {
                write!(f, "physics config field `{field}` must be positive")
            }
            ConfigError::Negative(field) => {
                write!(f, "physics config field `{field}` must not be negative")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PhysicsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_matches_pixel_era_tuning() {
        let config = PhysicsConfig::default();
        // 16 px per tile: 2 px margin, 3 px gravity, 1 px tolerance
        assert_eq!(config.margin, 2.0 / 16.0);
        assert_eq!(config.gravity_step, 3.0 / 16.0);
        assert_eq!(config.standing_tolerance, 1.0 / 16.0);
        assert_eq!(config.step_threshold, 2.0);
    }

    #[test]
    fn test_rejects_zero_gravity() {
        let config = PhysicsConfig {
            gravity_step: 0.0,
            ..PhysicsConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive("gravity_step"))
        );
    }

    #[test]
    fn test_rejects_nan_margin() {
        let config = PhysicsConfig {
            margin: f32::NAN,
            ..PhysicsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let config = PhysicsConfig {
            standing_tolerance: -0.1,
            ..PhysicsConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative("standing_tolerance"))
        );
    }
}
