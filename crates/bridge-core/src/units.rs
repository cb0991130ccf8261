//! Scale factor between simulation meters and display units.

use glam::Vec2;

use crate::config::ConfigError;

/// Conversion factor between the solver's meters and the renderer's units.
///
/// The solver works in meters; meshes are authored at display scale. A single
/// multiplicative factor maps between the two, applied uniformly to every
/// length, position, and radius that crosses the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScale {
    units_per_meter: f32,
}

impl UnitScale {
    /// Creates a scale, rejecting non-finite or non-positive factors.
    pub fn new(units_per_meter: f32) -> Result<Self, ConfigError> {
        if !units_per_meter.is_finite() || units_per_meter <= 0.0 {
            return Err(ConfigError::InvalidScale(units_per_meter));
        }
        Ok(Self { units_per_meter })
    }

    /// Display units per simulation meter.
    pub fn units_per_meter(&self) -> f32 {
        self.units_per_meter
    }

    /// Converts a length from meters to display units.
    pub fn to_display(&self, meters: f32) -> f32 {
        meters * self.units_per_meter
    }

    /// Converts a length from display units to meters.
    pub fn to_sim(&self, display: f32) -> f32 {
        display / self.units_per_meter
    }

    /// Converts a point from simulation space to display space.
    pub fn point_to_display(&self, point: Vec2) -> Vec2 {
        point * self.units_per_meter
    }

    /// Converts a point from display space to simulation space.
    pub fn point_to_sim(&self, point: Vec2) -> Vec2 {
        point / self.units_per_meter
    }
}
