use serde::{Deserialize, Serialize};

use crate::constants::{AIR_DENSITY_SEA_LEVEL, DRAG_COEFFICIENT, GRAVITY, RESTITUTION};
use crate::errors::SimulationError;

/// Physical constants shared by every body in a run. Fixed at start-up and
/// handed to each vehicle by value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub gravity: f64,
    pub air_density: f64,
    pub drag_coefficient: f64,
    pub restitution: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            gravity: GRAVITY,
            air_density: AIR_DENSITY_SEA_LEVEL,
            drag_coefficient: DRAG_COEFFICIENT,
            restitution: RESTITUTION,
        }
    }
}

impl Environment {
    pub fn new(gravity: f64, air_density: f64, drag_coefficient: f64, restitution: f64) -> Self {
        Environment {
            gravity,
            air_density,
            drag_coefficient,
            restitution,
        }
    }

    /// Same constants with the atmosphere removed.
    pub fn vacuum(gravity: f64) -> Self {
        Environment {
            gravity,
            air_density: 0.0,
            ..Environment::default()
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.gravity > 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "gravity must be positive, got {}",
                self.gravity
            )));
        }
        if !(self.air_density >= 0.0) || !(self.drag_coefficient >= 0.0) {
            return Err(SimulationError::InitializationError(
                "air density and drag coefficient must be non-negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SimulationError::InitializationError(format!(
                "restitution must lie in [0, 1], got {}",
                self.restitution
            )));
        }
        Ok(())
    }
}
