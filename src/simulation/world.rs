use serde::{Deserialize, Serialize};

use crate::{
    constants::{WATER_LINE_FRACTION, WORLD_HEIGHT, WORLD_WIDTH},
    control::barge::Barge,
    errors::SimulationError,
};

/// Visible world: `width × height` units with the sea occupying the bottom
/// `water_line` units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f64,
    pub height: f64,
    pub water_line: f64,
}

impl Default for World {
    fn default() -> Self {
        World::new(WORLD_WIDTH, WORLD_HEIGHT)
    }
}

impl World {
    pub fn new(width: f64, height: f64) -> Self {
        World {
            width,
            height,
            water_line: WATER_LINE_FRACTION * height,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "world must have positive extent, got {} x {}",
                self.width, self.height
            )));
        }
        if !(0.0..self.height).contains(&self.water_line) {
            return Err(SimulationError::InitializationError(format!(
                "water line {} is outside the world",
                self.water_line
            )));
        }
        Ok(())
    }

    /// `y` of the sea surface.
    pub fn sea_level(&self) -> f64 {
        self.height - self.water_line
    }

    /// `y` of the top of `barge`'s deck.
    pub fn deck_level(&self, barge: &Barge) -> f64 {
        self.sea_level() - barge.height
    }

    pub fn is_outside_horizontally(&self, left: f64, width: f64) -> bool {
        left < 0.0 || left + width > self.width
    }

    pub fn is_outside_vertically(&self, y: f64, bottom: f64) -> bool {
        y < 0.0 || bottom > self.height
    }
}
