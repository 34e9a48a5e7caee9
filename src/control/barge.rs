use serde::{Deserialize, Serialize};

use crate::constants::{BARGE_HEIGHT, BARGE_WIDTH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BargeSpec {
    pub width: f64,
    pub height: f64,
    pub velocity: f64,
}

impl Default for BargeSpec {
    fn default() -> Self {
        BargeSpec {
            width: BARGE_WIDTH,
            height: BARGE_HEIGHT,
            velocity: 0.0,
        }
    }
}

/// Landing platform drifting along the water line. Its motion is pure
/// translation; touchdowns never push it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Barge {
    pub width: f64,
    pub height: f64,
    pub position: f64,
    pub velocity: f64,
}

impl Barge {
    pub fn new(width: f64, height: f64, position: f64, velocity: f64) -> Self {
        Barge {
            width,
            height,
            position,
            velocity,
        }
    }

    pub fn from_spec(spec: &BargeSpec, position: f64) -> Self {
        Barge::new(spec.width, spec.height, position, spec.velocity)
    }

    pub fn update(&mut self, delta_time: f64) {
        self.position += self.velocity * delta_time;
    }

    /// True when `[left, right]` lies strictly inside the deck span.
    pub fn spans(&self, left: f64, right: f64) -> bool {
        left > self.position && right < self.position + self.width
    }
}
