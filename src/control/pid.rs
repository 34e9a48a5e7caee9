use serde::{Deserialize, Serialize};

use crate::errors::SimulationError;

/// Proportional-integral-derivative signal computer with output clamping.
///
/// The controller keeps no memory between calls: the caller hands in all
/// three terms every time (the landing autopilot passes vertical velocity,
/// remaining altitude and available deceleration), so `control` is a pure
/// function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PIDController {
    pub kp: f64, // Proportional gain
    pub ki: f64, // Integral gain
    pub kd: f64, // Derivative gain
    pub limit_low: f64,
    pub limit_high: f64,
}

impl PIDController {
    pub fn new(kp: f64, ki: f64, kd: f64, limit_low: f64, limit_high: f64) -> Self {
        PIDController {
            kp,
            ki,
            kd,
            limit_low,
            limit_high,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.limit_low <= self.limit_high) {
            return Err(SimulationError::InitializationError(format!(
                "PID output limits are inverted: [{}, {}]",
                self.limit_low, self.limit_high
            )));
        }
        Ok(())
    }

    pub fn control(&self, proportional: f64, integral: f64, derivative: f64) -> f64 {
        let signal = self.kp * proportional + self.ki * integral + self.kd * derivative;

        if signal > self.limit_high {
            self.limit_high
        } else if signal < self.limit_low {
            self.limit_low
        } else {
            signal
        }
    }
}
