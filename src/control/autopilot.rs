use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    constants::{LANDING_KD, LANDING_KI, LANDING_KP, LEG_DEPLOY_MARGIN, THROTTLE_LIMITS},
    errors::SimulationError,
};

use super::{barge::Barge, pid::PIDController, propulsion::RcsDirection, rocket::Rocket};

/// Closed-loop landing policy for autonomous boosters.
///
/// Waits until the predicted suicide-burn altitude exceeds the remaining
/// altitude, then hands the throttle to the PID for the rest of the descent.
/// Legs drop once the booster is within `leg_deploy_margin` of the deck.
/// Attitude is bang-bang: fire whichever thruster turns the booster back
/// toward upright, with no deadband.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Autopilot {
    pub throttle_controller: PIDController,
    pub leg_deploy_margin: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Autopilot {
            throttle_controller: PIDController::new(
                LANDING_KP,
                LANDING_KI,
                LANDING_KD,
                THROTTLE_LIMITS.0,
                THROTTLE_LIMITS.1,
            ),
            leg_deploy_margin: LEG_DEPLOY_MARGIN,
        }
    }
}

impl Autopilot {
    pub fn new(throttle_controller: PIDController, leg_deploy_margin: f64) -> Self {
        Autopilot {
            throttle_controller,
            leg_deploy_margin,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        self.throttle_controller.validate()?;
        if !(self.leg_deploy_margin >= 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "leg deploy margin must be non-negative, got {}",
                self.leg_deploy_margin
            )));
        }
        Ok(())
    }

    /// Sets throttle and legs on `rocket` for this tick and returns the
    /// thruster to fire.
    pub fn fly(
        &self,
        rocket: &mut Rocket,
        barge: &Barge,
        world_height: f64,
        water_line: f64,
    ) -> RcsDirection {
        let altitude = rocket.get_altitude(world_height);

        if rocket.landing_burn_started() || rocket.get_suicide_burn_altitude() > altitude {
            if rocket.begin_landing_burn() {
                info!(altitude, vy = rocket.kinematics.velocity.y, "landing burn started");
            }
            let throttle = self.throttle_controller.control(
                rocket.kinematics.velocity.y,
                altitude,
                rocket.get_available_deceleration(),
            );
            rocket.engine.set_throttle(throttle);
        }

        if altitude < water_line + barge.height + self.leg_deploy_margin && rocket.deploy_legs() {
            info!(altitude, "landing legs deployed");
        }

        Self::level(rocket.kinematics.orientation)
    }

    /// Thruster that drives the orientation back toward zero.
    pub fn level(orientation: f64) -> RcsDirection {
        if orientation < 0.0 {
            RcsDirection::Right
        } else if orientation > 0.0 {
            RcsDirection::Left
        } else {
            RcsDirection::Off
        }
    }
}
