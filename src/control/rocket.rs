use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    constants::*,
    errors::SimulationError,
    trajectory_system::{aerodynamics::Aerodynamics, kinematics::Kinematics},
    utils::{latch::Latch, vector2d::Vector2D},
};

use super::{
    environment::Environment,
    propulsion::{ColdGasThrusters, MainEngine, RcsDirection},
};

/// Construction parameters for a booster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketSpec {
    pub radius: f64,
    pub height: f64,
    pub dry_mass: f64,
    pub fuel_mass: f64,
    pub nitrogen_mass: f64,
    pub main_thrust: f64,
    pub main_isp: f64,
    pub cold_gas_thrust: f64,
    pub cold_gas_isp: f64,
    pub cold_gas_arm: f64,
    pub footprint: Footprint,
    pub initial_velocity: Vector2D,
}

impl Default for RocketSpec {
    fn default() -> Self {
        RocketSpec {
            radius: BOOSTER_RADIUS,
            height: BOOSTER_HEIGHT,
            dry_mass: BOOSTER_DRY_MASS,
            fuel_mass: BOOSTER_FUEL_MASS,
            nitrogen_mass: BOOSTER_NITROGEN_MASS,
            main_thrust: MAIN_ENGINE_THRUST,
            main_isp: MAIN_ENGINE_ISP,
            cold_gas_thrust: COLD_GAS_THRUST,
            cold_gas_isp: COLD_GAS_ISP,
            cold_gas_arm: COLD_GAS_ARM,
            footprint: Footprint {
                width: BOOSTER_FOOTPRINT_WIDTH,
                height: BOOSTER_FOOTPRINT_HEIGHT,
            },
            initial_velocity: Vector2D::new(0.0, INITIAL_DESCENT_RATE),
        }
    }
}

impl RocketSpec {
    pub fn validate(&self) -> Result<(), SimulationError> {
        let positive = [
            ("radius", self.radius),
            ("height", self.height),
            ("dry mass", self.dry_mass),
            ("main engine Isp", self.main_isp),
            ("cold gas Isp", self.cold_gas_isp),
            ("footprint width", self.footprint.width),
            ("footprint height", self.footprint.height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SimulationError::InitializationError(format!(
                    "rocket {} must be positive, got {}",
                    name, value
                )));
            }
        }
        let non_negative = [
            ("fuel mass", self.fuel_mass),
            ("nitrogen mass", self.nitrogen_mass),
            ("main thrust", self.main_thrust),
            ("cold gas thrust", self.cold_gas_thrust),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(SimulationError::InitializationError(format!(
                    "rocket {} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        if !self.initial_velocity.is_finite() {
            return Err(SimulationError::InitializationError(
                "rocket initial velocity must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Extent used for the bounds and deck tests: `position.x` is the left edge,
/// `position.y + height / 2` the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

/// Appearance variant exposed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BodyState {
    Retracted,
    RetractedPlume,
    Extended,
    ExtendedPlume,
}

impl BodyState {
    pub fn from_flags(legs_deployed: bool, engine_firing: bool) -> Self {
        match (legs_deployed, engine_firing) {
            (false, false) => BodyState::Retracted,
            (false, true) => BodyState::RetractedPlume,
            (true, false) => BodyState::Extended,
            (true, true) => BodyState::ExtendedPlume,
        }
    }

    pub fn has_plume(self) -> bool {
        matches!(self, BodyState::RetractedPlume | BodyState::ExtendedPlume)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CrashReason {
    LossOfCommunication,
    AerodynamicBreakup,
    BargeImpact,
    LegsNotDeployed,
    Ocean,
}

impl fmt::Display for CrashReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            CrashReason::LossOfCommunication => "Loss of Communication",
            CrashReason::AerodynamicBreakup => "Destroyed by aerodynamic forces",
            CrashReason::BargeImpact => "Crashed into barge",
            CrashReason::LegsNotDeployed => "Landing legs not deployed",
            CrashReason::Ocean => "Crashed into ocean",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Outcome {
    Flying,
    Landed { time_to_land: f64 },
    Crashed(CrashReason),
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Flying)
    }
}

pub struct Rocket {
    pub radius: f64,
    pub height: f64,
    pub dry_mass: f64,
    pub engine: MainEngine,
    pub rcs: ColdGasThrusters,
    pub kinematics: Kinematics,
    pub footprint: Footprint,
    pub environment: Environment,
    autonomous: bool,
    legs: Latch,
    landing_burn: Latch,
    outcome: Outcome,
}

impl Rocket {
    pub fn new(
        spec: &RocketSpec,
        start_x: f64,
        angular_velocity: f64,
        autonomous: bool,
        environment: Environment,
    ) -> Self {
        Rocket {
            radius: spec.radius,
            height: spec.height,
            dry_mass: spec.dry_mass,
            engine: MainEngine::new(spec.main_thrust, spec.main_isp, spec.fuel_mass),
            rcs: ColdGasThrusters::new(
                spec.cold_gas_thrust,
                spec.cold_gas_isp,
                spec.cold_gas_arm,
                spec.nitrogen_mass,
                environment.gravity,
            ),
            kinematics: Kinematics::new(
                Vector2D::new(start_x, 0.0),
                spec.initial_velocity,
                angular_velocity,
            ),
            footprint: spec.footprint,
            environment,
            autonomous,
            legs: Latch::new(),
            landing_burn: Latch::new(),
            outcome: Outcome::Flying,
        }
    }

    pub fn get_total_mass(&self) -> f64 {
        self.dry_mass + self.engine.fuel_mass + self.rcs.nitrogen_mass
    }

    /// Solid-cylinder approximation `(1/12)·m·(3r³ + h²)`. The cubic radius
    /// term is part of the model and must stay.
    pub fn get_moment_of_inertia(&self) -> f64 {
        (1.0 / 12.0) * self.get_total_mass() * (3.0 * self.radius.powi(3) + self.height.powi(2))
    }

    pub fn get_speed(&self) -> f64 {
        self.kinematics.get_speed()
    }

    /// Net deceleration available at full throttle, `T/m − g`.
    pub fn get_available_deceleration(&self) -> f64 {
        self.engine.rated_thrust / self.get_total_mass() - self.environment.gravity
    }

    /// Height loss needed to null the vertical velocity at full throttle.
    /// Returns infinity ("burn now") when full thrust cannot beat gravity.
    pub fn get_suicide_burn_altitude(&self) -> f64 {
        let deceleration = self.get_available_deceleration();
        if !(deceleration > f64::EPSILON) {
            return f64::INFINITY;
        }
        let altitude = self.kinematics.velocity.y.powi(2) / (2.0 * deceleration);
        if altitude.is_finite() {
            altitude
        } else {
            f64::INFINITY
        }
    }

    pub fn is_autonomous(&self) -> bool {
        self.autonomous
    }

    pub fn legs_deployed(&self) -> bool {
        self.legs.is_engaged()
    }

    /// Returns `true` only on the tick the legs actually come down.
    pub fn deploy_legs(&mut self) -> bool {
        self.legs.engage()
    }

    pub fn landing_burn_started(&self) -> bool {
        self.landing_burn.is_engaged()
    }

    pub fn begin_landing_burn(&mut self) -> bool {
        self.landing_burn.engage()
    }

    pub fn get_outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_settled(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Records the terminal outcome. The first call wins; later calls are
    /// ignored and return `false`.
    pub fn settle(&mut self, outcome: Outcome) -> bool {
        if self.outcome.is_terminal() || !outcome.is_terminal() {
            return false;
        }
        self.outcome = outcome;
        true
    }

    pub fn get_body_state(&self) -> BodyState {
        BodyState::from_flags(self.legs_deployed(), self.engine.is_firing())
    }

    pub fn get_altitude(&self, world_height: f64) -> f64 {
        self.kinematics.get_altitude(world_height)
    }

    /// Deck contact: main engine off for good, then an inelastic bounce
    /// carried along by the deck.
    pub fn absorb_touchdown(&mut self, deck_velocity: f64) {
        let restitution = self.environment.restitution;
        self.engine.shut_down();
        self.kinematics.velocity.x = -restitution * self.kinematics.velocity.x + deck_velocity;
        self.kinematics.velocity.y = -restitution * self.kinematics.velocity.y;
    }

    /// Advances the booster by one fixed step. Must not be called once the
    /// outcome is terminal; the simulation loop guarantees that.
    pub fn update(&mut self, delta_time: f64, thruster: RcsDirection) {
        self.apply_thrust(delta_time);
        self.kinematics
            .apply_gravity(self.environment.gravity, delta_time);
        self.apply_drag(delta_time);
        self.apply_cold_gas(delta_time, thruster);
        self.kinematics.integrate_orientation(delta_time);
        self.kinematics.integrate_position(delta_time);

        trace!(
            x = self.kinematics.position.x,
            y = self.kinematics.position.y,
            vx = self.kinematics.velocity.x,
            vy = self.kinematics.velocity.y,
            theta = self.kinematics.get_orientation_degrees(),
            fuel = self.engine.fuel_mass,
            "rocket stepped"
        );
    }

    fn apply_thrust(&mut self, delta_time: f64) {
        if self.engine.is_out_of_fuel() {
            return;
        }
        let acceleration = self.engine.get_thrust() / self.get_total_mass();
        self.kinematics.apply_thrust(acceleration, delta_time);
        self.engine
            .consume_fuel(self.environment.gravity, delta_time);
    }

    fn apply_drag(&mut self, delta_time: f64) {
        let mass = self.get_total_mass();
        let inertia = self.get_moment_of_inertia();
        Aerodynamics::from_environment(&self.environment).apply(
            &mut self.kinematics,
            self.radius,
            self.height,
            mass,
            inertia,
            delta_time,
        );
    }

    fn apply_cold_gas(&mut self, delta_time: f64, thruster: RcsDirection) {
        if thruster == RcsDirection::Off || self.rcs.is_empty() {
            return;
        }
        let delta_omega =
            thruster.sign() * self.rcs.torque() * delta_time / self.get_moment_of_inertia();
        self.kinematics.apply_angular_impulse(delta_omega);
        self.rcs.vent(delta_time);
    }
}

impl fmt::Display for Rocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Falcon 9 booster")?;
        writeln!(f, "  Thrust of main engine: {:.0} N", self.engine.rated_thrust)?;
        writeln!(f, "  Thrust of rcs thruster: {:.0} N", self.rcs.rated_thrust)?;
        writeln!(f, "  Mass: {:.1} kg", self.get_total_mass())?;
        writeln!(f, "  Moment of inertia: {:.1} kg·m²", self.get_moment_of_inertia())?;
        writeln!(f, "  Radius: {} m", self.radius)?;
        write!(f, "  Height: {} m", self.height)
    }
}
