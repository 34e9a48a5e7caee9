use std::{fmt, fs, path::Path, str::FromStr};

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    constants::{INITIAL_SPIN_RANGE, MAX_SIMULATION_TIME, TIME_STEP},
    control::{
        autopilot::Autopilot,
        barge::{Barge, BargeSpec},
        environment::Environment,
        rocket::{Rocket, RocketSpec},
    },
    errors::SimulationError,
};

use super::{world::World, Lane, Simulation};

/// Game modes offered at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// One booster flown by the user.
    Manual,
    /// One booster flown by the autopilot.
    Autonomous,
    /// User and autopilot side by side, each over its own barge.
    Versus,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneSpec {
    pub start_x: f64,
    pub barge_x: f64,
    pub autonomous: bool,
}

impl Scenario {
    pub fn lanes(self) -> Vec<LaneSpec> {
        let near = |autonomous| LaneSpec {
            start_x: 400.0,
            barge_x: 350.0,
            autonomous,
        };
        match self {
            Scenario::Manual => vec![near(false)],
            Scenario::Autonomous => vec![near(true)],
            Scenario::Versus => vec![
                near(false),
                LaneSpec {
                    start_x: 1200.0,
                    barge_x: 1150.0,
                    autonomous: true,
                },
            ],
        }
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manual" => Ok(Scenario::Manual),
            "autonomous" => Ok(Scenario::Autonomous),
            "versus" => Ok(Scenario::Versus),
            other => Err(format!(
                "unknown scenario '{}', expected manual, autonomous or versus",
                other
            )),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scenario::Manual => "manual",
            Scenario::Autonomous => "autonomous",
            Scenario::Versus => "versus",
        };
        f.write_str(name)
    }
}

/// Everything fixed at the start of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub world: World,
    pub time_step: f64,
    pub max_time: f64,
    pub environment: Environment,
    pub rocket: RocketSpec,
    pub barge: BargeSpec,
    pub autopilot: Autopilot,
    /// Initial angular rate is drawn uniformly from this range (rad/s).
    pub initial_spin_range: (f64, f64),
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            world: World::default(),
            time_step: TIME_STEP,
            max_time: MAX_SIMULATION_TIME,
            environment: Environment::default(),
            rocket: RocketSpec::default(),
            barge: BargeSpec::default(),
            autopilot: Autopilot::default(),
            initial_spin_range: INITIAL_SPIN_RANGE,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SimulationError> {
        let config: SimulationConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.time_step > 0.0) || !self.time_step.is_finite() {
            return Err(SimulationError::InitializationError(format!(
                "time step must be a positive number of seconds, got {}",
                self.time_step
            )));
        }
        if !(self.max_time > 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "max time must be positive, got {}",
                self.max_time
            )));
        }
        let (low, high) = self.initial_spin_range;
        if !(low <= high) || !low.is_finite() || !high.is_finite() {
            return Err(SimulationError::InitializationError(format!(
                "initial spin range is invalid: ({}, {})",
                low, high
            )));
        }
        self.world.validate()?;
        self.environment.validate()?;
        self.rocket.validate()?;
        self.autopilot.validate()?;
        if !(self.barge.width > 0.0) || !(self.barge.height >= 0.0) {
            return Err(SimulationError::InitializationError(
                "barge must have positive width and non-negative height".to_string(),
            ));
        }
        Ok(())
    }

    fn initial_spin(&self) -> f64 {
        let (low, high) = self.initial_spin_range;
        if low == high {
            return low;
        }
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        rng.gen_range(low..high)
    }

    /// Builds a ready-to-run simulation. Every booster in the run shares the
    /// same initial spin.
    pub fn build(&self, scenario: Scenario) -> Result<Simulation, SimulationError> {
        self.validate()?;

        let spin = self.initial_spin();
        let lanes = scenario
            .lanes()
            .into_iter()
            .map(|lane| {
                Lane::new(
                    Rocket::new(
                        &self.rocket,
                        lane.start_x,
                        spin,
                        lane.autonomous,
                        self.environment,
                    ),
                    Barge::from_spec(&self.barge, lane.barge_x),
                )
            })
            .collect();

        info!(%scenario, spin, time_step = self.time_step, "simulation initialised");
        Ok(Simulation::new(
            self.world,
            self.time_step,
            self.autopilot.clone(),
            lanes,
        ))
    }
}
