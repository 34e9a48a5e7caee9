use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{constants::THROTTLE_TRIM_STEP, errors::SimulationError};

use super::{propulsion::RcsDirection, rocket::Rocket};

/// What a user-controlled booster receives each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PilotCommand {
    pub throttle: f64,
    pub rcs: RcsDirection,
    pub deploy_legs: bool,
}

impl PilotCommand {
    /// Keep the current throttle, no thrusters, legs untouched.
    pub fn hold(throttle: f64) -> Self {
        PilotCommand {
            throttle,
            rcs: RcsDirection::Off,
            deploy_legs: false,
        }
    }

    /// Resolves the held controls into a command. Only the action with the
    /// highest precedence counts for the tick.
    pub fn from_actions(current_throttle: f64, actions: &[PilotAction]) -> Self {
        match actions.iter().min() {
            Some(action) => action.apply(current_throttle),
            None => PilotCommand::hold(current_throttle),
        }
    }
}

/// Pilot controls, declared in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PilotAction {
    FullThrottle,
    CutThrottle,
    TrimDown,
    TrimUp,
    RcsLeft,
    RcsRight,
    DeployLegs,
}

impl PilotAction {
    pub fn apply(self, current_throttle: f64) -> PilotCommand {
        let mut command = PilotCommand::hold(current_throttle);
        match self {
            PilotAction::FullThrottle => command.throttle = 1.0,
            PilotAction::CutThrottle => command.throttle = 0.0,
            PilotAction::TrimDown => {
                command.throttle = (current_throttle - THROTTLE_TRIM_STEP).max(0.0)
            }
            PilotAction::TrimUp => {
                command.throttle = (current_throttle + THROTTLE_TRIM_STEP).min(1.0)
            }
            PilotAction::RcsLeft => command.rcs = RcsDirection::Left,
            PilotAction::RcsRight => command.rcs = RcsDirection::Right,
            PilotAction::DeployLegs => command.deploy_legs = true,
        }
        command
    }
}

/// Source of commands for user-controlled lanes.
pub trait PilotInput {
    fn command(&mut self, lane: usize, rocket: &Rocket, elapsed: f64) -> PilotCommand;

    /// Checked once per tick by the run loop.
    fn quit_requested(&self) -> bool {
        false
    }
}

/// No hands on the controls.
pub struct Hold;

impl PilotInput for Hold {
    fn command(&mut self, _lane: usize, rocket: &Rocket, _elapsed: f64) -> PilotCommand {
        PilotCommand::hold(rocket.engine.throttle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub start: f64,
    pub end: f64,
    pub actions: Vec<PilotAction>,
}

/// Replays held controls from a time-keyed script. Applies to every
/// user-controlled lane.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptedPilot {
    pub keyframes: Vec<Keyframe>,
    #[serde(default)]
    pub quit_after: Option<f64>,
    #[serde(skip)]
    last_elapsed: f64,
}

impl ScriptedPilot {
    pub fn new(keyframes: Vec<Keyframe>) -> Self {
        ScriptedPilot {
            keyframes,
            quit_after: None,
            last_elapsed: 0.0,
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let text = fs::read_to_string(path)?;
        let pilot: ScriptedPilot = serde_json::from_str(&text)?;
        for keyframe in &pilot.keyframes {
            if !(keyframe.start <= keyframe.end) {
                return Err(SimulationError::InitializationError(format!(
                    "keyframe ends before it starts: {} > {}",
                    keyframe.start, keyframe.end
                )));
            }
        }
        Ok(pilot)
    }

    fn held_actions(&self, elapsed: f64) -> Vec<PilotAction> {
        self.keyframes
            .iter()
            .filter(|keyframe| keyframe.start <= elapsed && elapsed < keyframe.end)
            .flat_map(|keyframe| keyframe.actions.iter().copied())
            .collect()
    }
}

impl PilotInput for ScriptedPilot {
    fn command(&mut self, _lane: usize, rocket: &Rocket, elapsed: f64) -> PilotCommand {
        self.last_elapsed = elapsed;
        PilotCommand::from_actions(rocket.engine.throttle, &self.held_actions(elapsed))
    }

    fn quit_requested(&self) -> bool {
        self.quit_after
            .is_some_and(|limit| self.last_elapsed >= limit)
    }
}
