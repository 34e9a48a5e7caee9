pub mod constants;
pub mod control;
pub mod errors;
pub mod simulation;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::*;
pub use control::autopilot::Autopilot;
pub use control::barge::{Barge, BargeSpec};
pub use control::environment::Environment;
pub use control::pid::PIDController;
pub use control::pilot::{Hold, Keyframe, PilotAction, PilotCommand, PilotInput, ScriptedPilot};
pub use control::propulsion::RcsDirection;
pub use control::rocket::{BodyState, CrashReason, Outcome, Rocket, RocketSpec};

// Re-export the simulation driver and its configuration
pub use simulation::event::{EventKind, SimEvent};
pub use simulation::scenario::{Scenario, SimulationConfig};
pub use simulation::world::World;
pub use simulation::{Lane, RunSummary, Simulation};

pub use telemetry_system::telemetry::{outcome_message, Telemetry, VehicleTelemetry};

pub use trajectory_system::aerodynamics::Aerodynamics;

pub use utils::vector2d::Vector2D;
