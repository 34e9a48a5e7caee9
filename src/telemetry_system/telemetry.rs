use std::{fs, path::Path};

use serde::Serialize;

use crate::{
    control::rocket::{BodyState, Outcome, Rocket},
    errors::SimulationError,
    simulation::{
        event::{EventKind, SimEvent},
        Simulation,
    },
    utils::vector2d::Vector2D,
};

/// What the HUD shows for one booster at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleTelemetry {
    pub lane: usize,
    pub time: f64,
    pub position: Vector2D,
    pub orientation: f64,
    pub body_state: BodyState,
    pub velocity: Vector2D,
    pub angular_velocity: f64,
    pub fuel: f64,
    pub nitrogen: f64,
    pub altitude: f64,
    pub throttle: f64,
    pub outcome: Outcome,
}

impl VehicleTelemetry {
    pub fn capture(lane: usize, time: f64, rocket: &Rocket, world_height: f64) -> Self {
        VehicleTelemetry {
            lane,
            time,
            position: rocket.kinematics.position,
            orientation: rocket.kinematics.get_orientation_degrees(),
            body_state: rocket.get_body_state(),
            velocity: rocket.kinematics.velocity,
            angular_velocity: rocket.kinematics.angular_velocity,
            fuel: rocket.engine.fuel_mass,
            nitrogen: rocket.rcs.nitrogen_mass,
            altitude: rocket.get_altitude(world_height),
            throttle: rocket.engine.throttle,
            outcome: rocket.get_outcome(),
        }
    }

    pub fn hud_lines(&self) -> Vec<String> {
        vec![
            format!("Vx: {:.0}, Vy: {:.0}", self.velocity.x, self.velocity.y),
            format!("Omega: {:.2}", self.angular_velocity),
            format!("Fuel: {:.0}", self.fuel),
            format!("Cold gas: {:.0}", self.nitrogen),
            format!("Altitude: {:.0}", self.altitude),
            format!("Throttle: {:.2}", self.throttle),
        ]
    }
}

/// End-of-run banner for a lane, `None` while still flying.
pub fn outcome_message(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Flying => None,
        Outcome::Landed { time_to_land } => Some(format!("Time taken: {:.2}", time_to_land)),
        Outcome::Crashed(reason) => Some(format!("{}!", reason)),
    }
}

#[derive(Serialize)]
struct TelemetryExport<'a> {
    frames: &'a [VehicleTelemetry],
    events: &'a [SimEvent],
    outcomes: &'a [(usize, Outcome, f64)],
}

pub struct Telemetry {
    pub frames: Vec<VehicleTelemetry>,
    pub events: Vec<SimEvent>,
    max_speed: f64,
    min_altitude: f64,
    outcome_times: Vec<(usize, Outcome, f64)>,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            frames: Vec::new(),
            events: Vec::new(),
            max_speed: 0.0,
            min_altitude: f64::MAX,
            outcome_times: Vec::new(),
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_altitude(altitude: f64) -> String {
        if altitude >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    /// Snapshots every lane at the simulation's current time.
    pub fn collect(&mut self, simulation: &Simulation) {
        let time = simulation.get_elapsed();
        for (lane, entry) in simulation.lanes.iter().enumerate() {
            let frame =
                VehicleTelemetry::capture(lane, time, &entry.rocket, simulation.world.height);
            self.max_speed = self.max_speed.max(entry.rocket.get_speed());
            self.min_altitude = self.min_altitude.min(frame.altitude);
            self.frames.push(frame);
        }
    }

    pub fn record_events(&mut self, events: &[SimEvent]) {
        for event in events {
            if let EventKind::Settled(outcome) = event.kind {
                self.outcome_times.push((event.lane, outcome, event.time));
            }
        }
        self.events.extend_from_slice(events);
    }

    pub fn get_max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn get_min_altitude(&self) -> f64 {
        self.min_altitude
    }

    pub fn get_outcome_times(&self) -> &[(usize, Outcome, f64)] {
        &self.outcome_times
    }

    /// Most recent snapshot of `lane`.
    pub fn latest(&self, lane: usize) -> Option<&VehicleTelemetry> {
        self.frames.iter().rev().find(|frame| frame.lane == lane)
    }

    pub fn display_data(&self) {
        println!("\n--- Simulation Summary ---");
        println!("Frames recorded: {}", self.frames.len());
        println!("Max Speed: {:.2} m/s", self.max_speed);
        if !self.frames.is_empty() {
            println!("Min Altitude: {}", Self::format_altitude(self.min_altitude));
        }

        let lanes = self.frames.iter().map(|frame| frame.lane).max();
        for lane in 0..lanes.map_or(0, |last| last + 1) {
            if let Some(frame) = self.latest(lane) {
                println!("\n--- Lane {} ---", lane);
                for line in frame.hud_lines() {
                    println!("{}", line);
                }
            }
        }

        println!("\n--- Outcomes ---");
        for (lane, outcome, time) in &self.outcome_times {
            if let Some(message) = outcome_message(outcome) {
                println!(
                    "Lane {}: {} (at {})",
                    lane,
                    message,
                    Self::format_time(*time)
                );
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        let export = TelemetryExport {
            frames: &self.frames,
            events: &self.events,
            outcomes: &self.outcome_times,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SimulationError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
