pub mod collision;
pub mod event;
pub mod scenario;
pub mod world;

use tracing::{debug, info};

use crate::control::{
    autopilot::Autopilot,
    barge::Barge,
    pilot::PilotInput,
    rocket::{Outcome, Rocket},
};

use self::{
    collision::detect_collision,
    event::{engine_volume, EventKind, SimEvent},
    world::World,
};

/// A booster paired with the barge it is trying to land on.
pub struct Lane {
    pub rocket: Rocket,
    pub barge: Barge,
    engine_was_firing: bool,
}

impl Lane {
    pub fn new(rocket: Rocket, barge: Barge) -> Self {
        let engine_was_firing = rocket.get_body_state().has_plume();
        Lane {
            rocket,
            barge,
            engine_was_firing,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub elapsed: f64,
    pub ticks: u64,
    pub outcomes: Vec<Outcome>,
    pub quit: bool,
    pub events: Vec<SimEvent>,
}

/// Fixed-step driver. One call to [`Simulation::step`] advances every lane
/// by `time_step` seconds, in lane order.
pub struct Simulation {
    pub world: World,
    pub time_step: f64,
    pub autopilot: Autopilot,
    pub lanes: Vec<Lane>,
    elapsed: f64,
    ticks: u64,
}

impl Simulation {
    pub fn new(world: World, time_step: f64, autopilot: Autopilot, lanes: Vec<Lane>) -> Self {
        Simulation {
            world,
            time_step,
            autopilot,
            lanes,
            elapsed: 0.0,
            ticks: 0,
        }
    }

    pub fn get_elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn get_ticks(&self) -> u64 {
        self.ticks
    }

    /// Every booster has landed or crashed.
    pub fn is_settled(&self) -> bool {
        self.lanes.iter().all(|lane| lane.rocket.is_settled())
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.lanes
            .iter()
            .map(|lane| lane.rocket.get_outcome())
            .collect()
    }

    pub fn step(&mut self, input: &mut dyn PilotInput) -> Vec<SimEvent> {
        let now = self.elapsed + self.time_step;
        let mut events = Vec::new();

        for (index, lane) in self.lanes.iter_mut().enumerate() {
            if !lane.rocket.is_settled() {
                Self::advance_rocket(
                    index,
                    lane,
                    &self.autopilot,
                    &self.world,
                    self.time_step,
                    self.elapsed,
                    now,
                    input,
                    &mut events,
                );
            }
            lane.barge.update(self.time_step);
        }

        self.elapsed = now;
        self.ticks += 1;
        events
    }

    #[allow(clippy::too_many_arguments)]
    fn advance_rocket(
        index: usize,
        lane: &mut Lane,
        autopilot: &Autopilot,
        world: &World,
        time_step: f64,
        elapsed: f64,
        now: f64,
        input: &mut dyn PilotInput,
        events: &mut Vec<SimEvent>,
    ) {
        let rocket = &mut lane.rocket;
        let legs_before = rocket.legs_deployed();
        let burn_before = rocket.landing_burn_started();

        let thruster = if rocket.is_autonomous() {
            autopilot.fly(rocket, &lane.barge, world.height, world.water_line)
        } else {
            let command = input.command(index, rocket, elapsed);
            rocket.engine.set_throttle(command.throttle);
            if command.deploy_legs && rocket.deploy_legs() {
                info!(lane = index, "landing legs deployed");
            }
            command.rcs
        };

        if !burn_before && rocket.landing_burn_started() {
            events.push(SimEvent::new(index, now, EventKind::LandingBurnStarted));
        }
        if !legs_before && rocket.legs_deployed() {
            events.push(SimEvent::new(index, now, EventKind::LegsDeployed));
        }

        rocket.update(time_step, thruster);
        let outcome = detect_collision(rocket, &lane.barge, world, now);

        let firing = rocket.get_body_state().has_plume();
        if firing && !lane.engine_was_firing {
            let volume = engine_volume(rocket.engine.throttle);
            debug!(lane = index, volume, "engine ignition");
            events.push(SimEvent::new(index, now, EventKind::EngineIgnition { volume }));
        } else if !firing && lane.engine_was_firing {
            debug!(lane = index, "engine cutoff");
            events.push(SimEvent::new(index, now, EventKind::EngineCutoff));
        }
        lane.engine_was_firing = firing;

        if let Some(outcome) = outcome {
            events.push(SimEvent::new(index, now, EventKind::Settled(outcome)));
        }
    }

    /// Ticks until every booster is settled, `input` asks to quit, or
    /// `max_time` seconds of simulated time have passed.
    pub fn run(&mut self, input: &mut dyn PilotInput, max_time: f64) -> RunSummary {
        self.run_with(input, max_time, |_, _| {})
    }

    /// Like [`Simulation::run`], calling `observer` after every tick with
    /// the new state and the events that tick produced.
    pub fn run_with<F>(
        &mut self,
        input: &mut dyn PilotInput,
        max_time: f64,
        mut observer: F,
    ) -> RunSummary
    where
        F: FnMut(&Simulation, &[SimEvent]),
    {
        let mut events = Vec::new();
        let mut quit = false;

        while !self.is_settled() && self.elapsed < max_time {
            if input.quit_requested() {
                quit = true;
                break;
            }
            let tick_events = self.step(input);
            observer(&*self, tick_events.as_slice());
            events.extend(tick_events);
        }

        info!(
            elapsed = self.elapsed,
            ticks = self.ticks,
            quit,
            "simulation finished"
        );
        RunSummary {
            elapsed: self.elapsed,
            ticks: self.ticks,
            outcomes: self.outcomes(),
            quit,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{
        environment::Environment,
        pilot::{Hold, PilotCommand},
        propulsion::RcsDirection,
        rocket::{CrashReason, RocketSpec},
    };
    use crate::utils::vector2d::Vector2D;
    use approx::assert_relative_eq;

    struct Throttle(f64);

    impl PilotInput for Throttle {
        fn command(&mut self, _lane: usize, _rocket: &Rocket, _elapsed: f64) -> PilotCommand {
            PilotCommand {
                throttle: self.0,
                rcs: RcsDirection::Off,
                deploy_legs: true,
            }
        }
    }

    fn single_lane(autonomous: bool, barge_velocity: f64) -> Simulation {
        let rocket = Rocket::new(&RocketSpec::default(), 400.0, 0.0, autonomous, Environment::default());
        let barge = Barge::new(100.0, 5.0, 350.0, barge_velocity);
        Simulation::new(
            World::default(),
            0.04,
            Autopilot::default(),
            vec![Lane::new(rocket, barge)],
        )
    }

    #[test]
    fn test_step_advances_clock_and_barge() {
        let mut simulation = single_lane(false, 2.0);
        for _ in 0..25 {
            simulation.step(&mut Hold);
        }
        assert_eq!(simulation.get_ticks(), 25);
        assert_relative_eq!(simulation.get_elapsed(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(simulation.lanes[0].barge.position, 352.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pilot_command_reaches_rocket() {
        let mut simulation = single_lane(false, 0.0);
        let events = simulation.step(&mut Throttle(0.6));
        let rocket = &simulation.lanes[0].rocket;
        assert_eq!(rocket.engine.throttle, 0.6);
        assert!(rocket.legs_deployed());
        assert!(events.contains(&SimEvent::new(0, 0.04, EventKind::LegsDeployed)));
        assert!(events.contains(&SimEvent::new(
            0,
            0.04,
            EventKind::EngineIgnition { volume: 0.3 }
        )));
    }

    #[test]
    fn test_cutoff_event_when_throttle_drops() {
        let mut simulation = single_lane(false, 0.0);
        simulation.step(&mut Throttle(0.2));
        let events = simulation.step(&mut Throttle(0.0));
        assert!(events
            .iter()
            .any(|event| event.kind == EventKind::EngineCutoff));
    }

    #[test]
    fn test_settled_rocket_is_frozen_but_barge_moves() {
        let mut simulation = single_lane(false, 1.0);
        simulation.lanes[0]
            .rocket
            .settle(Outcome::Crashed(CrashReason::Ocean));
        let position = simulation.lanes[0].rocket.kinematics.position;

        simulation.step(&mut Throttle(1.0));

        assert_eq!(simulation.lanes[0].rocket.kinematics.position, position);
        assert_eq!(simulation.lanes[0].rocket.engine.throttle, 0.0);
        assert_relative_eq!(simulation.lanes[0].barge.position, 350.04, epsilon = 1e-9);
    }

    #[test]
    fn test_free_fall_with_stowed_legs_crashes() {
        let mut simulation = single_lane(false, 0.0);
        let summary = simulation.run(&mut Hold, 60.0);
        assert!(!summary.quit);
        // Far too fast for the deck, but stowed legs take precedence.
        assert_eq!(
            summary.outcomes,
            vec![Outcome::Crashed(CrashReason::LegsNotDeployed)]
        );
        assert!(summary
            .events
            .iter()
            .any(|event| matches!(event.kind, EventKind::Settled(_))));
    }

    #[test]
    fn test_touchdown_cuts_the_engine() {
        let mut simulation = single_lane(false, 0.0);
        simulation.lanes[0].rocket.kinematics.position = Vector2D::new(400.0, 861.0);
        simulation.lanes[0].rocket.kinematics.velocity = Vector2D::new(0.0, 5.0);

        let summary = simulation.run(&mut Throttle(0.1), 2.0);

        assert!(matches!(summary.outcomes[0], Outcome::Landed { .. }));
        let kinds: Vec<&EventKind> = summary.events.iter().map(|event| &event.kind).collect();
        assert!(matches!(kinds[0], EventKind::LegsDeployed));
        assert!(matches!(kinds[1], EventKind::EngineIgnition { .. }));
        assert_eq!(kinds[kinds.len() - 2], &EventKind::EngineCutoff);
        assert!(matches!(kinds[kinds.len() - 1], EventKind::Settled(_)));

        let rocket = &simulation.lanes[0].rocket;
        assert_eq!(rocket.engine.throttle, 0.1);
        assert!(!rocket.get_body_state().has_plume());
    }

    #[test]
    fn test_run_stops_at_max_time() {
        let mut simulation = single_lane(false, 0.0);
        simulation.lanes[0].rocket.kinematics.position = Vector2D::new(400.0, 10.0);
        simulation.lanes[0].rocket.kinematics.velocity = Vector2D::zero();
        let summary = simulation.run(&mut Throttle(0.0), 0.2);
        assert!(summary.elapsed >= 0.2);
        assert_eq!(summary.outcomes, vec![Outcome::Flying]);
    }

    #[test]
    fn test_observer_sees_every_tick() {
        let mut simulation = single_lane(false, 0.0);
        let mut ticks = Vec::new();
        let mut settled_events = 0;

        let summary = simulation.run_with(&mut Hold, 60.0, |simulation, events| {
            ticks.push(simulation.get_ticks());
            settled_events += events
                .iter()
                .filter(|event| matches!(event.kind, EventKind::Settled(_)))
                .count();
        });

        assert_eq!(ticks.len() as u64, summary.ticks);
        assert_eq!(ticks.first(), Some(&1));
        assert_eq!(ticks.last(), Some(&summary.ticks));
        assert_eq!(settled_events, 1);
    }

    #[test]
    fn test_autonomous_lane_ignores_pilot_input() {
        let mut simulation = single_lane(true, 0.0);
        simulation.step(&mut Throttle(1.0));
        let rocket = &simulation.lanes[0].rocket;
        assert_eq!(rocket.engine.throttle, 0.0);
        assert!(!rocket.legs_deployed());
    }
}
