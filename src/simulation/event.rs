use serde::Serialize;

use crate::{
    constants::ENGINE_FULL_VOLUME,
    control::rocket::Outcome,
};

/// Discrete happenings reported to the audio and HUD collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EventKind {
    EngineIgnition { volume: f64 },
    EngineCutoff,
    LandingBurnStarted,
    LegsDeployed,
    Settled(Outcome),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimEvent {
    pub lane: usize,
    pub time: f64,
    pub kind: EventKind,
}

impl SimEvent {
    pub fn new(lane: usize, time: f64, kind: EventKind) -> Self {
        SimEvent { lane, time, kind }
    }
}

/// Engine sound level for a throttle setting: full volume above 0.3,
/// proportional below.
pub fn engine_volume(throttle: f64) -> f64 {
    if throttle > ENGINE_FULL_VOLUME {
        ENGINE_FULL_VOLUME
    } else {
        throttle.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_volume() {
        assert_eq!(engine_volume(1.0), 0.3);
        assert_eq!(engine_volume(0.31), 0.3);
        assert_eq!(engine_volume(0.3), 0.3);
        assert_eq!(engine_volume(0.12), 0.12);
        assert_eq!(engine_volume(0.0), 0.0);
    }
}
