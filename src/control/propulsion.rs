use serde::{Deserialize, Serialize};

/// Which cold-gas thruster fires during the current tick. Never persisted
/// between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RcsDirection {
    #[default]
    Off,
    /// Clockwise torque, decreases ω.
    Left,
    /// Counter-clockwise torque, increases ω.
    Right,
}

impl RcsDirection {
    /// Sign applied to the angular-rate change.
    pub fn sign(self) -> f64 {
        match self {
            RcsDirection::Off => 0.0,
            RcsDirection::Left => -1.0,
            RcsDirection::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainEngine {
    pub rated_thrust: f64,
    pub specific_impulse: f64,
    pub throttle: f64,
    pub fuel_mass: f64,
}

impl MainEngine {
    pub fn new(rated_thrust: f64, specific_impulse: f64, fuel_mass: f64) -> Self {
        MainEngine {
            rated_thrust,
            specific_impulse,
            throttle: 0.0,
            fuel_mass,
        }
    }

    pub fn set_throttle(&mut self, throttle: f64) {
        self.throttle = throttle.clamp(0.0, 1.0);
    }

    /// Propellant consumed per second at the current throttle, `T·τ / (Isp·g)`.
    pub fn mass_flow(&self, gravity: f64) -> f64 {
        (self.rated_thrust * self.throttle) / (self.specific_impulse * gravity)
    }

    pub fn get_thrust(&self) -> f64 {
        self.rated_thrust * self.throttle
    }

    pub fn is_out_of_fuel(&self) -> bool {
        self.fuel_mass <= 0.0
    }

    /// Plume visible: producing thrust and something left to burn.
    pub fn is_firing(&self) -> bool {
        self.get_thrust() > 0.0 && !self.is_out_of_fuel()
    }

    /// Burns propellant for `delta_time` seconds. The tank never goes negative.
    pub fn consume_fuel(&mut self, gravity: f64, delta_time: f64) {
        let burnt = self.mass_flow(gravity) * delta_time;
        self.fuel_mass = (self.fuel_mass - burnt).max(0.0);
    }

    /// Permanently removes main-engine authority (used at touchdown). The
    /// commanded throttle is left as it was.
    pub fn shut_down(&mut self) {
        self.rated_thrust = 0.0;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColdGasThrusters {
    pub rated_thrust: f64,
    pub mass_flow: f64,
    pub arm: f64,
    pub nitrogen_mass: f64,
}

impl ColdGasThrusters {
    pub fn new(
        rated_thrust: f64,
        specific_impulse: f64,
        arm: f64,
        nitrogen_mass: f64,
        gravity: f64,
    ) -> Self {
        ColdGasThrusters {
            rated_thrust,
            mass_flow: rated_thrust / (specific_impulse * gravity),
            arm,
            nitrogen_mass,
        }
    }

    pub fn torque(&self) -> f64 {
        self.rated_thrust * self.arm
    }

    pub fn is_empty(&self) -> bool {
        self.nitrogen_mass <= 0.0
    }

    pub fn vent(&mut self, delta_time: f64) {
        self.nitrogen_mass = (self.nitrogen_mass - self.mass_flow * delta_time).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_main_engine() {
        let engine = MainEngine::new(845_000.0, 296.5, 1_900.0);
        assert_eq!(engine.throttle, 0.0);
        assert_eq!(engine.fuel_mass, 1_900.0);
        assert!(!engine.is_firing());
    }

    #[test]
    fn test_mass_flow_scales_with_throttle() {
        let mut engine = MainEngine::new(845_000.0, 296.5, 1_900.0);
        engine.set_throttle(1.0);
        let full = engine.mass_flow(9.81);
        assert_relative_eq!(full, 845_000.0 / (296.5 * 9.81), epsilon = 1e-9);

        engine.set_throttle(0.5);
        assert_relative_eq!(engine.mass_flow(9.81), full / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_set_throttle_clamps() {
        let mut engine = MainEngine::new(1.0, 1.0, 1.0);
        engine.set_throttle(1.7);
        assert_eq!(engine.throttle, 1.0);
        engine.set_throttle(-0.2);
        assert_eq!(engine.throttle, 0.0);
    }

    #[test]
    fn test_consume_fuel_floors_at_zero() {
        let mut engine = MainEngine::new(845_000.0, 296.5, 5.0);
        engine.set_throttle(1.0);
        engine.consume_fuel(9.81, 1.0);
        assert_eq!(engine.fuel_mass, 0.0);
        assert!(engine.is_out_of_fuel());
        assert!(!engine.is_firing());
    }

    #[test]
    fn test_shut_down_removes_thrust() {
        let mut engine = MainEngine::new(845_000.0, 296.5, 1_900.0);
        engine.set_throttle(1.0);
        engine.shut_down();
        assert_eq!(engine.get_thrust(), 0.0);
        assert_eq!(engine.mass_flow(9.81), 0.0);
        assert_eq!(engine.throttle, 1.0);
        assert!(!engine.is_firing());
    }

    #[test]
    fn test_cold_gas_mass_flow_and_torque() {
        let rcs = ColdGasThrusters::new(25_000.0, 60.0, 24.0, 500.0, 9.81);
        assert_relative_eq!(rcs.mass_flow, 25_000.0 / (60.0 * 9.81), epsilon = 1e-9);
        assert_eq!(rcs.torque(), 600_000.0);
    }

    #[test]
    fn test_vent_floors_at_zero() {
        let mut rcs = ColdGasThrusters::new(25_000.0, 60.0, 24.0, 1.0, 9.81);
        rcs.vent(1.0);
        assert_eq!(rcs.nitrogen_mass, 0.0);
        assert!(rcs.is_empty());
        rcs.vent(1.0);
        assert_eq!(rcs.nitrogen_mass, 0.0);
    }

    #[test]
    fn test_rcs_direction_sign() {
        assert_eq!(RcsDirection::Left.sign(), -1.0);
        assert_eq!(RcsDirection::Right.sign(), 1.0);
        assert_eq!(RcsDirection::Off.sign(), 0.0);
        assert_eq!(RcsDirection::default(), RcsDirection::Off);
    }
}
