// Physical Constants
pub const GRAVITY: f64 = 9.81; // m/s²
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³
pub const DRAG_COEFFICIENT: f64 = 0.8;
pub const RESTITUTION: f64 = 0.1;

// Booster Constants (Falcon 9 first stage, landing configuration)
pub const BOOSTER_RADIUS: f64 = 1.85; // m
pub const BOOSTER_HEIGHT: f64 = 44.0; // m
pub const BOOSTER_DRY_MASS: f64 = 27_200.0; // kg
pub const BOOSTER_FUEL_MASS: f64 = 1_900.0; // kg
pub const BOOSTER_NITROGEN_MASS: f64 = 500.0; // kg
pub const MAIN_ENGINE_THRUST: f64 = 845_000.0; // N
pub const MAIN_ENGINE_ISP: f64 = 296.5; // s
pub const COLD_GAS_THRUST: f64 = 25_000.0; // N
pub const COLD_GAS_ISP: f64 = 60.0; // s
pub const COLD_GAS_ARM: f64 = 24.0; // m, RCS nozzle to centre of mass
pub const BOOSTER_FOOTPRINT_WIDTH: f64 = 20.0;
pub const BOOSTER_FOOTPRINT_HEIGHT: f64 = 40.0;
pub const INITIAL_DESCENT_RATE: f64 = 100.0; // m/s, downward
pub const INITIAL_SPIN_RANGE: (f64, f64) = (-2.0, 2.0); // rad/s

// Barge Constants
pub const BARGE_WIDTH: f64 = 100.0;
pub const BARGE_HEIGHT: f64 = 5.0;

// World Constants
pub const WORLD_WIDTH: f64 = 1600.0;
pub const WORLD_HEIGHT: f64 = 900.0;
pub const WATER_LINE_FRACTION: f64 = 0.015;

// Autopilot Constants
pub const LANDING_KP: f64 = 0.0045;
pub const LANDING_KI: f64 = 0.00095;
pub const LANDING_KD: f64 = 0.037;
pub const THROTTLE_LIMITS: (f64, f64) = (0.0, 1.0);
pub const LEG_DEPLOY_MARGIN: f64 = 100.0; // world units above the barge deck

// Touchdown limits
pub const MAX_TOUCHDOWN_SPEED: f64 = 15.0; // m/s, per axis

// Pilot input
pub const THROTTLE_TRIM_STEP: f64 = 0.01;

// Engine audio
pub const ENGINE_FULL_VOLUME: f64 = 0.3;

// Simulation Parameters
pub const TIME_STEP: f64 = 0.04; // s
pub const MAX_SIMULATION_TIME: f64 = 600.0; // s
