use std::f64::consts::PI;

use crate::control::environment::Environment;

use super::kinematics::Kinematics;

/// Drag model for a spinning cylinder falling tail-first.
#[derive(Debug, Clone, Copy)]
pub struct Aerodynamics {
    pub drag_coefficient: f64,
    pub air_density: f64,
}

impl Aerodynamics {
    pub fn new(drag_coefficient: f64, air_density: f64) -> Self {
        Aerodynamics {
            drag_coefficient,
            air_density,
        }
    }

    pub fn from_environment(environment: &Environment) -> Self {
        Aerodynamics::new(environment.drag_coefficient, environment.air_density)
    }

    /// Moment resisting rotation: `(1/12)·Cd·ρ·π·ω²·r·(h/2)⁴`.
    pub fn calculate_damping_torque(&self, angular_velocity: f64, radius: f64, height: f64) -> f64 {
        (1.0 / 12.0)
            * self.drag_coefficient
            * self.air_density
            * PI
            * angular_velocity.powi(2)
            * radius
            * (height / 2.0).powi(4)
    }

    /// Axial drag magnitude: `½·Cd·ρ·v²·πr²`.
    pub fn calculate_drag(&self, speed: f64, radius: f64) -> f64 {
        0.5 * self.drag_coefficient * self.air_density * speed.powi(2) * (PI * radius.powi(2))
    }

    /// Angular-rate reduction for one tick.
    ///
    /// The angular rate is stored in rad/s but the damping term is scaled by
    /// 180/π before it is subtracted; this conversion point is kept as is so
    /// the decay matches the degree-based model numerically.
    pub fn calculate_spin_decay(
        &self,
        angular_velocity: f64,
        radius: f64,
        height: f64,
        moment_of_inertia: f64,
        delta_time: f64,
    ) -> f64 {
        let torque = self.calculate_damping_torque(angular_velocity, radius, height);
        ((torque / moment_of_inertia) * delta_time).to_degrees()
    }

    /// Applies both drag effects to `kinematics`.
    ///
    /// Spin damping always moves ω toward zero and stops at zero instead of
    /// reversing the rotation. Translational drag only acts on `vy`.
    pub fn apply(
        &self,
        kinematics: &mut Kinematics,
        radius: f64,
        height: f64,
        mass: f64,
        moment_of_inertia: f64,
        delta_time: f64,
    ) {
        let omega = kinematics.angular_velocity;
        let decay = self.calculate_spin_decay(omega, radius, height, moment_of_inertia, delta_time);
        kinematics.angular_velocity = if decay >= omega.abs() {
            0.0
        } else if omega < 0.0 {
            omega + decay
        } else {
            omega - decay
        };

        let drag = self.calculate_drag(kinematics.get_speed(), radius);
        kinematics.velocity.y -= (drag / mass) * delta_time;
    }
}
