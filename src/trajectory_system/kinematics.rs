use serde::Serialize;

use crate::utils::vector2d::Vector2D;

/// Translational and rotational state of a body.
///
/// Screen-style axes: `x` to the right, `y` downward (0 is the top of the
/// world). Orientation is kept in radians, counter-clockwise positive with
/// 0 meaning upright; the angular rate is in rad/s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kinematics {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub orientation: f64,
    pub angular_velocity: f64,
}

impl Kinematics {
    pub fn new(position: Vector2D, velocity: Vector2D, angular_velocity: f64) -> Self {
        Kinematics {
            position,
            velocity,
            orientation: 0.0,
            angular_velocity,
        }
    }

    /// Velocity change from an engine pushing along the body axis.
    /// Upright thrust reduces the downward velocity; a positive tilt pushes
    /// towards negative `x`.
    pub fn apply_thrust(&mut self, acceleration: f64, delta_time: f64) {
        let (sin, cos) = self.orientation.sin_cos();
        self.velocity.x -= acceleration * sin * delta_time;
        self.velocity.y -= acceleration * cos * delta_time;
    }

    pub fn apply_gravity(&mut self, gravity: f64, delta_time: f64) {
        self.velocity.y += gravity * delta_time;
    }

    pub fn apply_angular_impulse(&mut self, delta_omega: f64) {
        self.angular_velocity += delta_omega;
    }

    pub fn integrate_orientation(&mut self, delta_time: f64) {
        self.orientation += self.angular_velocity * delta_time;
    }

    /// Semi-implicit Euler: uses the velocity already advanced this tick.
    pub fn integrate_position(&mut self, delta_time: f64) {
        self.position += self.velocity * delta_time;
    }

    pub fn get_speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn get_orientation_degrees(&self) -> f64 {
        self.orientation.to_degrees()
    }

    /// Height above the bottom edge of a world `world_height` tall.
    pub fn get_altitude(&self, world_height: f64) -> f64 {
        world_height - self.position.y
    }
}
