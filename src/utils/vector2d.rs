use std::ops::{AddAssign, Mul};

use serde::{Deserialize, Serialize};

/// Planar vector in world coordinates. `y` grows downward, so a positive
/// `y` velocity means the body is falling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    pub fn zero() -> Self {
        Vector2D::new(0.0, 0.0)
    }

    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        assert_eq!(Vector2D::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Vector2D::zero().magnitude(), 0.0);
    }

    #[test]
    fn test_add_assign_scaled() {
        let mut position = Vector2D::new(400.0, 0.0);
        position += Vector2D::new(0.0, 100.0) * 0.04;
        assert_eq!(position, Vector2D::new(400.0, 4.0));
    }

    #[test]
    fn test_non_finite_detection() {
        assert!(Vector2D::new(1.0, -2.0).is_finite());
        assert!(!Vector2D::new(f64::NAN, 0.0).is_finite());
        assert!(!Vector2D::new(0.0, f64::INFINITY).is_finite());
    }
}
