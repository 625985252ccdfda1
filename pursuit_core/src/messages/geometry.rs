//! Spatial primitives: poses and 2D vectors

use crate::core::LogSummary;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Planar pose: position and heading
///
/// Pose updates are whole-value replacements; a `Pose2D` is never mutated in
/// place once observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    /// Heading in radians, (-pi, pi]
    pub theta: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    /// Position component as a vector
    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Euclidean distance between two poses' positions
    pub fn distance_to(&self, other: &Pose2D) -> f64 {
        (self.position() - other.position()).magnitude()
    }
}

impl Default for Pose2D {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

// Enable zero-copy serialization with bytemuck
unsafe impl bytemuck::Pod for Pose2D {}
unsafe impl bytemuck::Zeroable for Pose2D {}

impl LogSummary for Pose2D {
    fn log_summary(&self) -> String {
        format!("({:.3}, {:.3}, {:.3}rad)", self.x, self.y, self.theta)
    }
}

/// Displacement or direction in the plane
///
/// Derived value used by the pursuit geometry; never persisted or published.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along a heading angle
    pub fn from_angle(theta: f64) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    /// Euclidean norm
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle of the vector, `atan2(y, x)`, range (-pi, pi]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_pose_distance() {
        let a = Pose2D::new(0.0, 0.0, 0.0);
        let b = Pose2D::new(3.0, 4.0, 1.0);

        assert_relative_eq!(a.distance_to(&b), 5.0);
        assert_relative_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_vector_delta_and_magnitude() {
        let d = Vector2::new(4.0, 6.0) - Vector2::new(1.0, 2.0);

        assert_relative_eq!(d.x, 3.0);
        assert_relative_eq!(d.y, 4.0);
        assert_relative_eq!(d.magnitude(), 5.0);
    }

    #[test]
    fn test_vector_angle() {
        assert_relative_eq!(Vector2::new(1.0, 0.0).angle(), 0.0);
        assert_relative_eq!(Vector2::new(0.0, 1.0).angle(), FRAC_PI_2);
        assert_relative_eq!(Vector2::new(1.0, 1.0).angle(), FRAC_PI_4);
        assert_relative_eq!(Vector2::new(-1.0, 0.0).angle(), PI);
    }

    #[test]
    fn test_unit_vector_from_heading() {
        let v = Vector2::from_angle(FRAC_PI_2);

        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0);
        assert_relative_eq!(v.magnitude(), 1.0);
    }

    #[test]
    fn test_bytemuck_traits() {
        let pose = Pose2D::new(1.0, 2.0, 0.5);
        let _bytes: &[u8] = bytemuck::bytes_of(&pose);
    }
}
