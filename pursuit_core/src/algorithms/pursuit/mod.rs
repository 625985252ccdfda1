//! Pose Pursuit Control Law
//!
//! Geometric controller that steers a unicycle-model agent toward a target
//! pose along a smooth arc instead of rotating in place first.
//!
//! # Features
//!
//! - Stateless: each command depends only on the two current poses
//! - Arc-turn steering tangent to the current heading
//! - Straight-line special case when the target sits on the heading ray
//! - In-place pivot sentinel when the target is almost directly behind
//! - Configurable speed gain and cap
//!
//! # Example
//!
//! ```rust
//! use pursuit_core::algorithms::pursuit::PursuitLaw;
//! use pursuit_core::messages::Pose2D;
//!
//! let law = PursuitLaw::new(2.0, 4.0).unwrap();
//!
//! let follower = Pose2D::new(0.0, 0.0, 0.0);
//! let target = Pose2D::new(1.0, 1.0, 0.0);
//!
//! let cmd = law.command(&target, &follower);
//! assert!(cmd.angular > 0.0); // target is to the left
//! ```

use crate::error::{PursuitError, PursuitResult};
use crate::messages::{Pose2D, Vector2};
use std::f64::consts::{FRAC_PI_2, PI};

/// Separation below which the target counts as reached
pub const ARRIVAL_DISTANCE: f64 = 0.1;

/// Tolerance of the heading-ray collinearity test, in length units
pub const RAY_TOLERANCE: f64 = 0.1;

/// Turn angle beyond which the arc radius is ill-conditioned and an in-place
/// pivot is substituted
const FORCED_PIVOT_THRESHOLD: f64 = 0.9 * PI;

/// Signed shortest angular difference `a1 - a2`, wrapped into (-pi, pi]
///
/// When the raw difference spans more than half a turn, 2*pi is added to the
/// smaller operand first so the result takes the short way across the
/// discontinuity at +-pi.
pub fn shortest_angle_diff(a1: f64, a2: f64) -> f64 {
    let (mut a1, mut a2) = (a1, a2);
    if (a1 - a2).abs() >= PI {
        if a1 < a2 {
            a1 += 2.0 * PI;
        } else {
            a2 += 2.0 * PI;
        }
    }
    a1 - a2
}

/// True if `point` lies (approximately) on the ray from `origin` along the
/// unit vector `direction`
///
/// Predicts the point reached by travelling `|point - origin|` along the ray
/// and accepts if the prediction lands within [`RAY_TOLERANCE`] of `point`.
pub fn lies_on_ray(origin: Vector2, point: Vector2, direction: Vector2) -> bool {
    let span = (point - origin).magnitude();
    let predicted = origin + direction.scale(span);
    (predicted - point).magnitude() < RAY_TOLERANCE
}

/// Which branch of the law produced a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuitMode {
    /// Within arrival distance of the target; hold still
    Stopped,
    /// Target sits on the heading ray; drive straight, no turning
    StraightLine,
    /// General case: follow the arc tangent to the current heading
    ArcTurn,
    /// Target almost directly behind; spin in place instead of arcing
    ForcedPivot,
}

/// Output of one evaluation of the pursuit law
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitCommand {
    pub mode: PursuitMode,
    /// Signed forward/backward speed
    pub linear: f64,
    /// Signed yaw rate
    pub angular: f64,
}

impl PursuitCommand {
    fn stopped() -> Self {
        Self {
            mode: PursuitMode::Stopped,
            linear: 0.0,
            angular: 0.0,
        }
    }
}

/// Stateless pursuit controller
///
/// Maps (target pose, follower pose) to a velocity command. Holds only the
/// tuning parameters; there is no memory between calls and no persisted mode.
pub struct PursuitLaw {
    velocity_scale: f64,
    velocity_max: f64,
}

impl PursuitLaw {
    /// Create a pursuit law, rejecting non-positive tuning values
    pub fn new(velocity_scale: f64, velocity_max: f64) -> PursuitResult<Self> {
        if velocity_scale <= 0.0 {
            return Err(PursuitError::config(format!(
                "velocity_scale must be positive, got {velocity_scale}"
            )));
        }
        if velocity_max <= 0.0 {
            return Err(PursuitError::config(format!(
                "velocity_max must be positive, got {velocity_max}"
            )));
        }
        Ok(Self {
            velocity_scale,
            velocity_max,
        })
    }

    pub fn velocity_scale(&self) -> f64 {
        self.velocity_scale
    }

    pub fn velocity_max(&self) -> f64 {
        self.velocity_max
    }

    /// Compute the command for the next control tick
    ///
    /// The target's heading is ignored; only its position matters. Never
    /// fails: degenerate geometry is absorbed by the straight-line and
    /// forced-pivot branches, and `|linear|` never exceeds `velocity_max`.
    pub fn command(&self, target: &Pose2D, follower: &Pose2D) -> PursuitCommand {
        let displacement = target.position() - follower.position();
        let separation = displacement.magnitude();

        if separation < ARRIVAL_DISTANCE {
            return PursuitCommand::stopped();
        }

        let heading = Vector2::from_angle(follower.theta);
        if lies_on_ray(follower.position(), target.position(), heading) {
            return PursuitCommand {
                mode: PursuitMode::StraightLine,
                linear: (self.velocity_scale * separation).min(self.velocity_max),
                angular: 0.0,
            };
        }

        let alpha_signed = shortest_angle_diff(follower.theta, displacement.angle());
        let turn_sign = alpha_signed.signum();
        let alpha = alpha_signed.abs();

        if alpha > FORCED_PIVOT_THRESHOLD {
            // Sentinel, not a physical arc: the radius formula blows up when
            // the target is behind the agent.
            return PursuitCommand {
                mode: PursuitMode::ForcedPivot,
                linear: 0.0,
                angular: PI,
            };
        }

        let arc_length = 2.0 * alpha;
        // The chord subtends the far side of the arc once the turn exceeds a
        // quarter rotation.
        let subtended = if alpha > FRAC_PI_2 { PI - alpha } else { alpha };
        let radius = -turn_sign * separation / (2.0 * subtended.sin());
        let travel = arc_length * radius.abs();
        let linear = (self.velocity_scale * travel).min(self.velocity_max);

        PursuitCommand {
            mode: PursuitMode::ArcTurn,
            linear,
            angular: linear / radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn law() -> PursuitLaw {
        PursuitLaw::new(2.0, 4.0).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_tuning() {
        assert!(PursuitLaw::new(0.0, 4.0).is_err());
        assert!(PursuitLaw::new(-1.0, 4.0).is_err());
        assert!(PursuitLaw::new(2.0, 0.0).is_err());
        assert!(PursuitLaw::new(2.0, -4.0).is_err());
    }

    #[test]
    fn test_arrival_stops() {
        let follower = Pose2D::new(5.0, 5.0, 1.3);
        let target = Pose2D::new(5.05, 5.05, 0.0);

        let cmd = law().command(&target, &follower);

        assert_eq!(cmd.mode, PursuitMode::Stopped);
        assert_relative_eq!(cmd.linear, 0.0);
        assert_relative_eq!(cmd.angular, 0.0);
    }

    #[test]
    fn test_straight_ahead() {
        let follower = Pose2D::new(0.0, 0.0, 0.0);
        let target = Pose2D::new(2.0, 0.0, 1.0); // target heading is irrelevant

        let cmd = law().command(&target, &follower);

        assert_eq!(cmd.mode, PursuitMode::StraightLine);
        // min(2.0 * 2.0, 4.0) = 4.0, capped
        assert_relative_eq!(cmd.linear, 4.0);
        assert_relative_eq!(cmd.angular, 0.0);
    }

    #[test]
    fn test_straight_behind_is_not_straight() {
        // The ray test only looks forward along the heading; a target dead
        // astern must not take the straight branch.
        let follower = Pose2D::new(0.0, 0.0, 0.0);
        let target = Pose2D::new(-1.0, 0.0, 0.0);

        let cmd = law().command(&target, &follower);

        assert_eq!(cmd.mode, PursuitMode::ForcedPivot);
    }

    #[test]
    fn test_angle_wraparound_takes_short_way() {
        let diff = shortest_angle_diff(PI * 0.99, -PI * 0.99);

        // Short way across the discontinuity: magnitude 0.02*pi, rotating
        // clockwise (negative), never ~1.98*pi.
        assert_relative_eq!(diff.abs(), 0.02 * PI, epsilon = 1e-9);
        assert!(diff < 0.0);
    }

    #[test]
    fn test_angle_diff_plain_cases() {
        assert_relative_eq!(shortest_angle_diff(0.5, 0.2), 0.3);
        assert_relative_eq!(shortest_angle_diff(0.2, 0.5), -0.3);
        assert_relative_eq!(shortest_angle_diff(1.0, 1.0), 0.0);
    }

    #[test]
    fn test_lies_on_ray() {
        let origin = Vector2::new(0.0, 0.0);
        let ahead = Vector2::new(3.0, 0.0);
        let offset = Vector2::new(3.0, 0.5);
        let behind = Vector2::new(-3.0, 0.0);
        let dir = Vector2::from_angle(0.0);

        assert!(lies_on_ray(origin, ahead, dir));
        assert!(!lies_on_ray(origin, offset, dir));
        assert!(!lies_on_ray(origin, behind, dir));
    }

    #[test]
    fn test_forced_pivot_when_target_behind() {
        let follower = Pose2D::new(0.0, 0.0, 0.0);
        let target = Pose2D::new(-1.0, 0.01, 0.0);

        let cmd = law().command(&target, &follower);

        assert_eq!(cmd.mode, PursuitMode::ForcedPivot);
        assert_relative_eq!(cmd.linear, 0.0);
        assert_relative_eq!(cmd.angular, PI);
    }

    #[test]
    fn test_arc_turn_left_is_positive() {
        let follower = Pose2D::new(0.0, 0.0, 0.0);
        let target = Pose2D::new(1.0, 1.0, 0.0); // 45 degrees to the left

        let cmd = law().command(&target, &follower);

        assert_eq!(cmd.mode, PursuitMode::ArcTurn);
        assert!(cmd.linear > 0.0);
        assert!(cmd.angular > 0.0, "left turn must have positive yaw rate");
    }

    #[test]
    fn test_arc_turn_right_is_negative() {
        let follower = Pose2D::new(0.0, 0.0, 0.0);
        let target = Pose2D::new(1.0, -1.0, 0.0);

        let cmd = law().command(&target, &follower);

        assert_eq!(cmd.mode, PursuitMode::ArcTurn);
        assert!(cmd.angular < 0.0, "right turn must have negative yaw rate");
    }

    #[test]
    fn test_arc_radius_consistency() {
        let follower = Pose2D::new(0.0, 0.0, 0.0);
        let target = Pose2D::new(1.0, 1.0, 0.0);
        let separation = follower.distance_to(&target);
        let alpha = std::f64::consts::FRAC_PI_4;

        let cmd = law().command(&target, &follower);

        // angular = linear / radius, so |linear / angular| recovers |radius|,
        // which must match s / (2 sin alpha).
        let radius = cmd.linear / cmd.angular;
        assert_relative_eq!(
            radius.abs(),
            separation / (2.0 * alpha.sin()),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_speed_cap_holds_everywhere() {
        let law = law();
        let follower = Pose2D::new(0.0, 0.0, 0.3);
        let headings = [-3.0, -1.5, -0.5, 0.0, 0.5, 1.5, 3.0];
        let offsets = [0.05, 0.2, 1.0, 5.0, 50.0];

        for angle in headings {
            for dist in offsets {
                let target = Pose2D::new(dist * f64::cos(angle), dist * f64::sin(angle), 0.0);
                let cmd = law.command(&target, &follower);

                assert!(
                    cmd.linear.abs() <= law.velocity_max() + 1e-12,
                    "speed {} exceeds cap for target {:?}",
                    cmd.linear,
                    target
                );
                if cmd.mode != PursuitMode::ForcedPivot {
                    assert!(cmd.linear >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_command_is_stateless() {
        let law = law();
        let follower = Pose2D::new(0.3, -0.2, 0.7);
        let target = Pose2D::new(4.0, 2.5, 0.0);

        let first = law.command(&target, &follower);
        let second = law.command(&target, &follower);

        assert_eq!(first, second);
    }
}
