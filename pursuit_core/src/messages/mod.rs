//! Message types exchanged between pursuit controller nodes
//!
//! Messages are plain `Copy` values with `serde` support and a stable
//! `#[repr(C)]` layout:
//! - Geometry: `Pose2D` (position + heading) and the derived `Vector2`
//! - Control: `CmdVel` (linear + angular velocity command)
//!
//! All message types are re-exported here for convenience.

pub mod cmd_vel;
pub mod geometry;

pub use cmd_vel::CmdVel;
pub use geometry::{Pose2D, Vector2};
