//! Velocity command message

use crate::core::LogSummary;
use serde::{Deserialize, Serialize};

/// Velocity command for a unicycle-model agent
///
/// The pursuit law's output. `linear` is the signed forward/backward speed,
/// `angular` the signed yaw rate. Consumed by whatever drives the agent;
/// never retained by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct CmdVel {
    pub stamp_nanos: u64,
    pub linear: f32,  // m/s forward velocity
    pub angular: f32, // rad/s turning velocity
}

impl CmdVel {
    /// Create a new command stamped with the current time
    pub fn new(linear: f32, angular: f32) -> Self {
        Self {
            stamp_nanos: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos() as u64,
            linear,
            angular,
        }
    }

    /// Zero velocity command (stop)
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Create a command with an explicit timestamp
    pub fn with_timestamp(linear: f32, angular: f32, stamp_nanos: u64) -> Self {
        Self {
            stamp_nanos,
            linear,
            angular,
        }
    }

    /// True if this command leaves the agent motionless
    pub fn is_stop(&self) -> bool {
        self.linear == 0.0 && self.angular == 0.0
    }
}

impl Default for CmdVel {
    fn default() -> Self {
        Self::zero()
    }
}

// Enable zero-copy serialization with bytemuck
unsafe impl bytemuck::Pod for CmdVel {}
unsafe impl bytemuck::Zeroable for CmdVel {}

impl LogSummary for CmdVel {
    fn log_summary(&self) -> String {
        format!("lin={:.3} ang={:.3}", self.linear, self.angular)
    }
}
