//! # Pursuit Core
//!
//! A small robotics control stack for pose pursuit: one unicycle-model agent
//! chasing another by steering along arcs instead of turn-then-drive.
//!
//! ## Architecture
//!
//! - **algorithms**: the stateless pursuit law and its geometric helpers
//! - **messages**: pose and velocity-command types shared between nodes
//! - **communication**: typed topic pub/sub between nodes in one process
//! - **core**: the [`Node`](core::Node) lifecycle trait and its context
//! - **scheduling**: fixed-rate scheduler that drives the nodes
//! - **nodes**: the ready-made chase controller node
//! - **config**: TOML-backed tuning with fail-fast validation
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pursuit_core::prelude::*;
//! use std::time::Duration;
//!
//! let config = ChaseConfig::default();
//! let mut scheduler = Scheduler::new().with_rate_hz(config.rate_hz);
//! scheduler.register(Box::new(ChaseNode::new(&config).unwrap()), 0, None);
//! scheduler.run_for(Duration::from_secs(10)).unwrap();
//! ```

pub mod algorithms;
pub mod communication;
pub mod config;
pub mod core;
pub mod error;
pub mod messages;
pub mod nodes;
pub mod scheduling;

pub use communication::Hub;
pub use config::ChaseConfig;
pub use core::{LogSummary, Node, NodeInfo};
pub use error::{PursuitError, PursuitResult};
pub use messages::{CmdVel, Pose2D, Vector2};
pub use nodes::ChaseNode;
pub use scheduling::{Scheduler, SchedulerHandle};

/// Everything needed to assemble and run a chase
pub mod prelude {
    pub use crate::algorithms::pursuit::{PursuitCommand, PursuitLaw, PursuitMode};
    pub use crate::communication::Hub;
    pub use crate::config::ChaseConfig;
    pub use crate::core::{LogSummary, Node, NodeInfo};
    pub use crate::error::{PursuitError, PursuitResult};
    pub use crate::messages::{CmdVel, Pose2D, Vector2};
    pub use crate::nodes::{ChaseNode, CMD_VEL_TOPIC, FOLLOWER_POSE_TOPIC, TARGET_POSE_TOPIC};
    pub use crate::scheduling::{Scheduler, SchedulerHandle};
}
