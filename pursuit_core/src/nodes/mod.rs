//! Ready-made nodes

pub mod chase_node;

pub use chase_node::{ChaseNode, CMD_VEL_TOPIC, FOLLOWER_POSE_TOPIC, TARGET_POSE_TOPIC};
