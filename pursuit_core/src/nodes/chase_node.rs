//! Chase controller node
//!
//! Subscribes to the target and follower pose topics, runs the pursuit law
//! on the latest pair, and publishes one velocity command per tick. No
//! command is emitted until at least one pose has arrived on each feed;
//! after that the node keeps commanding from the freshest poses it has seen.

use crate::algorithms::pursuit::PursuitLaw;
use crate::communication::Hub;
use crate::config::ChaseConfig;
use crate::core::{Node, NodeInfo};
use crate::error::PursuitResult;
use crate::messages::{CmdVel, Pose2D};

/// Topic carrying the pose of the agent being chased
pub const TARGET_POSE_TOPIC: &str = "chase/target_pose";

/// Topic carrying the pose of the chasing agent
pub const FOLLOWER_POSE_TOPIC: &str = "chase/follower_pose";

/// Topic carrying velocity commands for the chasing agent
pub const CMD_VEL_TOPIC: &str = "chase/cmd_vel";

/// Closed-loop pursuit controller
pub struct ChaseNode {
    target_sub: Hub<Pose2D>,
    follower_sub: Hub<Pose2D>,
    cmd_pub: Hub<CmdVel>,
    law: PursuitLaw,
    target_pose: Option<Pose2D>,
    follower_pose: Option<Pose2D>,
}

impl ChaseNode {
    /// Create a chase node on the default topics
    pub fn new(config: &ChaseConfig) -> PursuitResult<Self> {
        Self::new_with_topics(config, TARGET_POSE_TOPIC, FOLLOWER_POSE_TOPIC, CMD_VEL_TOPIC)
    }

    /// Create a chase node with explicit topic names
    pub fn new_with_topics(
        config: &ChaseConfig,
        target_topic: &str,
        follower_topic: &str,
        cmd_topic: &str,
    ) -> PursuitResult<Self> {
        config.validate()?;
        Ok(Self {
            target_sub: Hub::new(target_topic)?,
            follower_sub: Hub::new(follower_topic)?,
            cmd_pub: Hub::new(cmd_topic)?,
            law: PursuitLaw::new(config.velocity_scale, config.velocity_max)?,
            target_pose: None,
            follower_pose: None,
        })
    }
}

impl Node for ChaseNode {
    fn name(&self) -> &'static str {
        "chase_node"
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        // Drain both feeds, keeping only the freshest pose from each.
        while let Some(pose) = self.target_sub.recv(ctx.as_deref_mut()) {
            self.target_pose = Some(pose);
        }
        while let Some(pose) = self.follower_sub.recv(ctx.as_deref_mut()) {
            self.follower_pose = Some(pose);
        }

        let (Some(target), Some(follower)) = (self.target_pose, self.follower_pose) else {
            return;
        };

        let cmd = self.law.command(&target, &follower);
        let msg = CmdVel::new(cmd.linear as f32, cmd.angular as f32);
        if self.cmd_pub.send(msg, ctx.as_deref_mut()).is_err() {
            if let Some(ctx) = ctx.as_deref_mut() {
                ctx.log_warning("command topic full, dropping command");
            }
        }
    }

    fn shutdown(&mut self, ctx: &mut NodeInfo) -> PursuitResult<()> {
        // Best effort: leave the agent stopped rather than coasting on the
        // last command.
        let _ = self.cmd_pub.send(CmdVel::zero(), Some(ctx));
        ctx.log_info("chase node shut down");
        Ok(())
    }
}
