//! Turtle chase demo
//!
//! A wandering target traces a circle while a simulated unicycle follower
//! chases it under the pursuit controller. Pass a TOML config path as the
//! first argument to override the default tuning.
//!
//! ```text
//! cargo run -p turtle_chase [config.toml]
//! ```

use anyhow::Context;
use pursuit_core::prelude::*;
use std::time::Instant;

/// Drives the target pose around a circle
struct TargetWanderNode {
    pose_pub: Hub<Pose2D>,
    started: Instant,
    radius: f64,
    angular_speed: f64,
}

impl TargetWanderNode {
    fn new() -> PursuitResult<Self> {
        Ok(Self {
            pose_pub: Hub::new(TARGET_POSE_TOPIC)?,
            started: Instant::now(),
            radius: 4.0,
            angular_speed: 0.4,
        })
    }
}

impl Node for TargetWanderNode {
    fn name(&self) -> &'static str {
        "target_wander_node"
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        let t = self.started.elapsed().as_secs_f64();
        let angle = self.angular_speed * t;
        let pose = Pose2D::new(
            self.radius * angle.cos(),
            self.radius * angle.sin(),
            // Heading tangent to the circle; the controller ignores it but
            // it keeps the published pose physically sensible.
            angle + std::f64::consts::FRAC_PI_2,
        );
        let _ = self.pose_pub.send(pose, ctx.as_deref_mut());
    }
}

/// Simulated unicycle follower
///
/// Integrates the latest velocity command forward in time and publishes the
/// resulting pose. Translation uses the heading from before the rotation
/// update, matching a plain forward-Euler step.
struct FollowerSimNode {
    cmd_sub: Hub<CmdVel>,
    pose_pub: Hub<Pose2D>,
    pose: Pose2D,
    last_cmd: CmdVel,
    last_step: Option<Instant>,
}

impl FollowerSimNode {
    fn new(start: Pose2D) -> PursuitResult<Self> {
        Ok(Self {
            cmd_sub: Hub::new(CMD_VEL_TOPIC)?,
            pose_pub: Hub::new(FOLLOWER_POSE_TOPIC)?,
            pose: start,
            last_cmd: CmdVel::zero(),
            last_step: None,
        })
    }

    fn step(&mut self, dt: f64) {
        let linear = self.last_cmd.linear as f64;
        let angular = self.last_cmd.angular as f64;

        let theta = self.pose.theta;
        self.pose.x += linear * theta.cos() * dt;
        self.pose.y += linear * theta.sin() * dt;
        self.pose.theta = (theta + angular * dt).rem_euclid(2.0 * std::f64::consts::PI);
    }
}

impl Node for FollowerSimNode {
    fn name(&self) -> &'static str {
        "follower_sim_node"
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        while let Some(cmd) = self.cmd_sub.recv(ctx.as_deref_mut()) {
            self.last_cmd = cmd;
        }

        let now = Instant::now();
        if let Some(last) = self.last_step {
            self.step((now - last).as_secs_f64());
        }
        self.last_step = Some(now);

        let _ = self.pose_pub.send(self.pose, ctx.as_deref_mut());
    }
}

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => ChaseConfig::from_toml_file(&path)
            .with_context(|| format!("failed to load config from '{path}'"))?,
        None => ChaseConfig::default(),
    };

    let mut scheduler = Scheduler::new()
        .with_name("TurtleChase")
        .with_rate_hz(config.rate_hz);

    scheduler.register(Box::new(TargetWanderNode::new()?), 0, None);
    scheduler.register(
        Box::new(FollowerSimNode::new(Pose2D::new(0.0, 0.0, 0.0))?),
        1,
        None,
    );
    scheduler.register(Box::new(ChaseNode::new(&config)?), 2, None);

    scheduler.run()?;
    Ok(())
}
