//! Fixed-rate cooperative scheduler
//!
//! Drives a set of [`Node`]s through init, a fixed-rate tick loop, and
//! shutdown. Every registered node is ticked once per period, in priority
//! order, and the scheduler then sleeps out the remainder of the period.
//! If a tick overruns the period the next one starts immediately; the loop
//! never busy-spins to catch up.
//!
//! Stopping is cooperative: Ctrl+C, [`SchedulerHandle::request_stop`], or an
//! elapsed `run_for` deadline all flip a shared flag that the loop checks at
//! the top of each tick.

use crate::core::{Node, NodeInfo};
use crate::error::{PursuitError, PursuitResult};
use colored::Colorize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

struct RegisteredNode {
    node: Box<dyn Node>,
    priority: i32,
    context: NodeInfo,
}

/// Cloneable remote control for a running scheduler
#[derive(Clone)]
pub struct SchedulerHandle {
    running: Arc<Mutex<bool>>,
}

impl SchedulerHandle {
    /// Ask the scheduler to stop after the current tick (idempotent)
    pub fn request_stop(&self) {
        *self.running.lock().unwrap() = false;
    }

    pub fn is_running(&self) -> bool {
        *self.running.lock().unwrap()
    }
}

/// Drives registered nodes at a fixed rate until stopped
pub struct Scheduler {
    nodes: Vec<RegisteredNode>,
    running: Arc<Mutex<bool>>,
    name: String,
    rate_hz: f64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            running: Arc::new(Mutex::new(false)),
            name: "Scheduler".to_string(),
            rate_hz: crate::config::DEFAULT_RATE_HZ,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the tick rate (validated when the scheduler runs)
    pub fn with_rate_hz(mut self, rate_hz: f64) -> Self {
        self.rate_hz = rate_hz;
        self
    }

    /// Register a node
    ///
    /// Lower `priority` ticks first. `logging_enabled` defaults to true.
    pub fn register(
        &mut self,
        node: Box<dyn Node>,
        priority: i32,
        logging_enabled: Option<bool>,
    ) -> &mut Self {
        let context = NodeInfo::new(node.name().to_string(), logging_enabled.unwrap_or(true));
        self.nodes.push(RegisteredNode {
            node,
            priority,
            context,
        });
        self
    }

    /// Handle for stopping the scheduler from another thread
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            running: Arc::clone(&self.running),
        }
    }

    pub fn is_running(&self) -> bool {
        *self.running.lock().unwrap()
    }

    /// Request a stop (same effect as the handle)
    pub fn stop(&self) {
        *self.running.lock().unwrap() = false;
    }

    /// Run until Ctrl+C or a stop request
    pub fn run(&mut self) -> PursuitResult<()> {
        self.run_inner(None)
    }

    /// Run for at most `duration`, or until stopped earlier
    pub fn run_for(&mut self, duration: Duration) -> PursuitResult<()> {
        self.run_inner(Some(duration))
    }

    fn run_inner(&mut self, deadline: Option<Duration>) -> PursuitResult<()> {
        if !self.rate_hz.is_finite() || self.rate_hz <= 0.0 {
            return Err(PursuitError::config(format!(
                "scheduler rate must be positive, got {} Hz",
                self.rate_hz
            )));
        }
        let period = Duration::from_secs_f64(1.0 / self.rate_hz);

        *self.running.lock().unwrap() = true;

        // Ctrl+C flips the running flag. Installation fails if a handler
        // already exists in this process (e.g. a previous scheduler run);
        // stopping then falls back to handles and deadlines.
        let ctrlc_flag = Arc::clone(&self.running);
        if let Err(e) = ctrlc::set_handler(move || {
            *ctrlc_flag.lock().unwrap() = false;
        }) {
            eprintln!(
                "{} [{}] Ctrl+C handler unavailable: {}",
                "[WARN]".yellow(),
                self.name,
                e
            );
        }

        self.nodes.sort_by_key(|n| n.priority);

        println!(
            "{} [{}] starting {} node(s) at {} Hz",
            "[INFO]".blue(),
            self.name,
            self.nodes.len(),
            self.rate_hz
        );

        for registered in &mut self.nodes {
            registered.node.init(&mut registered.context)?;
        }

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| PursuitError::Internal(format!("failed to build runtime: {e}")))?;

        let started = Instant::now();
        let result: PursuitResult<()> = rt.block_on(async {
            loop {
                if !*self.running.lock().unwrap() {
                    break;
                }
                if let Some(limit) = deadline {
                    if started.elapsed() >= limit {
                        break;
                    }
                }

                let tick_start = Instant::now();
                for registered in &mut self.nodes {
                    registered.context.start_tick();
                    registered.node.tick(Some(&mut registered.context));
                    registered.context.record_tick();
                }

                // Sleep out the remainder of the period. An overrunning tick
                // yields a zero sleep, never a busy spin.
                if let Some(remaining) = period.checked_sub(tick_start.elapsed()) {
                    tokio::time::sleep(remaining).await;
                }
            }
            Ok(())
        });

        *self.running.lock().unwrap() = false;

        for registered in &mut self.nodes {
            if let Err(e) = registered.node.shutdown(&mut registered.context) {
                eprintln!(
                    "{} [{}] shutdown of '{}' failed: {}",
                    "[ERROR]".red(),
                    self.name,
                    registered.node.name(),
                    e
                );
            }
        }

        println!("{} [{}] stopped", "[INFO]".blue(), self.name);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct CountingNode {
        ticks: Arc<AtomicU64>,
    }

    impl Node for CountingNode {
        fn name(&self) -> &'static str {
            "counting_node"
        }

        fn tick(&mut self, _ctx: Option<&mut NodeInfo>) {
            self.ticks.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_run_for_ticks_at_rate() {
        let ticks = Arc::new(AtomicU64::new(0));
        let mut scheduler = Scheduler::new()
            .with_name("TestScheduler")
            .with_rate_hz(100.0);
        scheduler.register(
            Box::new(CountingNode {
                ticks: Arc::clone(&ticks),
            }),
            0,
            Some(false),
        );

        scheduler.run_for(Duration::from_millis(200)).unwrap();

        let count = ticks.load(Ordering::Relaxed);
        // 100 Hz for 200 ms is nominally 20 ticks; allow generous slack.
        assert!(count >= 5, "too few ticks: {count}");
        assert!(count <= 40, "too many ticks: {count}");
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_handle_stops_scheduler() {
        let ticks = Arc::new(AtomicU64::new(0));
        let mut scheduler = Scheduler::new().with_rate_hz(100.0);
        scheduler.register(
            Box::new(CountingNode {
                ticks: Arc::clone(&ticks),
            }),
            0,
            Some(false),
        );

        let handle = scheduler.handle();
        let stopper = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            handle.request_stop();
        });

        let started = Instant::now();
        scheduler.run_for(Duration::from_secs(5)).unwrap();
        stopper.join().unwrap();

        assert!(
            started.elapsed() < Duration::from_secs(1),
            "stop request should end the run well before the deadline"
        );
    }

    #[test]
    fn test_rejects_bad_rate() {
        let mut scheduler = Scheduler::new().with_rate_hz(0.0);
        assert!(scheduler.run_for(Duration::from_millis(10)).is_err());
    }
}
