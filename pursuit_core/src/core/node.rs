use crate::error::PursuitResult;
use colored::Colorize;
use std::time::{Duration, Instant};

/// Compact string rendering of a message for pub/sub logging
///
/// Keeps log lines short without cloning or Debug-formatting whole messages.
pub trait LogSummary {
    fn log_summary(&self) -> String;
}

/// Execution context handed to a node on every lifecycle call
///
/// Carries the node's identity, whether logging is enabled for it, and a few
/// tick/message counters the scheduler updates as it drives the node.
pub struct NodeInfo {
    name: String,
    logging_enabled: bool,
    creation_time: Instant,
    tick_start: Option<Instant>,
    tick_count: u64,
    messages_sent: u64,
    messages_received: u64,
    error_count: u64,
}

impl NodeInfo {
    pub fn new(name: String, logging_enabled: bool) -> Self {
        Self {
            name,
            logging_enabled,
            creation_time: Instant::now(),
            tick_start: None,
            tick_count: 0,
            messages_sent: 0,
            messages_received: 0,
            error_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn messages_sent(&self) -> u64 {
        self.messages_sent
    }

    pub fn messages_received(&self) -> u64 {
        self.messages_received
    }

    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    pub fn uptime(&self) -> Duration {
        self.creation_time.elapsed()
    }

    /// Mark the start of a tick (called by the scheduler)
    pub fn start_tick(&mut self) {
        self.tick_start = Some(Instant::now());
    }

    /// Mark the end of a tick (called by the scheduler)
    pub fn record_tick(&mut self) {
        self.tick_count += 1;
        self.tick_start = None;
    }

    /// Record a published message on `topic`
    pub fn log_pub(&mut self, topic: &str, summary: &str) {
        self.messages_sent += 1;
        if self.logging_enabled {
            println!(
                "{} {} '{}' = {}",
                format!("[{}]", self.name).yellow(),
                "--PUB-->".green().bold(),
                topic.magenta(),
                summary
            );
        }
    }

    /// Record a received message on `topic`
    pub fn log_sub(&mut self, topic: &str, summary: &str) {
        self.messages_received += 1;
        if self.logging_enabled {
            println!(
                "{} {} '{}' = {}",
                format!("[{}]", self.name).yellow(),
                "<--SUB--".blue().bold(),
                topic.magenta(),
                summary
            );
        }
    }

    pub fn log_info(&self, message: &str) {
        if self.logging_enabled {
            eprintln!(
                "{} {} {}",
                "[INFO]".blue(),
                format!("[{}]", self.name).yellow(),
                message
            );
        }
    }

    pub fn log_warning(&mut self, message: &str) {
        if self.logging_enabled {
            eprintln!(
                "{} {} {}",
                "[WARN]".yellow(),
                format!("[{}]", self.name).yellow(),
                message
            );
        }
    }

    pub fn log_error(&mut self, message: &str) {
        self.error_count += 1;
        if self.logging_enabled {
            eprintln!(
                "{} {} {}",
                "[ERROR]".red(),
                format!("[{}]", self.name).yellow(),
                message
            );
        }
    }

    pub fn log_debug(&self, message: &str) {
        if self.logging_enabled {
            eprintln!(
                "{} {} {}",
                "[DEBUG]".dimmed(),
                format!("[{}]", self.name).yellow(),
                message
            );
        }
    }
}

/// A schedulable unit of work with full lifecycle support
pub trait Node: Send {
    /// The node's name (must be unique within a scheduler)
    fn name(&self) -> &'static str;

    /// Initialize the node (called once before the first tick)
    fn init(&mut self, ctx: &mut NodeInfo) -> PursuitResult<()> {
        ctx.log_info("node initialized");
        Ok(())
    }

    /// Main execution step (called once per scheduler tick)
    fn tick(&mut self, ctx: Option<&mut NodeInfo>);

    /// Shut the node down (called once when the scheduler stops)
    fn shutdown(&mut self, ctx: &mut NodeInfo) -> PursuitResult<()> {
        ctx.log_info("node shut down");
        Ok(())
    }
}

// LogSummary implementations for primitive types
impl LogSummary for f32 {
    fn log_summary(&self) -> String {
        format!("{:.3}", self)
    }
}

impl LogSummary for f64 {
    fn log_summary(&self) -> String {
        format!("{:.3}", self)
    }
}

impl LogSummary for i32 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for u32 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for u64 {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for usize {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for bool {
    fn log_summary(&self) -> String {
        self.to_string()
    }
}

impl LogSummary for String {
    fn log_summary(&self) -> String {
        self.clone()
    }
}
