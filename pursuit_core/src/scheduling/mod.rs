//! Fixed-rate node scheduling

pub mod scheduler;

pub use scheduler::{Scheduler, SchedulerHandle};
