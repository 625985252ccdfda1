//! Node abstraction and execution context

pub mod node;

pub use node::{LogSummary, Node, NodeInfo};
