//! Typed topic endpoints backed by an in-process channel registry
//!
//! A [`Hub<T>`] is both the publisher and subscriber handle for one topic.
//! All hubs created for the same topic name share a single bounded channel,
//! so a message published by any handle is observable by the others. The
//! registry is process-wide; topics are created lazily on first use and the
//! message type of a topic is fixed by whichever hub touches it first.

use crate::core::{LogSummary, NodeInfo};
use crate::error::{PursuitError, PursuitResult};
use crossbeam::channel::{bounded, Receiver, Sender, TrySendError};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default per-topic channel depth
const DEFAULT_TOPIC_CAPACITY: usize = 1024;

/// Process-wide topic table, keyed by topic name
static TOPIC_REGISTRY: Lazy<Mutex<HashMap<String, Box<dyn Any + Send>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

struct Endpoints<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

/// Per-hub traffic counters, shared across clones
#[derive(Debug, Default)]
struct HubMetrics {
    messages_sent: AtomicU64,
    messages_received: AtomicU64,
    send_failures: AtomicU64,
}

/// Snapshot of a hub's traffic counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubMetricsSnapshot {
    pub messages_sent: u64,
    pub messages_received: u64,
    pub send_failures: u64,
}

/// Publisher/subscriber handle for a single typed topic
pub struct Hub<T: Clone + Send + 'static> {
    topic: String,
    sender: Sender<T>,
    receiver: Receiver<T>,
    metrics: Arc<HubMetrics>,
}

impl<T: Clone + Send + 'static> Hub<T> {
    /// Open the topic `topic` with the default channel capacity
    pub fn new(topic: &str) -> PursuitResult<Self> {
        Self::new_with_capacity(topic, DEFAULT_TOPIC_CAPACITY)
    }

    /// Open the topic `topic`, creating it with `capacity` slots if it does
    /// not exist yet
    ///
    /// Fails with [`PursuitError::TopicTypeMismatch`] if the topic already
    /// exists with a different message type.
    pub fn new_with_capacity(topic: &str, capacity: usize) -> PursuitResult<Self> {
        let mut registry = TOPIC_REGISTRY.lock();

        let entry = registry.entry(topic.to_string()).or_insert_with(|| {
            let (sender, receiver) = bounded::<T>(capacity);
            Box::new(Endpoints { sender, receiver })
        });

        let endpoints = entry.downcast_ref::<Endpoints<T>>().ok_or_else(|| {
            PursuitError::TopicTypeMismatch {
                topic: topic.to_string(),
            }
        })?;

        Ok(Self {
            topic: topic.to_string(),
            sender: endpoints.sender.clone(),
            receiver: endpoints.receiver.clone(),
            metrics: Arc::new(HubMetrics::default()),
        })
    }

    pub fn topic_name(&self) -> &str {
        &self.topic
    }

    pub fn metrics(&self) -> HubMetricsSnapshot {
        HubMetricsSnapshot {
            messages_sent: self.metrics.messages_sent.load(Ordering::Relaxed),
            messages_received: self.metrics.messages_received.load(Ordering::Relaxed),
            send_failures: self.metrics.send_failures.load(Ordering::Relaxed),
        }
    }
}

impl<T: Clone + Send + LogSummary + 'static> Hub<T> {
    /// Publish a message on the topic
    ///
    /// Non-blocking: if the topic's channel is full the message is handed
    /// back in `Err` so the caller decides whether to drop or retry.
    pub fn send(&self, msg: T, ctx: Option<&mut NodeInfo>) -> Result<(), T> {
        let summary = msg.log_summary();
        match self.sender.try_send(msg) {
            Ok(()) => {
                self.metrics.messages_sent.fetch_add(1, Ordering::Relaxed);
                if let Some(ctx) = ctx {
                    ctx.log_pub(&self.topic, &summary);
                }
                Ok(())
            }
            Err(TrySendError::Full(msg)) | Err(TrySendError::Disconnected(msg)) => {
                self.metrics.send_failures.fetch_add(1, Ordering::Relaxed);
                Err(msg)
            }
        }
    }

    /// Take the next pending message, if any
    pub fn recv(&self, ctx: Option<&mut NodeInfo>) -> Option<T> {
        match self.receiver.try_recv() {
            Ok(msg) => {
                self.metrics
                    .messages_received
                    .fetch_add(1, Ordering::Relaxed);
                if let Some(ctx) = ctx {
                    ctx.log_sub(&self.topic, &msg.log_summary());
                }
                Some(msg)
            }
            Err(_) => None,
        }
    }
}

impl<T: Clone + Send + 'static> Clone for Hub<T> {
    fn clone(&self) -> Self {
        Self {
            topic: self.topic.clone(),
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}
