//! In-process publish/subscribe.
//!
//! Handlers run synchronously on the publishing thread, in registration order.
//! A handler that returns an error or panics is logged and skipped; the rest
//! still run. Handlers must not block: hand I/O off elsewhere.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use serde::Serialize;

use crate::core::streak::StreakState;
use crate::models::metric::MetricEntry;
use crate::models::nutrition::NutritionDayLog;
use crate::models::workout::WorkoutCompletion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Weight,
    Workout,
    Nutrition,
    Achievements,
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weight => write!(f, "weight"),
            Self::Workout => write!(f, "workout"),
            Self::Nutrition => write!(f, "nutrition"),
            Self::Achievements => write!(f, "achievements"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    MetricSaved(MetricEntry),
    WorkoutLogged {
        workout: WorkoutCompletion,
        streak: StreakState,
    },
    NutritionLogged(NutritionDayLog),
    StreakMilestone {
        client_id: String,
        days: u32,
    },
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Self::MetricSaved(_) => Topic::Weight,
            Self::WorkoutLogged { .. } => Topic::Workout,
            Self::NutritionLogged(_) => Topic::Nutrition,
            Self::StreakMilestone { .. } => Topic::Achievements,
        }
    }
}

pub type Handler = Arc<dyn Fn(&Event) -> anyhow::Result<()> + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: HashMap<Topic, Vec<(u64, Handler)>>,
}

/// Outcome of one `publish` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub delivered: usize,
    pub failed: usize,
}

#[derive(Clone, Default)]
pub struct EventHub {
    registry: Arc<Mutex<Registry>>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `topic`. Dropping the returned handle does not
    /// unsubscribe; call [`Subscription::unsubscribe`].
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let mut reg = lock(&self.registry);
        reg.next_id += 1;
        let id = reg.next_id;
        reg.handlers
            .entry(topic)
            .or_default()
            .push((id, Arc::new(handler)));
        tracing::debug!(%topic, id, "subscribed");
        Subscription {
            registry: Arc::downgrade(&self.registry),
            topic,
            id,
        }
    }

    /// Deliver `event` to every handler subscribed to its topic.
    pub fn publish(&self, event: &Event) -> PublishReport {
        let topic = event.topic();
        // Snapshot so handlers can (un)subscribe without deadlocking.
        let handlers: Vec<(u64, Handler)> = {
            let reg = lock(&self.registry);
            match reg.handlers.get(&topic) {
                Some(list) => list.clone(),
                None => return PublishReport::default(),
            }
        };

        let mut report = PublishReport::default();
        for (id, handler) in handlers {
            match catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(e)) => {
                    report.failed += 1;
                    tracing::warn!(%topic, id, error = %e, "event handler failed");
                }
                Err(_) => {
                    report.failed += 1;
                    tracing::warn!(%topic, id, "event handler panicked");
                }
            }
        }
        report
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        lock(&self.registry)
            .handlers
            .get(&topic)
            .map_or(0, Vec::len)
    }
}

/// Handle returned by [`EventHub::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    topic: Topic,
    id: u64,
}

impl Subscription {
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Remove the handler. Safe to call after the hub is gone.
    pub fn unsubscribe(self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut reg = lock(&registry);
        if let Some(list) = reg.handlers.get_mut(&self.topic) {
            list.retain(|(id, _)| *id != self.id);
        }
        tracing::debug!(topic = %self.topic, id = self.id, "unsubscribed");
    }
}
