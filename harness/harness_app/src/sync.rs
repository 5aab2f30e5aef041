//! Debounced push of graph edits to the harness store.
//!
//! The scheduler owns no timers itself, it decides which timer the shell should start or cancel
//! and holds the snapshot to push when the live timer elapses.

use std::time::Duration;

use harness::design::Harness;
use harness::graph::{GraphEdge, GraphNode};
use harness::id::HarnessId;
use harness::transform::{TransformError, to_harness};
use tracing::trace;

use crate::capabilities::timer::TimerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SyncConfig {
    /// Edits must stop for this long before the harness is pushed.
    pub quiescence: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            quiescence: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingPush {
    pub timer_id: TimerId,
    pub harness_id: HarnessId,
    pub harness: Harness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Skipped,
    /// The state no longer qualifies for a push, the pending push was dropped.
    Cancelled {
        timer_id: TimerId,
    },
    Scheduled {
        timer_id: TimerId,
        superseded: Option<TimerId>,
    },
}

#[derive(Debug, Default)]
pub struct SyncScheduler {
    config: SyncConfig,
    skip_next: bool,
    next_timer_id: u64,
    pending: Option<PendingPush>,
}

impl SyncScheduler {
    pub fn config(&self) -> SyncConfig {
        self.config
    }

    pub fn configure(&mut self, config: SyncConfig) {
        self.config = config;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The next observation reflects freshly loaded state and must not be pushed back.
    pub fn skip_next_observation(&mut self) {
        self.skip_next = true;
    }

    /// Observe the current editing state, scheduling a push of its domain form.
    ///
    /// Nothing is scheduled without a harness id or when the graph has no nodes, and any pending
    /// push of an earlier state is dropped.
    pub fn observe(
        &mut self,
        harness_id: Option<&HarnessId>,
        harness_name: Option<&str>,
        nodes: &[GraphNode],
        edges: &[GraphEdge],
    ) -> Result<Schedule, TransformError> {
        if self.skip_next {
            self.skip_next = false;
            trace!("Skipping observation of loaded state.");
            return Ok(Schedule::Skipped);
        }

        let Some(harness_id) = harness_id.filter(|_| !nodes.is_empty()) else {
            return Ok(match self.pending.take() {
                Some(pending) => {
                    trace!("Dropped pending push. timer: {:?}", pending.timer_id);
                    Schedule::Cancelled {
                        timer_id: pending.timer_id,
                    }
                }
                None => Schedule::Skipped,
            });
        };

        let mut harness = to_harness(nodes, edges)?;
        if let Some(name) = harness_name {
            harness.name = name.to_string();
        }
        harness.id = Some(harness_id.clone());

        Ok(self.schedule(harness_id.clone(), harness))
    }

    /// Replace any pending push, the previous timer is superseded.
    pub fn schedule(&mut self, harness_id: HarnessId, harness: Harness) -> Schedule {
        self.next_timer_id += 1;
        let timer_id = TimerId(self.next_timer_id);

        let superseded = self
            .pending
            .replace(PendingPush {
                timer_id,
                harness_id,
                harness,
            })
            .map(|pending| pending.timer_id);

        trace!("Scheduled push. timer: {:?}, superseded: {:?}", timer_id, superseded);

        Schedule::Scheduled {
            timer_id,
            superseded,
        }
    }

    /// Drop the pending push, returning the timer to cancel.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.skip_next = false;
        self.pending
            .take()
            .map(|pending| pending.timer_id)
    }

    /// Take the pending push if `timer_id` is the live timer, elapsed superseded timers are ignored.
    pub fn fire(&mut self, timer_id: TimerId) -> Option<PendingPush> {
        match &self.pending {
            Some(pending) if pending.timer_id == timer_id => self.pending.take(),
            _ => {
                trace!("Ignoring stale timer. timer: {:?}", timer_id);
                None
            }
        }
    }
}
