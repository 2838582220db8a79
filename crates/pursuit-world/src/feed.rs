//! Pose feedback channel.
//!
//! Producers push `(name, PoseReport)` pairs at whatever rate and latency the
//! simulator offers.  Each name holds only its newest report; older unread
//! reports are overwritten.  The supervisor drains the board once per tick,
//! so it always sees the latest snapshot and never a queue of history.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pursuit_core::Pose;

/// One pose message from the simulator.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoseReport {
    pub pose:             Pose,
    /// Forward speed the simulator measured, units per second.
    pub linear_velocity:  f64,
    pub angular_velocity: f64,
}

impl PoseReport {
    pub fn new(pose: Pose, linear_velocity: f64, angular_velocity: f64) -> Self {
        Self { pose, linear_velocity, angular_velocity }
    }

    /// A report with zero velocities.
    pub fn at_rest(pose: Pose) -> Self {
        Self { pose, ..Self::default() }
    }
}

type Slots = Arc<Mutex<HashMap<String, PoseReport>>>;

fn lock(slots: &Slots) -> MutexGuard<'_, HashMap<String, PoseReport>> {
    // Every write is a single insert, so a poisoned map is still consistent.
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Consumer side of the feed, owned by the supervisor.
#[derive(Debug, Default)]
pub struct PoseBoard {
    slots: Slots,
}

impl PoseBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A producer handle.  Cheap to clone and `Send`.
    pub fn sink(&self) -> PoseSink {
        PoseSink { slots: Arc::clone(&self.slots) }
    }

    /// Take every report received since the previous drain.
    pub fn drain(&self) -> Vec<(String, PoseReport)> {
        lock(&self.slots).drain().collect()
    }

    /// Discard any unread report for `name`.
    ///
    /// Used after a respawn so a report from the previous incarnation cannot
    /// overwrite the sentinel pose.
    pub fn forget(&self, name: &str) {
        lock(&self.slots).remove(name);
    }

    /// Number of names with an unread report.
    pub fn pending(&self) -> usize {
        lock(&self.slots).len()
    }
}

/// Producer side of the feed.
#[derive(Clone, Debug)]
pub struct PoseSink {
    slots: Slots,
}

impl PoseSink {
    /// Record `report` as the newest pose of `name`.
    pub fn publish(&self, name: &str, report: PoseReport) {
        lock(&self.slots).insert(name.to_string(), report);
    }
}
