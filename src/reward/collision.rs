use serde::{Deserialize, Serialize};
use tracing::info;

/// What the vehicle ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Pedestrian,
    Vehicle,
    Other,
}

impl ActorKind {
    /// Classifies a simulator blueprint id such as `walker.pedestrian.0001`
    /// or `vehicle.audi.tt`.
    pub fn from_type_id(type_id: &str) -> Self {
        if type_id.contains("pedestrian") {
            ActorKind::Pedestrian
        } else if type_id.contains("vehicle") {
            ActorKind::Vehicle
        } else {
            ActorKind::Other
        }
    }
}

/// Accumulates collision penalties over an episode.
///
/// The total only grows until [`CollisionTracker::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionTracker {
    penalty: f32,
    total: f32,
    should_terminate: bool,
    count: u32,
}

impl CollisionTracker {
    pub fn new(penalty: f32) -> Self {
        Self {
            penalty: penalty.abs(),
            total: 0.0,
            should_terminate: false,
            count: 0,
        }
    }

    /// Adds the penalty for hitting `kind` and returns it.
    pub fn record(&mut self, kind: ActorKind) -> f32 {
        let (added, terminate) = match kind {
            ActorKind::Pedestrian => (self.penalty, true),
            ActorKind::Vehicle => (self.penalty / 2.0, true),
            ActorKind::Other => (self.penalty / 10.0, false),
        };

        self.total += added;
        self.should_terminate |= terminate;
        self.count += 1;
        info!(?kind, added, total = self.total, terminate, "collision");
        added
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn should_terminate(&self) -> bool {
        self.should_terminate
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.total = 0.0;
        self.should_terminate = false;
        self.count = 0;
    }
}
