use std::sync::Arc;

use glam::Vec3;
use parking_lot::RwLock;

use crate::error::OutOfRange;

/// Positions and velocities of one mechanical body. Owned by the
/// surrounding engine and shared with force fields behind a read-write
/// lock; fields are kept in lockstep (one velocity per position).
#[derive(Debug, Default, Clone)]
pub struct PointSet {
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
}

/// Engine-side owning handle to a point set.
pub type SharedPointSet = Arc<RwLock<PointSet>>;

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points start at rest.
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        let velocities = vec![Vec3::ZERO; positions.len()];
        PointSet {
            positions,
            velocities,
        }
    }

    pub fn push(&mut self, position: Vec3, velocity: Vec3) {
        self.positions.push(position);
        self.velocities.push(velocity);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position/velocity of one point, checked against the current size.
    /// Endpoint indices stored in springs are validated here on every
    /// evaluation, since point sets resize independently of spring sets.
    pub fn sample(&self, index: usize) -> Result<(Vec3, Vec3), OutOfRange> {
        match (self.positions.get(index), self.velocities.get(index)) {
            (Some(&position), Some(&velocity)) => Ok((position, velocity)),
            _ => Err(OutOfRange {
                index,
                len: self.len(),
            }),
        }
    }

    pub fn into_shared(self) -> SharedPointSet {
        Arc::new(RwLock::new(self))
    }
}
