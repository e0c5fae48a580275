use std::sync::{Arc, Weak};

use glam::Vec3;
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::error::{FieldError, ObjectRole, OutOfRange};
use crate::evaluator::{spring_axis, spring_force, spring_stiffness_block};
use crate::point_set::{PointSet, SharedPointSet};
use crate::spring::Spring;
use crate::spring_set::SpringSet;
use crate::stiffness::StiffnessSink;

/// The force element bound into the simulation graph: one ordered spring
/// set plus non-owning links to the two point sets the springs connect.
/// The links are fixed for the field's lifetime; the spring set is mutated
/// only through this type. The caller serializes mutation against
/// evaluation, both passes only take read locks on the point sets.
pub struct SpringForceField {
    springs: SpringSet,
    object1: Weak<RwLock<PointSet>>,
    object2: Weak<RwLock<PointSet>>,
}

impl SpringForceField {
    /// Field over two point sets. Pass the same handle twice for
    /// intra-body springs.
    pub fn new(object1: &SharedPointSet, object2: &SharedPointSet) -> Self {
        SpringForceField {
            springs: SpringSet::new(),
            object1: Arc::downgrade(object1),
            object2: Arc::downgrade(object2),
        }
    }

    /// Field with an initial spring list, in the given order.
    pub fn with_springs(
        object1: &SharedPointSet,
        object2: &SharedPointSet,
        springs: impl IntoIterator<Item = Spring>,
    ) -> Self {
        let mut field = Self::new(object1, object2);
        field.springs.extend(springs);
        field
    }

    /// Checks that both point-set links are still alive. Endpoint indices
    /// are deliberately not validated here; point sets may still resize
    /// before the first evaluation.
    pub fn init(&self) -> Result<(), FieldError> {
        self.upgrade().map(|_| ())
    }

    fn upgrade(&self) -> Result<(SharedPointSet, SharedPointSet), FieldError> {
        let object1 = self
            .object1
            .upgrade()
            .ok_or(FieldError::MissingObject(ObjectRole::Object1))?;
        let object2 = self
            .object2
            .upgrade()
            .ok_or(FieldError::MissingObject(ObjectRole::Object2))?;
        Ok((object1, object2))
    }

    /// Append one spring at the last position.
    pub fn add_spring(&mut self, spring: Spring) {
        self.springs.push(spring);
    }

    /// Append several springs, preserving input order.
    pub fn add_springs(&mut self, springs: impl IntoIterator<Item = Spring>) {
        self.springs.extend(springs);
    }

    /// Remove the spring at `position`; later springs shift left.
    pub fn remove_spring(&mut self, position: usize) -> Result<Spring, FieldError> {
        self.springs.remove_at(position)
    }

    /// Remove the springs at `positions` (any order, best-effort).
    /// See [`SpringSet::remove_many`].
    pub fn remove_springs(&mut self, positions: &[usize]) -> Result<usize, FieldError> {
        self.springs.remove_many(positions)
    }

    /// Drop every spring.
    pub fn clear(&mut self) {
        self.springs.clear();
    }

    /// Owned snapshot of the spring list in container order. Mutating the
    /// field afterwards does not alter a previously returned snapshot.
    pub fn springs(&self) -> Vec<Spring> {
        self.springs.as_slice().to_vec()
    }

    pub fn spring_at(&self, position: usize) -> Result<Spring, FieldError> {
        self.springs.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    /// Number of points in the combined force system: object1's points,
    /// plus object2's when the two links refer to distinct sets. Force
    /// accumulators and stiffness sinks are indexed over this range,
    /// object1 first.
    pub fn system_len(&self) -> Result<usize, FieldError> {
        let (object1, object2) = self.upgrade()?;
        if Arc::ptr_eq(&object1, &object2) {
            Ok(object1.read().len())
        } else {
            Ok(object1.read().len() + object2.read().len())
        }
    }

    /// Accumulate every enabled spring's force into `out` (additive; prior
    /// contents are other force fields' contributions and are preserved).
    ///
    /// Fails fast on a dead point-set link or a mis-sized accumulator.
    /// Springs whose endpoints are out of range are skipped, the rest of
    /// the pass still runs, and the skips are reported together as
    /// [`FieldError::Partial`].
    pub fn add_force(&self, out: &mut [Vec3]) -> Result<(), FieldError> {
        let (object1, object2) = self.upgrade()?;
        if Arc::ptr_eq(&object1, &object2) {
            let set = object1.read();
            self.force_pass(&set, &set, 0, set.len(), out)
        } else {
            let set1 = object1.read();
            let set2 = object2.read();
            let offset2 = set1.len();
            let expected = set1.len() + set2.len();
            self.force_pass(&set1, &set2, offset2, expected, out)
        }
    }

    fn force_pass(
        &self,
        set1: &PointSet,
        set2: &PointSet,
        offset2: usize,
        expected: usize,
        out: &mut [Vec3],
    ) -> Result<(), FieldError> {
        if out.len() != expected {
            return Err(FieldError::OutputLen {
                expected,
                found: out.len(),
            });
        }

        // Springs are independent within one pass, so the per-spring math
        // runs in parallel; the reduction into the shared accumulator stays
        // serial to keep the additive writes race-free.
        let contributions: Vec<(usize, Result<Option<(usize, usize, Vec3)>, OutOfRange>)> = self
            .springs
            .as_slice()
            .par_iter()
            .enumerate()
            .filter(|(_, spring)| spring.enabled)
            .map(|(position, spring)| {
                let contribution = match sample_pair(spring, set1, set2) {
                    Ok(((p1, v1), (p2, v2))) => Ok(spring_axis(spring, p1, p2).map(|axis| {
                        let force1 = spring_force(spring, &axis, v1, v2);
                        (spring.index1, offset2 + spring.index2, force1)
                    })),
                    Err(fault) => Err(fault),
                };
                (position, contribution)
            })
            .collect();

        let mut faults = Vec::new();
        for (position, contribution) in contributions {
            match contribution {
                Ok(Some((row1, row2, force1))) => {
                    out[row1] += force1;
                    out[row2] -= force1;
                }
                Ok(None) => {} // slack or degenerate
                Err(fault) => faults.push((position, fault)),
            }
        }
        finish_pass("force", faults)
    }

    /// Accumulate every enabled spring's stiffness blocks into `sink`, each
    /// block pre-multiplied by `scale_factor` (supplied by the integrator,
    /// e.g. -dt^2 for implicit Euler). Vanishes for exactly the springs the
    /// force pass skips, so force and derivative stay consistent.
    pub fn add_stiffness(
        &self,
        sink: &mut dyn StiffnessSink,
        scale_factor: f32,
    ) -> Result<(), FieldError> {
        let (object1, object2) = self.upgrade()?;
        if Arc::ptr_eq(&object1, &object2) {
            let set = object1.read();
            self.stiffness_pass(&set, &set, 0, sink, scale_factor)
        } else {
            let set1 = object1.read();
            let set2 = object2.read();
            let offset2 = set1.len();
            self.stiffness_pass(&set1, &set2, offset2, sink, scale_factor)
        }
    }

    fn stiffness_pass(
        &self,
        set1: &PointSet,
        set2: &PointSet,
        offset2: usize,
        sink: &mut dyn StiffnessSink,
        scale_factor: f32,
    ) -> Result<(), FieldError> {
        let mut faults = Vec::new();
        for (position, spring) in self.springs.iter().enumerate() {
            if !spring.enabled {
                continue;
            }
            let ((p1, _), (p2, _)) = match sample_pair(spring, set1, set2) {
                Ok(pair) => pair,
                Err(fault) => {
                    faults.push((position, fault));
                    continue;
                }
            };
            let Some(axis) = spring_axis(spring, p1, p2) else {
                continue;
            };
            let block = spring_stiffness_block(spring, &axis) * scale_factor;
            let row1 = spring.index1;
            let row2 = offset2 + spring.index2;
            sink.add_block(row1, row1, -block);
            sink.add_block(row1, row2, block);
            sink.add_block(row2, row1, block);
            sink.add_block(row2, row2, -block);
        }
        finish_pass("stiffness", faults)
    }
}

fn sample_pair(
    spring: &Spring,
    set1: &PointSet,
    set2: &PointSet,
) -> Result<((Vec3, Vec3), (Vec3, Vec3)), OutOfRange> {
    Ok((set1.sample(spring.index1)?, set2.sample(spring.index2)?))
}

fn finish_pass(pass: &str, faults: Vec<(usize, OutOfRange)>) -> Result<(), FieldError> {
    if faults.is_empty() {
        Ok(())
    } else {
        log::warn!(
            "{pass} pass skipped {} spring(s) with out-of-range endpoints",
            faults.len()
        );
        Err(FieldError::Partial(faults))
    }
}
