//! Pairwise spring force element for deformable-body simulation: an
//! ordered spring set connecting two point sets, per-step force
//! accumulation, and the stiffness blocks an implicit integrator needs.

pub mod error;
mod evaluator;
pub mod force_field;
pub mod point_set;
pub mod spring;
pub mod spring_set;
pub mod stiffness;

pub use error::{FieldError, ObjectRole, OutOfRange};
pub use force_field::SpringForceField;
pub use point_set::{PointSet, SharedPointSet};
pub use spring::Spring;
pub use spring_set::SpringSet;
pub use stiffness::{DenseStiffness, StiffnessSink};
