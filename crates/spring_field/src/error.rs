use std::fmt;

/// Which of the two point-set links a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRole {
    Object1,
    Object2,
}

impl fmt::Display for ObjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object1 => write!(f, "object1"),
            Self::Object2 => write!(f, "object2"),
        }
    }
}

/// An index that fell outside the container or point set it addresses,
/// together with the size it was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of range (len {})", self.index, self.len)
    }
}

/// Unified error type for all fallible operations in the crate.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// A spring position or endpoint index is invalid at the time of the
    /// operation. Endpoint indices are only checked at evaluation time,
    /// never at insertion time, since point sets resize independently.
    OutOfRange(OutOfRange),
    /// A point-set link no longer upgrades (its owner dropped the set);
    /// the force field cannot be initialized or evaluated.
    MissingObject(ObjectRole),
    /// The caller-supplied force accumulator does not match the combined
    /// system size.
    OutputLen { expected: usize, found: usize },
    /// A best-effort bulk operation ran to completion but some entries
    /// failed. Each entry pairs the offending position (requested container
    /// position for removals, spring position for evaluation passes) with
    /// its fault. Valid entries were processed normally.
    Partial(Vec<(usize, OutOfRange)>),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(fault) => fault.fmt(f),
            Self::MissingObject(role) => {
                write!(f, "point set {role} is gone (owner dropped it)")
            }
            Self::OutputLen { expected, found } => write!(
                f,
                "force accumulator holds {found} points, system has {expected}"
            ),
            Self::Partial(faults) => {
                write!(f, "{} entries failed:", faults.len())?;
                for (position, fault) in faults {
                    write!(f, " [{position}: {fault}]")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for FieldError {}

impl From<OutOfRange> for FieldError {
    fn from(fault: OutOfRange) -> Self {
        Self::OutOfRange(fault)
    }
}
