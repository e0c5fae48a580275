use crate::error::{FieldError, OutOfRange};
use crate::spring::Spring;

/// Ordered spring storage. Positions are indices into the current sequence,
/// not stable identifiers: removing a spring shifts every later spring one
/// position to the left.
#[derive(Debug, Default, Clone)]
pub struct SpringSet {
    items: Vec<Spring>,
}

impl SpringSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable append at the last position. Never fails.
    pub fn push(&mut self, spring: Spring) {
        self.items.push(spring);
    }

    /// Append several springs, preserving their order.
    pub fn extend(&mut self, springs: impl IntoIterator<Item = Spring>) {
        self.items.extend(springs);
    }

    pub fn remove_at(&mut self, position: usize) -> Result<Spring, FieldError> {
        if position >= self.items.len() {
            return Err(OutOfRange {
                index: position,
                len: self.items.len(),
            }
            .into());
        }
        Ok(self.items.remove(position))
    }

    /// Bulk removal. Positions may be listed in any order; they always refer
    /// to the sequence as it was before the call. Internally the batch is
    /// processed in strictly descending order so earlier removals cannot
    /// shift the targets of later ones.
    ///
    /// Best-effort: a duplicate position (already consumed by this batch) or
    /// an out-of-range position fails that one entry, the rest of the batch
    /// still runs. Faults are reported together afterwards. Returns the
    /// number of springs actually removed.
    pub fn remove_many(&mut self, positions: &[usize]) -> Result<usize, FieldError> {
        let mut sorted = positions.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let mut faults = Vec::new();
        let mut removed = 0;
        let mut last = None;
        for &position in &sorted {
            if last == Some(position) {
                faults.push((
                    position,
                    OutOfRange {
                        index: position,
                        len: self.items.len(),
                    },
                ));
                continue;
            }
            last = Some(position);
            if position >= self.items.len() {
                faults.push((
                    position,
                    OutOfRange {
                        index: position,
                        len: self.items.len(),
                    },
                ));
                continue;
            }
            self.items.remove(position);
            removed += 1;
        }

        if faults.is_empty() {
            Ok(removed)
        } else {
            Err(FieldError::Partial(faults))
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, position: usize) -> Result<&Spring, FieldError> {
        self.items.get(position).ok_or_else(|| {
            OutOfRange {
                index: position,
                len: self.items.len(),
            }
            .into()
        })
    }

    pub fn as_slice(&self) -> &[Spring] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Spring> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
