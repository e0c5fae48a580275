use glam::Mat3;

/// Receiver for local stiffness blocks, owned by the integrator. Rows and
/// columns are point indices in the combined system: object1's points come
/// first, object2's points are offset by object1's size when the two sets
/// are distinct.
pub trait StiffnessSink {
    /// Add `block` to the 3x3 block at (`row`, `col`). Contributions are
    /// additive: several springs touching the same point pair stack.
    fn add_block(&mut self, row: usize, col: usize, block: Mat3);
}

/// Dense block matrix, one [`Mat3`] per point pair. Suitable for tests and
/// small systems; a solver backend would implement [`StiffnessSink`] over
/// its own sparse storage instead.
#[derive(Debug, Clone)]
pub struct DenseStiffness {
    points: usize,
    blocks: Vec<Mat3>,
}

impl DenseStiffness {
    pub fn new(points: usize) -> Self {
        DenseStiffness {
            points,
            blocks: vec![Mat3::ZERO; points * points],
        }
    }

    pub fn points(&self) -> usize {
        self.points
    }

    /// The accumulated block at (`row`, `col`). Panics outside the square.
    pub fn block(&self, row: usize, col: usize) -> Mat3 {
        self.blocks[row * self.points + col]
    }
}

impl StiffnessSink for DenseStiffness {
    fn add_block(&mut self, row: usize, col: usize, block: Mat3) {
        self.blocks[row * self.points + col] += block;
    }
}
