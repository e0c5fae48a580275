/// One elastic + damped connection between a point of object1 and a point
/// of object2 (which may be the same set, for intra-body springs).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    /// Index into object1's point set
    pub index1: usize,
    /// Index into object2's point set
    pub index2: usize,
    /// Force per unit elongation
    pub stiffness: f32,
    /// Force per unit relative velocity along the spring axis
    pub damping_factor: f32,
    /// Natural length at zero elastic force
    pub rest_length: f32,
    /// Cable behavior: exert force only while stretched past rest length
    pub elongation_only: bool,
    /// Disabled springs stay in the set but contribute nothing
    pub enabled: bool,
}

impl Default for Spring {
    fn default() -> Self {
        Self::between(0, 0)
    }
}

impl Spring {
    /// Spring between `index1` of object1 and `index2` of object2, with
    /// stiffness 1 and every other field at its default.
    pub fn between(index1: usize, index2: usize) -> Self {
        Spring {
            index1,
            index2,
            stiffness: 1.0,
            damping_factor: 0.0,
            rest_length: 0.0,
            elongation_only: false,
            enabled: true,
        }
    }

    pub fn stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn damping_factor(mut self, damping_factor: f32) -> Self {
        self.damping_factor = damping_factor;
        self
    }

    pub fn rest_length(mut self, rest_length: f32) -> Self {
        self.rest_length = rest_length;
        self
    }

    pub fn elongation_only(mut self, elongation_only: bool) -> Self {
        self.elongation_only = elongation_only;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
