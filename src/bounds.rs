/// Generic axis-aligned bounding box for N-dimensional space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    pub min: [f64; D],
    pub max: [f64; D],
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// An inverted box (`min = +inf`, `max = -inf`) that any widening replaces.
    pub fn empty() -> Self {
        Self {
            min: [f64::INFINITY; D],
            max: [f64::NEG_INFINITY; D],
        }
    }

    /// Widens a single axis so that `[lo, hi]` is covered.
    pub fn widen_axis(&mut self, axis: usize, lo: f64, hi: f64) {
        self.min[axis] = self.min[axis].min(lo);
        self.max[axis] = self.max[axis].max(hi);
    }

    pub fn include(&mut self, point: &[f64; D]) {
        for axis in 0..D {
            self.widen_axis(axis, point[axis], point[axis]);
        }
    }

    /// The box with every still-infinite bound replaced by `-f64::MAX` / `f64::MAX`.
    pub fn saturated(&self) -> Self {
        Self {
            min: self.min.map(|v| v.clamp(-f64::MAX, f64::MAX)),
            max: self.max.map(|v| v.clamp(-f64::MAX, f64::MAX)),
        }
    }

    pub fn contains(&self, point: &[f64; D]) -> bool {
        (0..D).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }
}

impl<const D: usize> Default for BoundingBox<D> {
    fn default() -> Self {
        Self::empty()
    }
}
