use super::{check_radius, sort_threshold, ConstraintSet, Project};
use crate::error::Result;
use ndarray::prelude::*;
use ndarray::NdFloat;

/// Scaled probability simplex $`\{x : x \geq 0, \sum_i x_i = r\}`$
#[derive(Debug, Clone, Copy)]
pub struct Simplex<S> {
    radius: S,
}

impl<S: NdFloat> Simplex<S> {
    pub fn new(radius: S) -> Result<Self> {
        Ok(Simplex {
            radius: check_radius(radius)?,
        })
    }

    /// The probability simplex, $`r = 1`$
    pub fn unit() -> Self {
        Simplex { radius: S::one() }
    }

    /// Barycenter $`r/n \cdot \mathbf{1}`$, a convenient feasible start
    pub fn center(&self, dim: usize) -> Array1<S> {
        Array1::from_elem(dim, self.radius / S::from(dim.max(1)).unwrap())
    }
}

impl<S: NdFloat> ConstraintSet<S> for Simplex<S> {
    /// $`r e_i`$ with $`i = \mathrm{arg}\!\min_j g_j`$
    fn lmo(&self, direction: ArrayView1<S>) -> Array1<S> {
        let mut v = Array1::zeros(direction.raw_dim());
        if direction.is_empty() {
            return v;
        }
        let mut best = 0;
        for (i, &g) in direction.iter().enumerate() {
            if g < direction[best] {
                best = i;
            }
        }
        v[best] = self.radius;
        v
    }

    fn contains(&self, x: ArrayView1<S>, tol: S) -> Option<bool> {
        let nonneg = x.iter().all(|&xi| xi >= -tol);
        Some(nonneg && (x.sum() - self.radius).abs() <= tol)
    }
}

impl<S: NdFloat> Project<S> for Simplex<S> {
    fn project(&self, x: ArrayView1<S>) -> Array1<S> {
        let theta = sort_threshold(x.iter().cloned(), self.radius);
        x.mapv(|xi| (xi - theta).max(S::zero()))
    }
}
