use super::{check_radius, sort_threshold, ConstraintSet, Project};
use crate::error::Result;
use ndarray::prelude::*;
use ndarray::NdFloat;

/// L1 ball $`\{x : \|x\|_1 \leq r\}`$, whose vertices are $`\pm r e_i`$
#[derive(Debug, Clone, Copy)]
pub struct L1Ball<S> {
    radius: S,
}

impl<S: NdFloat> L1Ball<S> {
    pub fn new(radius: S) -> Result<Self> {
        Ok(L1Ball {
            radius: check_radius(radius)?,
        })
    }

    pub fn radius(&self) -> S {
        self.radius
    }
}

impl<S: NdFloat> ConstraintSet<S> for L1Ball<S> {
    /// $`-r\,\mathrm{sign}(g_i) e_i`$ with $`i = \mathrm{arg}\!\max_j |g_j|`$
    fn lmo(&self, direction: ArrayView1<S>) -> Array1<S> {
        let mut v = Array1::zeros(direction.raw_dim());
        if direction.is_empty() {
            return v;
        }
        let mut best = 0;
        for (i, g) in direction.iter().enumerate() {
            if g.abs() > direction[best].abs() {
                best = i;
            }
        }
        v[best] = if direction[best] > S::zero() {
            -self.radius
        } else {
            self.radius
        };
        v
    }

    fn contains(&self, x: ArrayView1<S>, tol: S) -> Option<bool> {
        Some(x.fold(S::zero(), |acc, xi| acc + xi.abs()) <= self.radius + tol)
    }
}

impl<S: NdFloat> Project<S> for L1Ball<S> {
    /// Soft thresholding at the level that lands on the boundary
    fn project(&self, x: ArrayView1<S>) -> Array1<S> {
        if x.fold(S::zero(), |acc, xi| acc + xi.abs()) <= self.radius {
            return x.to_owned();
        }
        let theta = sort_threshold(x.iter().map(|xi| xi.abs()), self.radius);
        x.mapv(|xi| xi.signum() * (xi.abs() - theta).max(S::zero()))
    }
}
