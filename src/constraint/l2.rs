use super::{check_radius, ConstraintSet, Project};
use crate::error::Result;
use ndarray::prelude::*;
use ndarray::NdFloat;

/// Euclidean ball $`\{x : \|x\|_2 \leq r\}`$, a strongly convex set
#[derive(Debug, Clone, Copy)]
pub struct L2Ball<S> {
    radius: S,
}

impl<S: NdFloat> L2Ball<S> {
    pub fn new(radius: S) -> Result<Self> {
        Ok(L2Ball {
            radius: check_radius(radius)?,
        })
    }

    pub fn radius(&self) -> S {
        self.radius
    }
}

impl<S: NdFloat> ConstraintSet<S> for L2Ball<S> {
    /// $`-r g / \|g\|_2`$, or the origin when $`g = 0`$
    fn lmo(&self, direction: ArrayView1<S>) -> Array1<S> {
        let norm = direction.dot(&direction).sqrt();
        if norm > S::zero() {
            direction.mapv(|g| -self.radius * g / norm)
        } else {
            Array1::zeros(direction.raw_dim())
        }
    }

    fn contains(&self, x: ArrayView1<S>, tol: S) -> Option<bool> {
        Some(x.dot(&x).sqrt() <= self.radius + tol)
    }
}

impl<S: NdFloat> Project<S> for L2Ball<S> {
    fn project(&self, x: ArrayView1<S>) -> Array1<S> {
        let norm = x.dot(&x).sqrt();
        if norm <= self.radius {
            x.to_owned()
        } else {
            x.mapv(|xi| xi * self.radius / norm)
        }
    }
}
