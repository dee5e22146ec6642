//! Feasible sets with a cheap linear minimization oracle
//!
//! Each set answers
//! ```math
//! v \in \mathrm{arg}\!\min_{v \in \mathcal{C}} \langle g, v \rangle
//! ```
//! and most can also test membership and project. Ties are broken towards the
//! first coordinate, so every oracle is deterministic.

mod l1;
pub use l1::*;
mod l2;
pub use l2::*;
mod simplex;
pub use simplex::*;
mod support;
pub use support::*;

use crate::error::{Error, Result};
use ndarray::prelude::*;
use ndarray::NdFloat;

pub trait ConstraintSet<S: NdFloat> {
    /// Linear minimization oracle
    fn lmo(&self, direction: ArrayView1<S>) -> Array1<S>;

    /// Membership test with slack `tol`, `None` if the set cannot tell
    fn contains(&self, _x: ArrayView1<S>, _tol: S) -> Option<bool> {
        None
    }
}

/// Euclidean projection onto the set
pub trait Project<S: NdFloat> {
    fn project(&self, x: ArrayView1<S>) -> Array1<S>;
}

pub(crate) fn check_radius<S: NdFloat>(radius: S) -> Result<S> {
    if radius > S::zero() && radius.is_finite() {
        Ok(radius)
    } else {
        Err(Error::InvalidParameter {
            name: "radius",
            value: radius.to_f64().unwrap_or(f64::NAN),
        })
    }
}

/// Threshold $`\theta`$ such that $`\sum_i \max(u_i - \theta, 0) = r`$, where `u`
/// is non-negative. Used by the L1 and simplex projections.
pub(crate) fn sort_threshold<S: NdFloat>(u: impl Iterator<Item = S>, radius: S) -> S {
    let mut sorted: Vec<S> = u.collect();
    sorted.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let mut cumsum = S::zero();
    let mut theta = S::zero();
    for (j, &uj) in sorted.iter().enumerate() {
        cumsum += uj;
        let t = (cumsum - radius) / S::from(j + 1).unwrap();
        if uj - t > S::zero() {
            theta = t;
        }
    }
    theta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_must_be_positive() {
        assert!(check_radius(1.0).is_ok());
        assert_eq!(
            check_radius(0.0),
            Err(Error::InvalidParameter {
                name: "radius",
                value: 0.0
            })
        );
        assert!(check_radius(f64::INFINITY).is_err());
    }

    #[test]
    fn threshold_of_known_vector() {
        // (0.8 - 0.2333) + (0.6 - 0.2333) + (0.3 - 0.2333) = 1
        let theta = sort_threshold(vec![0.8, 0.6, 0.3, 0.0, 0.1].into_iter(), 1.0);
        approx::assert_abs_diff_eq!(theta, 0.7 / 3.0, epsilon = 1e-12);
    }
}
