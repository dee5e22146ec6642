use super::{check_radius, ConstraintSet};
use crate::error::{Error, Result};
use ndarray::prelude::*;
use ndarray::NdFloat;
use std::cmp::Ordering;

/// Ball of the k-support norm, $`\{x : \|x\|_k^{sp} \leq r\}`$
///
/// The k-support norm interpolates between $`\|\cdot\|_1`$ ($`k = 1`$) and
/// $`\|\cdot\|_2`$ ($`k = n`$); its unit ball is the convex hull of all
/// $`k`$-sparse vectors of unit Euclidean norm. The oracle is cheap, but no
/// closed form projection exists, so this set does not implement
/// [`Project`](super::Project).
///
/// References
/// ----------
/// \[AFS12\]: [ Argyriou A, Foygel R, Srebro N,
///             "Sparse Prediction with the k-Support Norm", NeurIPS 2012 ](https://arxiv.org/abs/1204.5043)
#[derive(Debug, Clone, Copy)]
pub struct KSupportBall<S> {
    radius: S,
    k: usize,
}

impl<S: NdFloat> KSupportBall<S> {
    pub fn new(radius: S, k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                value: 0.,
            });
        }
        Ok(KSupportBall {
            radius: check_radius(radius)?,
            k,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

/// Indices of the `k` largest magnitudes, earlier indices first on ties
fn top_k<S: NdFloat>(x: ArrayView1<S>, k: usize) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..x.len()).collect();
    idx.sort_by(|&a, &b| {
        x[b].abs()
            .partial_cmp(&x[a].abs())
            .unwrap_or(Ordering::Equal)
    });
    idx.truncate(k);
    idx
}

/// k-support norm via the closed form of \[AFS12, Prop. 2.1\]
pub fn k_support_norm<S: NdFloat>(x: ArrayView1<S>, k: usize) -> S {
    let mut z: Vec<S> = x.iter().map(|xi| xi.abs()).collect();
    z.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    let k = k.min(z.len());
    if k == 0 {
        return S::zero();
    }

    let norm_sq = |j: usize, r: usize| {
        let head: S = z[..j].iter().fold(S::zero(), |acc, &zi| acc + zi * zi);
        let tail: S = z[j..].iter().fold(S::zero(), |acc, &zi| acc + zi);
        head + tail * tail / S::from(r + 1).unwrap()
    };

    // find r in 0..k with z[j-1] > tail / (r+1) >= z[j], j = k - r - 1
    for r in 0..k {
        let j = k - r - 1;
        let tail = z[j..].iter().fold(S::zero(), |acc, &zi| acc + zi);
        let avg = tail / S::from(r + 1).unwrap();
        let upper_ok = j == 0 || z[j - 1] > avg;
        if upper_ok && avg >= z[j] {
            return norm_sq(j, r).sqrt();
        }
    }
    norm_sq(0, k - 1).sqrt()
}

impl<S: NdFloat> ConstraintSet<S> for KSupportBall<S> {
    /// $`-r g_K / \|g_K\|_2`$ where $`K`$ holds the $`k`$ largest $`|g_i|`$
    fn lmo(&self, direction: ArrayView1<S>) -> Array1<S> {
        let mut v = Array1::zeros(direction.raw_dim());
        let support = top_k(direction, self.k);
        let norm = support
            .iter()
            .fold(S::zero(), |acc, &i| acc + direction[i] * direction[i])
            .sqrt();
        if norm > S::zero() {
            for &i in &support {
                v[i] = -self.radius * direction[i] / norm;
            }
        }
        v
    }

    fn contains(&self, x: ArrayView1<S>, tol: S) -> Option<bool> {
        Some(k_support_norm(x, self.k) <= self.radius + tol)
    }
}
