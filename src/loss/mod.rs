//! Smooth convex losses
//!
//! A loss only knows how to evaluate itself and its gradient; the feasible set
//! lives in [`constraint`](crate::constraint) and the two are glued together by
//! [`Problem`](crate::oracle::Problem).

mod distance;
pub use distance::*;
mod least_squares;
pub use least_squares::*;
mod logistic;
pub use logistic::*;

use ndarray::prelude::*;
use ndarray::NdFloat;

pub trait Loss<S: NdFloat> {
    /// Dimension of the ambient space
    fn dim(&self) -> usize;

    fn value(&self, x: ArrayView1<S>) -> S;

    fn grad(&self, x: ArrayView1<S>) -> Array1<S>;

    /// Lipschitz constant of the gradient, if known
    fn smoothness(&self) -> Option<S> {
        None
    }
}
