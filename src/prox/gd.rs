#![allow(non_snake_case)]

use crate::error::Result;
use crate::fw::Strategy;
use crate::oracle::{Guard, Projection};
use ndarray::prelude::*;
use ndarray::NdFloat; // includes LinalgScalar and ScalarOperand

/// Projected Gradient Descent for L-Lipschitz Smooth Minimization
///
/// Algorithm
/// ---------
/// ```math
/// x_{k+1} = P_{\mathcal{C}}\left(x_k - \frac{1}{L} \nabla f(x_k)\right)
/// ```
///
/// Converges as $`O(1/k)`$ on convex $`f`$, linearly when $`f`$ is
/// strongly convex.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectedGradient;

impl<S, P> Strategy<S, P> for ProjectedGradient
where
    S: NdFloat,
    P: Projection<S>,
{
    type State = ();

    fn name(&self) -> &'static str {
        "gd"
    }

    fn init(&self, _x0: ArrayView1<S>) -> Self::State {}

    fn step(
        &self,
        x: &mut Array1<S>,
        _state: &mut (),
        _k: usize,
        oracle: &Guard<'_, S, P>,
    ) -> Result<Option<S>> {
        let L = oracle.smoothness()?;
        let mut y = oracle.grad(x.view())?;
        // y <- x - grad / L, reusing the gradient's buffer
        y.zip_mut_with(&*x, |gi, &xi| *gi = xi - *gi / L);
        *x = oracle.project(y.view())?;
        Ok(None)
    }
}
