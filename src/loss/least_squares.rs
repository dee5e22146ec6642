#![allow(non_snake_case)]

use super::Loss;
use crate::error::{Error, Result};
use crate::linop::LinearOperator;
use ndarray::prelude::*;
use ndarray::NdFloat;

/// Number of power iterations used to estimate $`\sigma_1(A)^2`$
const POWER_ITERS: usize = 100;

/// Least squares data fit
///
/// ```math
/// f(x) = \frac12 \|Ax - b\|_2^2, \qquad \nabla f(x) = A^T(Ax - b)
/// ```
/// with $`L = \sigma_1(A)^2`$, the largest singular value of $`A`$ squared.
#[derive(Debug, Clone)]
pub struct LeastSquares<S, T> {
    A: T,
    b: Array1<S>,
    L: S,
}

impl<S, T> LeastSquares<S, T>
where
    S: NdFloat,
    T: LinearOperator<Elem = S>,
{
    /// Fails if the operator's row count differs from `b.len()`.
    pub fn new(A: T, b: Array1<S>) -> Result<Self> {
        let rows = A.shape().0;
        if rows != b.len() {
            return Err(Error::DimensionMismatch {
                what: "b",
                expected: rows,
                found: b.len(),
            });
        }
        let L = A.spectral_norm_sq(POWER_ITERS);
        Ok(LeastSquares { A, b, L })
    }

    fn residual(&self, x: ArrayView1<S>) -> Array1<S> {
        self.A.apply(x) - &self.b
    }
}

impl<S, T> Loss<S> for LeastSquares<S, T>
where
    S: NdFloat,
    T: LinearOperator<Elem = S>,
{
    fn dim(&self) -> usize {
        self.A.shape().1
    }

    fn value(&self, x: ArrayView1<S>) -> S {
        let r = self.residual(x);
        r.dot(&r) / S::from(2.).unwrap()
    }

    fn grad(&self, x: ArrayView1<S>) -> Array1<S> {
        self.A.apply_adjoint(self.residual(x).view())
    }

    fn smoothness(&self) -> Option<S> {
        Some(self.L)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn simple_regression() {
        let A = array![[10., 0.], [0., 20.]];
        let y = array![50., 100.];
        let loss = LeastSquares::new(A, y).unwrap();
        let x = array![5., 5.];
        assert_eq!(loss.value(x.view()), 0.);
        assert_eq!(loss.grad(x.view()), array![0., 0.]);
        assert_abs_diff_eq!(loss.smoothness().unwrap(), 400., epsilon = 1e-6);

        let x = array![0., 0.];
        assert_eq!(loss.value(x.view()), 6250.);
        assert_eq!(loss.grad(x.view()), array![-500., -2000.]);
    }

    #[test]
    fn rejects_mismatched_rhs() {
        let A: Array2<f64> = array![[1., 0.], [0., 1.], [1., 1.]];
        let err = LeastSquares::new(A, array![1., 2.]).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                what: "b",
                expected: 3,
                found: 2
            }
        );
    }
}
