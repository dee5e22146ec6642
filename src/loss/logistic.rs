#![allow(non_snake_case)]

use super::Loss;
use crate::error::{Error, Result};
use crate::linop::LinearOperator;
use ndarray::prelude::*;
use ndarray::NdFloat;

const POWER_ITERS: usize = 100;

/// Logistic regression loss with labels $`y_i \in \{-1, +1\}`$
///
/// ```math
/// f(x) = \frac1n \sum_{i=1}^n \log\left(1 + e^{-y_i \langle a_i, x \rangle}\right)
/// ```
/// where $`a_i`$ are the rows of $`A`$. Its gradient is
/// $`L = \sigma_1(A)^2 / 4n`$ Lipschitz.
#[derive(Debug, Clone)]
pub struct Logistic<S, T> {
    A: T,
    y: Array1<S>,
    L: S,
}

impl<S, T> Logistic<S, T>
where
    S: NdFloat,
    T: LinearOperator<Elem = S>,
{
    /// Fails if the operator's row count differs from the number of labels.
    pub fn new(A: T, y: Array1<S>) -> Result<Self> {
        let rows = A.shape().0;
        if rows != y.len() {
            return Err(Error::DimensionMismatch {
                what: "labels",
                expected: rows,
                found: y.len(),
            });
        }
        let four = S::from(4.).unwrap();
        let n = S::from(y.len().max(1)).unwrap();
        let L = A.spectral_norm_sq(POWER_ITERS) / (four * n);
        Ok(Logistic { A, y, L })
    }

    fn margins(&self, x: ArrayView1<S>) -> Array1<S> {
        self.A.apply(x) * &self.y
    }

    fn n(&self) -> S {
        S::from(self.y.len().max(1)).unwrap()
    }
}

/// $`\log(1 + e^{-m})`$ without overflow
fn softplus_neg<S: NdFloat>(m: S) -> S {
    if m > S::zero() {
        (-m).exp().ln_1p()
    } else {
        -m + m.exp().ln_1p()
    }
}

/// $`1 / (1 + e^{m})`$ without overflow
fn sigmoid_neg<S: NdFloat>(m: S) -> S {
    if m > S::zero() {
        let e = (-m).exp();
        e / (S::one() + e)
    } else {
        S::one() / (S::one() + m.exp())
    }
}

impl<S, T> Loss<S> for Logistic<S, T>
where
    S: NdFloat,
    T: LinearOperator<Elem = S>,
{
    fn dim(&self) -> usize {
        self.A.shape().1
    }

    fn value(&self, x: ArrayView1<S>) -> S {
        self.margins(x).mapv(softplus_neg).sum() / self.n()
    }

    fn grad(&self, x: ArrayView1<S>) -> Array1<S> {
        // d/dm log(1 + e^{-m}) = -sigmoid(-m)
        let weights = self.margins(x).mapv(sigmoid_neg) * &self.y;
        self.A.apply_adjoint(weights.view()) * (-S::one() / self.n())
    }

    fn smoothness(&self) -> Option<S> {
        Some(self.L)
    }
}
