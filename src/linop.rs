//! Abstract Linear Operators and Adjoints
//!
//! Used by the data-fit losses, which only ever need $`Ax`$ and $`A^T r`$.

use std::marker::PhantomData;

use ndarray::prelude::*;
use ndarray::{Data, NdFloat};
use num_traits::{Float, NumCast, Zero};

pub trait LinearOperator {
    type Elem: NdFloat;

    /// (rows, cols)
    fn shape(&self) -> (usize, usize);

    /// Apply operator out-place
    fn apply(&self, x: ArrayView1<Self::Elem>) -> Array1<Self::Elem>;

    /// Apply the adjoint out-place
    fn apply_adjoint(&self, r: ArrayView1<Self::Elem>) -> Array1<Self::Elem>;

    /// Largest singular value squared, by power iteration on $`A^TA`$.
    fn spectral_norm_sq(&self, maxiter: usize) -> Self::Elem {
        let zero = <Self::Elem as Zero>::zero();
        let dim = self.shape().1;
        if dim == 0 {
            return zero;
        }
        let n: Self::Elem = <Self::Elem as NumCast>::from(dim).unwrap();
        let mut v = Array1::from_elem(dim, Float::recip(Float::sqrt(n)));
        let mut lambda = zero;
        for _iter in 0..maxiter {
            let w = self.apply_adjoint(self.apply(v.view()).view());
            let norm: Self::Elem = Float::sqrt(w.dot(&w));
            if norm == zero {
                return zero;
            }
            lambda = norm;
            v = w / norm;
        }
        lambda
    }
}

impl<A, S> LinearOperator for ArrayBase<S, Ix2>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    type Elem = A;

    fn shape(&self) -> (usize, usize) {
        self.dim()
    }

    #[inline]
    fn apply(&self, x: ArrayView1<A>) -> Array1<A> {
        self.dot(&x)
    }

    #[inline]
    fn apply_adjoint(&self, r: ArrayView1<A>) -> Array1<A> {
        self.t().dot(&r)
    }
}

/// Diagonal operator, its own adjoint
#[derive(Debug, Clone)]
pub struct Diagonal<A> {
    diag: Array1<A>,
}

impl<A: NdFloat> Diagonal<A> {
    #[must_use]
    pub fn new(diag: Array1<A>) -> Diagonal<A> {
        Diagonal { diag }
    }
}

impl<A: NdFloat> LinearOperator for Diagonal<A> {
    type Elem = A;

    fn shape(&self) -> (usize, usize) {
        (self.diag.len(), self.diag.len())
    }

    #[inline]
    fn apply(&self, x: ArrayView1<A>) -> Array1<A> {
        &self.diag * &x
    }

    #[inline]
    fn apply_adjoint(&self, r: ArrayView1<A>) -> Array1<A> {
        &self.diag * &r
    }

    fn spectral_norm_sq(&self, _maxiter: usize) -> A {
        self.diag
            .iter()
            .fold(A::zero(), |acc, &d| acc.max(d * d))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Identity<A> {
    dim: usize,
    phantom: PhantomData<*const A>,
}

impl<A> Identity<A> {
    #[must_use]
    pub fn new(dim: usize) -> Identity<A> {
        Identity {
            dim,
            phantom: PhantomData,
        }
    }
}

impl<A: NdFloat> LinearOperator for Identity<A> {
    type Elem = A;

    fn shape(&self) -> (usize, usize) {
        (self.dim, self.dim)
    }

    #[inline]
    fn apply(&self, x: ArrayView1<A>) -> Array1<A> {
        x.to_owned()
    }

    #[inline]
    fn apply_adjoint(&self, r: ArrayView1<A>) -> Array1<A> {
        r.to_owned()
    }

    fn spectral_norm_sq(&self, _maxiter: usize) -> A {
        A::one()
    }
}
