//! The oracle layer
//!
//! Optimizers only see an [`Oracle`]: objective values, gradients and the
//! linear minimization oracle (LMO) of the feasible set. Any loss and any set can
//! be paired into one with [`Problem`]. Optimizers never call an oracle
//! directly; they go through a [`Guard`], which validates every returned vector.

use crate::constraint::{ConstraintSet, Project};
use crate::error::{Error, Result};
use crate::loss::Loss;
use ndarray::prelude::*;
use ndarray::NdFloat;

/// Loss plus feasible set, seen through first-order and linear-minimization oracles
///
/// Implementations must be pure: the same input always gives the same output.
pub trait Oracle<S: NdFloat> {
    /// Dimension of the ambient space
    fn dim(&self) -> usize;

    fn objective(&self, x: ArrayView1<S>) -> S;

    fn grad(&self, x: ArrayView1<S>) -> Array1<S>;

    /// A minimizer of $`\langle d, v \rangle`$ over the feasible set. Not
    /// necessarily unique.
    fn lmo(&self, direction: ArrayView1<S>) -> Array1<S>;

    /// Membership test, `None` when the set cannot be checked
    fn contains(&self, _x: ArrayView1<S>, _tol: S) -> Option<bool> {
        None
    }

    /// Lipschitz constant of the gradient, if known
    fn smoothness(&self) -> Option<S> {
        None
    }
}

/// Euclidean projection onto the feasible set, needed by the projection-based comparators
pub trait Projection<S: NdFloat>: Oracle<S> {
    fn project(&self, x: ArrayView1<S>) -> Array1<S>;
}

/// A [`Loss`] restricted to a [`ConstraintSet`]
#[derive(Debug, Clone)]
pub struct Problem<L, C> {
    pub loss: L,
    pub constraint: C,
}

impl<L, C> Problem<L, C> {
    #[must_use]
    pub fn new(loss: L, constraint: C) -> Self {
        Problem { loss, constraint }
    }
}

impl<S, L, C> Oracle<S> for Problem<L, C>
where
    S: NdFloat,
    L: Loss<S>,
    C: ConstraintSet<S>,
{
    fn dim(&self) -> usize {
        self.loss.dim()
    }

    fn objective(&self, x: ArrayView1<S>) -> S {
        self.loss.value(x)
    }

    fn grad(&self, x: ArrayView1<S>) -> Array1<S> {
        self.loss.grad(x)
    }

    fn lmo(&self, direction: ArrayView1<S>) -> Array1<S> {
        self.constraint.lmo(direction)
    }

    fn contains(&self, x: ArrayView1<S>, tol: S) -> Option<bool> {
        self.constraint.contains(x, tol)
    }

    fn smoothness(&self) -> Option<S> {
        self.loss.smoothness()
    }
}

impl<S, L, C> Projection<S> for Problem<L, C>
where
    S: NdFloat,
    L: Loss<S>,
    C: ConstraintSet<S> + Project<S>,
{
    fn project(&self, x: ArrayView1<S>) -> Array1<S> {
        self.constraint.project(x)
    }
}

impl<'a, S, P> Oracle<S> for &'a P
where
    S: NdFloat,
    P: Oracle<S> + ?Sized,
{
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn objective(&self, x: ArrayView1<S>) -> S {
        (**self).objective(x)
    }

    fn grad(&self, x: ArrayView1<S>) -> Array1<S> {
        (**self).grad(x)
    }

    fn lmo(&self, direction: ArrayView1<S>) -> Array1<S> {
        (**self).lmo(direction)
    }

    fn contains(&self, x: ArrayView1<S>, tol: S) -> Option<bool> {
        (**self).contains(x, tol)
    }

    fn smoothness(&self) -> Option<S> {
        (**self).smoothness()
    }
}

impl<'a, S, P> Projection<S> for &'a P
where
    S: NdFloat,
    P: Projection<S> + ?Sized,
{
    fn project(&self, x: ArrayView1<S>) -> Array1<S> {
        (**self).project(x)
    }
}

pub(crate) fn all_finite<S: NdFloat>(x: ArrayView1<S>) -> bool {
    x.iter().all(|v| v.is_finite())
}

/// Checked access to an oracle for one step
///
/// Every vector coming back is checked for length and finiteness, and, when
/// `feasibility_tol` is set and the oracle can tell, every vertex for
/// membership. The optimizer sets the tolerance unless the configuration opts
/// out. Failures carry the step index.
pub struct Guard<'a, S, P> {
    oracle: &'a P,
    iter: usize,
    feasibility_tol: Option<S>,
}

impl<'a, S, P> Guard<'a, S, P>
where
    S: NdFloat,
    P: Oracle<S>,
{
    pub fn new(oracle: &'a P, iter: usize, feasibility_tol: Option<S>) -> Self {
        Guard {
            oracle,
            iter,
            feasibility_tol,
        }
    }

    pub fn iter(&self) -> usize {
        self.iter
    }

    pub fn oracle(&self) -> &'a P {
        self.oracle
    }

    pub fn smoothness(&self) -> Result<S> {
        self.oracle.smoothness().ok_or(Error::MissingSmoothness)
    }

    fn check_vector(&self, v: &Array1<S>, what: &'static str) -> Result<()> {
        let expected = self.oracle.dim();
        if v.len() != expected {
            return Err(Error::DimensionMismatch {
                what,
                expected,
                found: v.len(),
            });
        }
        if !all_finite(v.view()) {
            return Err(Error::NonFiniteValue {
                what,
                iter: self.iter,
            });
        }
        Ok(())
    }

    pub fn grad(&self, x: ArrayView1<S>) -> Result<Array1<S>> {
        let g = self.oracle.grad(x);
        self.check_vector(&g, "gradient")?;
        Ok(g)
    }

    pub fn objective(&self, x: ArrayView1<S>) -> Result<S> {
        let f = self.oracle.objective(x);
        if f.is_finite() {
            Ok(f)
        } else {
            Err(Error::NonFiniteValue {
                what: "objective",
                iter: self.iter,
            })
        }
    }

    pub fn lmo(&self, direction: ArrayView1<S>) -> Result<Array1<S>> {
        let v = self.oracle.lmo(direction);
        self.check_vector(&v, "vertex")?;
        self.check_feasible(v.view())?;
        Ok(v)
    }

    /// Fails only if checking is enabled and the oracle reports `Some(false)`.
    pub fn check_feasible(&self, x: ArrayView1<S>) -> Result<()> {
        if let Some(tol) = self.feasibility_tol {
            if self.oracle.contains(x, tol) == Some(false) {
                return Err(Error::OracleContractViolation { iter: self.iter });
            }
        }
        Ok(())
    }

    /// Checks an iterate produced by the update rule.
    pub fn iterate(&self, x: &Array1<S>) -> Result<()> {
        self.check_vector(x, "iterate")
    }
}

impl<'a, S, P> Guard<'a, S, P>
where
    S: NdFloat,
    P: Projection<S>,
{
    pub fn project(&self, x: ArrayView1<S>) -> Result<Array1<S>> {
        let p = self.oracle.project(x);
        self.check_vector(&p, "projection")?;
        Ok(p)
    }
}
