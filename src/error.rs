//! Errors raised while driving an optimizer
//!
//! Every variant is fatal: the iteration is deterministic, so a failure is a
//! programming or input error and is never retried.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A vector handed back by (or to) the oracle has the wrong length.
    #[error("dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// NaN or infinity in a gradient, objective value or iterate.
    #[error("non-finite {what} at iteration {iter}")]
    NonFiniteValue { what: &'static str, iter: usize },

    /// The linear minimization oracle returned a point outside the feasible set.
    #[error("linear minimization oracle returned an infeasible point at iteration {iter}")]
    OracleContractViolation { iter: usize },

    /// The short-step rule needs the Lipschitz constant of the gradient.
    #[error("step rule requires the smoothness constant of the loss, but none is known")]
    MissingSmoothness,

    #[error("unknown method {0:?}, expected one of fw, afw, extrafw")]
    UnknownMethod(String),

    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_step() {
        let err = Error::NonFiniteValue {
            what: "gradient",
            iter: 7,
        };
        assert_eq!(err.to_string(), "non-finite gradient at iteration 7");

        let err = Error::DimensionMismatch {
            what: "vertex",
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch in vertex: expected 3, found 2"
        );
    }
}
