//! The `ndarray-fw` crate provides projection-free optimization algorithms
//! for minimizing a smooth convex function of an `ndarray` over a compact
//! convex set.
//!
//! It includes the conditional gradient family:
//! - Frank-Wolfe, with agnostic, short-step and line-search step sizes
//! - Momentum-guided Frank-Wolfe (AFW)
//! - Frank-Wolfe with Extrapolation (ExtraFW)
//!
//! and, for comparison, the projection-based methods
//! - Projected Gradient Descent
//! - Nesterov's Accelerated Gradient
//!
//! Problems are given as an [`Oracle`](oracle::Oracle): a gradient and a
//! linear minimization oracle over the feasible set. Ready-made losses
//! (squared distance, least squares, logistic regression) and sets (L1 and L2
//! balls, the simplex, the k-support norm ball) can be combined with
//! [`Problem`](oracle::Problem), or the trait can be implemented directly.
//!
//! ```
//! use ndarray::array;
//! use ndarray_fw::{Config, L1Ball, Method, Problem, SquaredDistance};
//!
//! let problem = Problem::new(
//!     SquaredDistance::new(array![0.8, -0.6, 0.3]),
//!     L1Ball::new(1.0).unwrap(),
//! );
//! let trace = Method::Afw
//!     .run(array![0., 0., 0.], &problem, Config::default())
//!     .unwrap();
//! assert_eq!(trace.steps(), 200);
//! ```
//!
//! Every method is deterministic: the same problem, starting point and
//! configuration give bit-identical traces.

#![cfg_attr(all(rustc_nightly, test), feature(test))]
#[cfg(all(rustc_nightly, test))]
extern crate test;

pub mod config;
pub mod constraint;
pub mod direct;
pub mod error;
pub mod fw;
pub mod linop;
pub mod loss;
pub mod oracle;
pub mod prox;
pub mod schedule;

pub use config::{Config, StepRule};
pub use constraint::{ConstraintSet, KSupportBall, L1Ball, L2Ball, Project, Simplex};
pub use error::{Error, Result};
pub use fw::{ExtraFrankWolfe, FrankWolfe, Method, MomentumFrankWolfe, Optimizer, Strategy, Trace};
pub use loss::{LeastSquares, Logistic, Loss, SquaredDistance};
pub use oracle::{Oracle, Problem, Projection};
pub use prox::{Nesterov, ProjectedGradient};
