//! Projection-based comparators
//!
//! Projected gradient descent and Nesterov's accelerated gradient, for
//! measuring the conditional gradient methods against. They step along the
//! gradient and then project back, so they need an oracle that also implements
//! [`Projection`](crate::oracle::Projection), and the smoothness constant
//! $`L`$ of the loss. Neither reports a duality gap.
//!
//! Both plug into the same [`Optimizer`](crate::fw::Optimizer) as the
//! Frank-Wolfe family, so traces are directly comparable.

mod gd;
pub use gd::*;

mod nag;
pub use nag::*;
