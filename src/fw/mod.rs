//! Frank-Wolfe (Conditional Gradient) Methods
//!
//! For minimizing a smooth convex $`f`$ over a compact convex set
//! $`\mathcal{C}`$ that is easy to *linearly* minimize over, but expensive to
//! project onto, e.g. sparse or low-rank feasible regions:
//! ```math
//! \min_{x \in \mathcal{C}} f(x)
//! ```
//! Each method only touches $`\mathcal{C}`$ through the linear minimization
//! oracle, and every iterate is a convex combination of the starting point and
//! oracle outputs, so it never leaves the set.
//!
//! Three update rules are provided, each a small [`Strategy`]:
//! - [`FrankWolfe`]: the classical method, one gradient and one LMO per step
//! - [`MomentumFrankWolfe`] (AFW): gradient taken at an extrapolated point and
//!   averaged over steps, one gradient and one LMO per step
//! - [`ExtraFrankWolfe`] (ExtraFW): an extra gradient and an extra LMO per step
//!
//! An [`Optimizer`] owns the iterate and the strategy's state and records a
//! [`Trace`].

mod vanilla;
pub use vanilla::*;
mod afw;
pub use afw::*;
mod extra;
pub use extra::*;
mod trace;
pub use trace::*;

use crate::config::{Config, StepRule};
use crate::error::{Error, Result};
use crate::oracle::{all_finite, Guard, Oracle};
use ndarray::prelude::*;
use ndarray::{NdFloat, Zip};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `x <- (1 - w) x + w v`
pub(crate) fn combine<S: NdFloat>(x: &mut Array1<S>, v: ArrayView1<S>, w: S) {
    let keep = S::one() - w;
    Zip::from(x).and(&v).for_each(|xi, &vi| *xi = keep * *xi + w * vi);
}

/// `(1 - w) x + w v` into a new array
pub(crate) fn combined<S: NdFloat>(x: ArrayView1<S>, v: ArrayView1<S>, w: S) -> Array1<S> {
    let mut out = x.to_owned();
    combine(&mut out, v, w);
    out
}

/// Cast a configured `f64` into the working precision
pub(crate) fn scalar<S: NdFloat>(name: &'static str, value: f64) -> Result<S> {
    num_traits::cast(value).ok_or(Error::InvalidParameter { name, value })
}

/// One update rule of the family
///
/// A strategy is stateless; whatever it carries between steps lives in its
/// `State`, which the [`Optimizer`] owns.
pub trait Strategy<S: NdFloat, P: Oracle<S>> {
    type State: Clone;

    fn name(&self) -> &'static str;

    /// State before the first step, given the feasible starting point
    fn init(&self, x0: ArrayView1<S>) -> Self::State;

    /// Advance `x` from step `k` to `k + 1`, returning the duality gap at the
    /// old iterate if it came for free.
    fn step(
        &self,
        x: &mut Array1<S>,
        state: &mut Self::State,
        k: usize,
        oracle: &Guard<'_, S, P>,
    ) -> Result<Option<S>>;
}

/// What one call to [`Optimizer::step`] produced
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport<S> {
    /// Index of the new iterate
    pub iter: usize,
    pub iterate: Array1<S>,
    pub objective: S,
    pub gap: Option<S>,
}

/// Drives a [`Strategy`] against an [`Oracle`]
///
/// Single-threaded; the optimizer exclusively owns its iterate and state.
pub struct Optimizer<S, P, A>
where
    S: NdFloat,
    P: Oracle<S>,
    A: Strategy<S, P>,
{
    oracle: P,
    strategy: A,
    config: Config,
    x0: Array1<S>,
    x: Array1<S>,
    state: A::State,
    k: usize,
}

impl<S, P, A> Optimizer<S, P, A>
where
    S: NdFloat,
    P: Oracle<S>,
    A: Strategy<S, P>,
{
    /// Fails if `x0` has the wrong length, is not finite, or lies outside the
    /// feasible set of an oracle that can test membership (unless the
    /// configuration turned the check off).
    pub fn new(x0: Array1<S>, oracle: P, strategy: A, config: Config) -> Result<Self> {
        let expected = oracle.dim();
        if x0.len() != expected {
            return Err(Error::DimensionMismatch {
                what: "initial point",
                expected,
                found: x0.len(),
            });
        }
        if !all_finite(x0.view()) {
            return Err(Error::NonFiniteValue {
                what: "initial point",
                iter: 0,
            });
        }
        let optimizer = Optimizer {
            state: strategy.init(x0.view()),
            x: x0.clone(),
            x0,
            oracle,
            strategy,
            config,
            k: 0,
        };
        optimizer.guard()?.check_feasible(optimizer.x.view())?;
        Ok(optimizer)
    }

    fn feasibility_tol(&self) -> Result<Option<S>> {
        if self.config.check_feasibility {
            scalar("feasibility_tol", self.config.feasibility_tol).map(Some)
        } else {
            Ok(None)
        }
    }

    fn guard(&self) -> Result<Guard<'_, S, P>> {
        Ok(Guard::new(&self.oracle, self.k, self.feasibility_tol()?))
    }

    pub fn x(&self) -> ArrayView1<'_, S> {
        self.x.view()
    }

    pub fn state(&self) -> &A::State {
        &self.state
    }

    pub fn iter(&self) -> usize {
        self.k
    }

    pub fn oracle(&self) -> &P {
        &self.oracle
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Back to the state right after construction
    pub fn reset(&mut self) {
        self.x.assign(&self.x0);
        self.state = self.strategy.init(self.x0.view());
        self.k = 0;
    }

    /// Take one step of the update rule.
    pub fn step(&mut self) -> Result<StepReport<S>> {
        let tol = self.feasibility_tol()?;
        let guard = Guard::new(&self.oracle, self.k, tol);
        let gap = self
            .strategy
            .step(&mut self.x, &mut self.state, self.k, &guard)?;
        guard.iterate(&self.x)?;
        guard.check_feasible(self.x.view())?;
        let objective = guard.objective(self.x.view())?;
        if let Some(gap) = gap {
            if !gap.is_finite() {
                return Err(Error::NonFiniteValue {
                    what: "duality gap",
                    iter: self.k,
                });
            }
        }

        self.k += 1;
        let every = self.config.log_every;
        if every > 0 && self.k % every == 0 {
            tracing::debug!(
                method = self.strategy.name(),
                iter = self.k,
                objective = %objective,
                gap = ?gap,
                "step"
            );
        }
        Ok(StepReport {
            iter: self.k,
            iterate: self.x.clone(),
            objective,
            gap,
        })
    }

    /// Iterate until `max_iters` steps are taken or a reported duality gap is at
    /// or below `tolerance`.
    ///
    /// The trace starts with the current iterate, so a fresh optimizer records
    /// $`(x_0, f(x_0))`$ at iteration 0.
    pub fn run(&mut self, max_iters: usize, tolerance: S) -> Result<Trace<S>> {
        let method = self.strategy.name();
        let keep = self.config.keep_iterates;
        tracing::info!(method, max_iters, tolerance = %tolerance, start = self.k, "starting run");

        let f0 = self.guard()?.objective(self.x.view())?;
        let mut trace = Trace::new(method, self.x.clone());
        trace.push(self.k, &self.x, f0, None, keep);

        for _ in 0..max_iters {
            let report = match self.step() {
                Ok(report) => report,
                Err(err) => {
                    tracing::error!(method, iter = self.k, error = %err, "run aborted");
                    return Err(err);
                }
            };
            trace.push(report.iter, &report.iterate, report.objective, report.gap, keep);
            if let Some(gap) = report.gap {
                if gap <= tolerance {
                    trace.converged = true;
                    break;
                }
            }
        }

        tracing::info!(
            method,
            steps = trace.steps(),
            converged = trace.converged,
            objective = ?trace.final_objective(),
            "finished run"
        );
        Ok(trace)
    }

    /// [`run`](Self::run) with the budget and tolerance from the configuration
    pub fn run_with_config(&mut self) -> Result<Trace<S>> {
        let max_iters = self.config.max_iters;
        let tolerance = scalar("tolerance", self.config.tolerance)?;
        self.run(max_iters, tolerance)
    }
}

/// Conditional gradient variant, chosen by name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Method {
    /// [`FrankWolfe`]
    Fw {
        #[serde(default)]
        step: StepRule,
    },
    /// [`MomentumFrankWolfe`]
    Afw,
    /// [`ExtraFrankWolfe`]
    #[serde(rename = "extrafw")]
    ExtraFw,
}

impl Method {
    /// Build the chosen strategy and run it from `x0`.
    pub fn run<S, P>(self, x0: Array1<S>, oracle: P, config: Config) -> Result<Trace<S>>
    where
        S: NdFloat,
        P: Oracle<S>,
    {
        match self {
            Method::Fw { step } => {
                Optimizer::new(x0, oracle, FrankWolfe::new(step), config)?.run_with_config()
            }
            Method::Afw => {
                Optimizer::new(x0, oracle, MomentumFrankWolfe, config)?.run_with_config()
            }
            Method::ExtraFw => {
                Optimizer::new(x0, oracle, ExtraFrankWolfe, config)?.run_with_config()
            }
        }
    }

    /// Gradient evaluations and LMO calls per step
    pub fn oracle_calls_per_step(self) -> (usize, usize) {
        match self {
            Method::Fw { .. } | Method::Afw => (1, 1),
            Method::ExtraFw => (2, 2),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Fw { .. } => "fw",
            Method::Afw => "afw",
            Method::ExtraFw => "extrafw",
        };
        f.write_str(name)
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fw" | "frank_wolfe" => Ok(Method::Fw {
                step: StepRule::default(),
            }),
            "afw" => Ok(Method::Afw),
            "extrafw" | "extra_fw" => Ok(Method::ExtraFw),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}


#[cfg(all(rustc_nightly, test))]
mod benches {
    use super::*;
    use crate::oracle::mock::l1_distance;
    use test::Bencher;

    #[bench]
    fn fw_200_steps(b: &mut Bencher) {
        let problem = l1_distance();
        let method = Method::Fw { step: StepRule::Agnostic };
        b.iter(|| method.run(Array1::zeros(5), &problem, Config::default()));
    }

    #[bench]
    fn extrafw_200_steps(b: &mut Bencher) {
        let problem = l1_distance();
        b.iter(|| Method::ExtraFw.run(Array1::zeros(5), &problem, Config::default()));
    }
}
