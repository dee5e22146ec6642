//! Run configuration
//!
//! All knobs are passed explicitly at construction; nothing is global.

use serde::{Deserialize, Serialize};

/// How the baseline Frank-Wolfe method picks its step size $`\gamma_k`$.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum StepRule {
    /// ```math
    /// \gamma_k = \frac{2}{k+2}
    /// ```
    Agnostic,

    /// ```math
    /// \gamma_k = \min\left(1, \frac{\langle g_k, x_k - v_k \rangle}{L \|v_k - x_k\|_2^2}\right)
    /// ```
    /// Requires the smoothness constant $`L`$ of the loss.
    ShortStep,

    /// Golden section search of $`f((1-\gamma)x_k + \gamma v_k)`$ over $`[0, 1]`$
    LineSearch { tol: f64 },
}

impl Default for StepRule {
    fn default() -> Self {
        StepRule::Agnostic
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Iteration budget used by `Optimizer::run_with_config`
    pub max_iters: usize,
    /// Duality gap at or below which a run stops
    pub tolerance: f64,
    /// Verify every vertex and iterate against the oracle's membership test,
    /// when it has one. On by default; an infeasible vertex is fatal.
    pub check_feasibility: bool,
    pub feasibility_tol: f64,
    /// Keep every iterate in the trace. When false only the last one is kept.
    pub keep_iterates: bool,
    /// Emit a debug event every `log_every` steps (0 disables per-step events)
    pub log_every: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_iters: 200,
            tolerance: 0.0,
            check_feasibility: true,
            feasibility_tol: 1e-9,
            keep_iterates: true,
            log_every: 0,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Skip membership tests, e.g. for an expensive `contains`
    #[must_use]
    pub fn unchecked(mut self) -> Self {
        self.check_feasibility = false;
        self
    }

    #[must_use]
    pub fn checked(mut self, feasibility_tol: f64) -> Self {
        self.check_feasibility = true;
        self.feasibility_tol = feasibility_tol;
        self
    }

    #[must_use]
    pub fn with_keep_iterates(mut self, keep: bool) -> Self {
        self.keep_iterates = keep;
        self
    }

    #[must_use]
    pub fn with_log_every(mut self, every: usize) -> Self {
        self.log_every = every;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "max_iters": 50 }"#).unwrap();
        assert_eq!(cfg.max_iters, 50);
        assert_eq!(cfg.tolerance, 0.0);
        assert!(cfg.keep_iterates);
        assert!(cfg.check_feasibility);
        assert!(!Config::default().unchecked().check_feasibility);
    }

    #[test]
    fn step_rule_is_tagged() {
        let rule: StepRule =
            serde_json::from_str(r#"{ "rule": "line_search", "tol": 1e-6 }"#).unwrap();
        assert_eq!(rule, StepRule::LineSearch { tol: 1e-6 });

        let json = serde_json::to_string(&StepRule::ShortStep).unwrap();
        assert_eq!(json, r#"{"rule":"short_step"}"#);
    }

    #[test]
    fn builder_chain() {
        let cfg = Config::default()
            .with_max_iters(10)
            .with_tolerance(1e-4)
            .checked(1e-8)
            .with_log_every(5);
        assert_eq!(cfg.max_iters, 10);
        assert_eq!(cfg.tolerance, 1e-4);
        assert!(cfg.check_feasibility);
        assert_eq!(cfg.feasibility_tol, 1e-8);
        assert_eq!(cfg.log_every, 5);
    }
}
