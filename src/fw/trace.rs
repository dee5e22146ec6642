use ndarray::prelude::*;
use ndarray::NdFloat;
use serde::Serialize;

/// One row of a run: iteration 0 is the starting point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record<S> {
    pub iter: usize,
    pub objective: S,
    /// Duality gap at the iterate the step started from, if the method has one for free
    pub gap: Option<S>,
    /// `None` when the run was configured not to keep iterates
    pub iterate: Option<Array1<S>>,
}

/// Append-only history of a run, for reporting and plotting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace<S> {
    pub method: &'static str,
    pub records: Vec<Record<S>>,
    /// A gap at or below the tolerance stopped the run early
    pub converged: bool,
    /// Iterate after the last step, kept even when `records` drop them
    pub last: Array1<S>,
}

impl<S: NdFloat> Trace<S> {
    pub(crate) fn new(method: &'static str, x0: Array1<S>) -> Self {
        Trace {
            method,
            records: Vec::new(),
            converged: false,
            last: x0,
        }
    }

    pub(crate) fn push(
        &mut self,
        iter: usize,
        x: &Array1<S>,
        objective: S,
        gap: Option<S>,
        keep: bool,
    ) {
        self.records.push(Record {
            iter,
            objective,
            gap,
            iterate: if keep { Some(x.clone()) } else { None },
        });
        self.last.assign(x);
    }

    /// Number of steps taken (the starting point is not a step)
    pub fn steps(&self) -> usize {
        self.records.len().saturating_sub(1)
    }

    pub fn objectives(&self) -> Vec<S> {
        self.records.iter().map(|r| r.objective).collect()
    }

    pub fn final_objective(&self) -> Option<S> {
        self.records.last().map(|r| r.objective)
    }

    pub fn iterates(&self) -> impl Iterator<Item = ArrayView1<'_, S>> {
        self.records
            .iter()
            .filter_map(|r| r.iterate.as_ref().map(|x| x.view()))
    }

    /// First iteration from which the objective stays within `tol` of `reference`
    /// for the rest of the run
    pub fn iterations_to(&self, reference: S, tol: S) -> Option<usize> {
        let mut settled = None;
        for r in &self.records {
            if (r.objective - reference).abs() <= tol {
                settled.get_or_insert(r.iter);
            } else {
                settled = None;
            }
        }
        settled
    }
}
