use super::{combine, combined, scalar, Strategy};
use crate::config::StepRule;
use crate::direct::golden_section;
use crate::error::Result;
use crate::oracle::{Guard, Oracle};
use crate::schedule::{fw_step, short_step};
use ndarray::prelude::*;
use ndarray::NdFloat;

/// Frank-Wolfe, a.k.a. the Conditional Gradient method
///
/// The baseline the momentum variants are measured against. Converges as
/// $`O(1/k)`$ for an $`L`$-smooth convex $`f`$ over a set of diameter $`D`$:
/// $`f(x_k) - f(x_*) \leq 2LD^2/(k+2)`$.
///
/// Algorithm
/// ---------
/// ```math
/// \begin{aligned}
/// g_k &= \nabla f(x_k) \\
/// v_k &\in \mathrm{arg}\!\min_{v \in \mathcal{C}} \langle g_k, v \rangle \\
/// x_{k+1} &= (1 - \gamma_k) x_k + \gamma_k v_k
/// \end{aligned}
/// ```
/// with $`\gamma_k`$ chosen by a [`StepRule`]. The duality gap
/// $`\langle g_k, x_k - v_k \rangle \geq f(x_k) - f(x_*)`$ is returned with
/// every step.
///
/// Parameters
/// ----------
/// - __step:__  rule for $`\gamma_k`$; `Agnostic` needs no knowledge of the problem,
///               `ShortStep` needs the smoothness constant and decreases $`f`$
///               monotonically, `LineSearch` costs extra objective evaluations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrankWolfe {
    pub step: StepRule,
}

impl FrankWolfe {
    #[must_use]
    pub fn new(step: StepRule) -> Self {
        FrankWolfe { step }
    }
}

impl<S, P> Strategy<S, P> for FrankWolfe
where
    S: NdFloat,
    P: Oracle<S>,
{
    type State = ();

    fn name(&self) -> &'static str {
        "fw"
    }

    fn init(&self, _x0: ArrayView1<S>) -> Self::State {}

    fn step(
        &self,
        x: &mut Array1<S>,
        _state: &mut (),
        k: usize,
        oracle: &Guard<'_, S, P>,
    ) -> Result<Option<S>> {
        let grad = oracle.grad(x.view())?;
        let v = oracle.lmo(grad.view())?;
        let dir = &v - &*x;
        let gap = -grad.dot(&dir);

        let gamma = match self.step {
            StepRule::Agnostic => fw_step(k),
            StepRule::ShortStep => short_step(gap, dir.dot(&dir), oracle.smoothness()?),
            StepRule::LineSearch { tol } => {
                let tol = scalar("tol", tol)?;
                let f = |gamma: S| oracle.objective(combined(x.view(), v.view(), gamma).view());
                golden_section(f, S::zero(), S::one(), tol)?
            }
        };

        combine(x, v.view(), gamma);
        Ok(Some(gap))
    }
}
