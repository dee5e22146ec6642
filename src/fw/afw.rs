use super::{combine, combined, Strategy};
use crate::error::Result;
use crate::oracle::{Guard, Oracle};
use crate::schedule::momentum;
use ndarray::prelude::*;
use ndarray::NdFloat;

/// Momentum-guided Frank-Wolfe (AFW) with parameter-free step sizes
///
/// The gradient is evaluated at an extrapolated point $`y_k`$ rather than at
/// the iterate, and the oracle is called on a running average of those
/// gradients instead of the latest one [\[LCGL21\]](#references). On
/// feasible sets with enough curvature (e.g. Euclidean balls) this improves the
/// rate from $`O(1/k)`$ to $`O(1/k^2)`$; in general it matches Frank-Wolfe.
///
/// Algorithm
/// ---------
/// ```math
/// \begin{aligned}
/// y_k &= (1 - \delta_k) x_k + \delta_k v_k \\
/// g_{k+1} &= (1 - \delta_k) g_k + \delta_k \nabla f(y_k) \\
/// v_{k+1} &\in \mathrm{arg}\!\min_{v \in \mathcal{C}} \langle g_{k+1}, v \rangle \\
/// x_{k+1} &= (1 - \delta_k) x_k + \delta_k v_{k+1}
/// \end{aligned}
/// ```
/// where $`\delta_k = 2/(k+2)`$, $`v_0 = x_0`$ and $`g_0 = 0`$. Since
/// $`\delta_0 = 1`$ the initial $`g_0`$ never enters the iteration.
///
/// One gradient and one oracle call per step. No duality gap is reported:
/// certifying one would need a second oracle call.
///
/// References
/// ----------
/// \[LCGL21\]: [ Li B, Coutino M, Giannakis GB, Leus G,
///             "A Momentum-Guided Frank-Wolfe Algorithm",
///             IEEE Transactions on Signal Processing, vol 69, 2021 ](https://ieeexplore.ieee.org/abstract/document/9457128)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MomentumFrankWolfe;

/// Carried between AFW steps
#[derive(Debug, Clone, PartialEq)]
pub struct AfwState<S> {
    /// Last vertex $`v_k`$
    v: Array1<S>,
    /// Averaged gradient $`g_k`$
    g: Array1<S>,
    /// Last extrapolated point $`y_{k-1}`$, $`x_0`$ before the first step
    y: Array1<S>,
}

impl<S: NdFloat> AfwState<S> {
    pub fn vertex(&self) -> ArrayView1<'_, S> {
        self.v.view()
    }

    pub fn averaged_gradient(&self) -> ArrayView1<'_, S> {
        self.g.view()
    }

    pub fn extrapolated(&self) -> ArrayView1<'_, S> {
        self.y.view()
    }
}

impl<S, P> Strategy<S, P> for MomentumFrankWolfe
where
    S: NdFloat,
    P: Oracle<S>,
{
    type State = AfwState<S>;

    fn name(&self) -> &'static str {
        "afw"
    }

    fn init(&self, x0: ArrayView1<S>) -> Self::State {
        AfwState {
            v: x0.to_owned(),
            g: Array1::zeros(x0.raw_dim()),
            y: x0.to_owned(),
        }
    }

    fn step(
        &self,
        x: &mut Array1<S>,
        state: &mut AfwState<S>,
        k: usize,
        oracle: &Guard<'_, S, P>,
    ) -> Result<Option<S>> {
        let delta = momentum(k);

        state.y = combined(x.view(), state.v.view(), delta);
        let grad = oracle.grad(state.y.view())?;
        combine(&mut state.g, grad.view(), delta);

        state.v = oracle.lmo(state.g.view())?;
        combine(x, state.v.view(), delta);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, StepRule};
    use crate::constraint::L2Ball;
    use crate::fw::{FrankWolfe, Optimizer};
    use crate::loss::SquaredDistance;
    use crate::oracle::mock::l1_distance;
    use crate::oracle::Problem;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_step_matches_frank_wolfe() {
        // with delta_0 = 1 the extrapolated point is x_0 and g_1 = grad f(x_0)
        let problem = l1_distance();
        let mut afw = Optimizer::new(
            Array1::zeros(5),
            &problem,
            MomentumFrankWolfe,
            Config::default(),
        )
        .unwrap();
        let mut fw = Optimizer::new(
            Array1::zeros(5),
            &problem,
            FrankWolfe::default(),
            Config::default(),
        )
        .unwrap();
        let a = afw.step().unwrap();
        let b = fw.step().unwrap();
        assert_eq!(a.iterate, b.iterate);
        assert_eq!(a.gap, None);
        assert_eq!(afw.state().extrapolated(), Array1::<f64>::zeros(5));
        assert_eq!(afw.state().averaged_gradient(), problem.grad(Array1::zeros(5).view()));
    }

    #[test]
    fn second_step_by_hand() {
        let problem = l1_distance();
        let mut afw = Optimizer::new(
            Array1::zeros(5),
            &problem,
            MomentumFrankWolfe,
            Config::default(),
        )
        .unwrap();
        afw.step().unwrap();
        let report = afw.step().unwrap();
        // x_1 = v_1 = e_1, so y_1 = e_1 and g_2 = g_1/3 + 2/3 grad f(e_1)
        //     = [-1.6, 1.2, -0.6, 0, -0.2]/3 + 2/3 [0.4, 1.2, -0.6, 0, -0.2]
        //     = [-0.8/3, 3.6/3, -1.8/3, 0, -0.6/3], so v_2 = -e_2
        assert_abs_diff_eq!(
            afw.state().averaged_gradient(),
            array![-0.8 / 3., 1.2, -0.6, 0., -0.2],
            epsilon = 1e-12
        );
        assert_eq!(afw.state().vertex(), array![0., -1., 0., 0., 0.]);
        assert_abs_diff_eq!(report.iterate, array![1. / 3., -2. / 3., 0., 0., 0.], epsilon = 1e-15);
    }

    #[test]
    fn settles_sooner_than_frank_wolfe_on_a_ball() {
        let target: Array1<f64> = array![2.0, -1.0, 0.5];
        let problem = Problem::new(SquaredDistance::new(target.clone()), L2Ball::new(1.0).unwrap());
        let norm = target.dot(&target).sqrt();
        let fstar = (norm - 1.) * (norm - 1.);
        let x0 = array![0., 0., 1.];
        let afw = Optimizer::new(
            x0.clone(),
            &problem,
            MomentumFrankWolfe,
            Config::default(),
        )
        .unwrap()
        .run(200, 0.)
        .unwrap();
        let fw = Optimizer::new(
            x0,
            &problem,
            FrankWolfe::new(StepRule::Agnostic),
            Config::default(),
        )
        .unwrap()
        .run(200, 0.)
        .unwrap();
        let k_afw = afw.iterations_to(fstar, 1e-4).unwrap();
        let k_fw = fw.iterations_to(fstar, 1e-4).unwrap();
        assert!(k_afw < k_fw, "afw {} vs fw {}", k_afw, k_fw);
        assert!(afw.final_objective().unwrap() - fstar < fw.final_objective().unwrap() - fstar);
    }
}
