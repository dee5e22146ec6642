use super::{combine, combined, Strategy};
use crate::error::Result;
use crate::oracle::{Guard, Oracle};
use crate::schedule::{extra_step, momentum};
use ndarray::prelude::*;
use ndarray::NdFloat;

/// Frank-Wolfe with Extrapolation (ExtraFW)
///
/// Borrows the extragradient idea: a first, predicting gradient at an extra
/// point picks the vertex the iterate moves towards, and a second, correcting
/// gradient at the new iterate refreshes the average and the vertex used to
/// build the next extra point [\[LZCGL21\]](#references). Costs two gradients
/// and two oracle calls per step; in exchange the averaged gradient tracks
/// $`\nabla f`$ at the iterate itself.
///
/// Algorithm
/// ---------
/// ```math
/// \begin{aligned}
/// \hat{g}_{k+1} &= (1 - \delta_k) g_k + \delta_k \nabla f(y_k) \\
/// \hat{v}_{k+1} &\in \mathrm{arg}\!\min_{v \in \mathcal{C}} \langle \hat{g}_{k+1}, v \rangle \\
/// x_{k+1} &= (1 - \delta_k) x_k + \delta_k \hat{v}_{k+1} \\
/// g_{k+1} &= (1 - \delta_k) g_k + \delta_k \nabla f(x_{k+1}) \\
/// v_{k+1} &\in \mathrm{arg}\!\min_{v \in \mathcal{C}} \langle g_{k+1}, v \rangle \\
/// y_{k+1} &= (1 - \delta_{k+1}) x_{k+1} + \delta_{k+1} v_{k+1}
/// \end{aligned}
/// ```
/// with $`\delta_k = 2/(k+2)`$, $`y_0 = x_0`$ and $`g_0 = 0`$.
///
/// References
/// ----------
/// \[LZCGL21\]: [ Li B, Zhang M, Coutino M, Giannakis GB, Leus G,
///              "Enhancing Frank Wolfe with an Extra Subproblem",
///              AAAI Conference on Artificial Intelligence, vol 35, 2021 ](https://ojs.aaai.org/index.php/AAAI/article/view/17012)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtraFrankWolfe;

/// Carried between ExtraFW steps
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraFwState<S> {
    /// Extra point $`y_k`$ where the next predicting gradient is taken
    z: Array1<S>,
    /// Corrected gradient average $`g_k`$
    g: Array1<S>,
}

impl<S: NdFloat> ExtraFwState<S> {
    pub fn extra_point(&self) -> ArrayView1<'_, S> {
        self.z.view()
    }

    pub fn averaged_gradient(&self) -> ArrayView1<'_, S> {
        self.g.view()
    }
}

impl<S, P> Strategy<S, P> for ExtraFrankWolfe
where
    S: NdFloat,
    P: Oracle<S>,
{
    type State = ExtraFwState<S>;

    fn name(&self) -> &'static str {
        "extrafw"
    }

    fn init(&self, x0: ArrayView1<S>) -> Self::State {
        ExtraFwState {
            z: x0.to_owned(),
            g: Array1::zeros(x0.raw_dim()),
        }
    }

    fn step(
        &self,
        x: &mut Array1<S>,
        state: &mut ExtraFwState<S>,
        k: usize,
        oracle: &Guard<'_, S, P>,
    ) -> Result<Option<S>> {
        let delta = momentum(k);

        // predict
        let grad_z = oracle.grad(state.z.view())?;
        let g_hat = combined(state.g.view(), grad_z.view(), delta);
        let v_hat = oracle.lmo(g_hat.view())?;
        combine(x, v_hat.view(), delta);

        // correct
        let grad_x = oracle.grad(x.view())?;
        combine(&mut state.g, grad_x.view(), delta);
        let v = oracle.lmo(state.g.view())?;
        state.z = combined(x.view(), v.view(), extra_step(k));
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fw::{FrankWolfe, Optimizer};
    use crate::oracle::mock::l1_distance;
    use approx::assert_abs_diff_eq;

    #[test]
    fn first_step_by_hand() {
        let problem = l1_distance();
        let mut opt = Optimizer::new(
            Array1::zeros(5),
            &problem,
            ExtraFrankWolfe,
            Config::default(),
        )
        .unwrap();
        let report = opt.step().unwrap();
        // the predicting step at y_0 = x_0 is a plain Frank-Wolfe step
        assert_eq!(report.iterate, array![1., 0., 0., 0., 0.]);
        assert_eq!(report.gap, None);
        // g_1 = grad f(e_1) = [0.4, 1.2, -0.6, 0, -0.2], so v_1 = -e_2
        assert_abs_diff_eq!(
            opt.state().averaged_gradient(),
            array![0.4, 1.2, -0.6, 0., -0.2],
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            opt.state().extra_point(),
            array![1. / 3., -2. / 3., 0., 0., 0.],
            epsilon = 1e-15
        );
    }

    #[test]
    fn second_step_departs_from_frank_wolfe() {
        let problem = l1_distance();
        let mut extra = Optimizer::new(
            Array1::zeros(5),
            &problem,
            ExtraFrankWolfe,
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
        extra.step().unwrap();
        fw.step().unwrap();
        // g_hat_2 = g_1/3 + 2/3 grad f(y_1), whose largest entry is -0.6 at index 2
        let report = extra.step().unwrap();
        assert_abs_diff_eq!(report.iterate, array![1. / 3., 0., 2. / 3., 0., 0.], epsilon = 1e-15);
        assert_abs_diff_eq!(
            fw.step().unwrap().iterate,
            array![1. / 3., -2. / 3., 0., 0., 0.],
            epsilon = 1e-15
        );
    }

    #[test]
    fn reset_restores_the_start() {
        let problem = l1_distance();
        let mut opt = Optimizer::new(
            Array1::zeros(5),
            &problem,
            ExtraFrankWolfe,
            Config::default(),
        )
        .unwrap();
        opt.run(7, 0.).unwrap();
        opt.reset();
        assert_eq!(opt.iter(), 0);
        assert_eq!(opt.x(), Array1::<f64>::zeros(5));
        assert_eq!(opt.state().extra_point(), Array1::<f64>::zeros(5));
        assert_eq!(opt.state().averaged_gradient(), Array1::<f64>::zeros(5));
    }
}
