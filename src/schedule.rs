//! Parameter schedules
//!
//! Every weight used by the update rules is a pure function of the step index
//! $`k`$ (plus, for the short step, quantities of the current iterate). None of
//! them expose a tunable hyperparameter.

use ndarray::NdFloat;

/// Convex-combination weight
/// ```math
/// \delta_k = \frac{2}{k+2}
/// ```
/// so $`\delta_0 = 1`$, $`\delta_1 = 2/3`$, $`\delta_2 = 1/2`$.
#[inline]
pub fn delta<S: NdFloat>(k: usize) -> S {
    let two = S::from(2.).unwrap();
    two / (S::from(k).unwrap() + two)
}

/// Step size of the baseline Frank-Wolfe update, $`\gamma_k = \delta_k`$.
#[inline]
pub fn fw_step<S: NdFloat>(k: usize) -> S {
    delta(k)
}

/// Momentum weight of the gradient average used by AFW and ExtraFW.
///
/// Both methods use the same $`\delta_k`$ for the extrapolated point, the
/// gradient average and the iterate update.
#[inline]
pub fn momentum<S: NdFloat>(k: usize) -> S {
    delta(k)
}

/// Weight of the second vertex when forming ExtraFW's next extra point,
/// $`\gamma'_k = \delta_{k+1}`$.
#[inline]
pub fn extra_step<S: NdFloat>(k: usize) -> S {
    delta(k + 1)
}

/// Short step $`\min(1, \mathrm{gap} / (L d^2))`$, zero when the vertex equals the iterate.
#[inline]
#[allow(non_snake_case)]
pub fn short_step<S: NdFloat>(gap: S, dist_sq: S, L: S) -> S {
    if dist_sq > S::zero() {
        (gap / (L * dist_sq)).min(S::one()).max(S::zero())
    } else {
        S::zero()
    }
}

/// Step of NAG's aggregated sequence, $`(k+2) / (2L)`$.
#[inline]
#[allow(non_snake_case)]
pub fn nag_aggregate_step<S: NdFloat>(k: usize, L: S) -> S {
    let two = S::from(2.).unwrap();
    (S::from(k).unwrap() + two) / (two * L)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fw_step_exact_values() {
        assert_eq!(fw_step::<f64>(0), 1.0);
        assert_eq!(fw_step::<f64>(1), 2.0 / 3.0);
        assert_eq!(fw_step::<f64>(2), 0.5);
        assert_eq!(fw_step::<f64>(8), 0.2);
        assert_eq!(fw_step::<f32>(2), 0.5f32);
    }

    #[test]
    fn schedules_are_pure() {
        for k in 0..100 {
            assert_eq!(fw_step::<f64>(k), fw_step::<f64>(k));
            assert_eq!(momentum::<f64>(k), delta::<f64>(k));
            assert_eq!(extra_step::<f64>(k), delta::<f64>(k + 1));
        }
    }

    #[test]
    fn delta_decreases_in_unit_interval() {
        let mut prev = 2.0;
        for k in 0..1000 {
            let d = delta::<f64>(k);
            assert!(d > 0.0 && d <= 1.0);
            assert!(d < prev);
            prev = d;
        }
    }

    #[test]
    fn short_step_is_clipped() {
        assert_eq!(short_step(10.0, 1.0, 2.0), 1.0);
        assert_eq!(short_step(1.0, 1.0, 4.0), 0.25);
        assert_eq!(short_step(1.0, 0.0, 4.0), 0.0);
        assert_eq!(short_step(-1.0, 1.0, 4.0), 0.0);
    }

    #[test]
    fn nag_aggregate_grows_linearly() {
        assert_eq!(nag_aggregate_step(0, 2.0), 0.5);
        assert_eq!(nag_aggregate_step(2, 2.0), 1.0);
    }
}
