//! Derivative-free minimization of a scalar function on an interval, used by
//! the line-search step rule
use ndarray::NdFloat; // includes LinalgScalar and ScalarOperand

/// Golden Section Search
///
/// Minimizes a unimodal scalar function _func_ on the interval given by _a_,
/// _b_ by shrinking it by the golden ratio each step, until it is narrower
/// than _tol_. See
/// [Wikipedia](https://en.wikipedia.org/wiki/Golden-section_search)
/// for more info.
///
/// The endpoints are compared against the final interior point, so a
/// minimum on the boundary (the common case for Frank-Wolfe steps, where a
/// full step $`\gamma = 1`$ is often optimal) is returned exactly.
///
/// _func_ may fail; the first error aborts the search and is returned.
pub fn golden_section<S, E>(
    mut func: impl FnMut(S) -> Result<S, E>,
    a: S,
    b: S,
    tol: S,
) -> Result<S, E>
where
    S: NdFloat,
{
    // 1 / phi = 0.61803398875 = (sqrt(5) - 1)/2
    let invphi = S::from((5.0_f64.sqrt() - 1.) / 2.).unwrap();
    // 1 / phi^2 = 0.38196601125 = 1 - invphi
    let invphi2 = S::from((3. - 5.0_f64.sqrt()) / 2.).unwrap();

    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let mut a = lo;
    let mut width = hi - lo;
    if width <= tol {
        return Ok((lo + hi) / S::from(2).unwrap());
    }

    // steps needed to get below tolerance
    let n = (tol / width).ln() / invphi.ln();
    let n = n.ceil().to_usize().unwrap_or(0);

    let mut c = a + invphi2 * width;
    let mut d = a + invphi * width;
    let mut f_c = func(c)?;
    let mut f_d = func(d)?;

    for _ in 0..n {
        width = invphi * width;
        if f_c < f_d {
            d = c;
            f_d = f_c;
            c = a + invphi2 * width;
            f_c = func(c)?;
        } else {
            a = c;
            c = d;
            f_c = f_d;
            d = a + invphi * width;
            f_d = func(d)?;
        }
    }

    let (mut best, mut f_best) = if f_c < f_d { (c, f_c) } else { (d, f_d) };
    for &end in &[lo, hi] {
        let f_end = func(end)?;
        if f_end < f_best {
            best = end;
            f_best = f_end;
        }
    }
    Ok(best)
}
