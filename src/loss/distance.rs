use super::Loss;
use ndarray::prelude::*;
use ndarray::NdFloat;

/// Squared Euclidean distance to a target
///
/// ```math
/// f(x) = \|x - t\|_2^2, \qquad \nabla f(x) = 2(x - t), \qquad L = 2
/// ```
/// Minimizing it over a set is the Euclidean projection of $`t`$ onto that set.
#[derive(Debug, Clone)]
pub struct SquaredDistance<S> {
    target: Array1<S>,
}

impl<S: NdFloat> SquaredDistance<S> {
    #[must_use]
    pub fn new(target: Array1<S>) -> Self {
        SquaredDistance { target }
    }

    pub fn target(&self) -> ArrayView1<'_, S> {
        self.target.view()
    }
}

impl<S: NdFloat> Loss<S> for SquaredDistance<S> {
    fn dim(&self) -> usize {
        self.target.len()
    }

    fn value(&self, x: ArrayView1<S>) -> S {
        let r = &x - &self.target;
        r.dot(&r)
    }

    fn grad(&self, x: ArrayView1<S>) -> Array1<S> {
        (&x - &self.target) * S::from(2.).unwrap()
    }

    fn smoothness(&self) -> Option<S> {
        Some(S::from(2.).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_and_grad() {
        let loss = SquaredDistance::new(array![1., -2.]);
        let x = array![0., 0.];
        assert_eq!(loss.value(x.view()), 5.);
        assert_eq!(loss.grad(x.view()), array![-2., 4.]);
        assert_eq!(loss.smoothness(), Some(2.));
        assert_eq!(loss.dim(), 2);
        assert_eq!(loss.target(), array![1., -2.]);
    }
}
