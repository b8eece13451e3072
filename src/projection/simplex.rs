use std::cmp::Ordering;

use getset::CopyGetters;
use nalgebra::{convert, Dyn, OVector, RealField};

use super::Projection;

/// Projects `x` onto the scaled simplex `{y ≥ 0 : Σy = σ}`.
///
/// The projection is exact and takes *O(d log d)* time for dimension *d*. The
/// coordinates are sorted in descending order *u*, then the largest index *ρ*
/// such that `u_ρ - (Σ_{i≤ρ} u_i - σ) / ρ > 0` determines the threshold
/// `τ = (Σ_{i≤ρ} u_i - σ) / ρ` and the result is `max(x_i - τ, 0)`.
///
/// # Panics
///
/// Panics if `sigma` is not positive and finite or if `x` is empty.
///
/// # References
///
/// \[1\] [Efficient Projections onto the l1-Ball for Learning in High
/// Dimensions](https://dl.acm.org/doi/10.1145/1390156.1390191)
pub fn sigma_simplex<T: RealField + Copy>(x: &OVector<T, Dyn>, sigma: T) -> OVector<T, Dyn> {
    assert!(x.nrows() > 0, "empty vector");
    assert_sigma(sigma);

    let tau = simplex_threshold(x.iter().copied(), sigma);
    let zero = T::zero();
    x.map(|xi| (xi - tau).max(zero))
}

/// Projection onto the scaled simplex `{y ≥ 0 : Σy = σ}`. See
/// [`sigma_simplex`].
#[derive(Debug, Clone, Copy, CopyGetters)]
pub struct SigmaSimplex<T: RealField + Copy> {
    /// Sum of the coordinates of all points in the simplex.
    #[getset(get_copy = "pub")]
    sigma: T,
}

impl<T: RealField + Copy> SigmaSimplex<T> {
    /// Creates the projection onto the simplex with given sum.
    ///
    /// # Panics
    ///
    /// Panics if `sigma` is not positive and finite.
    pub fn new(sigma: T) -> Self {
        assert_sigma(sigma);
        Self { sigma }
    }

    /// Creates the projection onto the probability simplex (`σ = 1`).
    pub fn unit() -> Self {
        Self::new(T::one())
    }
}

impl<T: RealField + Copy> Projection<T> for SigmaSimplex<T> {
    fn project(&self, x: &OVector<T, Dyn>) -> OVector<T, Dyn> {
        sigma_simplex(x, self.sigma)
    }
}

/// Computes the threshold *τ* of the simplex projection for given values.
///
/// The values must not be empty.
pub(super) fn simplex_threshold<T, I>(values: I, sigma: T) -> T
where
    T: RealField + Copy,
    I: IntoIterator<Item = T>,
{
    let mut u = values.into_iter().collect::<Vec<_>>();
    u.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    let zero = T::zero();

    // The condition always holds for the largest value.
    let mut tau = u[0] - sigma;
    let mut cumsum = zero;

    for (j, uj) in u.iter().copied().enumerate() {
        cumsum += uj;
        let candidate = (cumsum - sigma) / convert::<f64, T>((j + 1) as f64);

        if uj - candidate > zero {
            tau = candidate;
        }
    }

    tau
}

fn assert_sigma<T: RealField + Copy>(sigma: T) {
    assert!(
        sigma.is_finite() && sigma > T::zero(),
        "sigma must be positive and finite"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use nalgebra::{dvector, DVector};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rand_distr::{Distribution, Normal};

    fn is_feasible(y: &OVector<f64, Dyn>, sigma: f64, eps: f64) -> bool {
        y.iter().all(|yi| *yi >= 0.0) && (y.sum() - sigma).abs() <= eps
    }

    #[test]
    fn basic() {
        let y = sigma_simplex(&dvector![100.0, 50.0], 1.0);
        assert_abs_diff_eq!(y, dvector![1.0, 0.0]);

        let y = sigma_simplex(&dvector![0.8, 0.0], 1.0);
        assert_abs_diff_eq!(y, dvector![0.9, 0.1], epsilon = 1e-12);

        let y = sigma_simplex(&dvector![1.0, 0.4, -0.3], 1.0);
        assert_abs_diff_eq!(y, dvector![0.8, 0.2, 0.0], epsilon = 1e-12);
    }

    #[test]
    fn equal_coordinates() {
        let y = sigma_simplex(&dvector![-3.0, -3.0, -3.0, -3.0], 2.0);
        assert_abs_diff_eq!(y, dvector![0.5, 0.5, 0.5, 0.5], epsilon = 1e-12);
    }

    #[test]
    fn one_dimensional() {
        let y = sigma_simplex(&dvector![-42.0], 3.0);
        assert_eq!(y, dvector![3.0]);
    }

    #[test]
    fn random_points_are_feasible() {
        let mut rng = StdRng::seed_from_u64(3);
        let normal = Normal::<f64>::new(0.0, 10.0).unwrap();

        for _ in 0..500 {
            let dim = rng.gen_range(1..40);
            let sigma: f64 = rng.gen_range(0.01..100.0);
            let x = DVector::from_fn(dim, |_, _| normal.sample(&mut rng));

            let y = sigma_simplex(&x, sigma);
            assert!(is_feasible(&y, sigma, 1e-9 * sigma.max(1.0)), "{:?}", y);
        }
    }

    #[test]
    fn idempotence() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let dim = rng.gen_range(1..40);
            let sigma: f64 = rng.gen_range(0.01..100.0);

            // Random point of the simplex with some zero coordinates.
            let mut y: DVector<f64> = DVector::from_fn(dim, |_, _| {
                if rng.gen_bool(0.3) {
                    0.0
                } else {
                    rng.gen_range(0.0..1.0)
                }
            });
            if y.sum() == 0.0 {
                y[0] = 1.0;
            }
            y *= sigma / y.sum();

            let z = sigma_simplex(&y, sigma);
            assert_abs_diff_eq!(z, y, epsilon = 1e-9 * sigma.max(1.0));
        }
    }

    #[test]
    fn nearest_point() {
        // The projection is no farther from the point than any other point of
        // the simplex.
        let mut rng = StdRng::seed_from_u64(11);
        let normal = Normal::<f64>::new(0.0, 3.0).unwrap();

        for _ in 0..200 {
            let x = DVector::from_fn(5, |_, _| normal.sample(&mut rng));
            let y = sigma_simplex(&x, 1.0);
            let dist = (&x - &y).norm();

            for _ in 0..20 {
                let z = sigma_simplex(&DVector::from_fn(5, |_, _| normal.sample(&mut rng)), 1.0);
                assert!(dist <= (&x - &z).norm() + 1e-12);
            }
        }
    }

    #[test]
    fn operator() {
        let simplex = SigmaSimplex::unit();
        assert_eq!(simplex.sigma(), 1.0);
        assert_eq!(simplex.project(&dvector![0.3, 0.7]), sigma_simplex(&dvector![0.3, 0.7], 1.0));
    }

    #[test]
    #[should_panic(expected = "sigma must be positive and finite")]
    fn invalid_sigma() {
        SigmaSimplex::new(0.0);
    }
}
