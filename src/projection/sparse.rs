use std::cmp::Ordering;

use getset::{CopyGetters, Getters};
use nalgebra::{Dyn, OVector, RealField};

use super::{simplex::simplex_threshold, Projection};

/// Projects `x` onto the sparse scaled simplex
/// `{y ≥ 0 : Σy = σ, ‖y‖₀ ≤ k}` using the greedy selector and simplex
/// projector (GSSP).
///
/// The `k` coordinates with the largest *values* are selected and projected
/// onto the simplex of size `σ`, all other coordinates are set to zero. The
/// greedy selection gives the exact projection onto this (non-convex) set.
/// Ties are resolved in favor of the lowest index.
///
/// # Panics
///
/// Panics if `k` is zero, `sigma` is not positive and finite or `x` is empty.
///
/// # References
///
/// \[1\] [Sparse projections onto the
/// simplex](https://proceedings.mlr.press/v28/kyrillidis13.html)
pub fn gssp<T: RealField + Copy>(x: &OVector<T, Dyn>, k: usize, sigma: T) -> OVector<T, Dyn> {
    assert!(x.nrows() > 0, "empty vector");
    assert!(k > 0, "sparsity must be positive");
    assert!(
        sigma.is_finite() && sigma > T::zero(),
        "sigma must be positive and finite"
    );

    let support = largest(x.iter().copied(), k);
    let tau = simplex_threshold(support.iter().map(|&i| x[i]), sigma);

    let zero = T::zero();
    let mut y = OVector::<T, Dyn>::zeros(x.nrows());
    for i in support {
        y[i] = (x[i] - tau).max(zero);
    }

    y
}

/// Projects `x` onto the set of vectors with at most `k` non-zero coordinates.
///
/// The `k` coordinates with the largest magnitude are kept, the others are set
/// to zero. Ties are resolved in favor of the lowest index.
///
/// # Panics
///
/// Panics if `k` is zero.
pub fn hard_threshold<T: RealField + Copy>(x: &OVector<T, Dyn>, k: usize) -> OVector<T, Dyn> {
    assert!(k > 0, "sparsity must be positive");

    let support = largest(x.iter().map(|xi| xi.abs()), k);

    let mut y = OVector::<T, Dyn>::zeros(x.nrows());
    for i in support {
        y[i] = x[i];
    }

    y
}

/// Projects `x` onto the set of vectors whose non-zero coordinates lie in at
/// most `k` of the given groups.
///
/// The `k` groups with the largest Euclidean norm are kept, coordinates of the
/// other groups are set to zero. Coordinates that do not belong to any group
/// are always zero in the output. Ties are resolved in favor of the group
/// given first.
///
/// # Panics
///
/// Panics if `k` is zero or if a group refers to a coordinate out of the
/// dimension of `x`.
pub fn group_hard_threshold<T: RealField + Copy>(
    x: &OVector<T, Dyn>,
    groups: &Groups,
    k: usize,
) -> OVector<T, Dyn> {
    assert!(k > 0, "sparsity must be positive");
    assert!(
        groups.max_index().map_or(true, |max| max < x.nrows()),
        "group index out of range"
    );

    let zero = T::zero();
    let norms = groups.iter().map(|group| {
        group
            .iter()
            .fold(zero, |acc, &i| acc + x[i] * x[i])
    });

    let mut y = OVector::<T, Dyn>::zeros(x.nrows());
    for g in largest(norms, k) {
        for &i in &groups.groups[g] {
            y[i] = x[i];
        }
    }

    y
}

/// Returns indices of the `k` largest keys, resolving ties in favor of the
/// lowest index.
fn largest<T, I>(keys: I, k: usize) -> Vec<usize>
where
    T: RealField + Copy,
    I: IntoIterator<Item = T>,
{
    let keys = keys.into_iter().collect::<Vec<_>>();
    let mut indices = (0..keys.len()).collect::<Vec<_>>();

    // Stable sort keeps the lower index first among equal keys.
    indices.sort_by(|&a, &b| {
        keys[b]
            .partial_cmp(&keys[a])
            .unwrap_or(Ordering::Equal)
    });
    indices.truncate(k);
    indices
}

/// Disjoint groups of coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groups {
    groups: Vec<Vec<usize>>,
}

impl Groups {
    /// Creates groups from the lists of coordinate indices.
    ///
    /// # Panics
    ///
    /// Panics if a group is empty or if the groups overlap.
    pub fn new(groups: Vec<Vec<usize>>) -> Self {
        let mut seen = groups.iter().flatten().copied().collect::<Vec<_>>();
        seen.sort_unstable();
        let total = seen.len();
        seen.dedup();

        assert!(groups.iter().all(|g| !g.is_empty()), "empty group");
        assert!(seen.len() == total, "groups overlap");

        Self { groups }
    }

    /// Creates groups of consecutive coordinates with given sizes.
    ///
    /// ```rust
    /// use kotva::projection::Groups;
    ///
    /// let groups = Groups::contiguous(&[2, 1, 3]);
    /// assert_eq!(groups, Groups::new(vec![vec![0, 1], vec![2], vec![3, 4, 5]]));
    /// ```
    pub fn contiguous(sizes: &[usize]) -> Self {
        let mut start = 0;
        let groups = sizes
            .iter()
            .map(|&size| {
                let group = (start..start + size).collect();
                start += size;
                group
            })
            .collect();

        Self::new(groups)
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Determines whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterates over the groups.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.groups.iter().map(|group| group.as_slice())
    }

    fn max_index(&self) -> Option<usize> {
        self.groups.iter().flatten().copied().max()
    }
}

/// Projection onto the sparse scaled simplex. See [`gssp`].
#[derive(Debug, Clone, Copy, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct SparseSimplex<T: RealField + Copy> {
    /// Maximal number of non-zero coordinates.
    sparsity: usize,
    /// Sum of the coordinates.
    sigma: T,
}

impl<T: RealField + Copy> SparseSimplex<T> {
    /// Creates the projection with given sparsity and simplex size.
    ///
    /// # Panics
    ///
    /// Panics if `sparsity` is zero or `sigma` is not positive and finite.
    pub fn new(sparsity: usize, sigma: T) -> Self {
        assert!(sparsity > 0, "sparsity must be positive");
        assert!(
            sigma.is_finite() && sigma > T::zero(),
            "sigma must be positive and finite"
        );

        Self { sparsity, sigma }
    }
}

impl<T: RealField + Copy> Projection<T> for SparseSimplex<T> {
    fn project(&self, x: &OVector<T, Dyn>) -> OVector<T, Dyn> {
        gssp(x, self.sparsity, self.sigma)
    }
}

/// Projection onto vectors with limited number of non-zero coordinates. See
/// [`hard_threshold`].
#[derive(Debug, Clone, Copy, CopyGetters)]
pub struct Sparse {
    /// Maximal number of non-zero coordinates.
    #[getset(get_copy = "pub")]
    sparsity: usize,
}

impl Sparse {
    /// Creates the projection with given sparsity.
    ///
    /// # Panics
    ///
    /// Panics if `sparsity` is zero.
    pub fn new(sparsity: usize) -> Self {
        assert!(sparsity > 0, "sparsity must be positive");
        Self { sparsity }
    }
}

impl<T: RealField + Copy> Projection<T> for Sparse {
    fn project(&self, x: &OVector<T, Dyn>) -> OVector<T, Dyn> {
        hard_threshold(x, self.sparsity)
    }
}

/// Projection onto vectors with limited number of active groups. See
/// [`group_hard_threshold`].
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct GroupSparse {
    /// Groups of coordinates.
    #[getset(get = "pub")]
    groups: Groups,
    /// Maximal number of active groups.
    #[getset(get_copy = "pub")]
    sparsity: usize,
}

impl GroupSparse {
    /// Creates the projection with given groups and group sparsity.
    ///
    /// # Panics
    ///
    /// Panics if `sparsity` is zero.
    pub fn new(groups: Groups, sparsity: usize) -> Self {
        assert!(sparsity > 0, "sparsity must be positive");
        Self { groups, sparsity }
    }
}

impl<T: RealField + Copy> Projection<T> for GroupSparse {
    fn project(&self, x: &OVector<T, Dyn>) -> OVector<T, Dyn> {
        group_hard_threshold(x, &self.groups, self.sparsity)
    }
}
