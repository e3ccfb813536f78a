//! Utility functions for the Wisard crate.
//!
//! This module provides permutation helpers used by the address encoder and
//! small numeric helpers shared by the discriminator.

use rand::Rng;

/// Shuffle a slice of indices in-place using the Fisher-Yates algorithm.
///
/// # Examples
///
/// ```
/// use wisard::utils::shuffle_indices;
/// use rand::SeedableRng;
///
/// let mut indices = vec![0, 1, 2, 3, 4];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// shuffle_indices(&mut indices, &mut rng);
/// // indices is now shuffled
/// ```
pub fn shuffle_indices<R: Rng>(arr: &mut [usize], rng: &mut R) {
    for i in (1..arr.len()).rev() {
        let j = rng.gen_range(0..=i);
        arr.swap(i, j);
    }
}

/// Generate a uniformly random permutation of `[0, n)`.
///
/// # Examples
///
/// ```
/// use wisard::utils::random_permutation;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let mut perm = random_permutation(6, &mut rng);
/// perm.sort();
/// assert_eq!(perm, vec![0, 1, 2, 3, 4, 5]);
/// ```
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    shuffle_indices(&mut perm, rng);
    perm
}

/// Check that `perm` holds every index in `[0, perm.len())` exactly once.
pub fn is_permutation(perm: &[usize]) -> bool {
    let mut seen = vec![false; perm.len()];
    for &p in perm {
        if p >= perm.len() || seen[p] {
            return false;
        }
        seen[p] = true;
    }
    true
}

/// Compute the inverse of a permutation: `inv[perm[i]] == i`.
///
/// `perm` must be a valid permutation (see [`is_permutation`]).
///
/// # Examples
///
/// ```
/// use wisard::utils::invert_permutation;
///
/// assert_eq!(invert_permutation(&[2, 0, 1]), vec![1, 2, 0]);
/// ```
pub fn invert_permutation(perm: &[usize]) -> Vec<usize> {
    debug_assert!(is_permutation(perm));
    let mut inv = vec![0; perm.len()];
    for (i, &j) in perm.iter().enumerate() {
        inv[j] = i;
    }
    inv
}

/// Arithmetic mean of the values, or 0.0 for an empty sequence.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}
