//! Uniform random permutations of row indices.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// A bijection over `[0, len)`, stored as the sequence of source indices in output order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    order: Vec<usize>,
}

impl Permutation {
    /// The identity permutation of `len` elements.
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
        }
    }

    /// A uniformly random permutation of `len` elements (Fisher-Yates).
    ///
    /// With `seed` set the result is reproducible; otherwise the thread-local
    /// entropy-seeded generator is used.
    #[must_use]
    pub fn random(len: usize, seed: Option<u64>) -> Self {
        let mut p = Self::identity(len);
        match seed {
            Some(s) => p.order.shuffle(&mut StdRng::seed_from_u64(s)),
            None => p.order.shuffle(&mut rand::thread_rng()),
        }
        p
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Borrow the elements of `items` in permuted order.
    ///
    /// # Panics
    /// Panics if `items` is shorter than the permutation.
    pub fn apply<'a, T>(&'a self, items: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
        self.order.iter().map(move |&i| &items[i])
    }
}
