//! Classifier - Label-keyed collection of discriminators.
//!
//! This module provides the `Classifier` trait, the surface every WiSARD-like
//! classifier exposes, and `Wisard`, the default implementation. A `Wisard`
//! keeps one discriminator per class label, created the first time the label
//! is recorded.
//!
//! # Usage Pattern
//!
//! ```ignore
//! wisard.record(&addresses, label)?;     // Learn
//! let scores = wisard.answers(&addresses)?;  // Score every known label
//! ```
//!
//! Picking the best label from `answers()` is left to the caller; when
//! several labels tie, `counts()` gives a finer, lexicographically comparable
//! description of each match.
//!
//! # Examples
//!
//! ```
//! use wisard::{Address, Classifier, Wisard};
//!
//! let obs = |values: [u64; 2]| values.map(Address::from);
//! let mut wisard = Wisard::new();
//! wisard.record(&obs([5, 9]), "X").unwrap();
//! wisard.record(&obs([1, 2]), "Y").unwrap();
//!
//! let scores = wisard.answers(&obs([5, 2])).unwrap();
//! assert_eq!(scores["X"], 1);
//! assert_eq!(scores["Y"], 1);
//! assert_eq!(wisard.answer_for(&obs([5, 9]), &"X").unwrap(), 2);
//! ```

use crate::address::Address;
use crate::discriminator::Discriminator;
use crate::neuron::{check_threshold, DictNeuron, Neuron};
use crate::{Result, WisardError};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Capability set of a WiSARD-like classifier over labels of type `L`.
pub trait Classifier<L> {
    /// Record the provided observation, relating it to the given label.
    fn record(&mut self, observation: &[Address], label: L) -> Result<()>;

    /// Returns how similar the observation is to every known label.
    fn answers(&self, observation: &[Address]) -> Result<HashMap<L, usize>>;

    /// Returns how similar the observation is to `label`.
    fn answer_for(&self, observation: &[Address], label: &L) -> Result<usize>;

    /// Returns the sorted match counts of the observation for every known label.
    fn counts(&self, observation: &[Address]) -> Result<HashMap<L, Vec<u64>>>;

    /// Returns the sorted match counts of the observation for `label`.
    fn counts_for(&self, observation: &[Address], label: &L) -> Result<Vec<u64>>;

    /// Bleach every class by the given threshold.
    fn bleach(&mut self, threshold: u64) -> Result<()>;

    /// Forget a class entirely.
    fn remove_class(&mut self, label: &L) -> Result<()>;
}

/// Shared constructor of fresh discriminators.
pub type DiscriminatorFactory<N> = Arc<dyn Fn() -> Discriminator<N> + Send + Sync>;

/// The default WiSARD classifier.
pub struct Wisard<L, N: Neuron = DictNeuron> {
    discriminators: HashMap<L, Discriminator<N>>,
    factory: DiscriminatorFactory<N>,
}

impl<L: Eq + Hash> Wisard<L, DictNeuron> {
    /// Create a classifier whose classes use the default discriminator.
    pub fn new() -> Self {
        Self::with_factory(Discriminator::new)
    }
}

impl<L: Eq + Hash> Default for Wisard<L, DictNeuron> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Eq + Hash, N: Neuron> Wisard<L, N> {
    /// Create a classifier whose classes are built by `factory`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wisard::{Address, Classifier, Discriminator, DictNeuron, Wisard};
    ///
    /// let mut wisard = Wisard::with_factory(|| Discriminator::with_factory(DictNeuron::new));
    /// wisard.record(&[3u64, 1, 4].map(Address::from), 0u8).unwrap();
    /// assert!(wisard.contains(&0));
    /// ```
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Discriminator<N> + Send + Sync + 'static,
    {
        Self {
            discriminators: HashMap::new(),
            factory: Arc::new(factory),
        }
    }

    /// Number of known classes.
    pub fn len(&self) -> usize {
        self.discriminators.len()
    }

    /// Check whether no class is known.
    pub fn is_empty(&self) -> bool {
        self.discriminators.is_empty()
    }

    /// Check whether `label` has a discriminator.
    pub fn contains(&self, label: &L) -> bool {
        self.discriminators.contains_key(label)
    }

    /// Known labels, in no particular order.
    pub fn labels(&self) -> impl Iterator<Item = &L> + '_ {
        self.discriminators.keys()
    }

    /// The discriminator of `label`, if known.
    pub fn discriminator(&self, label: &L) -> Option<&Discriminator<N>> {
        self.discriminators.get(label)
    }
}

impl<L: Eq + Hash + fmt::Debug, N: Neuron> Wisard<L, N> {
    fn get(&self, label: &L) -> Result<&Discriminator<N>> {
        self.discriminators
            .get(label)
            .ok_or_else(|| WisardError::LabelNotFound(format!("{:?}", label)))
    }
}

impl<L, N> Classifier<L> for Wisard<L, N>
where
    L: Eq + Hash + Clone + fmt::Debug,
    N: Neuron,
{
    fn record(&mut self, observation: &[Address], label: L) -> Result<()> {
        let discriminator = match self.discriminators.entry(label) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                tracing::debug!(label = ?e.key(), "creating discriminator");
                e.insert((*self.factory)())
            }
        };
        discriminator.record(observation)
    }

    fn answers(&self, observation: &[Address]) -> Result<HashMap<L, usize>> {
        self.discriminators
            .iter()
            .map(|(label, d)| Ok((label.clone(), d.answer(observation)?)))
            .collect()
    }

    fn answer_for(&self, observation: &[Address], label: &L) -> Result<usize> {
        self.get(label)?.answer(observation)
    }

    fn counts(&self, observation: &[Address]) -> Result<HashMap<L, Vec<u64>>> {
        self.discriminators
            .iter()
            .map(|(label, d)| Ok((label.clone(), d.counts(observation)?)))
            .collect()
    }

    fn counts_for(&self, observation: &[Address], label: &L) -> Result<Vec<u64>> {
        self.get(label)?.counts(observation)
    }

    fn bleach(&mut self, threshold: u64) -> Result<()> {
        check_threshold(threshold)?;
        tracing::debug!(threshold, classes = self.discriminators.len(), "bleaching classifier");
        for d in self.discriminators.values_mut() {
            d.bleach(threshold)?;
        }
        Ok(())
    }

    fn remove_class(&mut self, label: &L) -> Result<()> {
        self.discriminators
            .remove(label)
            .ok_or_else(|| WisardError::LabelNotFound(format!("{:?}", label)))?;
        tracing::debug!(label = ?label, "removed discriminator");
        Ok(())
    }
}

impl<L: fmt::Debug, N: Neuron + fmt::Debug> fmt::Debug for Wisard<L, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wisard")
            .field("discriminators", &self.discriminators)
            .finish_non_exhaustive()
    }
}
