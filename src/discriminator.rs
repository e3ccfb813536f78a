//! Discriminator - One class's knowledge as an ordered set of neurons.
//!
//! A discriminator holds one neuron per address position of an observation.
//! The neurons are instantiated on the first `record()`, sized to that
//! observation, and every later observation must have the same length.
//! Addresses are paired with neurons strictly by position.
//!
//! # Examples
//!
//! ```
//! use wisard::{Address, Discriminator};
//!
//! let mut d = Discriminator::new();
//! d.record(&[5u64, 9].map(Address::from)).unwrap();
//!
//! assert_eq!(d.answer(&[5u64, 9].map(Address::from)).unwrap(), 2);
//! assert_eq!(d.answer(&[5u64, 10].map(Address::from)).unwrap(), 1);
//! assert_eq!(d.answer(&[1u64, 1].map(Address::from)).unwrap(), 0);
//! assert_eq!(d.max_answer(), 2);
//! ```

use crate::address::Address;
use crate::neuron::{check_threshold, DictNeuron, Neuron};
use crate::utils::mean;
use crate::{Result, WisardError};
use itertools::Itertools;
use std::fmt;
use std::sync::Arc;

/// Shared constructor of fresh neurons.
pub type NeuronFactory<N> = Arc<dyn Fn() -> N + Send + Sync>;

/// The default WiSARD discriminator.
pub struct Discriminator<N: Neuron = DictNeuron> {
    /// One neuron per address position, created on the first record
    neurons: Option<Vec<N>>,
    factory: NeuronFactory<N>,
}

impl Discriminator<DictNeuron> {
    /// Create a discriminator made of `DictNeuron`s.
    pub fn new() -> Self {
        Self::with_factory(DictNeuron::new)
    }
}

impl Default for Discriminator<DictNeuron> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Neuron> Discriminator<N> {
    /// Create a discriminator whose neurons are built by `factory`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wisard::{Discriminator, DictNeuron};
    ///
    /// let d = Discriminator::with_factory(DictNeuron::default);
    /// assert!(!d.is_initialized());
    /// ```
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> N + Send + Sync + 'static,
    {
        Self {
            neurons: None,
            factory: Arc::new(factory),
        }
    }

    /// Number of neurons (0 before the first record).
    pub fn len(&self) -> usize {
        self.neurons.as_ref().map_or(0, Vec::len)
    }

    /// Check whether the discriminator has no neurons.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether the neurons have been instantiated.
    pub fn is_initialized(&self) -> bool {
        self.neurons.is_some()
    }

    /// The neurons, in address order.
    pub fn neurons(&self) -> &[N] {
        self.neurons.as_deref().unwrap_or(&[])
    }

    /// Neurons paired with `observation`, after checking its length.
    fn paired(&self, observation: &[Address]) -> Result<&[N]> {
        let neurons = self.neurons.as_deref().ok_or_else(|| {
            WisardError::InvalidState("discriminator has not recorded any observation".into())
        })?;
        check_length(neurons.len(), observation.len())?;
        Ok(neurons)
    }

    /// Record the provided observation.
    ///
    /// The observation is a list of addresses, each of which is recorded in
    /// its respective neuron. The first call fixes the number of neurons.
    pub fn record(&mut self, observation: &[Address]) -> Result<()> {
        let factory = &self.factory;
        let neurons = self.neurons.get_or_insert_with(|| {
            tracing::trace!(neurons = observation.len(), "instantiating discriminator neurons");
            (0..observation.len()).map(|_| (**factory)()).collect()
        });
        check_length(neurons.len(), observation.len())?;

        for (neuron, address) in neurons.iter_mut().zip(observation) {
            neuron.record(address);
        }
        Ok(())
    }

    /// Returns how similar the observation is to the stored knowledge.
    ///
    /// The return value is the number of neurons that recognize the address
    /// at their position. It can be normalized by dividing by `max_answer()`.
    pub fn answer(&self, observation: &[Address]) -> Result<usize> {
        let neurons = self.paired(observation)?;
        Ok(neurons
            .iter()
            .zip(observation)
            .filter(|&(n, a)| n.answer(a))
            .count())
    }

    /// Returns how many times the observation addresses were recorded.
    ///
    /// Zero counts are dropped and the rest sorted ascending, so two results
    /// can be compared lexicographically to break ties between `answer()`s
    /// when bleaching.
    pub fn counts(&self, observation: &[Address]) -> Result<Vec<u64>> {
        let neurons = self.paired(observation)?;
        Ok(neurons
            .iter()
            .zip(observation)
            .map(|(n, a)| n.count(a))
            .filter(|&c| c > 0)
            .sorted()
            .collect())
    }

    /// Returns how many times each bit was set in the addresses recorded.
    ///
    /// `drasiw()[i][j]` is the number of times bit `j` was set in the
    /// addresses recorded by neuron `i`.
    pub fn drasiw(&self) -> Vec<Vec<u64>> {
        self.neurons().iter().map(Neuron::bit_counts).collect()
    }

    /// Returns the intersection level between the discriminators.
    ///
    /// This is the mean intersection level between the n-th neurons of each
    /// discriminator, for every n. Both discriminators must have been fed
    /// observations of the same length from the same encoder.
    ///
    /// A discriminator that has not recorded anything has no written
    /// locations, so comparing it with anything yields 0.0.
    pub fn intersection_level<M: Neuron>(&self, other: &Discriminator<M>) -> Result<f64> {
        let (Some(ours), Some(theirs)) = (&self.neurons, &other.neurons) else {
            return Ok(0.0);
        };
        check_length(ours.len(), theirs.len())?;

        Ok(mean(
            ours.iter()
                .zip(theirs)
                .map(|(na, nb)| na.intersection_level(nb)),
        ))
    }

    /// Bleach each neuron by the given threshold.
    pub fn bleach(&mut self, threshold: u64) -> Result<()> {
        check_threshold(threshold)?;
        if let Some(neurons) = self.neurons.as_mut() {
            for n in neurons {
                n.bleach(threshold)?;
            }
        }
        Ok(())
    }

    /// Returns how many input patterns are totally known.
    ///
    /// This is the product of the number of locations written in each neuron,
    /// saturating at `u128::MAX`. An uninitialized discriminator knows nothing.
    pub fn range(&self) -> u128 {
        match &self.neurons {
            None => 0,
            Some(neurons) => neurons
                .iter()
                .fold(1u128, |acc, n| acc.saturating_mul(n.len() as u128)),
        }
    }

    /// Lowest answer value, the sum of the neurons' `min_answer()`.
    pub fn min_answer(&self) -> usize {
        self.neurons().iter().map(Neuron::min_answer).sum()
    }

    /// Highest answer value, the sum of the neurons' `max_answer()`.
    pub fn max_answer(&self) -> usize {
        self.neurons().iter().map(Neuron::max_answer).sum()
    }
}

fn check_length(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(WisardError::InvalidObservationLength { expected, actual });
    }
    Ok(())
}

impl<N: Neuron + fmt::Debug> fmt::Debug for Discriminator<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Discriminator")
            .field("neurons", &self.neurons)
            .finish_non_exhaustive()
    }
}
