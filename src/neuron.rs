//! Neuron - RAM-emulating memory cells of a WiSARD discriminator.
//!
//! A neuron memorizes addresses: each `record()` writes a location and
//! `answer()` tells whether a location was ever written. The `Neuron` trait
//! is the capability set every neuron implementation provides; `DictNeuron`
//! is the default implementation, a sparse table of write counts.
//!
//! # Examples
//!
//! ```
//! use wisard::{Address, DictNeuron, Neuron};
//!
//! let [three, four, five] = [3u64, 4, 5].map(Address::from);
//! let mut neuron = DictNeuron::new();
//! neuron.record(&five);
//! neuron.record(&five);
//! neuron.record(&three);
//!
//! assert!(neuron.answer(&five));
//! assert!(!neuron.answer(&four));
//! assert_eq!(neuron.count(&five), 2);
//!
//! // 5 = 0b101 and 3 = 0b011, with counts 2 and 1
//! assert_eq!(neuron.bit_counts(), vec![3, 1, 2]);
//!
//! neuron.bleach(1).unwrap();
//! assert_eq!(neuron.count(&five), 1);
//! assert!(!neuron.answer(&three));
//! ```

use crate::address::Address;
use crate::{Result, WisardError};
use std::collections::HashMap;

/// Capability set of a WiSARD-like neuron.
///
/// Implementations only need to provide the storage operations;
/// `intersection_level` and the answer bounds have default implementations
/// in terms of them.
pub trait Neuron {
    /// Number of written locations.
    fn len(&self) -> usize;

    /// Check whether no location has been written.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the written locations, in no particular order.
    fn addresses(&self) -> Box<dyn Iterator<Item = &Address> + '_>;

    /// Write the location at `address`.
    fn record(&mut self, address: &Address);

    /// Returns true iff the location at `address` is written.
    fn answer(&self, address: &Address) -> bool;

    /// Number of times the location at `address` was written.
    fn count(&self, address: &Address) -> u64;

    /// How many times each bit was set in the recorded addresses.
    ///
    /// Entry `i` is the sum of the write counts of all locations whose bit `i`
    /// is set. The result is as long as the highest set bit requires, and is a
    /// single zero when nothing with a set bit was recorded.
    fn bit_counts(&self) -> Vec<u64>;

    /// Jaccard similarity between the written locations of both neurons.
    ///
    /// Considering `a & b` the locations written in both neurons and `a | b`
    /// their union, returns `|a & b| / |a | b|`. Two empty neurons yield 0.0.
    fn intersection_level(&self, other: &dyn Neuron) -> f64 {
        let intersection = self.addresses().filter(|a| other.answer(a)).count();
        let union = self.len() + other.len() - intersection;
        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }

    /// Forget rarely written locations.
    ///
    /// Locations written more than `threshold` times have their count reduced
    /// by `threshold`; all others are cleared. Fails with `InvalidArgument`
    /// if `threshold` is 0.
    fn bleach(&mut self, threshold: u64) -> Result<()>;

    /// Lowest answer value this neuron gives.
    fn min_answer(&self) -> usize {
        0
    }

    /// Highest answer value this neuron gives.
    fn max_answer(&self) -> usize {
        1
    }
}

/// Validate a bleaching threshold.
pub(crate) fn check_threshold(threshold: u64) -> Result<()> {
    if threshold == 0 {
        return Err(WisardError::InvalidArgument(
            "bleaching threshold must be positive".into(),
        ));
    }
    Ok(())
}

/// Sparse counting neuron backed by a `HashMap`.
///
/// Only written locations are stored; a stored count is always at least 1.
///
/// # Performance
///
/// - `record`/`answer`/`count`: O(1) expected
/// - `bleach`: O(written locations)
/// - Memory: proportional to the number of distinct addresses recorded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictNeuron {
    locations: HashMap<Address, u64>,
}

impl DictNeuron {
    /// Create an empty neuron.
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>()
            + self.locations.capacity() * std::mem::size_of::<(Address, u64)>()
            + self.locations.keys().map(Address::heap_size).sum::<usize>()
    }
}

impl Neuron for DictNeuron {
    #[inline]
    fn len(&self) -> usize {
        self.locations.len()
    }

    fn addresses(&self) -> Box<dyn Iterator<Item = &Address> + '_> {
        Box::new(self.locations.keys())
    }

    #[inline]
    fn record(&mut self, address: &Address) {
        match self.locations.get_mut(address) {
            Some(count) => *count += 1,
            None => {
                self.locations.insert(address.clone(), 1);
            }
        }
    }

    #[inline]
    fn answer(&self, address: &Address) -> bool {
        self.locations.contains_key(address)
    }

    #[inline]
    fn count(&self, address: &Address) -> u64 {
        self.locations.get(address).copied().unwrap_or(0)
    }

    fn bit_counts(&self) -> Vec<u64> {
        let width = self.locations.keys().map(Address::bit_len).max().unwrap_or(0);
        let mut bit_freq = vec![0; width.max(1)];

        for (addr, &freq) in &self.locations {
            for bit in addr.ones() {
                bit_freq[bit] += freq;
            }
        }

        bit_freq
    }

    fn bleach(&mut self, threshold: u64) -> Result<()> {
        check_threshold(threshold)?;
        self.locations.retain(|_, count| {
            if *count > threshold {
                *count -= threshold;
                true
            } else {
                false
            }
        });
        Ok(())
    }
}
