//! BitStringEncoder - Turns fixed-length bit strings into neuron addresses.
//!
//! The encoder scrambles the input bits with a random permutation chosen on
//! the first `encode()` call, then splits the scrambled string into one group
//! of bits per neuron and reads each group as an unsigned integer address.
//! Addresses are unbounded, so any bit length works with any neuron count.
//! `decode()` is the exact inverse.
//!
//! # Mapping Lifecycle
//!
//! - The permutation covers `[0, L)` where `L` is the length of the first bit
//!   string encoded; it never changes afterwards
//! - Every later bit string must have exactly `L` bits
//! - The inverse permutation is derived on the first `decode()` and cached
//! - Both live in `OnceLock`s, so concurrent first calls agree on a single
//!   mapping and the encoder can be shared across threads
//!
//! # Splitting
//!
//! When `L` is not a multiple of the neuron count, the first
//! `L mod neuron_count` groups are one bit wider. Two groupings are offered:
//!
//! - [`Splitting::Interleaved`] (default): group `i` holds permuted positions
//!   `i, i + n, i + 2n, ...`
//! - [`Splitting::Contiguous`]: group `i` is the `i`-th contiguous run
//!
//! # Examples
//!
//! ```
//! use wisard::{Address, BitString, BitStringEncoder, DataEncoder, Splitting};
//!
//! let encoder = BitStringEncoder::with_mapping(2, vec![7, 6, 1, 5, 2, 4, 3, 0])
//!     .unwrap()
//!     .with_splitting(Splitting::Contiguous);
//!
//! // '11110001' == mapping ==> '10101011' == splitting ==> ['1010', '1011']
//! let bits: BitString = "11110001".parse().unwrap();
//! let addresses = encoder.encode(&bits).unwrap();
//! assert_eq!(addresses, [10u64, 11].map(Address::from));
//! assert_eq!(encoder.decode(&addresses).unwrap(), bits);
//! ```

use crate::address::Address;
use crate::bit_string::BitString;
use crate::utils::{invert_permutation, is_permutation, random_permutation};
use crate::{Result, WisardError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Transform between raw observations and neuron address lists.
pub trait DataEncoder {
    /// Map a bit string to one address per neuron.
    fn encode(&self, bits: &BitString) -> Result<Vec<Address>>;

    /// Recover the bit string that produced `addresses`.
    fn decode(&self, addresses: &[Address]) -> Result<BitString>;
}

/// How the permuted bit string is cut into per-neuron groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Splitting {
    /// Group `i` takes every `neuron_count`-th bit starting at `i`
    #[default]
    Interleaved,
    /// Group `i` takes the `i`-th contiguous run of bits
    Contiguous,
}

/// Permutation plus the permuted positions each neuron reads.
#[derive(Debug)]
struct Layout {
    mapping: Vec<usize>,
    groups: Vec<Vec<usize>>,
}

impl Layout {
    fn new(mapping: Vec<usize>, neuron_count: usize, splitting: Splitting) -> Self {
        let len = mapping.len();
        let groups: Vec<Vec<usize>> = match splitting {
            Splitting::Interleaved => (0..neuron_count)
                .map(|i| (i..len).step_by(neuron_count).collect())
                .collect(),
            Splitting::Contiguous => {
                let mut beg = 0;
                address_widths(len, neuron_count)
                    .map(|w| {
                        let group: Vec<usize> = (beg..beg + w).collect();
                        beg += w;
                        group
                    })
                    .collect()
            }
        };

        Self { mapping, groups }
    }

    #[inline]
    fn len(&self) -> usize {
        self.mapping.len()
    }
}

/// Group widths for `len` bits split across `neuron_count` groups.
fn address_widths(len: usize, neuron_count: usize) -> impl Iterator<Item = usize> {
    let min_width = len / neuron_count;
    let plus_one = len % neuron_count;
    (0..neuron_count).map(move |i| min_width + usize::from(i < plus_one))
}

/// Bit string to address list encoder with a lazily drawn permutation.
///
/// With `neuron_count == 1` no scrambling takes place: the mapping is the
/// identity and the single address is the integer value of the whole string.
#[derive(Debug)]
pub struct BitStringEncoder {
    neuron_count: usize,
    splitting: Splitting,
    /// Seed for the permutation RNG (for reproducibility)
    seed: u64,
    layout: OnceLock<Layout>,
    reverse_mapping: OnceLock<Vec<usize>>,
}

impl BitStringEncoder {
    /// Create an encoder producing `neuron_count` addresses per bit string.
    ///
    /// The permutation seed is drawn from the thread RNG; use
    /// [`with_seed`](Self::with_seed) for reproducible mappings.
    ///
    /// # Panics
    ///
    /// Panics if `neuron_count` is 0.
    pub fn new(neuron_count: usize) -> Self {
        Self::with_seed(neuron_count, rand::random())
    }

    /// Create an encoder whose permutation is drawn from a `StdRng` seeded with `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `neuron_count` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use wisard::{BitString, BitStringEncoder, DataEncoder};
    ///
    /// let a = BitStringEncoder::with_seed(4, 42);
    /// let b = BitStringEncoder::with_seed(4, 42);
    /// let bits: BitString = "1100101011110000".parse().unwrap();
    /// assert_eq!(a.encode(&bits).unwrap(), b.encode(&bits).unwrap());
    /// assert_eq!(a.mapping(), b.mapping());
    /// ```
    pub fn with_seed(neuron_count: usize, seed: u64) -> Self {
        assert!(neuron_count > 0, "neuron_count must be positive");

        Self {
            neuron_count,
            splitting: Splitting::default(),
            seed,
            layout: OnceLock::new(),
            reverse_mapping: OnceLock::new(),
        }
    }

    /// Create an encoder with an already established permutation.
    ///
    /// Fails with `InvalidArgument` if `mapping` is not a permutation of
    /// `[0, mapping.len())`.
    ///
    /// # Panics
    ///
    /// Panics if `neuron_count` is 0.
    pub fn with_mapping(neuron_count: usize, mapping: Vec<usize>) -> Result<Self> {
        let encoder = Self::with_seed(neuron_count, 0);
        encoder.set_mapping(mapping)?;
        Ok(encoder)
    }

    /// Select how the permuted string is split into groups.
    pub fn with_splitting(mut self, splitting: Splitting) -> Self {
        self.splitting = splitting;
        if let Some(layout) = self.layout.take() {
            self.layout = OnceLock::from(Layout::new(layout.mapping, self.neuron_count, splitting));
        }
        self
    }

    /// Install `mapping` as the permutation, as if it had been drawn on first encode.
    ///
    /// Fails with `InvalidState` if a mapping is already established and with
    /// `InvalidArgument` if `mapping` is not a permutation.
    pub fn set_mapping(&self, mapping: Vec<usize>) -> Result<()> {
        if !is_permutation(&mapping) {
            return Err(WisardError::InvalidArgument(format!(
                "mapping of length {} is not a permutation",
                mapping.len()
            )));
        }
        let layout = Layout::new(mapping, self.neuron_count, self.splitting);
        self.layout.set(layout).map_err(|_| {
            WisardError::InvalidState("encoder mapping is already established".into())
        })
    }

    /// Number of addresses produced per bit string.
    #[inline]
    pub fn neuron_count(&self) -> usize {
        self.neuron_count
    }

    /// Grouping policy.
    #[inline]
    pub fn splitting(&self) -> Splitting {
        self.splitting
    }

    /// Seed of the permutation RNG.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The permutation, once established.
    pub fn mapping(&self) -> Option<&[usize]> {
        self.layout.get().map(|l| l.mapping.as_slice())
    }

    /// Bit string length fixed by the first encode.
    pub fn bit_length(&self) -> Option<usize> {
        self.layout.get().map(Layout::len)
    }

    /// Width in bits of each neuron's address, once established.
    pub fn address_widths(&self) -> Option<Vec<usize>> {
        self.layout
            .get()
            .map(|l| l.groups.iter().map(Vec::len).collect())
    }

    /// Get the layout, drawing the permutation for `len` bits if none exists yet.
    fn layout_for(&self, len: usize) -> &Layout {
        self.layout.get_or_init(|| {
            let mapping = if self.neuron_count == 1 {
                (0..len).collect()
            } else {
                let mut rng = StdRng::seed_from_u64(self.seed);
                random_permutation(len, &mut rng)
            };
            tracing::debug!(
                bit_length = len,
                neuron_count = self.neuron_count,
                seed = self.seed,
                "established encoder mapping"
            );
            Layout::new(mapping, self.neuron_count, self.splitting)
        })
    }
}

impl DataEncoder for BitStringEncoder {
    fn encode(&self, bits: &BitString) -> Result<Vec<Address>> {
        let layout = self.layout_for(bits.len());
        if bits.len() != layout.len() {
            return Err(WisardError::InvalidObservationLength {
                expected: layout.len(),
                actual: bits.len(),
            });
        }

        let permuted = bits.permuted(&layout.mapping);
        Ok(layout
            .groups
            .iter()
            .map(|group| permuted.to_address(group))
            .collect())
    }

    fn decode(&self, addresses: &[Address]) -> Result<BitString> {
        let layout = self.layout.get().ok_or_else(|| {
            WisardError::InvalidState("decode called before any encode established a mapping".into())
        })?;
        if addresses.len() != self.neuron_count {
            return Err(WisardError::InvalidObservationLength {
                expected: self.neuron_count,
                actual: addresses.len(),
            });
        }

        let mut permuted = BitString::new(layout.len());
        for (group, address) in layout.groups.iter().zip(addresses) {
            permuted.set_address(group, address)?;
        }

        let reverse = self
            .reverse_mapping
            .get_or_init(|| invert_permutation(&layout.mapping));
        Ok(permuted.permuted(reverse))
    }
}
