//! BitString - Fixed-length bit strings fed to the address encoder.
//!
//! This module provides the `BitString` type, a thin wrapper over the `bitvec`
//! crate that reads and writes neuron addresses from arbitrary bit positions.
//!
//! # Design
//!
//! - Uses `BitVec<u32, Msb0>` for storage, so index 0 is the leftmost
//!   character of the textual form
//! - Addresses are read most-significant-first: the first position listed
//!   becomes the highest bit of the resulting `Address`, however many
//!   positions are listed
//! - Textual form is a plain string of `'0'` and `'1'` characters
//!
//! # Examples
//!
//! ```
//! use wisard::{Address, BitString};
//!
//! let bits: BitString = "11110001".parse().unwrap();
//! assert_eq!(bits.len(), 8);
//! assert_eq!(bits.num_set(), 5);
//! assert_eq!(bits.to_address(&[0, 1, 7]), Address::from(0b111u64));
//! assert_eq!(bits.to_string(), "11110001");
//! ```

use crate::address::Address;
use crate::{Result, WisardError};
use bitvec::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Fixed-length string of bits, indexed from the left.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bv: BitVec<u32, Msb0>,
}

impl BitString {
    /// Create a new BitString with `n` bits, all initialized to 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use wisard::BitString;
    ///
    /// let bits = BitString::new(16);
    /// assert_eq!(bits.len(), 16);
    /// assert_eq!(bits.num_set(), 0);
    /// ```
    #[inline]
    pub fn new(n: usize) -> Self {
        Self {
            bv: BitVec::repeat(false, n),
        }
    }

    /// Create a BitString from a slice of booleans.
    pub fn from_bits(bits: &[bool]) -> Self {
        bits.iter().copied().collect()
    }

    /// Get total number of bits.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bv.len()
    }

    /// Check whether the string holds no bits at all.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bv.is_empty()
    }

    /// Get bit at position `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b >= len`.
    #[inline]
    pub fn get(&self, b: usize) -> bool {
        debug_assert!(b < self.bv.len(), "bit index {} out of bounds (length: {})", b, self.bv.len());
        self.bv[b]
    }

    /// Assign bit at position `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b >= len`.
    #[inline]
    pub fn set(&mut self, b: usize, val: bool) {
        debug_assert!(b < self.bv.len(), "bit index {} out of bounds (length: {})", b, self.bv.len());
        self.bv.set(b, val);
    }

    /// Count number of set bits.
    #[inline]
    pub fn num_set(&self) -> usize {
        self.bv.count_ones()
    }

    /// Iterate over the bits from left to right.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bv.iter().by_vals()
    }

    /// Build the string whose bit `j` is this string's bit `mapping[j]`.
    ///
    /// `mapping` must only contain indices below `len`.
    pub fn permuted(&self, mapping: &[usize]) -> BitString {
        mapping.iter().map(|&m| self.bv[m]).collect()
    }

    /// Read the bits at `positions` as an address, first position most significant.
    pub fn to_address(&self, positions: &[usize]) -> Address {
        Address::from_msb_bits(positions.iter().map(|&p| self.bv[p]))
    }

    /// Write `address` into the bits at `positions`, first position most significant.
    ///
    /// Fails with `InvalidArgument` if `address` needs more bits than there are positions.
    pub fn set_address(&mut self, positions: &[usize], address: &Address) -> Result<()> {
        let width = positions.len();
        if address.bit_len() > width {
            return Err(WisardError::InvalidArgument(format!(
                "address {:#b} does not fit in {} bits",
                address, width
            )));
        }

        for (t, &p) in positions.iter().enumerate() {
            self.bv.set(p, address.bit(width - 1 - t));
        }
        Ok(())
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bv: iter.into_iter().collect(),
        }
    }
}

impl FromStr for BitString {
    type Err = WisardError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(WisardError::InvalidArgument(format!(
                    "bit strings may only contain '0' and '1', found {:?}",
                    other
                ))),
            })
            .collect()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
