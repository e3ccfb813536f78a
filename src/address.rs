//! Address - Unbounded unsigned integers naming neuron locations.
//!
//! An address is the integer read from one group of input bits. Groups can be
//! arbitrarily wide (an encoder with few neurons over a long bit string reads
//! hundreds of bits per neuron), so addresses are not limited to a machine
//! word.
//!
//! # Design
//!
//! - Stored as a `BitVec<u64, Lsb0>`: bit `i` of the vector is bit `i` of the
//!   integer
//! - Always normalized (no high zero bits), so `Eq` and `Hash` follow the
//!   numeric value and zero is the empty vector
//! - `Ord` is numeric ordering
//!
//! # Examples
//!
//! ```
//! use wisard::Address;
//!
//! let a = Address::from(0b1011u64);
//! assert_eq!(a.bit_len(), 4);
//! assert!(a.bit(3));
//! assert_eq!(a.ones().collect::<Vec<_>>(), vec![0, 1, 3]);
//! assert_eq!(a.to_u64(), Some(11));
//!
//! // Wider than a machine word
//! let wide = Address::from_msb_bits(std::iter::once(true).chain([false; 99]));
//! assert_eq!(wide.bit_len(), 100);
//! assert_eq!(wide.to_u64(), None);
//! assert!(wide > a);
//! ```

use bitvec::prelude::*;
use std::cmp::Ordering;
use std::fmt;

/// Neuron address: the unsigned integer formed from one group of input bits.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Address {
    /// Little-endian bits without trailing zeros
    bits: BitVec<u64, Lsb0>,
}

impl Address {
    /// The zero address.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build an address from bits listed most significant first.
    pub fn from_msb_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut bits: BitVec<u64, Lsb0> = bits.into_iter().collect();
        bits.reverse();
        Self::normalized(bits)
    }

    fn normalized(mut bits: BitVec<u64, Lsb0>) -> Self {
        match bits.last_one() {
            Some(last) => bits.truncate(last + 1),
            None => bits.clear(),
        }
        Self { bits }
    }

    /// Number of significant bits (0 for the zero address).
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Check whether this is the zero address.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit `i`, counted from the least significant.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        self.bits.get(i).map_or(false, |b| *b)
    }

    /// Indices of the set bits, least significant first.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// The value as a `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.bit_len() > u64::BITS as usize {
            return None;
        }
        Some(self.ones().fold(0, |acc, i| acc | 1 << i))
    }

    /// Approximate heap footprint in bytes.
    pub(crate) fn heap_size(&self) -> usize {
        self.bits.capacity() / 8
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Self::normalized(BitVec::from_element(value))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bit_len().cmp(&other.bit_len()).then_with(|| {
            self.bits
                .iter()
                .rev()
                .map(|b| *b)
                .cmp(other.bits.iter().rev().map(|b| *b))
        })
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Binary for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0b")?;
        }
        if self.is_zero() {
            return f.write_str("0");
        }
        for bit in self.bits.iter().rev() {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_u64() {
            Some(value) => write!(f, "Address({})", value),
            None => write!(f, "Address({:#b})", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_str_msb(s: &str) -> Address {
        Address::from_msb_bits(s.chars().map(|c| c == '1'))
    }

    #[test]
    fn test_from_u64() {
        assert_eq!(Address::from(0u64), Address::zero());
        assert!(Address::from(0u64).is_zero());
        assert_eq!(Address::from(u64::MAX).bit_len(), 64);
        assert_eq!(Address::from(u64::MAX).to_u64(), Some(u64::MAX));
        assert_eq!(Address::from(6u64).ones().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_leading_zeros_are_ignored() {
        assert_eq!(from_str_msb("000101"), Address::from(5u64));
        assert_eq!(from_str_msb("0000"), Address::zero());
        assert_eq!(from_str_msb(""), Address::zero());
    }

    #[test]
    fn test_bit() {
        let a = from_str_msb("100");
        assert!(a.bit(2));
        assert!(!a.bit(0));
        assert!(!a.bit(500));
    }

    #[test]
    fn test_numeric_ordering() {
        let mut addrs: Vec<Address> = [9u64, 0, 3, 10, 1].map(Address::from).to_vec();
        addrs.push(from_str_msb(&format!("1{}", "0".repeat(70))));
        addrs.sort();
        assert_eq!(addrs[..5], [0u64, 1, 3, 9, 10].map(Address::from));
        assert_eq!(addrs[5].bit_len(), 71);
    }

    #[test]
    fn test_wide_address() {
        let s = format!("1{}1", "0".repeat(98));
        let a = from_str_msb(&s);
        assert_eq!(a.bit_len(), 100);
        assert_eq!(a.ones().collect::<Vec<_>>(), vec![0, 99]);
        assert_eq!(a.to_u64(), None);
        assert_eq!(format!("{:b}", a), s);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format!("{:#b}", Address::from(5u64)), "0b101");
        assert_eq!(format!("{:b}", Address::zero()), "0");
        assert_eq!(format!("{:?}", Address::from(42u64)), "Address(42)");
    }

    #[test]
    fn test_hash_follows_value() {
        use std::collections::HashSet;
        let set: HashSet<Address> = [from_str_msb("0011"), Address::from(3u64)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
