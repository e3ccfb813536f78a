//! Integration tests for Discriminator.
//!
//! Tests cover:
//! - Lazy neuron instantiation and the fixed observation length
//! - Graded answers and sorted counts
//! - drasiw reconstruction, intersection level and bleaching
//! - Custom neuron factories

use approx::assert_relative_eq;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wisard::{
    Address, BitString, BitStringEncoder, DataEncoder, DictNeuron, Discriminator, Neuron,
    WisardError,
};

fn addrs(values: &[u64]) -> Vec<Address> {
    values.iter().copied().map(Address::from).collect()
}

#[test]
fn test_partial_match_scenario() {
    let mut d = Discriminator::new();
    d.record(&addrs(&[5, 9])).unwrap();

    assert_eq!(d.answer(&addrs(&[5, 9])).unwrap(), 2);
    assert_eq!(d.answer(&addrs(&[5, 10])).unwrap(), 1);
    assert_eq!(d.answer(&addrs(&[1, 1])).unwrap(), 0);
    assert_eq!(d.min_answer(), 0);
    assert_eq!(d.max_answer(), 2);
}

#[test]
fn test_factory_called_once_per_neuron() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let mut d = Discriminator::with_factory(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        DictNeuron::new()
    });

    assert_eq!(built.load(Ordering::SeqCst), 0);
    d.record(&addrs(&[1, 2, 3, 4, 5])).unwrap();
    d.record(&addrs(&[5, 4, 3, 2, 1])).unwrap();
    assert_eq!(built.load(Ordering::SeqCst), 5);
    assert_eq!(d.len(), 5);
}

#[test]
fn test_failed_record_leaves_neurons_untouched() {
    let mut d = Discriminator::new();
    d.record(&addrs(&[1, 2])).unwrap();

    let err = d.record(&addrs(&[3, 4, 5])).unwrap_err();
    assert!(matches!(
        err,
        WisardError::InvalidObservationLength {
            expected: 2,
            actual: 3
        }
    ));
    assert_eq!(d.answer(&addrs(&[3, 4])).unwrap(), 0);
    assert_eq!(d.counts(&addrs(&[1, 2])).unwrap(), vec![1, 1]);
}

#[test]
fn test_counts_break_answer_ties() {
    let mut d = Discriminator::new();
    for _ in 0..3 {
        d.record(&addrs(&[1, 1, 1])).unwrap();
    }
    d.record(&addrs(&[2, 2, 2])).unwrap();

    assert_eq!(d.answer(&addrs(&[1, 1, 0])).unwrap(), d.answer(&addrs(&[2, 2, 0])).unwrap());
    assert!(d.counts(&addrs(&[1, 1, 0])).unwrap() > d.counts(&addrs(&[2, 2, 0])).unwrap());
}

#[test]
fn test_drasiw_matches_neuron_bit_counts() {
    let mut d = Discriminator::new();
    d.record(&addrs(&[0b101, 0b1])).unwrap();
    d.record(&addrs(&[0b100, 0b1])).unwrap();

    let drasiw = d.drasiw();
    assert_eq!(drasiw, vec![vec![1, 0, 2], vec![2]]);
    for (row, neuron) in drasiw.iter().zip(d.neurons()) {
        assert_eq!(row, &neuron.bit_counts());
    }
}

#[test]
fn test_intersection_level_identical() {
    let mut a = Discriminator::new();
    let mut b = Discriminator::new();
    for obs in [[1, 2, 3], [4, 5, 6]] {
        a.record(&addrs(&obs)).unwrap();
        b.record(&addrs(&obs)).unwrap();
    }
    assert_relative_eq!(a.intersection_level(&b).unwrap(), 1.0);
}

#[test]
fn test_intersection_level_after_full_bleach() {
    let mut a = Discriminator::new();
    let mut b = Discriminator::new();
    a.record(&addrs(&[1, 2])).unwrap();
    b.record(&addrs(&[1, 2])).unwrap();
    a.bleach(1).unwrap();
    b.bleach(1).unwrap();

    // Every neuron pair is empty/empty
    assert_eq!(a.intersection_level(&b).unwrap(), 0.0);
    assert_eq!(a.range(), 0);
}

#[test]
fn test_bleach_reduces_saturation() {
    let mut d = Discriminator::new();
    for obs in [[1, 1], [1, 2], [1, 3], [2, 3]] {
        d.record(&addrs(&obs)).unwrap();
    }
    assert_eq!(d.answer(&addrs(&[2, 2])).unwrap(), 2);

    d.bleach(1).unwrap();
    assert_eq!(d.answer(&addrs(&[2, 2])).unwrap(), 0);
    assert_eq!(d.answer(&addrs(&[1, 3])).unwrap(), 2);
    assert_eq!(d.counts(&addrs(&[1, 3])).unwrap(), vec![1, 2]);
}

#[test]
fn test_with_encoder() {
    let encoder = BitStringEncoder::with_seed(8, 17);
    let mut d = Discriminator::new();

    let seen: BitString = "1111000011110000111100001111000011110000".parse().unwrap();
    let mut near = seen.clone();
    near.set(0, false);

    d.record(&encoder.encode(&seen).unwrap()).unwrap();
    assert_eq!(d.answer(&encoder.encode(&seen).unwrap()).unwrap(), 8);
    // One flipped bit lands in exactly one neuron's address
    assert_eq!(d.answer(&encoder.encode(&near).unwrap()).unwrap(), 7);
}

// =============================================================================
// Property-Based Tests
// =============================================================================

fn observations(n: usize) -> impl Strategy<Value = Vec<Vec<u64>>> {
    prop::collection::vec(prop::collection::vec(0..8u64, n), 1..20)
}

proptest! {
    #[test]
    fn prop_recorded_observations_fully_match(obs in observations(6)) {
        let mut d = Discriminator::new();
        for o in &obs {
            d.record(&addrs(o)).unwrap();
        }
        for o in &obs {
            prop_assert_eq!(d.answer(&addrs(o)).unwrap(), 6);
        }
    }

    #[test]
    fn prop_answer_within_bounds(obs in observations(4), probe in prop::collection::vec(0..8u64, 4)) {
        let mut d = Discriminator::new();
        for o in &obs {
            d.record(&addrs(o)).unwrap();
        }
        let probe = addrs(&probe);
        let answer = d.answer(&probe).unwrap();
        prop_assert!(answer >= d.min_answer() && answer <= d.max_answer());
        prop_assert_eq!(d.counts(&probe).unwrap().len(), answer);
    }

    #[test]
    fn prop_intersection_level_symmetric(a in observations(3), b in observations(3)) {
        let mut da = Discriminator::new();
        let mut db = Discriminator::new();
        for o in &a {
            da.record(&addrs(o)).unwrap();
        }
        for o in &b {
            db.record(&addrs(o)).unwrap();
        }
        prop_assert_eq!(
            da.intersection_level(&db).unwrap(),
            db.intersection_level(&da).unwrap()
        );
    }
}
