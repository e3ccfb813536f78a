//! Integration tests for the Wisard classifier.
//!
//! Tests cover:
//! - Exact and partial matches per label
//! - Label isolation
//! - Tie-breaking material from counts() after bleaching
//! - Class removal and unknown labels
//! - End-to-end use with the bit string encoder

use proptest::prelude::*;
use wisard::{
    Address, BitString, BitStringEncoder, Classifier, DataEncoder, Discriminator, Wisard,
    WisardError,
};

fn addrs(values: &[u64]) -> Vec<Address> {
    values.iter().copied().map(Address::from).collect()
}

/// Unary code: `value` set bits followed by zeros.
fn thermometer(value: usize, width: usize) -> BitString {
    (0..width).map(|i| i < value).collect()
}

#[test]
fn test_exact_match_scores_every_neuron() {
    let encoder = BitStringEncoder::with_seed(6, 3);
    let mut wisard = Wisard::new();

    let obs = encoder.encode(&thermometer(9, 24)).unwrap();
    wisard.record(&obs, "L").unwrap();
    assert_eq!(wisard.answer_for(&obs, &"L").unwrap(), obs.len());
}

#[test]
fn test_label_isolation() {
    let probes: [[u64; 3]; 3] = [[1, 2, 3], [1, 5, 6], [7, 7, 7]];
    let mut wisard = Wisard::new();
    wisard.record(&addrs(&[1, 2, 3]), "B").unwrap();
    let before: Vec<usize> = probes
        .iter()
        .map(|p| wisard.answer_for(&addrs(p), &"B").unwrap())
        .collect();

    wisard.record(&addrs(&[1, 2, 3]), "A").unwrap();
    wisard.record(&addrs(&[7, 7, 7]), "A").unwrap();

    let after: Vec<usize> = probes
        .iter()
        .map(|p| wisard.answer_for(&addrs(p), &"B").unwrap())
        .collect();
    assert_eq!(before, after);
    assert_eq!(after, vec![3, 1, 0]);
}

#[test]
fn test_thermometer_classes() {
    let width = 32;
    let encoder = BitStringEncoder::with_seed(8, 99);
    let mut wisard = Wisard::new();

    for v in 0..8 {
        wisard.record(&encoder.encode(&thermometer(v, width)).unwrap(), "low").unwrap();
        wisard.record(&encoder.encode(&thermometer(width - v, width)).unwrap(), "high").unwrap();
    }

    let low = encoder.encode(&thermometer(3, width)).unwrap();
    let scores = wisard.answers(&low).unwrap();
    assert_eq!(scores[&"low"], 8);
    assert!(scores[&"high"] < scores[&"low"]);
}

#[test]
fn test_counts_after_bleaching() {
    let mut wisard = Wisard::new();
    for _ in 0..4 {
        wisard.record(&addrs(&[1, 1]), 'a').unwrap();
    }
    wisard.record(&addrs(&[1, 1]), 'b').unwrap();
    wisard.record(&addrs(&[1, 2]), 'b').unwrap();

    // Saturated: both classes recognize [1, 1] fully
    let answers = wisard.answers(&addrs(&[1, 1])).unwrap();
    assert_eq!(answers[&'a'], answers[&'b']);

    let counts = wisard.counts(&addrs(&[1, 1])).unwrap();
    assert!(counts[&'a'] > counts[&'b']);

    wisard.bleach(1).unwrap();
    let answers = wisard.answers(&addrs(&[1, 1])).unwrap();
    assert_eq!(answers[&'a'], 2);
    assert_eq!(answers[&'b'], 1);
}

#[test]
fn test_remove_class() {
    let mut wisard = Wisard::new();
    wisard.record(&addrs(&[1]), 10).unwrap();
    wisard.record(&addrs(&[1]), 20).unwrap();

    wisard.remove_class(&10).unwrap();
    assert!(!wisard.contains(&10));
    assert!(!wisard.answers(&addrs(&[1])).unwrap().contains_key(&10));
    assert!(!wisard.counts(&addrs(&[1])).unwrap().contains_key(&10));

    assert!(matches!(
        wisard.remove_class(&10),
        Err(WisardError::LabelNotFound(_))
    ));

    // A removed label starts from scratch when recorded again
    wisard.record(&addrs(&[2]), 10).unwrap();
    assert_eq!(wisard.answer_for(&addrs(&[1]), &10).unwrap(), 0);
}

#[test]
fn test_empty_classifier() {
    let wisard: Wisard<String> = Wisard::new();
    assert!(wisard.answers(&addrs(&[1, 2])).unwrap().is_empty());
    assert!(wisard.counts(&addrs(&[1, 2])).unwrap().is_empty());
    assert!(matches!(
        wisard.answer_for(&addrs(&[1, 2]), &"x".to_string()),
        Err(WisardError::LabelNotFound(_))
    ));
}

#[test]
fn test_custom_discriminator_factory() {
    let mut wisard = Wisard::with_factory(Discriminator::new);
    wisard.record(&addrs(&[3, 3]), ()).unwrap();
    assert_eq!(wisard.discriminator(&()).unwrap().max_answer(), 2);
}

#[test]
fn test_classifier_trait_object() {
    let mut boxed: Box<dyn Classifier<u8>> = Box::new(Wisard::new());
    boxed.record(&addrs(&[4, 2]), 1).unwrap();
    assert_eq!(boxed.answer_for(&addrs(&[4, 2]), &1).unwrap(), 2);
}

// =============================================================================
// Property-Based Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_recording_other_label_does_not_change_answers(
        b_obs in prop::collection::vec(prop::collection::vec(0..16u64, 4), 1..10),
        a_obs in prop::collection::vec(prop::collection::vec(0..16u64, 4), 1..10),
        probe in prop::collection::vec(0..16u64, 4),
    ) {
        let mut wisard = Wisard::new();
        for o in &b_obs {
            wisard.record(&addrs(o), "B").unwrap();
        }
        let probe = addrs(&probe);
        let before = wisard.answer_for(&probe, &"B").unwrap();
        let before_counts = wisard.counts_for(&probe, &"B").unwrap();

        for o in &a_obs {
            wisard.record(&addrs(o), "A").unwrap();
        }
        prop_assert_eq!(wisard.answer_for(&probe, &"B").unwrap(), before);
        prop_assert_eq!(wisard.counts_for(&probe, &"B").unwrap(), before_counts);
    }
}
