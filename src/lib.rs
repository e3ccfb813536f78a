//! Wisard - Weightless Neural Network Classifier
//!
//! Wisard is a Rust implementation of the WiSARD weightless neural network.
//! Instead of weights, it learns with **RAM neurons**: tables that memorize
//! the addresses they are shown. Neurons are grouped into per-class
//! **discriminators**, and discriminators into a multi-class classifier.
//!
//! # Architecture
//!
//! Data flows through four components, leaves first:
//!
//! - **BitStringEncoder**: scrambles a fixed-length bit string with a
//!   reproducible random permutation and cuts it into one address per neuron;
//!   addresses are unbounded integers, so groups may be any width
//! - **Neuron**: capability trait of a RAM neuron; `DictNeuron` is the sparse
//!   counting implementation
//! - **Discriminator**: one neuron per address position; scores observations
//!   by how many neurons recognize their address
//! - **Wisard**: label-keyed discriminators, created on demand
//!
//! # Examples
//!
//! ```
//! use wisard::{BitString, BitStringEncoder, Classifier, DataEncoder, Wisard};
//!
//! let encoder = BitStringEncoder::with_seed(4, 42);
//! let mut wisard = Wisard::new();
//!
//! let seen: BitString = "1100110011110000".parse().unwrap();
//! wisard.record(&encoder.encode(&seen).unwrap(), "yes").unwrap();
//!
//! // A recorded pattern is recognized by every neuron
//! let scores = wisard.answers(&encoder.encode(&seen).unwrap()).unwrap();
//! assert_eq!(scores["yes"], 4);
//! ```
//!
//! # Bleaching
//!
//! Neurons count how often each address was written. `bleach(t)` subtracts
//! `t` from every count and forgets addresses seen `t` times or fewer, which
//! thins out saturated discriminators whose answers tie.
//!
//! # Logging
//!
//! Events are emitted through the `tracing` facade; install a subscriber in
//! the application to see them.

// Module declarations
pub mod address;
pub mod bit_string;
pub mod error;
pub mod utils;

pub mod classifier;
pub mod config;
pub mod discriminator;
pub mod encoder;
pub mod neuron;

// Re-exports for convenient access
pub use address::Address;
pub use bit_string::BitString;
pub use error::{Result, WisardError};

pub use classifier::{Classifier, DiscriminatorFactory, Wisard};
pub use config::WisardConfig;
pub use discriminator::{Discriminator, NeuronFactory};
pub use encoder::{BitStringEncoder, DataEncoder, Splitting};
pub use neuron::{DictNeuron, Neuron};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "Wisard";

/// Get version string
pub fn version() -> String {
    format!("{} v{}", NAME, VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(ver.contains("Wisard"));
        assert!(ver.contains("1.0.0"));
    }

    #[test]
    fn test_re_exports() {
        // Verify re-exports are accessible
        let _bits = BitString::new(32);
        let _neuron = DictNeuron::new();
        let _result: Result<()> = Ok(());
        assert!(Address::zero().is_zero());
    }
}
