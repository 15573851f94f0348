//! Fundamental types for validator-set elections.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! keys, signatures, transaction hashes, and the validator-set snapshots the
//! consensus engine hands to the election core.

pub mod error;
pub mod hash;
pub mod keys;
pub mod validator;

pub use error::TypesError;
pub use hash::TxHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use validator::{Height, Validator, ValidatorChange, ValidatorSet};
