//! Cryptographic primitives for validator-set elections.
//!
//! - **Ed25519** for signing and signature verification
//! - **Blake2b** for transaction ids

pub mod hash;
pub mod keys;
pub mod sign;

pub use hash::{blake2b_256, hash_transaction};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
