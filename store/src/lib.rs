//! Ledger collaborator traits for validator-set elections.
//!
//! The election core never owns ledger state. It reads validator-set
//! snapshots and committed transactions through these traits, always at an
//! explicit height. [`MemoryLedger`] is a JSON-persistable implementation for
//! tooling.

pub mod accessor;
pub mod error;
pub mod memory;
pub mod transaction;

pub use accessor::ValidatorSetAccessor;
pub use error::StoreError;
pub use memory::MemoryLedger;
pub use transaction::{Committed, TransactionStore};

/// A ledger the election core can run against.
pub trait Ledger: ValidatorSetAccessor + TransactionStore {}

impl<T: ValidatorSetAccessor + TransactionStore> Ledger for T {}
