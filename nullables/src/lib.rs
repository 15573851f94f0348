//! Nullable infrastructure for deterministic testing.
//!
//! The election core reaches the ledger only through the `valset-store`
//! traits. [`NullLedger`] implements them in memory and lets a test:
//! - commit transactions at arbitrary heights
//! - replace the validator-set accessor with a closure
//! - make every read fail, to exercise error propagation
//!
//! It never touches the filesystem.

pub mod ledger;

pub use ledger::NullLedger;
