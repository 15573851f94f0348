//! Validator-set elections.
//!
//! Validators change network membership through a special transaction: an
//! election proposing to add, remove or re-weight one validator. Its ballots
//! mirror the live validator set, each validator spends its ballot to
//! approve, and the change concludes at two thirds of the power the set had
//! when the election was committed.
//!
//! Everything here is a pure function of an explicit ledger snapshot so that
//! every replica reaches the same decision.
//!
//! - [`recipients`]: ballot distribution from the live validator set
//! - [`generate`] / [`UnsignedElection::sign`]: build a proposal
//! - [`ElectionValidator`]: ordered admission checks
//! - [`get_status`]: ongoing / concluded / inconclusive
//! - [`generate_vote`] / [`validate_vote`]: approving an election
//! - [`show`]: the operator status report

pub mod error;
pub mod factory;
pub mod outcome;
pub mod params;
pub mod recipients;
pub mod report;
pub mod validation;
pub mod vote;

pub use error::{BuildError, ElectionError};
pub use factory::{generate, UnsignedElection};
pub use outcome::{get_status, ElectionStatus};
pub use params::{ElectionParams, Ratio, QUORUM};
pub use recipients::{recipients, recipients_at};
pub use report::show;
pub use validation::{validate, ElectionValidator};
pub use vote::{entry_of, generate_vote, validate_vote, UnsignedVote};
