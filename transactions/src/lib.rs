//! Transactions understood by the validator-election core.
//!
//! - **Election**: a proposer asks the current validators to add, remove or
//!   re-weight one validator. Its outputs are the ballots, one per validator.
//! - **Vote**: a validator spends its ballot to approve the pending change.
//!
//! A transaction's id is the Blake2b-256 hash of the bincode encoding of its
//! unsigned body, so signatures never influence identity.

pub mod election;
pub mod error;
pub mod vote;

pub use election::{ElectionTx, Proposer, ProposerInput, Recipient};
pub use error::TransactionError;
pub use vote::VoteTx;

use serde::{Deserialize, Serialize};
use valset_types::TxHash;

/// Everything the ledger can commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    Election(ElectionTx),
    Vote(VoteTx),
}

impl Transaction {
    pub fn id(&self) -> &TxHash {
        match self {
            Self::Election(tx) => &tx.id,
            Self::Vote(tx) => &tx.id,
        }
    }

    pub fn as_election(&self) -> Option<&ElectionTx> {
        match self {
            Self::Election(tx) => Some(tx),
            Self::Vote(_) => None,
        }
    }

    pub fn as_vote(&self) -> Option<&VoteTx> {
        match self {
            Self::Vote(tx) => Some(tx),
            Self::Election(_) => None,
        }
    }
}

impl From<ElectionTx> for Transaction {
    fn from(tx: ElectionTx) -> Self {
        Self::Election(tx)
    }
}

impl From<VoteTx> for Transaction {
    fn from(tx: VoteTx) -> Self {
        Self::Vote(tx)
    }
}
