//! Committed transaction storage.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use valset_transactions::{ElectionTx, Transaction, VoteTx};
use valset_types::{Height, TxHash};

/// A transaction together with the height it was committed at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committed<T> {
    pub tx: T,
    pub height: Height,
}

/// Trait for committed-transaction storage.
pub trait TransactionStore {
    /// Whether a transaction with this id is committed.
    fn is_committed(&self, id: &TxHash) -> Result<bool, StoreError>;

    /// Commit a transaction at the latest height.
    fn store(&mut self, tx: Transaction) -> Result<(), StoreError>;

    /// A committed election and its commit height.
    fn get_election(&self, id: &TxHash) -> Result<Option<Committed<ElectionTx>>, StoreError>;

    /// Committed votes spending ballots of `election_id`, in commit order.
    fn votes_for(&self, election_id: &TxHash) -> Result<Vec<Committed<VoteTx>>, StoreError>;
}
