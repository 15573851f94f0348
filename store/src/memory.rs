//! An in-memory ledger that can be persisted as a JSON snapshot.
//!
//! Used by the operator CLI. Transactions are committed at the ledger's
//! current height; validator sets are recorded at the height they become
//! effective and stay in force until the next recorded set.

use crate::{Committed, StoreError, TransactionStore, ValidatorSetAccessor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use valset_transactions::{ElectionTx, Transaction, VoteTx};
use valset_types::{Height, TxHash, ValidatorSet};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    height: Height,
    validator_sets: BTreeMap<Height, ValidatorSet>,
    #[serde(default)]
    transactions: Vec<Committed<Transaction>>,
}

impl MemoryLedger {
    /// A ledger whose first block is `genesis.height()`.
    pub fn new(genesis: ValidatorSet) -> Self {
        let height = genesis.height();
        let mut validator_sets = BTreeMap::new();
        validator_sets.insert(height, genesis);
        Self {
            height,
            validator_sets,
            transactions: Vec::new(),
        }
    }

    /// Record a set effective from `set.height()` onward.
    pub fn set_validators(&mut self, set: ValidatorSet) {
        tracing::debug!(height = set.height(), validators = set.len(), "validator set recorded");
        self.validator_sets.insert(set.height(), set);
    }

    /// Move the chain tip forward. Heights never decrease.
    pub fn advance_to(&mut self, height: Height) {
        self.height = self.height.max(height);
    }

    /// Move the chain tip forward by one block and return the new height.
    pub fn advance(&mut self) -> Height {
        self.height += 1;
        self.height
    }

    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl ValidatorSetAccessor for MemoryLedger {
    fn validator_set(&self, height: Height) -> Result<ValidatorSet, StoreError> {
        self.validator_sets
            .range(..=height)
            .next_back()
            .map(|(_, set)| set.clone())
            .ok_or_else(|| StoreError::NotFound(format!("validator set at height {height}")))
    }

    fn latest_height(&self) -> Result<Height, StoreError> {
        Ok(self.height)
    }
}

impl TransactionStore for MemoryLedger {
    fn is_committed(&self, id: &TxHash) -> Result<bool, StoreError> {
        Ok(self.transactions.iter().any(|c| c.tx.id() == id))
    }

    fn store(&mut self, tx: Transaction) -> Result<(), StoreError> {
        if self.is_committed(tx.id())? {
            return Err(StoreError::Duplicate(tx.id().to_string()));
        }
        self.transactions.push(Committed {
            tx,
            height: self.height,
        });
        Ok(())
    }

    fn get_election(&self, id: &TxHash) -> Result<Option<Committed<ElectionTx>>, StoreError> {
        Ok(self.transactions.iter().find_map(|c| match &c.tx {
            Transaction::Election(tx) if &tx.id == id => Some(Committed {
                tx: tx.clone(),
                height: c.height,
            }),
            _ => None,
        }))
    }

    fn votes_for(&self, election_id: &TxHash) -> Result<Vec<Committed<VoteTx>>, StoreError> {
        Ok(self
            .transactions
            .iter()
            .filter_map(|c| match &c.tx {
                Transaction::Vote(tx) if &tx.election_id == election_id => Some(Committed {
                    tx: tx.clone(),
                    height: c.height,
                }),
                _ => None,
            })
            .collect())
    }
}
