//! Nullable ledger: a controllable in-memory ledger for testing.

use std::collections::BTreeMap;
use valset_store::{Committed, StoreError, TransactionStore, ValidatorSetAccessor};
use valset_transactions::{ElectionTx, Transaction, VoteTx};
use valset_types::{Height, TxHash, Validator, ValidatorSet};

type ValidatorFn = Box<dyn Fn(Height) -> Vec<Validator>>;

/// An in-memory ledger whose every answer is under the test's control.
pub struct NullLedger {
    latest_height: Height,
    validator_sets: BTreeMap<Height, Vec<Validator>>,
    validator_fn: Option<ValidatorFn>,
    committed: Vec<Committed<Transaction>>,
    unavailable: bool,
}

impl NullLedger {
    /// A ledger at height 1 whose validator set is `validators` at every height.
    pub fn new(validators: Vec<Validator>) -> Self {
        let mut validator_sets = BTreeMap::new();
        validator_sets.insert(0, validators);
        Self {
            latest_height: 1,
            validator_sets,
            validator_fn: None,
            committed: Vec::new(),
            unavailable: false,
        }
    }

    /// Replace `validators` from `height` onward.
    pub fn set_validators_from(&mut self, height: Height, validators: Vec<Validator>) {
        self.validator_sets.insert(height, validators);
    }

    /// Answer validator-set queries with `f` instead of the recorded sets.
    pub fn set_validator_fn(&mut self, f: impl Fn(Height) -> Vec<Validator> + 'static) {
        self.validator_fn = Some(Box::new(f));
    }

    pub fn set_height(&mut self, height: Height) {
        self.latest_height = height;
    }

    /// Commit `tx` at `height`, moving the tip up if needed.
    pub fn commit_at(&mut self, tx: impl Into<Transaction>, height: Height) {
        self.latest_height = self.latest_height.max(height);
        self.committed.push(Committed {
            tx: tx.into(),
            height,
        });
    }

    /// Make every subsequent read fail with a backend error.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            Err(StoreError::Backend("null ledger unavailable".into()))
        } else {
            Ok(())
        }
    }
}

impl ValidatorSetAccessor for NullLedger {
    fn validator_set(&self, height: Height) -> Result<ValidatorSet, StoreError> {
        self.check_available()?;
        let validators = match &self.validator_fn {
            Some(f) => f(height),
            None => self
                .validator_sets
                .range(..=height)
                .next_back()
                .map(|(_, v)| v.clone())
                .unwrap_or_default(),
        };
        ValidatorSet::new(height, validators).map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn latest_height(&self) -> Result<Height, StoreError> {
        self.check_available()?;
        Ok(self.latest_height)
    }
}

impl TransactionStore for NullLedger {
    fn is_committed(&self, id: &TxHash) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.committed.iter().any(|c| c.tx.id() == id))
    }

    fn store(&mut self, tx: Transaction) -> Result<(), StoreError> {
        self.check_available()?;
        let height = self.latest_height;
        self.commit_at(tx, height);
        Ok(())
    }

    fn get_election(&self, id: &TxHash) -> Result<Option<Committed<ElectionTx>>, StoreError> {
        self.check_available()?;
        Ok(self.committed.iter().find_map(|c| {
            c.tx.as_election()
                .filter(|tx| &tx.id == id)
                .map(|tx| Committed {
                    tx: tx.clone(),
                    height: c.height,
                })
        }))
    }

    fn votes_for(&self, election_id: &TxHash) -> Result<Vec<Committed<VoteTx>>, StoreError> {
        self.check_available()?;
        Ok(self
            .committed
            .iter()
            .filter_map(|c| {
                c.tx.as_vote()
                    .filter(|tx| &tx.election_id == election_id)
                    .map(|tx| Committed {
                        tx: tx.clone(),
                        height: c.height,
                    })
            })
            .collect())
    }
}
