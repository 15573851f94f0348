//! Validator-set snapshots by height.

use crate::StoreError;
use valset_types::{Height, ValidatorSet};

/// Read-only access to the validator sets fed by the consensus engine.
pub trait ValidatorSetAccessor {
    /// The set effective at `height`.
    fn validator_set(&self, height: Height) -> Result<ValidatorSet, StoreError>;

    /// The height of the most recent agreed block.
    fn latest_height(&self) -> Result<Height, StoreError>;

    /// The set effective at the latest height.
    fn current_validator_set(&self) -> Result<ValidatorSet, StoreError> {
        self.validator_set(self.latest_height()?)
    }
}
