//! The ballot distribution derived from a validator-set snapshot.

use crate::ElectionError;
use valset_store::ValidatorSetAccessor;
use valset_transactions::Recipient;
use valset_types::{Height, ValidatorSet};

/// Ballots for the validator set at the ledger's latest height.
pub fn recipients<L: ValidatorSetAccessor + ?Sized>(
    ledger: &L,
) -> Result<Vec<Recipient>, ElectionError> {
    recipients_at(ledger, ledger.latest_height()?)
}

/// Ballots for the validator set effective at `height`.
pub fn recipients_at<L: ValidatorSetAccessor + ?Sized>(
    ledger: &L,
    height: Height,
) -> Result<Vec<Recipient>, ElectionError> {
    Ok(from_validator_set(&ledger.validator_set(height)?))
}

/// One ballot per validator, carrying exactly that validator's power, in set order.
pub fn from_validator_set(set: &ValidatorSet) -> Vec<Recipient> {
    set.iter()
        .map(|v| Recipient::new(v.public_key, v.power))
        .collect()
}

/// Whether two distributions hold the same (owners, power) entries,
/// counting multiplicity and ignoring order.
pub fn same_distribution(a: &[Recipient], b: &[Recipient]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut left: Vec<_> = a.iter().map(|r| (&r.public_keys, r.power)).collect();
    let mut right: Vec<_> = b.iter().map(|r| (&r.public_keys, r.power)).collect();
    left.sort();
    right.sort();
    left == right
}
