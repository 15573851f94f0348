//! Validators and the height-indexed validator-set snapshots the consensus
//! engine hands to the election core.

use crate::{PublicKey, TypesError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Block height as agreed by consensus.
pub type Height = u64;

/// A consensus participant: an identity weighted by voting power.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub public_key: PublicKey,
    pub power: u64,
}

impl Validator {
    pub fn new(public_key: PublicKey, power: u64) -> Self {
        Self { public_key, power }
    }
}

/// The validators effective at a given height.
///
/// Read-only from the election core's point of view. Identities are unique;
/// order is preserved as delivered by consensus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    height: Height,
    validators: Vec<Validator>,
}

impl ValidatorSet {
    pub fn new(height: Height, validators: Vec<Validator>) -> Result<Self, TypesError> {
        let mut seen = std::collections::HashSet::new();
        for v in &validators {
            if !seen.insert(v.public_key) {
                return Err(TypesError::DuplicateValidator(v.public_key.to_hex()));
            }
        }
        Ok(Self { height, validators })
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn iter(&self) -> impl Iterator<Item = &Validator> {
        self.validators.iter()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Sum of voting power across the set.
    pub fn total_power(&self) -> u128 {
        self.validators.iter().map(|v| v.power as u128).sum()
    }

    pub fn power_of(&self, key: &PublicKey) -> Option<u64> {
        self.validators
            .iter()
            .find(|v| &v.public_key == key)
            .map(|v| v.power)
    }

    pub fn contains(&self, key: &PublicKey) -> bool {
        self.power_of(key).is_some()
    }

    /// Identity → power, ordered by identity.
    pub fn power_map(&self) -> BTreeMap<PublicKey, u64> {
        self.validators
            .iter()
            .map(|v| (v.public_key, v.power))
            .collect()
    }

    /// Whether both snapshots hold the same identities with the same powers.
    ///
    /// Order and effective height are ignored.
    pub fn same_members(&self, other: &ValidatorSet) -> bool {
        self.power_map() == other.power_map()
    }

    /// The set that results from applying `change`, effective at `height`.
    ///
    /// A matching identity is re-weighted, or removed when the new power is
    /// zero. An unknown identity is appended.
    pub fn with_change(&self, change: &ValidatorChange, height: Height) -> ValidatorSet {
        let mut validators = self.validators.clone();
        match validators
            .iter()
            .position(|v| v.public_key == change.public_key)
        {
            Some(idx) if change.power == 0 => {
                validators.remove(idx);
            }
            Some(idx) => validators[idx].power = change.power,
            None if change.power == 0 => {}
            None => validators.push(Validator::new(change.public_key, change.power)),
        }
        ValidatorSet { height, validators }
    }
}

/// A proposed mutation of the validator set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorChange {
    /// Identity being added, re-weighted, or removed.
    pub public_key: PublicKey,
    /// Requested voting power. Zero removes an existing validator.
    pub power: u64,
    /// Consensus-layer node identifier of the target.
    pub node_id: String,
}

impl ValidatorChange {
    pub fn new(public_key: PublicKey, power: u64, node_id: impl Into<String>) -> Self {
        Self {
            public_key,
            power,
            node_id: node_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(b: u8) -> PublicKey {
        PublicKey([b; 32])
    }

    fn set(height: Height, powers: &[(u8, u64)]) -> ValidatorSet {
        ValidatorSet::new(
            height,
            powers
                .iter()
                .map(|&(k, p)| Validator::new(key(k), p))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn total_power_sums_all_validators() {
        assert_eq!(set(1, &[(1, 9), (2, 7), (3, 10), (4, 8)]).total_power(), 34);
    }

    #[test]
    fn duplicate_identity_rejected() {
        let result = ValidatorSet::new(
            1,
            vec![Validator::new(key(1), 5), Validator::new(key(1), 6)],
        );
        assert!(matches!(result, Err(TypesError::DuplicateValidator(_))));
    }

    #[test]
    fn same_members_ignores_order_and_height() {
        let a = set(1, &[(1, 9), (2, 7)]);
        let b = set(5, &[(2, 7), (1, 9)]);
        assert!(a.same_members(&b));
    }

    #[test]
    fn same_members_detects_power_change() {
        let a = set(1, &[(1, 9), (2, 7)]);
        let b = set(3, &[(1, 15), (2, 7)]);
        assert!(!a.same_members(&b));
    }

    #[test]
    fn same_members_detects_membership_change() {
        let a = set(1, &[(1, 9), (2, 7)]);
        let b = set(3, &[(1, 9)]);
        assert!(!a.same_members(&b));
    }

    #[test]
    fn with_change_updates_power() {
        let s = set(1, &[(1, 9), (2, 7)]);
        let next = s.with_change(&ValidatorChange::new(key(1), 15, "node"), 4);
        assert_eq!(next.height(), 4);
        assert_eq!(next.power_of(&key(1)), Some(15));
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn with_change_zero_power_removes() {
        let s = set(1, &[(1, 9), (2, 7)]);
        let next = s.with_change(&ValidatorChange::new(key(2), 0, "node"), 2);
        assert!(!next.contains(&key(2)));
        assert_eq!(next.total_power(), 9);
    }

    #[test]
    fn with_change_unknown_key_adds() {
        let s = set(1, &[(1, 9)]);
        let next = s.with_change(&ValidatorChange::new(key(3), 2, "node"), 2);
        assert_eq!(next.power_of(&key(3)), Some(2));
        assert_eq!(next.validators().last().unwrap().public_key, key(3));
    }

    #[test]
    fn with_change_removing_unknown_key_is_noop() {
        let s = set(1, &[(1, 9)]);
        let next = s.with_change(&ValidatorChange::new(key(3), 0, "node"), 2);
        assert!(next.same_members(&s));
    }
}
