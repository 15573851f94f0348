use proptest::prelude::*;

use valset_types::{PublicKey, TxHash, Validator, ValidatorChange, ValidatorSet};

fn powers_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..1_000_000, 1..16)
}

fn set_from(height: u64, powers: &[u64]) -> ValidatorSet {
    ValidatorSet::new(
        height,
        powers
            .iter()
            .enumerate()
            .map(|(i, &p)| Validator::new(PublicKey([i as u8 + 1; 32]), p))
            .collect(),
    )
    .unwrap()
}

proptest! {
    /// total_power is the plain sum of every validator's power.
    #[test]
    fn total_power_is_sum(powers in powers_strategy()) {
        let set = set_from(1, &powers);
        let expected: u128 = powers.iter().map(|&p| p as u128).sum();
        prop_assert_eq!(set.total_power(), expected);
    }

    /// Reordering a snapshot never changes its membership.
    #[test]
    fn same_members_is_order_insensitive(powers in powers_strategy()) {
        let set = set_from(1, &powers);
        let mut reversed = set.validators().to_vec();
        reversed.reverse();
        let other = ValidatorSet::new(9, reversed).unwrap();
        prop_assert!(set.same_members(&other));
        prop_assert!(other.same_members(&set));
    }

    /// Re-weighting one validator moves the total by exactly the delta.
    #[test]
    fn with_change_moves_total_by_delta(
        powers in powers_strategy(),
        pick in any::<prop::sample::Index>(),
        new_power in 1u64..1_000_000,
    ) {
        let set = set_from(1, &powers);
        let idx = pick.index(powers.len());
        let target = set.validators()[idx].public_key;
        let next = set.with_change(&ValidatorChange::new(target, new_power, "n"), 2);
        let expected = set.total_power() - powers[idx] as u128 + new_power as u128;
        prop_assert_eq!(next.total_power(), expected);
        prop_assert_eq!(next.same_members(&set), powers[idx] == new_power);
    }

    /// TxHash survives its hex text form.
    #[test]
    fn tx_hash_hex_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = TxHash::new(bytes);
        prop_assert_eq!(TxHash::from_hex(&hash.to_string()).unwrap(), hash);
    }
}
