//! Admission checks for election proposals.
//!
//! Checks run in a fixed order and stop at the first failure, so every
//! replica reports the same error for the same election and ledger state:
//!
//! 1. exactly one proposer input
//! 2. the proposer is a current validator
//! 3. the requested power is within the configured safety bound
//! 4. the ballots match the current validator set exactly
//! 5. the election is neither committed nor pending in the same block
//! 6. the id matches the body and the proposer signature verifies

use crate::params::ElectionParams;
use crate::recipients::{from_validator_set, same_distribution};
use crate::ElectionError;
use tracing::{debug, warn};
use valset_crypto::verify_signature;
use valset_store::Ledger;
use valset_transactions::{ElectionTx, Proposer, ProposerInput};
use valset_types::{ValidatorChange, ValidatorSet};

/// Validates elections against a ledger under a fixed set of parameters.
#[derive(Clone, Debug, Default)]
pub struct ElectionValidator {
    params: ElectionParams,
}

impl ElectionValidator {
    pub fn new(params: ElectionParams) -> Self {
        Self { params }
    }

    /// Validate `election` at the ledger's latest height.
    ///
    /// `pending` holds the other elections already accepted into the block
    /// being built. Returns the election unchanged on success.
    pub fn validate<'e, L: Ledger + ?Sized>(
        &self,
        election: &'e ElectionTx,
        ledger: &L,
        pending: &[ElectionTx],
    ) -> Result<&'e ElectionTx, ElectionError> {
        match self.check(election, ledger, pending) {
            Ok(()) => {
                debug!(election = %election.id, "election accepted");
                Ok(election)
            }
            Err(e) => {
                warn!(election = %election.id, error = %e, "election rejected");
                Err(e)
            }
        }
    }

    fn check<L: Ledger + ?Sized>(
        &self,
        election: &ElectionTx,
        ledger: &L,
        pending: &[ElectionTx],
    ) -> Result<(), ElectionError> {
        let proposer = single_input(&election.proposer)?;

        let current = ledger.current_validator_set()?;
        if !current.contains(&proposer.public_key) {
            return Err(ElectionError::InvalidProposer(proposer.public_key.to_hex()));
        }

        self.check_power_change(&election.change, &current)?;

        if !same_distribution(&election.recipients, &from_validator_set(&current)) {
            return Err(ElectionError::UnequalValidatorSet);
        }

        if ledger.is_committed(&election.id)? || pending.iter().any(|p| p.id == election.id) {
            return Err(ElectionError::DuplicateTransaction(election.id));
        }

        check_signature(election, proposer)
    }

    fn check_power_change(
        &self,
        change: &ValidatorChange,
        current: &ValidatorSet,
    ) -> Result<(), ElectionError> {
        let bound = self.params.power_change_bound;
        let total = current.total_power();
        if bound.reached_by(change.power as u128, total) {
            return Err(ElectionError::InvalidPowerChange {
                requested: change.power,
                total,
                numerator: bound.numerator,
                denominator: bound.denominator,
            });
        }
        Ok(())
    }
}

/// Validate with default parameters.
pub fn validate<'e, L: Ledger + ?Sized>(
    election: &'e ElectionTx,
    ledger: &L,
    pending: &[ElectionTx],
) -> Result<&'e ElectionTx, ElectionError> {
    ElectionValidator::default().validate(election, ledger, pending)
}

fn single_input(proposer: &Proposer) -> Result<&ProposerInput, ElectionError> {
    match proposer {
        Proposer::Single(input) => Ok(input),
        Proposer::Multiple(inputs) => Err(ElectionError::MultipleInputs {
            count: inputs.len(),
        }),
    }
}

fn check_signature(election: &ElectionTx, proposer: &ProposerInput) -> Result<(), ElectionError> {
    if election.compute_id()? != election.id {
        return Err(ElectionError::IdMismatch(election.id));
    }
    match &proposer.signature {
        Some(sig) if verify_signature(election.id.as_bytes(), sig, &proposer.public_key) => Ok(()),
        _ => Err(ElectionError::InvalidSignature(election.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::generate;
    use crate::params::Ratio;
    use crate::recipients::recipients;
    use valset_crypto::keypair_from_seed;
    use valset_store::MemoryLedger;
    use valset_types::{KeyPair, PublicKey, Signature, Validator};

    fn keys() -> Vec<KeyPair> {
        (1..=4u8).map(|i| keypair_from_seed(&[i; 32])).collect()
    }

    fn ledger(keys: &[KeyPair]) -> MemoryLedger {
        let validators = keys
            .iter()
            .map(|k| Validator::new(k.public, 10))
            .collect();
        MemoryLedger::new(ValidatorSet::new(1, validators).unwrap())
    }

    fn change(power: u64) -> ValidatorChange {
        ValidatorChange::new(PublicKey([0xee; 32]), power, "new-node")
    }

    #[test]
    fn accepts_well_formed_election() {
        let keys = keys();
        let ledger = ledger(&keys);
        let election = generate(&[keys[0].public], recipients(&ledger).unwrap(), change(1), None)
            .unwrap()
            .sign(&[&keys[0].private])
            .unwrap();
        assert!(validate(&election, &ledger, &[]).is_ok());
    }

    #[test]
    fn power_bound_is_exclusive() {
        // Total power 40: 13 is below 40/3, 14 is not.
        let keys = keys();
        let ledger = ledger(&keys);
        let build = |power| {
            generate(&[keys[0].public], recipients(&ledger).unwrap(), change(power), None)
                .unwrap()
                .sign(&[&keys[0].private])
                .unwrap()
        };
        assert!(validate(&build(13), &ledger, &[]).is_ok());
        assert!(matches!(
            validate(&build(14), &ledger, &[]),
            Err(ElectionError::InvalidPowerChange { requested: 14, .. })
        ));
    }

    #[test]
    fn power_bound_follows_params() {
        let keys = keys();
        let ledger = ledger(&keys);
        let election = generate(&[keys[0].public], recipients(&ledger).unwrap(), change(14), None)
            .unwrap()
            .sign(&[&keys[0].private])
            .unwrap();
        let lenient = ElectionValidator::new(ElectionParams {
            power_change_bound: Ratio::new(1, 2),
        });
        assert!(lenient.validate(&election, &ledger, &[]).is_ok());
    }

    #[test]
    fn unsigned_election_rejected() {
        let keys = keys();
        let ledger = ledger(&keys);
        let election = generate(&[keys[0].public], recipients(&ledger).unwrap(), change(1), None)
            .unwrap()
            .into_unsigned();
        assert!(matches!(
            validate(&election, &ledger, &[]),
            Err(ElectionError::InvalidSignature(_))
        ));
    }

    #[test]
    fn forged_signature_rejected() {
        let keys = keys();
        let ledger = ledger(&keys);
        let mut election =
            generate(&[keys[0].public], recipients(&ledger).unwrap(), change(1), None)
                .unwrap()
                .sign(&[&keys[0].private])
                .unwrap();
        election.proposer.inputs_mut()[0].signature = Some(Signature([1u8; 64]));
        assert!(matches!(
            validate(&election, &ledger, &[]),
            Err(ElectionError::InvalidSignature(_))
        ));
    }

    #[test]
    fn tampered_body_rejected() {
        let keys = keys();
        let ledger = ledger(&keys);
        let mut election =
            generate(&[keys[0].public], recipients(&ledger).unwrap(), change(1), None)
                .unwrap()
                .sign(&[&keys[0].private])
                .unwrap();
        election.change.node_id = "someone-else".into();
        assert!(matches!(
            validate(&election, &ledger, &[]),
            Err(ElectionError::IdMismatch(_))
        ));
    }

    #[test]
    fn multiple_inputs_checked_before_membership() {
        let keys = keys();
        let ledger = ledger(&keys);
        let outsider = keypair_from_seed(&[0x55; 32]);
        let election = generate(
            &[outsider.public, keys[0].public],
            recipients(&ledger).unwrap(),
            change(1000),
            None,
        )
        .unwrap()
        .into_unsigned();
        assert!(matches!(
            validate(&election, &ledger, &[]),
            Err(ElectionError::MultipleInputs { count: 2 })
        ));
    }

    #[test]
    fn multi_input_proposer_with_one_input_rejected() {
        let keys = keys();
        let ledger = ledger(&keys);
        let mut election =
            generate(&[keys[0].public], recipients(&ledger).unwrap(), change(1), None)
                .unwrap()
                .sign(&[&keys[0].private])
                .unwrap();
        let input = election.proposer.inputs()[0].clone();
        election.proposer = Proposer::Multiple(vec![input]);

        let err = validate(&election, &ledger, &[]).unwrap_err();
        assert!(matches!(err, ElectionError::MultipleInputs { count: 1 }));
        assert_eq!(
            err.to_string(),
            "election uses a multi-input proposer with 1 inputs, only a single input is allowed"
        );
    }
}
