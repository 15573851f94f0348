//! Casting and validating votes.
//!
//! A vote spends one ballot of a committed election; its weight is the
//! power of that ballot. Votes are append-only.

use crate::{BuildError, ElectionError};
use tracing::{debug, warn};
use valset_crypto::{public_from_private, sign_message, verify_signature};
use valset_store::Ledger;
use valset_transactions::{ElectionTx, VoteTx};
use valset_types::{PrivateKey, PublicKey};

#[derive(Clone, Debug)]
pub struct UnsignedVote {
    tx: VoteTx,
}

/// Index of the ballot owned by `voter`, if any.
pub fn entry_of(election: &ElectionTx, voter: &PublicKey) -> Option<u32> {
    election
        .recipients
        .iter()
        .position(|r| r.owner() == Some(voter))
        .map(|idx| idx as u32)
}

/// Build an unsigned vote spending ballot `entry` of `election`.
pub fn generate_vote(
    election: &ElectionTx,
    entry: u32,
    voter: PublicKey,
) -> Result<UnsignedVote, BuildError> {
    let ballot = election
        .recipients
        .get(entry as usize)
        .ok_or(BuildError::NoSuchEntry(entry))?;
    if ballot.owner() != Some(&voter) {
        return Err(BuildError::NotEntryOwner {
            voter: voter.to_hex(),
            entry,
        });
    }
    let id = VoteTx::body_id(&election.id, entry, &voter)?;
    Ok(UnsignedVote {
        tx: VoteTx {
            id,
            election_id: election.id,
            entry,
            voter,
            signature: None,
        },
    })
}

impl UnsignedVote {
    pub fn sign(mut self, private_key: &PrivateKey) -> Result<VoteTx, BuildError> {
        if public_from_private(private_key) != self.tx.voter {
            return Err(BuildError::MissingSigningKey(self.tx.voter.to_hex()));
        }
        self.tx.signature = Some(sign_message(self.tx.id.as_bytes(), private_key));
        Ok(self.tx)
    }

    pub fn into_unsigned(self) -> VoteTx {
        self.tx
    }
}

/// Validate a vote at the ledger's latest state.
///
/// `pending` holds the other votes already accepted into the block being
/// built. Returns the vote unchanged on success.
pub fn validate_vote<'v, L: Ledger + ?Sized>(
    vote: &'v VoteTx,
    ledger: &L,
    pending: &[VoteTx],
) -> Result<&'v VoteTx, ElectionError> {
    match check_vote(vote, ledger, pending) {
        Ok(()) => {
            debug!(vote = %vote.id, election = %vote.election_id, entry = vote.entry, "vote accepted");
            Ok(vote)
        }
        Err(e) => {
            warn!(vote = %vote.id, error = %e, "vote rejected");
            Err(e)
        }
    }
}

fn check_vote<L: Ledger + ?Sized>(
    vote: &VoteTx,
    ledger: &L,
    pending: &[VoteTx],
) -> Result<(), ElectionError> {
    let election = ledger
        .get_election(&vote.election_id)?
        .ok_or(ElectionError::UnknownElection(vote.election_id))?;

    let ballot = election
        .tx
        .recipients
        .get(vote.entry as usize)
        .ok_or(ElectionError::InvalidVoteEntry { entry: vote.entry })?;
    if ballot.owner() != Some(&vote.voter) {
        return Err(ElectionError::NotEntryOwner {
            voter: vote.voter.to_hex(),
            entry: vote.entry,
        });
    }

    let spent = ledger
        .votes_for(&vote.election_id)?
        .iter()
        .any(|c| c.tx.entry == vote.entry)
        || pending
            .iter()
            .any(|p| p.election_id == vote.election_id && p.entry == vote.entry);
    if spent {
        return Err(ElectionError::DoubleVote {
            election: vote.election_id,
            entry: vote.entry,
        });
    }

    if vote.compute_id()? != vote.id {
        return Err(ElectionError::IdMismatch(vote.id));
    }
    match &vote.signature {
        Some(sig) if verify_signature(vote.id.as_bytes(), sig, &vote.voter) => Ok(()),
        _ => Err(ElectionError::InvalidSignature(vote.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valset_crypto::keypair_from_seed;
    use valset_transactions::Recipient;
    use valset_types::{TxHash, ValidatorChange};

    fn election() -> ElectionTx {
        ElectionTx {
            id: TxHash::new([1u8; 32]),
            proposer: valset_transactions::Proposer::from_keys(&[PublicKey([1u8; 32])]).unwrap(),
            recipients: vec![
                Recipient::new(keypair_from_seed(&[1u8; 32]).public, 5),
                Recipient::new(keypair_from_seed(&[2u8; 32]).public, 6),
            ],
            change: ValidatorChange::new(PublicKey([9u8; 32]), 1, "n"),
            conflict: None,
        }
    }

    #[test]
    fn entry_of_finds_owner() {
        let voter = keypair_from_seed(&[2u8; 32]).public;
        assert_eq!(entry_of(&election(), &voter), Some(1));
        assert_eq!(entry_of(&election(), &PublicKey([0u8; 32])), None);
    }

    #[test]
    fn generate_vote_checks_entry_range() {
        let voter = keypair_from_seed(&[1u8; 32]).public;
        assert!(matches!(
            generate_vote(&election(), 5, voter),
            Err(BuildError::NoSuchEntry(5))
        ));
    }

    #[test]
    fn generate_vote_checks_owner() {
        let voter = keypair_from_seed(&[1u8; 32]).public;
        assert!(matches!(
            generate_vote(&election(), 1, voter),
            Err(BuildError::NotEntryOwner { entry: 1, .. })
        ));
    }

    #[test]
    fn sign_requires_voter_key() {
        let voter = keypair_from_seed(&[1u8; 32]);
        let other = keypair_from_seed(&[2u8; 32]);
        let unsigned = generate_vote(&election(), 0, voter.public).unwrap();
        assert!(matches!(
            unsigned.sign(&other.private),
            Err(BuildError::MissingSigningKey(_))
        ));
    }

    #[test]
    fn signed_vote_verifies() {
        let voter = keypair_from_seed(&[1u8; 32]);
        let vote = generate_vote(&election(), 0, voter.public)
            .unwrap()
            .sign(&voter.private)
            .unwrap();
        let sig = vote.signature.as_ref().unwrap();
        assert!(verify_signature(vote.id.as_bytes(), sig, &voter.public));
    }
}
