//! The vote transaction: a validator spends its ballot to approve an election.

use crate::TransactionError;
use serde::{Deserialize, Serialize};
use valset_types::{PublicKey, Signature, TxHash};

const VOTE_TAG: &str = "VALIDATOR_VOTE";

/// Spends entry `entry` of election `election_id`'s ballots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTx {
    pub id: TxHash,
    pub election_id: TxHash,
    /// Index into the election's recipients.
    pub entry: u32,
    pub voter: PublicKey,
    pub signature: Option<Signature>,
}

#[derive(Serialize)]
struct VoteBody<'a> {
    tag: &'static str,
    election_id: &'a TxHash,
    entry: u32,
    voter: &'a PublicKey,
}

impl VoteTx {
    pub fn body_id(
        election_id: &TxHash,
        entry: u32,
        voter: &PublicKey,
    ) -> Result<TxHash, TransactionError> {
        let body = VoteBody {
            tag: VOTE_TAG,
            election_id,
            entry,
            voter,
        };
        let bytes = bincode::serialize(&body)?;
        Ok(valset_crypto::hash_transaction(&bytes))
    }

    pub fn compute_id(&self) -> Result<TxHash, TransactionError> {
        Self::body_id(&self.election_id, self.entry, &self.voter)
    }
}
