//! Building and signing election proposals.

use crate::BuildError;
use valset_crypto::{public_from_private, sign_message};
use valset_transactions::{ElectionTx, Proposer, Recipient};
use valset_types::{PrivateKey, PublicKey, TxHash, ValidatorChange};

/// An election whose proposer inputs carry no signatures yet.
#[derive(Clone, Debug)]
pub struct UnsignedElection {
    tx: ElectionTx,
}

/// Build an unsigned election.
///
/// More than one proposer key is accepted here and produces
/// [`Proposer::Multiple`]; admission validation rejects it.
pub fn generate(
    proposers: &[PublicKey],
    recipients: Vec<Recipient>,
    change: ValidatorChange,
    conflict: Option<TxHash>,
) -> Result<UnsignedElection, BuildError> {
    let proposer = Proposer::from_keys(proposers).ok_or(BuildError::NoProposers)?;
    if recipients.is_empty() {
        return Err(BuildError::EmptyRecipients);
    }
    if let Some(idx) = recipients.iter().position(|r| r.public_keys.is_empty()) {
        return Err(BuildError::MalformedRecipient(idx));
    }
    let id = ElectionTx::body_id(&proposer, &recipients, &change, conflict.as_ref())?;
    Ok(UnsignedElection {
        tx: ElectionTx {
            id,
            proposer,
            recipients,
            change,
            conflict,
        },
    })
}

impl UnsignedElection {
    pub fn id(&self) -> &TxHash {
        &self.tx.id
    }

    /// Sign every proposer input with the key whose public half matches it.
    pub fn sign(mut self, private_keys: &[&PrivateKey]) -> Result<ElectionTx, BuildError> {
        if private_keys.is_empty() {
            return Err(BuildError::NoSigningKeys);
        }
        let keys: Vec<_> = private_keys
            .iter()
            .map(|k| (public_from_private(k), *k))
            .collect();
        let message = *self.tx.id.as_bytes();
        for input in self.tx.proposer.inputs_mut() {
            let (_, private) = keys
                .iter()
                .find(|(public, _)| *public == input.public_key)
                .ok_or_else(|| BuildError::MissingSigningKey(input.public_key.to_hex()))?;
            input.signature = Some(sign_message(&message, private));
        }
        Ok(self.tx)
    }

    /// The election without any signatures.
    pub fn into_unsigned(self) -> ElectionTx {
        self.tx
    }
}
