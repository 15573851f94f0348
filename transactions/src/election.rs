//! The validator election transaction.

use crate::TransactionError;
use serde::{Deserialize, Serialize};
use valset_types::{PublicKey, Signature, TxHash, ValidatorChange};

/// Domain tag mixed into the id of every election body.
const ELECTION_TAG: &str = "VALIDATOR_ELECTION";

/// One ballot: the owner(s) of the entry and the power it carries.
///
/// Built with exactly one owner per current validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub public_keys: Vec<PublicKey>,
    pub power: u64,
}

impl Recipient {
    pub fn new(public_key: PublicKey, power: u64) -> Self {
        Self {
            public_keys: vec![public_key],
            power,
        }
    }

    /// The owner of a singleton entry, `None` for malformed entries.
    pub fn owner(&self) -> Option<&PublicKey> {
        match self.public_keys.as_slice() {
            [key] => Some(key),
            _ => None,
        }
    }
}

/// A proposer identity and, once signed, its signature over the election id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposerInput {
    pub public_key: PublicKey,
    pub signature: Option<Signature>,
}

impl ProposerInput {
    pub fn unsigned(public_key: PublicKey) -> Self {
        Self {
            public_key,
            signature: None,
        }
    }
}

/// The accountable proposer of an election.
///
/// An election has exactly one proposer. `Multiple` exists so that a
/// co-signed proposal is representable and can be rejected by validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proposer {
    Single(ProposerInput),
    Multiple(Vec<ProposerInput>),
}

impl Proposer {
    /// `None` when `keys` is empty.
    pub fn from_keys(keys: &[PublicKey]) -> Option<Self> {
        match keys {
            [] => None,
            [key] => Some(Self::Single(ProposerInput::unsigned(*key))),
            _ => Some(Self::Multiple(
                keys.iter().copied().map(ProposerInput::unsigned).collect(),
            )),
        }
    }

    pub fn inputs(&self) -> &[ProposerInput] {
        match self {
            Self::Single(input) => std::slice::from_ref(input),
            Self::Multiple(inputs) => inputs,
        }
    }

    pub fn inputs_mut(&mut self) -> &mut [ProposerInput] {
        match self {
            Self::Single(input) => std::slice::from_mut(input),
            Self::Multiple(inputs) => inputs,
        }
    }
}

/// A proposal to change one validator's membership or power.
///
/// `recipients` is the ballot distribution: one entry per validator of the
/// set live at proposal time, each later spendable as a vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionTx {
    pub id: TxHash,
    pub proposer: Proposer,
    pub recipients: Vec<Recipient>,
    pub change: ValidatorChange,
    /// A prior election this one supersedes, if any.
    pub conflict: Option<TxHash>,
}

#[derive(Serialize)]
struct ElectionBody<'a> {
    tag: &'static str,
    proposers: Vec<&'a PublicKey>,
    recipients: &'a [Recipient],
    change: &'a ValidatorChange,
    conflict: Option<&'a TxHash>,
}

impl ElectionTx {
    /// Id of the unsigned body made of these parts.
    pub fn body_id(
        proposer: &Proposer,
        recipients: &[Recipient],
        change: &ValidatorChange,
        conflict: Option<&TxHash>,
    ) -> Result<TxHash, TransactionError> {
        let body = ElectionBody {
            tag: ELECTION_TAG,
            proposers: proposer.inputs().iter().map(|i| &i.public_key).collect(),
            recipients,
            change,
            conflict,
        };
        let bytes = bincode::serialize(&body)?;
        Ok(valset_crypto::hash_transaction(&bytes))
    }

    /// Recompute the id from the current body, ignoring the stored one.
    pub fn compute_id(&self) -> Result<TxHash, TransactionError> {
        Self::body_id(
            &self.proposer,
            &self.recipients,
            &self.change,
            self.conflict.as_ref(),
        )
    }
}
