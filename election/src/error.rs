use thiserror::Error;
use valset_store::StoreError;
use valset_transactions::TransactionError;
use valset_types::TxHash;

/// Why an election or vote was rejected, or its status could not be computed.
///
/// Every rejection is deterministic: replicas seeing the same ledger state
/// produce the same variant.
#[derive(Debug, Error)]
pub enum ElectionError {
    #[error("election uses a multi-input proposer with {count} inputs, only a single input is allowed")]
    MultipleInputs { count: usize },

    #[error("proposer {0} is not a current validator")]
    InvalidProposer(String),

    #[error(
        "requested power {requested} must be less than {numerator}/{denominator} of total power {total}"
    )]
    InvalidPowerChange {
        requested: u64,
        total: u128,
        numerator: u64,
        denominator: u64,
    },

    #[error("validator set has changed since proposal")]
    UnequalValidatorSet,

    #[error("duplicate transaction {0}")]
    DuplicateTransaction(TxHash),

    #[error("invalid signature on transaction {0}")]
    InvalidSignature(TxHash),

    #[error("transaction id {0} does not match its body")]
    IdMismatch(TxHash),

    #[error("election {0} is not committed")]
    UnknownElection(TxHash),

    #[error("election has no ballot at index {entry}")]
    InvalidVoteEntry { entry: u32 },

    #[error("{voter} does not own ballot {entry}")]
    NotEntryOwner { voter: String, entry: u32 },

    #[error("ballot {entry} of election {election} has already been spent")]
    DoubleVote { election: TxHash, entry: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Local precondition failures while building or signing a transaction.
///
/// These never reach consensus; they stop a malformed transaction from
/// being assembled at all.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("at least one proposer is required")]
    NoProposers,

    #[error("recipients must not be empty")]
    EmptyRecipients,

    #[error("recipient {0} has no owner")]
    MalformedRecipient(usize),

    #[error("no signing keys supplied")]
    NoSigningKeys,

    #[error("no signing key for {0}")]
    MissingSigningKey(String),

    #[error("election has no ballot at index {0}")]
    NoSuchEntry(u32),

    #[error("{voter} does not own ballot {entry}")]
    NotEntryOwner { voter: String, entry: u32 },

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}
