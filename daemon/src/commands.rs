//! Operator commands over a JSON ledger snapshot.
//!
//! Every command that commits a transaction stores it at the current height,
//! advances the tip by one block and rewrites the snapshot.

use anyhow::{anyhow, bail, Context};
use std::path::{Path, PathBuf};
use tracing::info;
use valset_crypto::keypair_from_private;
use valset_election::{
    entry_of, generate, generate_vote, get_status, recipients, show, validate_vote,
    ElectionError, ElectionParams, ElectionStatus, ElectionValidator,
};
use valset_store::{MemoryLedger, TransactionStore, ValidatorSetAccessor};
use valset_transactions::{Recipient, Transaction};
use valset_types::{
    Height, KeyPair, PrivateKey, PublicKey, TxHash, Validator, ValidatorChange, ValidatorSet,
};

/// Height of the first block of a freshly initialized ledger.
pub const GENESIS_HEIGHT: Height = 1;

pub struct Operator {
    ledger: MemoryLedger,
    path: PathBuf,
    validator: ElectionValidator,
}

impl Operator {
    /// Create a new ledger at `path` with `validators` as the genesis set.
    pub fn init(
        path: &Path,
        validators: Vec<Validator>,
        params: ElectionParams,
    ) -> anyhow::Result<Self> {
        if path.exists() {
            bail!("ledger {} already exists", path.display());
        }
        let genesis = ValidatorSet::new(GENESIS_HEIGHT, validators)?;
        let operator = Self {
            ledger: MemoryLedger::new(genesis),
            path: path.to_path_buf(),
            validator: ElectionValidator::new(params),
        };
        operator.save()?;
        info!(path = %path.display(), "ledger initialized");
        Ok(operator)
    }

    pub fn open(path: &Path, params: ElectionParams) -> anyhow::Result<Self> {
        let ledger = MemoryLedger::load(path)
            .with_context(|| format!("failed to load ledger {}", path.display()))?;
        Ok(Self {
            ledger,
            path: path.to_path_buf(),
            validator: ElectionValidator::new(params),
        })
    }

    #[cfg(test)]
    pub fn ledger(&self) -> &MemoryLedger {
        &self.ledger
    }

    pub fn recipients(&self) -> anyhow::Result<Vec<Recipient>> {
        Ok(recipients(&self.ledger)?)
    }

    /// Propose `change`, signed by `proposer`. Returns the election id.
    pub fn propose(&mut self, proposer: &KeyPair, change: ValidatorChange) -> anyhow::Result<TxHash> {
        let ballots = recipients(&self.ledger)?;
        let election = generate(&[proposer.public], ballots, change, None)?
            .sign(&[&proposer.private])?;
        self.validator.validate(&election, &self.ledger, &[])?;

        let id = election.id;
        let height = self.commit(election.into())?;
        info!(election = %id, height, "election committed");
        Ok(id)
    }

    /// Spend `voter`'s ballot in the election. Applies the change to the
    /// validator set from the next block if this vote concludes it.
    pub fn approve(&mut self, voter: &KeyPair, election_id: &TxHash) -> anyhow::Result<ElectionStatus> {
        let election = self
            .ledger
            .get_election(election_id)?
            .ok_or(ElectionError::UnknownElection(*election_id))?
            .tx;
        let before = get_status(&election, &self.ledger)?;

        let entry = entry_of(&election, &voter.public)
            .ok_or_else(|| anyhow!("{} holds no ballot in election {election_id}", voter.public))?;
        let vote = generate_vote(&election, entry, voter.public)?.sign(&voter.private)?;
        validate_vote(&vote, &self.ledger, &[])?;

        let height = self.ledger.latest_height()?;
        self.ledger.store(vote.into())?;
        let after = get_status(&election, &self.ledger)?;
        if after == ElectionStatus::Concluded && before != ElectionStatus::Concluded {
            let updated = self
                .ledger
                .validator_set(height)?
                .with_change(&election.change, height + 1);
            info!(
                election = %election_id,
                validator = %election.change.public_key,
                power = election.change.power,
                effective = height + 1,
                "election concluded, validator set updated"
            );
            self.ledger.set_validators(updated);
        }
        self.ledger.advance();
        self.save()?;
        Ok(after)
    }

    /// The four-line status report of a committed election.
    pub fn show(&self, election_id: &TxHash) -> anyhow::Result<String> {
        let election = self
            .ledger
            .get_election(election_id)?
            .ok_or(ElectionError::UnknownElection(*election_id))?
            .tx;
        Ok(show(&election, &self.ledger)?)
    }

    fn commit(&mut self, tx: Transaction) -> anyhow::Result<Height> {
        let height = self.ledger.latest_height()?;
        self.ledger.store(tx)?;
        self.ledger.advance();
        self.save()?;
        Ok(height)
    }

    fn save(&self) -> anyhow::Result<()> {
        self.ledger
            .save(&self.path)
            .with_context(|| format!("failed to write ledger {}", self.path.display()))
    }
}

/// Read a hex-encoded private key from `path`.
pub fn read_key(path: &Path) -> anyhow::Result<KeyPair> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read key file {}", path.display()))?;
    let private = PrivateKey::from_hex(&contents)
        .with_context(|| format!("invalid key file {}", path.display()))?;
    Ok(keypair_from_private(private))
}

/// Parse a `<public key hex>:<power>` genesis validator.
pub fn parse_validator(s: &str) -> Result<Validator, String> {
    let (key, power) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <public key hex>:<power>, got {s:?}"))?;
    let public_key = PublicKey::from_hex(key).map_err(|e| e.to_string())?;
    let power = power.parse().map_err(|e| format!("invalid power {power:?}: {e}"))?;
    Ok(Validator::new(public_key, power))
}

#[cfg(test)]
mod tests {
    use super::*;
    use valset_crypto::keypair_from_seed;

    fn keys(n: u8) -> Vec<KeyPair> {
        (1..=n).map(|i| keypair_from_seed(&[i; 32])).collect()
    }

    fn init(dir: &Path, keys: &[KeyPair]) -> Operator {
        let validators = keys.iter().map(|k| Validator::new(k.public, 10)).collect();
        Operator::init(&dir.join("ledger.json"), validators, ElectionParams::default()).unwrap()
    }

    fn change() -> ValidatorChange {
        ValidatorChange::new(keypair_from_seed(&[0xaa; 32]).public, 5, "node-4")
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let keys = keys(3);
        init(dir.path(), &keys);
        let again = Operator::init(
            &dir.path().join("ledger.json"),
            vec![Validator::new(keys[0].public, 1)],
            ElectionParams::default(),
        );
        assert!(again.is_err());
    }

    #[test]
    fn propose_approve_and_apply() {
        let dir = tempfile::tempdir().unwrap();
        let keys = keys(3);
        let mut operator = init(dir.path(), &keys);

        let id = operator.propose(&keys[0], change()).unwrap();
        assert_eq!(operator.approve(&keys[0], &id).unwrap(), ElectionStatus::Ongoing);
        assert_eq!(operator.approve(&keys[1], &id).unwrap(), ElectionStatus::Concluded);

        let reopened = Operator::open(&dir.path().join("ledger.json"), ElectionParams::default()).unwrap();
        let current = reopened.ledger().current_validator_set().unwrap();
        assert_eq!(current.len(), 4);
        assert_eq!(current.total_power(), 35);
        assert!(reopened.show(&id).unwrap().ends_with("status=concluded"));
    }

    #[test]
    fn each_commit_advances_the_tip() {
        let dir = tempfile::tempdir().unwrap();
        let keys = keys(3);
        let mut operator = init(dir.path(), &keys);
        let id = operator.propose(&keys[0], change()).unwrap();
        operator.approve(&keys[2], &id).unwrap();
        assert_eq!(operator.ledger().latest_height().unwrap(), GENESIS_HEIGHT + 2);
    }

    #[test]
    fn second_approval_from_same_validator_fails() {
        let dir = tempfile::tempdir().unwrap();
        let keys = keys(3);
        let mut operator = init(dir.path(), &keys);
        let id = operator.propose(&keys[0], change()).unwrap();
        operator.approve(&keys[0], &id).unwrap();
        let err = operator.approve(&keys[0], &id).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ElectionError>(),
            Some(ElectionError::DoubleVote { entry: 0, .. })
        ));
    }

    #[test]
    fn outsider_cannot_propose() {
        let dir = tempfile::tempdir().unwrap();
        let keys = keys(3);
        let mut operator = init(dir.path(), &keys);
        let outsider = keypair_from_seed(&[0x77; 32]);
        let err = operator.propose(&outsider, change()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ElectionError>(),
            Some(ElectionError::InvalidProposer(_))
        ));
    }

    #[test]
    fn show_unknown_election_fails() {
        let dir = tempfile::tempdir().unwrap();
        let operator = init(dir.path(), &keys(3));
        assert!(operator.show(&TxHash::new([9u8; 32])).is_err());
    }

    #[test]
    fn read_key_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key");
        let expected = keypair_from_seed(&[3u8; 32]);
        std::fs::write(&path, format!("{}\n", hex::encode(expected.private.0))).unwrap();
        assert_eq!(read_key(&path).unwrap().public, expected.public);
    }

    #[test]
    fn parse_validator_argument() {
        let key = keypair_from_seed(&[1u8; 32]).public;
        let v = parse_validator(&format!("{}:42", key.to_hex())).unwrap();
        assert_eq!(v, Validator::new(key, 42));
        assert!(parse_validator("nocolon").is_err());
        assert!(parse_validator(&format!("{}:x", key.to_hex())).is_err());
    }
}
