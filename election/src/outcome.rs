//! Election outcome: ongoing, concluded or inconclusive.
//!
//! Status is never stored. It is recomputed from the committed votes and the
//! validator-set snapshots at their heights, so every replica derives the
//! same answer from the same ledger.

use crate::params::QUORUM;
use crate::ElectionError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;
use valset_store::Ledger;
use valset_transactions::ElectionTx;
use valset_types::Height;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectionStatus {
    /// Approving power is still below quorum.
    Ongoing,
    /// Approving power reached two thirds of the baseline total. Terminal.
    Concluded,
    /// The validator set changed before quorum was reached. Terminal.
    Inconclusive,
}

impl ElectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Concluded => "concluded",
            Self::Inconclusive => "inconclusive",
        }
    }
}

impl fmt::Display for ElectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the status of a committed election.
///
/// The baseline is the validator set at the election's commit height; its
/// total power is the quorum denominator for the whole election. Votes are
/// replayed in commit order. A vote committed while the set differs from the
/// baseline makes the election inconclusive; reaching quorum first concludes
/// it, and later set changes do not reopen it.
pub fn get_status<L: Ledger + ?Sized>(
    election: &ElectionTx,
    ledger: &L,
) -> Result<ElectionStatus, ElectionError> {
    let committed = ledger
        .get_election(&election.id)?
        .ok_or(ElectionError::UnknownElection(election.id))?;
    let baseline = ledger.validator_set(committed.height)?;
    let total = baseline.total_power();

    let mut votes = ledger.votes_for(&election.id)?;
    votes.sort_by_key(|v| v.height);

    let mut approved: u128 = 0;
    let mut spent = HashSet::new();
    let mut checked: Option<Height> = None;

    for vote in &votes {
        if checked != Some(vote.height) {
            if !ledger.validator_set(vote.height)?.same_members(&baseline) {
                debug!(
                    election = %election.id,
                    vote_height = vote.height,
                    "validator set changed during election"
                );
                return Ok(ElectionStatus::Inconclusive);
            }
            checked = Some(vote.height);
        }

        let Some(ballot) = committed.tx.recipients.get(vote.tx.entry as usize) else {
            continue;
        };
        if !spent.insert(vote.tx.entry) {
            continue;
        }
        approved += ballot.power as u128;

        if QUORUM.reached_by(approved, total) {
            debug!(election = %election.id, approved, total, "election concluded");
            return Ok(ElectionStatus::Concluded);
        }
    }

    debug!(election = %election.id, approved, total, "election ongoing");
    Ok(ElectionStatus::Ongoing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings() {
        assert_eq!(ElectionStatus::Ongoing.to_string(), "ongoing");
        assert_eq!(ElectionStatus::Concluded.to_string(), "concluded");
        assert_eq!(ElectionStatus::Inconclusive.to_string(), "inconclusive");
    }
}
