//! Operator-facing status report for an election.
//!
//! The four-line `key=value` format is consumed by operational tooling and
//! must not change.

use crate::outcome::{get_status, ElectionStatus};
use crate::ElectionError;
use valset_store::Ledger;
use valset_transactions::ElectionTx;

/// Compute the election's status and render the report.
pub fn show<L: Ledger + ?Sized>(election: &ElectionTx, ledger: &L) -> Result<String, ElectionError> {
    let status = get_status(election, ledger)?;
    Ok(render(election, status))
}

/// Render the report for an already computed status.
pub fn render(election: &ElectionTx, status: ElectionStatus) -> String {
    [
        format!("public_key={}", base64_encode(election.change.public_key.as_bytes())),
        format!("power={}", election.change.power),
        format!("node_id={}", election.change.node_id),
        format!("status={status}"),
    ]
    .join("\n")
}

// Standard padded base64, the encoding consensus engines use for validator keys.
fn base64_encode(data: &[u8]) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let triple = (b0 << 16) | (b1 << 8) | b2;
        out.push(CHARS[((triple >> 18) & 0x3F) as usize] as char);
        out.push(CHARS[((triple >> 12) & 0x3F) as usize] as char);
        if chunk.len() > 1 {
            out.push(CHARS[((triple >> 6) & 0x3F) as usize] as char);
        } else {
            out.push('=');
        }
        if chunk.len() > 2 {
            out.push(CHARS[(triple & 0x3F) as usize] as char);
        } else {
            out.push('=');
        }
    }
    out
}
