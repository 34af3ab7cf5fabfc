//! Wire types for impression sync payloads.
//!
//! An impression sync payload is the body of a VAA published by a platform deployment on one
//! chain, reporting the impression counters it currently holds for every chain it tracks. The
//! receiving deployment decodes it with [`decode`] and reconciles its own records against it.
//!
//! ## Wire format
//!
//! Payloads use the [`serde_wormhole`] encoding: integers are full-width big-endian and
//! sequences carry a single byte element count.
//!
//! ```markdown
//! offset      size  field
//! 0           1     payload id (0x01)
//! 1           1     N, number of chain updates
//! 2 + 26*i    2     chain id
//! 4 + 26*i    8     impressions count
//! 12 + 26*i   8     block number
//! 20 + 26*i   8     block time (seconds since UNIX epoch)
//! ```
//!
//! A well-formed payload is exactly `2 + 26 * N` bytes long. Anything else is rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wormhole_sdk::Chain;

/// Payload id of an impression sync message.
pub const SYNC_PAYLOAD_ID: u8 = 1;

/// Encoded length of a single [`ChainUpdate`].
pub const UPDATE_LEN: usize = 26;

/// Upper bound on the number of updates a single payload can carry.
pub const MAX_UPDATES: usize = u8::MAX as usize;

/// The impression state of one chain, as attested by the emitting deployment.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChainUpdate {
    pub chain: Chain,
    /// The chain's own counter. This replaces the stored value, it is not a delta.
    pub impressions_count: u64,
    /// Ordering token from the source chain. Must strictly increase per chain.
    pub block_num: u64,
    /// Seconds since UNIX epoch.
    pub block_time: u64,
}

/// Messages that can appear as the payload of an impressions VAA.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Message {
    #[serde(rename = "1")]
    Sync { updates: Vec<ChainUpdate> },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to parse impressions payload: {0}")]
    Malformed(#[from] serde_wormhole::Error),
    #[error("too many updates in one payload: {0} (max {MAX_UPDATES})")]
    TooManyUpdates(usize),
}

/// Decode a sync payload into its ordered list of updates.
///
/// Decoding knows nothing about which chains the receiver has registered; it only checks the
/// framing. Trailing bytes after the last update are an error.
pub fn decode(payload: &[u8]) -> Result<Vec<ChainUpdate>, Error> {
    match serde_wormhole::from_slice(payload)? {
        Message::Sync { updates } => Ok(updates),
    }
}

/// Encode `updates` as a sync payload.
pub fn encode(updates: &[ChainUpdate]) -> Result<Vec<u8>, Error> {
    if updates.len() > MAX_UPDATES {
        return Err(Error::TooManyUpdates(updates.len()));
    }

    let msg = Message::Sync {
        updates: updates.to_vec(),
    };
    Ok(serde_wormhole::to_vec(&msg)?)
}
