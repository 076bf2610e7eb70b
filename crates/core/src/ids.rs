//! Item id minting.
//!
//! Service ids are `<unix-millis><9 random base-36 chars>`. Ids minted on the
//! client during an offline fallback are the bare timestamp, which can
//! collide if two items are created in the same millisecond.

use chrono::Utc;
use rand::Rng;

use crate::types::ItemId;

/// Length of the random suffix appended to service ids.
pub const RANDOM_SUFFIX_LEN: usize = 9;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mint a collision-resistant id for a new stored item.
pub fn mint_item_id() -> ItemId {
    let mut rng = rand::rng();
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{suffix}", Utc::now().timestamp_millis())
}

/// Mint a provisional id for an item created while the service is unreachable.
pub fn mint_local_id() -> ItemId {
    Utc::now().timestamp_millis().to_string()
}
