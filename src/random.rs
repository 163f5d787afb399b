// src/random.rs

use rand::RngCore;

/// Generates `length` random bytes rendered as lowercase hex, so the
/// returned string is `2 * length` characters. Used for `state` and `nonce`
/// values on authorization requests.
pub fn string(length: usize) -> String {
    let mut bytes = vec![0u8; length];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
