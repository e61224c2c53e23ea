//! Recovers the whole-file XOR key by trial: a fixed password list first,
//! then the classic single-byte key, then a descending single-byte scan.

use log::debug;

use crate::cipher::xor;
use crate::MAGIC;

/// Passwords observed in shipped titles, tried in order. The empty string
/// stands for "no transform" and must stay in the list; it covers the
/// zero-byte single key the scan deliberately skips.
pub const DEFAULT_PASSWORDS: [&str; 4] = [
    "1celowniczy23osral4kibel",
    "www#quarterdigi@com",
    "bigfish",
    "",
];

/// Single-byte key used by most retail archives.
pub const KNOWN_XOR_BYTE: u8 = 0xF7;

fn signature_matches(raw: &[u8], key: &[u8]) -> bool {
    if raw.len() < 4 {
        return false;
    }
    let probe = xor(&raw[..4], key);
    u32::from_le_bytes([probe[0], probe[1], probe[2], probe[3]]) == MAGIC
}

/// [`recover_key_with`] over [`DEFAULT_PASSWORDS`].
pub fn recover_key(raw: &[u8]) -> Option<Vec<u8>> {
    recover_key_with(raw, &DEFAULT_PASSWORDS)
}

/// Finds the key whose decryption of the first 4 bytes of `raw` yields
/// [`MAGIC`].
///
/// Candidates are tried in a fixed order and the first match wins:
/// `passwords` in slice order, then [`KNOWN_XOR_BYTE`], then every single
/// byte from `0xFF` down to `0x01`. Only the first 4 bytes are checked at
/// this stage; full header validation happens during parsing. Returns
/// `None` once all three tiers are exhausted.
pub fn recover_key_with(raw: &[u8], passwords: &[&str]) -> Option<Vec<u8>> {
    for password in passwords {
        if signature_matches(raw, password.as_bytes()) {
            debug!("signature matched password key {:?}", password);
            return Some(password.as_bytes().to_vec());
        }
    }

    if signature_matches(raw, &[KNOWN_XOR_BYTE]) {
        debug!("signature matched known key {:#04x}", KNOWN_XOR_BYTE);
        return Some(vec![KNOWN_XOR_BYTE]);
    }

    for key in (0x01..=0xFFu8).rev() {
        if signature_matches(raw, &[key]) {
            debug!("signature matched scanned key {:#04x}", key);
            return Some(vec![key]);
        }
    }

    None
}
