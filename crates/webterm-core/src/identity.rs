//! Random identities.
//!
//! Identities are short base-62 strings drawn from UUIDv4 randomness. They
//! name terminals published without an explicit slug.

use uuid::Uuid;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of identities returned by [`generate`].
pub const IDENTITY_LENGTH: usize = 12;

/// Bytes at or above this value are skipped to keep the alphabet unbiased.
const REJECT_FROM: u8 = (256 - 256 % ALPHABET.len()) as u8;

/// Generates a new identity of [`IDENTITY_LENGTH`] characters.
pub fn generate() -> String {
    generate_with_size(IDENTITY_LENGTH)
}

/// Generates a new identity of `size` characters.
pub fn generate_with_size(size: usize) -> String {
    let mut identity = String::with_capacity(size);
    while identity.len() < size {
        for byte in Uuid::new_v4().into_bytes() {
            if identity.len() == size {
                break;
            }
            if byte >= REJECT_FROM {
                continue;
            }
            identity.push(ALPHABET[byte as usize % ALPHABET.len()] as char);
        }
    }
    identity
}
