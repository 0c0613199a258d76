//! Join code generation for game sessions.
//!
//! Codes are 6 characters over `A-Z0-9`, short enough to read off a
//! projector and type on a phone.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const JOIN_CODE_LEN: usize = 6;

/// Generate a join code from the thread-local RNG.
///
/// Uniqueness is not guaranteed; the session registry retries on collision.
pub fn generate_join_code() -> String {
    generate_join_code_with(&mut rand::rng())
}

pub fn generate_join_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..JOIN_CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// True when `code` has the shape of a join code.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == JOIN_CODE_LEN && code.bytes().all(|b| ALPHABET.contains(&b))
}
