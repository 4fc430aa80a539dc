//! Cache Key Module
//!
//! Derives content-addressed cache keys from prompt text.

use sha2::{Digest, Sha256};

/// Length of a generated key in hex characters.
pub const KEY_LENGTH: usize = 64;

// == Prompt Key ==
/// Returns the lower-case hex SHA-256 digest of the prompt bytes.
///
/// Byte-identical prompts always map to the same key, in this process and any
/// other. The raw prompt is never used as a map key.
pub fn prompt_key(prompt: &str) -> String {
    let digest = Sha256::digest(prompt.as_bytes());
    hex::encode(digest)
}
