//! Reduce an arbitrary string to an 8-character uppercase hex name.

use sha2::{Digest, Sha256};

/// Length of every reduced name.
pub const SHORT_NAME_LEN: usize = 8;

/// Bytes of the digest that take part in the fold (128 bits).
const DIGEST_BYTES: usize = 16;

/// Hash `input` case-insensitively and fold the 128-bit digest into 4 bytes.
///
/// The digest is the first 16 bytes of SHA-256 over the lower-cased UTF-8
/// input; byte `i` is XOR-ed into `result[i % 4]`. Collisions are expected
/// (128 bits folded to 32) and left to the link file to disambiguate.
pub fn reduce(input: &str) -> String {
    let lowered = input.to_lowercase();
    let digest = Sha256::digest(lowered.as_bytes());
    let mut folded = [0u8; 4];
    for (i, b) in digest[..DIGEST_BYTES].iter().enumerate() {
        folded[i % 4] ^= b;
    }
    hex::encode_upper(folded)
}

/// True if `name` has the shape of a [`reduce`] output.
pub fn is_short_name(name: &str) -> bool {
    name.len() == SHORT_NAME_LEN
        && name
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}
