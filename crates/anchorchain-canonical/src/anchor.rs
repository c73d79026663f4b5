use crate::digest::{sha256_hex, Digest};

/// Derives the anchor hash bound to a code and the server's anchoring secret.
///
/// Formula: `sha256(code_id || secret)` over the UTF-8 text, hex encoded.
pub fn anchor_hash(code_id: &str, secret: &str) -> Digest {
    let mut material = String::with_capacity(code_id.len() + secret.len());
    material.push_str(code_id);
    material.push_str(secret);
    sha256_hex(material)
}
