//! Checksum calculation for loaded audit files.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of audit file content.
///
/// # Arguments
/// * `content` - Raw bytes (or text) of the audit CSV
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_ref());
    let result = hasher.finalize();
    hex::encode(result)
}
