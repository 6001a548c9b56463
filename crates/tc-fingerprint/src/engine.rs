//! SHA-256 digest over concatenated anchor input files, compared against a
//! prior digest stored alongside the output directory.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::FingerprintResult;

/// A 32-byte SHA-256 digest, rendered as lowercase hex for storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn to_hex(self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        if s.len() != 64 {
            return None;
        }
        let mut out = [0u8; 32];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Fingerprint(out))
    }
}

/// Compute the digest over `anchors_{mode}.parquet` and
/// `anchor_id_map_{mode}.parquet`, concatenated in that order. Both paths
/// are hashed as raw bytes; the digest only captures content, not mtimes or
/// permissions.
pub fn compute_fingerprint(anchors_path: &Path, anchor_id_map_path: &Path) -> FingerprintResult<Fingerprint> {
    let mut hasher = Sha256::new();
    hasher.update(std::fs::read(anchors_path)?);
    hasher.update(std::fs::read(anchor_id_map_path)?);
    let digest: [u8; 32] = hasher.finalize().into();
    Ok(Fingerprint(digest))
}

/// Read a previously stored digest from a `.hash` side file next to the
/// output directory. Absence of the file (or an unparsable one) is treated
/// as "no prior digest", which callers should treat as stale.
pub fn read_stored_fingerprint(hash_file: &Path) -> Option<Fingerprint> {
    let text = std::fs::read_to_string(hash_file).ok()?;
    Fingerprint::from_hex(text.trim())
}

/// Write `fingerprint` to `hash_file` as lowercase hex. Called only after a
/// successful recompute, so a half-finished run never leaves a digest that
/// claims outputs are fresh.
pub fn write_fingerprint(hash_file: &Path, fingerprint: Fingerprint) -> FingerprintResult<()> {
    std::fs::write(hash_file, fingerprint.to_hex())?;
    Ok(())
}

/// `true` if the current inputs' digest differs from (or there is no) prior
/// stored digest.
pub fn is_stale(current: Fingerprint, stored: Option<Fingerprint>) -> bool {
    match stored {
        None => true,
        Some(prior) => prior != current,
    }
}
