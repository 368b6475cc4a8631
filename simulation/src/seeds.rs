use sha2::{Digest, Sha256};

/// Stream label of the wave scheduler's edge and landing choices.
pub(crate) const STREAM_WAVES: &str = "bounty:waves";
/// Stream label of the turret aim jitter.
pub(crate) const STREAM_TURRETS: &str = "bounty:turrets";
/// Stream label of the unit AI's scatter, aim and target noise.
pub(crate) const STREAM_UNITS: &str = "bounty:units";

/// Derives an independent seed for the stream named `label`.
pub(crate) fn derive_labeled_seed(master: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(master.to_le_bytes());
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
