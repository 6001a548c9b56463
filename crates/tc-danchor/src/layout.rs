//! Hive-partitioned output layout and recompute gating for D_anchor slices.

use std::path::{Path, PathBuf};

use tc_core::{EntityKind, TravelMode};

/// Directory for one `(kind, mode, entity_id)` partition:
/// `d_anchor_{kind}/mode={m}/{kind}_id={e}/`.
pub fn partition_dir(output_root: &Path, kind: EntityKind, mode: TravelMode, entity_id: u32) -> PathBuf {
    output_root
        .join(format!("d_anchor_{kind}"))
        .join(format!("mode={mode}"))
        .join(format!("{kind}_id={entity_id}"))
}

/// `true` if this partition needs to be (re)computed this run.
///
/// - `force` always recomputes.
/// - `inputs_stale` (from the fingerprint ledger) always recomputes.
/// - Otherwise, an existing `part-00000.parquet` means the partition is
///   already up to date and can be skipped.
pub fn should_recompute(dir: &Path, force: bool, inputs_stale: bool) -> bool {
    force || inputs_stale || !dir.join("part-00000.parquet").exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_path_matches_hive_layout() {
        let root = Path::new("/out");
        let dir = partition_dir(root, EntityKind::Brand, TravelMode::Walk, 42);
        assert_eq!(dir, Path::new("/out/d_anchor_brand/mode=walk/brand_id=42"));
    }

    #[test]
    fn force_always_recomputes() {
        let tmp = std::env::temp_dir().join("tc-danchor-layout-test-force");
        assert!(should_recompute(&tmp, true, false));
    }

    #[test]
    fn stale_inputs_always_recompute() {
        let tmp = std::env::temp_dir().join("tc-danchor-layout-test-stale");
        assert!(should_recompute(&tmp, false, true));
    }

    #[test]
    fn missing_output_recomputes_even_when_fresh() {
        let tmp = std::env::temp_dir().join("tc-danchor-layout-test-missing-does-not-exist");
        assert!(should_recompute(&tmp, false, false));
    }
}
