//! Atomic parquet writes.
//!
//! Each output is built at a `.tmp` sibling path and renamed into place only
//! after the writer closes cleanly, so a crash or cancelled run never leaves
//! a half-written file at the final path — a cancelled write leaves no file
//! at all, since the rename never happens.

use std::path::Path;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use tc_core::{AnchorIdMapRow, AnchorSite, DAnchorRow, THexRow};

use crate::{parquet as schema, CodecResult};

/// Compression profile shared by every output family: ZSTD, default level.
pub fn zstd_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::ZSTD(Default::default()))
        .build()
}

/// Write `batch` as a single-row-group ZSTD parquet file at `path`, via a
/// `.tmp` sibling renamed into place on success. Creates `path`'s parent
/// directory if missing.
pub fn write_parquet_atomic(path: &Path, batch: &RecordBatch) -> CodecResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    let file = std::fs::File::create(&tmp_path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(zstd_props()))?;
    writer.write(batch)?;
    writer.close()?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Write `anchors_{mode}.parquet` for one mode's site table.
pub fn write_anchors(path: &Path, sites: &[AnchorSite]) -> CodecResult<()> {
    write_parquet_atomic(path, &schema::anchors_batch(sites)?)
}

/// Write `anchor_id_map_{mode}.parquet`, the `(site_id, anchor_int_id)`
/// bijection alongside the anchor table.
pub fn write_anchor_id_map(path: &Path, rows: &[AnchorIdMapRow]) -> CodecResult<()> {
    write_parquet_atomic(path, &schema::anchor_id_map_batch(rows)?)
}

/// Write `t_hex/{state}_{mode}_t_hex.parquet`, sorted by `cell_id` (then
/// `anchor_int_id`) for deterministic row-group contents.
pub fn write_t_hex(path: &Path, rows: &[THexRow], mode: &str, snapshot_ts: &str) -> CodecResult<()> {
    write_parquet_atomic(path, &schema::t_hex_batch(rows, mode, snapshot_ts)?)
}

/// Write one D_anchor partition's `part-00000.parquet`, sorted by
/// `anchor_int_id`.
pub fn write_d_anchor(path: &Path, rows: &[DAnchorRow]) -> CodecResult<()> {
    write_parquet_atomic(path, &schema::d_anchor_batch(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::{AnchorIntId, Seconds};

    #[test]
    fn d_anchor_write_then_read_round_trips() {
        let dir = std::env::temp_dir().join("tc-codec-test-write-d-anchor");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("part-00000.parquet");

        let rows = vec![
            DAnchorRow { anchor_int_id: AnchorIntId(2), seconds: Seconds(90) },
            DAnchorRow { anchor_int_id: AnchorIntId(1), seconds: Seconds(45) },
        ];
        write_d_anchor(&path, &rows).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists(), "temp file must be renamed away");

        let file = std::fs::File::open(&path).unwrap();
        let builder = parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let reader = builder.build().unwrap();
        let batches: Vec<_> = reader.map(|b| b.unwrap()).collect();
        let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total_rows, 2);
    }

    #[test]
    fn write_parquet_atomic_creates_missing_parent_dir() {
        let dir = std::env::temp_dir().join("tc-codec-test-write-nested").join("mode=drive").join("category_id=7");
        let _ = std::fs::remove_dir_all(dir.parent().unwrap().parent().unwrap());
        let path = dir.join("part-00000.parquet");

        write_d_anchor(&path, &[DAnchorRow { anchor_int_id: AnchorIntId(0), seconds: Seconds(0) }]).unwrap();
        assert!(path.exists());
    }
}
