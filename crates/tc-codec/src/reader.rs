//! Reads the anchor table back out of `anchors_{mode}.parquet` — the read
//! side of [`crate::parquet::anchors_batch`], for the `compute-t-hex` and
//! `compute-d-anchor` drivers that consume an already-built anchor table
//! rather than rebuilding it.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, Float32Array, Int32Array, StringArray, UInt32Array};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use tc_core::{AnchorIntId, AnchorSite, NodeId};

use crate::CodecError;

fn parse_ids<T: std::str::FromStr>(joined: &str) -> Vec<T> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(',').filter_map(|s| s.parse().ok()).collect()
}

fn column<'a, T: Array + 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a T, CodecError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| CodecError::Invariant(format!("anchors input is missing required column {name:?}")))?;
    let col: &Arc<dyn Array> = batch.column(idx);
    col.as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| CodecError::Invariant(format!("column {name:?} has an unexpected arrow type")))
}

/// Read every site out of an `anchors_{mode}.parquet` file, in file order
/// (already `anchor_int_id`-ascending by construction).
pub fn read_anchors_parquet(path: &Path) -> Result<Vec<AnchorSite>, CodecError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut sites = Vec::new();
    for batch in reader {
        let batch = batch?;
        sites.extend(rows_from_batch(&batch)?);
    }
    Ok(sites)
}

fn rows_from_batch(batch: &RecordBatch) -> Result<Vec<AnchorSite>, CodecError> {
    let site_id = column::<StringArray>(batch, "site_id")?;
    let anchor_int_id = column::<Int32Array>(batch, "anchor_int_id")?;
    let node_id = column::<UInt32Array>(batch, "node_id")?;
    let lon = column::<Float32Array>(batch, "lon")?;
    let lat = column::<Float32Array>(batch, "lat")?;
    let poi_ids = column::<StringArray>(batch, "poi_ids")?;
    let category_ids = column::<StringArray>(batch, "category_ids")?;
    let brand_ids = column::<StringArray>(batch, "brand_ids")?;

    let mut rows = Vec::with_capacity(batch.num_rows());
    for i in 0..batch.num_rows() {
        let uuid = uuid::Uuid::parse_str(site_id.value(i))
            .map_err(|e| CodecError::Invariant(format!("invalid site_id {:?}: {e}", site_id.value(i))))?;
        rows.push(AnchorSite {
            anchor_int_id: AnchorIntId(anchor_int_id.value(i) as u32),
            site_id: uuid,
            node_id: NodeId(node_id.value(i)),
            lon: lon.value(i),
            lat: lat.value(i),
            poi_ids: parse_ids(poi_ids.value(i)),
            category_ids: parse_ids(category_ids.value(i)),
            brand_ids: parse_ids(brand_ids.value(i)),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parquet::anchors_batch;
    use crate::writer::write_parquet_atomic;

    #[test]
    fn anchors_round_trip_through_parquet() {
        let dir = std::env::temp_dir().join("tc-codec-test-read-anchors");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("anchors_drive.parquet");

        let site = AnchorSite {
            anchor_int_id: AnchorIntId(0),
            site_id: uuid::Uuid::nil(),
            node_id: NodeId(7),
            lon: -1.5,
            lat: 52.0,
            poi_ids: vec![1, 2, 3],
            category_ids: vec![9],
            brand_ids: vec![],
        };
        let batch = anchors_batch(std::slice::from_ref(&site)).unwrap();
        write_parquet_atomic(&path, &batch).unwrap();

        let read = read_anchors_parquet(&path).unwrap();
        assert_eq!(read, vec![site]);
    }
}
