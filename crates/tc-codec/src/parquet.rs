//! Arrow schema definitions and `RecordBatch` construction for the four
//! output families: anchors, anchor_id_map, T_hex, D_anchor.
//!
//! Multi-valued anchor attributes (`poi_ids`, `category_ids`, `brand_ids`)
//! are written as comma-joined strings rather than list columns — the
//! schema for these is not physical-type-pinned the way T_hex/D_anchor are,
//! and nothing downstream in this engine's contract parses them back.

use std::sync::Arc;

use arrow::array::{Int32Builder, StringBuilder, UInt16Builder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use tc_core::{AnchorIdMapRow, AnchorSite, DAnchorRow, THexRow};

use crate::CodecResult;

fn join_ids<T: ToString>(ids: &[T]) -> String {
    ids.iter().map(T::to_string).collect::<Vec<_>>().join(",")
}

pub fn anchors_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("site_id", DataType::Utf8, false),
        Field::new("anchor_int_id", DataType::Int32, false),
        Field::new("node_id", DataType::UInt32, false),
        Field::new("lon", DataType::Float32, false),
        Field::new("lat", DataType::Float32, false),
        Field::new("poi_ids", DataType::Utf8, false),
        Field::new("category_ids", DataType::Utf8, false),
        Field::new("brand_ids", DataType::Utf8, false),
    ]))
}

/// Build the anchors record batch. Rows are written in the order given;
/// callers pass sites already sorted by `anchor_int_id` (the build order).
pub fn anchors_batch(sites: &[AnchorSite]) -> CodecResult<RecordBatch> {
    let mut site_id = StringBuilder::new();
    let mut anchor_int_id = Int32Builder::new();
    let mut node_id = UInt32Builder::new();
    let mut lon = arrow::array::Float32Builder::new();
    let mut lat = arrow::array::Float32Builder::new();
    let mut poi_ids = StringBuilder::new();
    let mut category_ids = StringBuilder::new();
    let mut brand_ids = StringBuilder::new();

    for site in sites {
        site_id.append_value(site.site_id.to_string());
        anchor_int_id.append_value(site.anchor_int_id.0 as i32);
        node_id.append_value(site.node_id.0);
        lon.append_value(site.lon);
        lat.append_value(site.lat);
        poi_ids.append_value(join_ids(&site.poi_ids));
        category_ids.append_value(join_ids(&site.category_ids));
        brand_ids.append_value(join_ids(&site.brand_ids));
    }

    Ok(RecordBatch::try_new(
        anchors_schema(),
        vec![
            Arc::new(site_id.finish()),
            Arc::new(anchor_int_id.finish()),
            Arc::new(node_id.finish()),
            Arc::new(lon.finish()),
            Arc::new(lat.finish()),
            Arc::new(poi_ids.finish()),
            Arc::new(category_ids.finish()),
            Arc::new(brand_ids.finish()),
        ],
    )?)
}

pub fn anchor_id_map_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("site_id", DataType::Utf8, false),
        Field::new("anchor_int_id", DataType::Int32, false),
    ]))
}

pub fn anchor_id_map_batch(rows: &[AnchorIdMapRow]) -> CodecResult<RecordBatch> {
    let mut site_id = StringBuilder::new();
    let mut anchor_int_id = Int32Builder::new();
    for row in rows {
        site_id.append_value(row.site_id.to_string());
        anchor_int_id.append_value(row.anchor_int_id.0 as i32);
    }
    Ok(RecordBatch::try_new(
        anchor_id_map_schema(),
        vec![Arc::new(site_id.finish()), Arc::new(anchor_int_id.finish())],
    )?)
}

pub fn t_hex_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("cell_id", DataType::UInt64, false),
        Field::new("anchor_int_id", DataType::Int32, false),
        Field::new("seconds", DataType::UInt16, false),
        Field::new("resolution", DataType::Int32, false),
        Field::new("mode", DataType::Utf8, false),
        Field::new("snapshot_ts", DataType::Utf8, false),
    ]))
}

/// Build the T_hex long-form batch. `rows` is sorted by `cell_id` ascending
/// (then `anchor_int_id`, for stable ordering within a cell) before being
/// written, so row-group contents are deterministic regardless of the
/// aggregation pass's internal iteration order.
///
/// `cell_id` is parsed from the table's hex-string cell index into `uint64`
/// per the canonical output schema.
pub fn t_hex_batch(rows: &[THexRow], mode: &str, snapshot_ts: &str) -> CodecResult<RecordBatch> {
    let mut sorted: Vec<&THexRow> = rows.iter().collect();
    sorted.sort_by(|a, b| a.cell_id.cmp(&b.cell_id).then(a.anchor_int_id.cmp(&b.anchor_int_id)));

    let mut cell_id = UInt64Builder::new();
    let mut anchor_int_id = Int32Builder::new();
    let mut seconds = UInt16Builder::new();
    let mut resolution = Int32Builder::new();
    let mut mode_col = StringBuilder::new();
    let mut snapshot_col = StringBuilder::new();

    for row in sorted {
        let parsed = u64::from_str_radix(&row.cell_id, 16)
            .map_err(|e| crate::CodecError::Invariant(format!("cell_id {:?} is not valid hex: {e}", row.cell_id)))?;
        cell_id.append_value(parsed);
        anchor_int_id.append_value(row.anchor_int_id.0 as i32);
        seconds.append_value(row.seconds.0);
        resolution.append_value(row.resolution as i32);
        mode_col.append_value(mode);
        snapshot_col.append_value(snapshot_ts);
    }

    Ok(RecordBatch::try_new(
        t_hex_schema(),
        vec![
            Arc::new(cell_id.finish()),
            Arc::new(anchor_int_id.finish()),
            Arc::new(seconds.finish()),
            Arc::new(resolution.finish()),
            Arc::new(mode_col.finish()),
            Arc::new(snapshot_col.finish()),
        ],
    )?)
}

pub fn d_anchor_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("anchor_int_id", DataType::Int32, false),
        Field::new("seconds", DataType::UInt16, false),
    ]))
}

/// Build the D_anchor slice batch, sorted by `anchor_int_id` ascending.
pub fn d_anchor_batch(rows: &[DAnchorRow]) -> CodecResult<RecordBatch> {
    let mut sorted: Vec<&DAnchorRow> = rows.iter().collect();
    sorted.sort_by_key(|r| r.anchor_int_id);

    let mut anchor_int_id = Int32Builder::new();
    let mut seconds = UInt16Builder::new();
    for row in sorted {
        anchor_int_id.append_value(row.anchor_int_id.0 as i32);
        seconds.append_value(row.seconds.0);
    }

    Ok(RecordBatch::try_new(
        d_anchor_schema(),
        vec![Arc::new(anchor_int_id.finish()), Arc::new(seconds.finish())],
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::{AnchorIntId, Seconds};

    #[test]
    fn t_hex_batch_sorts_by_cell_then_anchor() {
        let rows = vec![
            THexRow { cell_id: "bb".into(), anchor_int_id: AnchorIntId(1), seconds: Seconds(10), resolution: 9 },
            THexRow { cell_id: "aa".into(), anchor_int_id: AnchorIntId(2), seconds: Seconds(5), resolution: 9 },
            THexRow { cell_id: "aa".into(), anchor_int_id: AnchorIntId(1), seconds: Seconds(3), resolution: 9 },
        ];
        let batch = t_hex_batch(&rows, "drive", "2026-01-01T00:00:00Z").unwrap();
        assert_eq!(batch.num_rows(), 3);

        let cell_ids = batch
            .column(0)
            .as_any()
            .downcast_ref::<arrow::array::UInt64Array>()
            .unwrap();
        let expected_aa = u64::from_str_radix("aa", 16).unwrap();
        let expected_bb = u64::from_str_radix("bb", 16).unwrap();
        assert_eq!(cell_ids.value(0), expected_aa);
        assert_eq!(cell_ids.value(1), expected_aa);
        assert_eq!(cell_ids.value(2), expected_bb);

        let anchor_ids = batch
            .column(1)
            .as_any()
            .downcast_ref::<arrow::array::Int32Array>()
            .unwrap();
        // within cell "aa", anchor_int_id 1 sorts before 2
        assert_eq!(anchor_ids.value(0), 1);
        assert_eq!(anchor_ids.value(1), 2);
    }

    #[test]
    fn d_anchor_batch_sorts_by_anchor_int_id() {
        let rows = vec![
            DAnchorRow { anchor_int_id: AnchorIntId(99999), seconds: Seconds(387) },
            DAnchorRow { anchor_int_id: AnchorIntId(13279), seconds: Seconds(1730) },
        ];
        let batch = d_anchor_batch(&rows).unwrap();
        let anchor_ids = batch
            .column(0)
            .as_any()
            .downcast_ref::<arrow::array::Int32Array>()
            .unwrap();
        assert_eq!(anchor_ids.value(0), 13279);
        assert_eq!(anchor_ids.value(1), 99999);
    }
}
