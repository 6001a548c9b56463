//! JSON materialization for D_anchor slices.
//!
//! The API layer re-keys a D_anchor parquet slice into `{anchor_int_id:
//! seconds}` JSON. Doing that by converting each column through a
//! label-indexed series and joining on position re-aligns values to the
//! wrong anchor whenever a reader drops or reorders a row — this module is
//! the one place that zip happens, so every caller goes through it instead
//! of re-deriving it.

use tc_core::DAnchorRow;

/// Zip `anchor_int_id` and `seconds` positionally into a JSON object keyed
/// by the string form of `anchor_int_id`.
pub fn d_anchor_rows_to_json(rows: &[DAnchorRow]) -> serde_json::Value {
    let mut map = serde_json::Map::with_capacity(rows.len());
    for row in rows {
        map.insert(row.anchor_int_id.0.to_string(), serde_json::Value::from(row.seconds.0));
    }
    serde_json::Value::Object(map)
}

/// Same zip, but over separately-sourced `anchor_int_id`/`seconds` columns
/// rather than a `DAnchorRow` slice — the shape a parquet reader actually
/// hands back (one array per column). Panics if the two columns differ in
/// length, since that means the caller already misaligned them upstream.
pub fn zip_columns_to_json(anchor_int_ids: &[i32], seconds: &[u16]) -> serde_json::Value {
    assert_eq!(
        anchor_int_ids.len(),
        seconds.len(),
        "anchor_int_id and seconds columns must be the same length to zip positionally"
    );
    let mut map = serde_json::Map::with_capacity(anchor_int_ids.len());
    for (id, s) in anchor_int_ids.iter().zip(seconds.iter()) {
        map.insert(id.to_string(), serde_json::Value::from(*s));
    }
    serde_json::Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_core::{AnchorIntId, Seconds};

    /// S7 — anchor<->api label-alignment trap: rows must map positionally,
    /// not by any incidental index that a label-indexed series might imply.
    #[test]
    fn s7_label_alignment() {
        let rows = vec![
            DAnchorRow { anchor_int_id: AnchorIntId(13279), seconds: Seconds(1730) },
            DAnchorRow { anchor_int_id: AnchorIntId(99999), seconds: Seconds(387) },
        ];
        let json = d_anchor_rows_to_json(&rows);
        assert_eq!(json["13279"], 1730);
        assert_eq!(json["99999"], 387);
    }

    #[test]
    fn s7_label_alignment_via_raw_columns() {
        let ids = [13279, 99999];
        let secs = [1730u16, 387];
        let json = zip_columns_to_json(&ids, &secs);
        assert_eq!(json["13279"], 1730);
        assert_eq!(json["99999"], 387);
    }

    #[test]
    #[should_panic]
    fn mismatched_column_lengths_panic_rather_than_silently_misalign() {
        zip_columns_to_json(&[1, 2, 3], &[10, 20]);
    }
}
