//! Point-of-interest input reader (Parquet).
//!
//! Expects columns `poi_id` (u64), `brand_id` (u32, nullable), `category_id`
//! (u32), `lon`/`lat` (f32), `source` (utf8). Mirrors the schema the codec
//! writes for anchor-adjacent outputs, just on the read side.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, Float32Array, StringArray, UInt32Array, UInt64Array};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use tc_core::Poi;

use crate::ConfigError;

/// Read every POI row out of a Parquet file at `path`.
pub fn load_pois_parquet(path: &Path) -> Result<Vec<Poi>, ConfigError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut pois = Vec::new();
    for batch in reader {
        let batch = batch.map_err(arrow::error::ArrowError::from)?;
        pois.extend(rows_from_batch(&batch)?);
    }
    Ok(pois)
}

fn rows_from_batch(batch: &arrow::record_batch::RecordBatch) -> Result<Vec<Poi>, ConfigError> {
    let poi_id = column::<UInt64Array>(batch, "poi_id")?;
    let brand_id = column::<UInt32Array>(batch, "brand_id")?;
    let category_id = column::<UInt32Array>(batch, "category_id")?;
    let lon = column::<Float32Array>(batch, "lon")?;
    let lat = column::<Float32Array>(batch, "lat")?;
    let source = column::<StringArray>(batch, "source")?;

    let mut rows = Vec::with_capacity(batch.num_rows());
    for i in 0..batch.num_rows() {
        rows.push(Poi {
            poi_id: poi_id.value(i),
            brand_id: if brand_id.is_null(i) { None } else { Some(brand_id.value(i)) },
            category_id: category_id.value(i),
            lon: lon.value(i),
            lat: lat.value(i),
            source: source.value(i).to_string(),
        });
    }
    Ok(rows)
}

fn column<'a, T: Array + 'static>(
    batch: &'a arrow::record_batch::RecordBatch,
    name: &str,
) -> Result<&'a T, ConfigError> {
    let idx = batch.schema().index_of(name).map_err(|_| {
        ConfigError::Parse(format!("poi input is missing required column {name:?}"))
    })?;
    let col: &Arc<dyn Array> = batch.column(idx);
    col.as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| ConfigError::Parse(format!("column {name:?} has an unexpected arrow type")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_reports_parse_error() {
        use arrow::array::UInt64Builder;
        use arrow::datatypes::{DataType, Field, Schema};
        use arrow::record_batch::RecordBatch;

        let schema = Arc::new(Schema::new(vec![Field::new("poi_id", DataType::UInt64, false)]));
        let mut b = UInt64Builder::new();
        b.append_value(1);
        let batch = RecordBatch::try_new(schema, vec![Arc::new(b.finish())]).unwrap();

        let err = rows_from_batch(&batch).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
