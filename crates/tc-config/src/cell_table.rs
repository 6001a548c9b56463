//! Node-to-cell table: a precomputed external mapping from graph node to the
//! spatial cell (at a fixed resolution) it falls inside, used by the K-best
//! engine to aggregate per-node top-K rows up to T_hex rows.
//!
//! # CSV format
//!
//! ```csv
//! node_id,resolution,cell_id
//! 0,9,8928308280fffff
//! 1,9,8928308281fffff
//! ```
//!
//! One resolution per file; `resolution` is carried per row only so a
//! mismatched file is caught early rather than silently mis-joined.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tc_core::NodeId;

use crate::ConfigError;

#[derive(Deserialize)]
struct CellRecord {
    node_id: u32,
    resolution: u8,
    cell_id: String,
}

/// Node -> cell lookup for a single resolution.
pub struct CellTable {
    resolution: u8,
    cell_of: HashMap<NodeId, String>,
}

impl CellTable {
    pub fn resolution(&self) -> u8 {
        self.resolution
    }

    pub fn cell_for(&self, node_id: NodeId) -> Option<&str> {
        self.cell_of.get(&node_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cell_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_of.is_empty()
    }
}

/// Load a [`CellTable`] from a CSV file.
pub fn load_cell_table_csv(path: &Path) -> Result<CellTable, ConfigError> {
    let file = std::fs::File::open(path)?;
    load_cell_table_reader(file)
}

/// Like [`load_cell_table_csv`] but accepts any `Read` source.
pub fn load_cell_table_reader<R: Read>(reader: R) -> Result<CellTable, ConfigError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut cell_of = HashMap::new();
    let mut resolution: Option<u8> = None;

    for result in csv_reader.deserialize::<CellRecord>() {
        let row = result.map_err(|e| ConfigError::Parse(e.to_string()))?;
        match resolution {
            None => resolution = Some(row.resolution),
            Some(r) if r != row.resolution => {
                return Err(ConfigError::Parse(format!(
                    "cell table mixes resolutions {r} and {}: expected one resolution per file",
                    row.resolution
                )));
            }
            Some(_) => {}
        }
        cell_of.insert(NodeId(row.node_id), row.cell_id);
    }

    let resolution = resolution
        .ok_or_else(|| ConfigError::Parse("cell table file has no rows".into()))?;
    Ok(CellTable { resolution, cell_of })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn loads_node_cell_mapping() {
        let csv = "node_id,resolution,cell_id\n0,9,8928308280fffff\n1,9,8928308281fffff\n";
        let table = load_cell_table_reader(Cursor::new(csv)).unwrap();
        assert_eq!(table.resolution(), 9);
        assert_eq!(table.cell_for(NodeId(0)), Some("8928308280fffff"));
        assert_eq!(table.cell_for(NodeId(2)), None);
    }

    #[test]
    fn mismatched_resolution_is_an_error() {
        let csv = "node_id,resolution,cell_id\n0,9,8928308280fffff\n1,10,8928308281fffff\n";
        let err = load_cell_table_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_file_is_an_error() {
        let csv = "node_id,resolution,cell_id\n";
        let err = load_cell_table_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
