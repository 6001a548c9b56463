//! Cell aggregation: union the per-node top-K sets of every node in a cell,
//! then trim back to K by seconds with anchor-id uniqueness.

use std::collections::HashMap;

use tc_core::THexRow;
use tc_graph::TopK;

use tc_config::CellTable;

/// Aggregate per-node labels up to one spatial cell table, producing
/// long-form `T_hex` rows. Cells with no reachable anchor are omitted.
pub fn aggregate_cells(labels: &[TopK], cell_table: &CellTable, k: usize) -> Vec<THexRow> {
    let mut by_cell: HashMap<&str, TopK> = HashMap::new();

    for (node_idx, label) in labels.iter().enumerate() {
        if label.is_empty() {
            continue;
        }
        let node_id = tc_core::NodeId(node_idx as u32);
        let Some(cell_id) = cell_table.cell_for(node_id) else {
            continue;
        };
        by_cell.entry(cell_id).or_insert_with(|| TopK::new(k)).merge_from(label);
    }

    let resolution = cell_table.resolution();
    let mut rows = Vec::new();
    for (cell_id, topk) in by_cell {
        for entry in topk.entries() {
            rows.push(THexRow {
                cell_id: cell_id.to_string(),
                anchor_int_id: tc_core::AnchorIntId(entry.source_id),
                seconds: entry.seconds,
                resolution,
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tc_core::{AnchorIntId, NodeId, Seconds};

    fn cell_table() -> CellTable {
        let csv = "node_id,resolution,cell_id\n0,9,cellA\n1,9,cellA\n2,9,cellB\n";
        tc_config::load_cell_table_reader(Cursor::new(csv)).unwrap()
    }

    #[test]
    fn union_of_two_nodes_trims_to_k() {
        let table = cell_table();
        let mut n0 = TopK::new(2);
        n0.try_insert(1, Seconds(50));
        n0.try_insert(2, Seconds(90));
        let mut n1 = TopK::new(2);
        n1.try_insert(3, Seconds(10));
        let n2 = TopK::new(2); // different cell, untouched

        let labels = vec![n0, n1, n2];
        let rows = aggregate_cells(&labels, &table, 2);

        let cell_a: Vec<_> = rows.iter().filter(|r| r.cell_id == "cellA").collect();
        assert_eq!(cell_a.len(), 2);
        assert_eq!(cell_a[0].anchor_int_id, AnchorIntId(3));
        assert_eq!(cell_a[0].seconds, Seconds(10));
        assert!(rows.iter().all(|r| r.cell_id != "cellB"));
    }

    #[test]
    fn cell_with_no_reached_node_is_omitted() {
        let table = cell_table();
        let labels = vec![TopK::new(1), TopK::new(1), TopK::new(1)];
        let rows = aggregate_cells(&labels, &table, 1);
        assert!(rows.is_empty());
        let _ = NodeId(0);
    }
}
