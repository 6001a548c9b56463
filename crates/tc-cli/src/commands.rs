//! The three subcommands' logic, kept free of argument parsing so `cli.rs`
//! owns the surface and this module owns the work.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::warn;

use tc_core::{EntityKind, Seconds, TravelMode};
use tc_kbest::{KBestEngine, KBestParams, NoopObserver};

use crate::error::{CliError, CliResult};
use crate::summary::{median_usize, RunSummary};

/// `anchors_{mode}.parquet` -> `anchor_id_map_{mode}.parquet`, same
/// directory. The CLI surface only carries the sites path; the map path is
/// derived by this naming convention rather than taking a second flag.
fn derive_id_map_path(anchors_path: &Path) -> PathBuf {
    let name = anchors_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("anchors.parquet");
    let mapped = name.replacen("anchors_", "anchor_id_map_", 1);
    anchors_path.with_file_name(mapped)
}

pub fn build_anchors(
    mode: TravelMode,
    pois_path: &Path,
    extract_path: &Path,
    out_sites: &Path,
    out_map: &Path,
) -> CliResult<RunSummary> {
    let t0 = Instant::now();

    let network = tc_graph::osm::load_from_pbf(extract_path, mode)?;
    let pois = tc_config::load_pois_parquet(pois_path)?;
    let (sites, id_map) = tc_graph::build_anchor_sites(&network, &pois, mode);

    let snapped: usize = sites.iter().map(|s| s.poi_ids.len()).sum();
    if pois.len() > snapped {
        warn!(dropped = pois.len() - snapped, "some POIs did not snap to a road node and were dropped");
    }

    tc_codec::write_anchors(out_sites, &sites)?;
    tc_codec::write_anchor_id_map(out_map, &id_map)?;

    Ok(RunSummary { anchors: Some(sites.len()), runtime_seconds: t0.elapsed().as_secs_f64(), ..Default::default() })
}

#[allow(clippy::too_many_arguments)]
pub fn compute_t_hex(
    extract_path: &Path,
    anchors_path: &Path,
    mode: TravelMode,
    cutoff_minutes: f32,
    overflow_cutoff_minutes: f32,
    k_best: usize,
    resolutions: &[u8],
    cell_tables: &[PathBuf],
    snapshot_ts: &str,
    batch_size: usize,
    out_path: &Path,
) -> CliResult<RunSummary> {
    let t0 = Instant::now();

    if resolutions.len() != cell_tables.len() {
        return Err(CliError::Invariant(format!(
            "--res has {} values but --cell-table has {}: one cell table per resolution",
            resolutions.len(),
            cell_tables.len()
        )));
    }

    let network = tc_graph::osm::load_from_pbf(extract_path, mode)?;
    let sites = tc_codec::read_anchors_parquet(anchors_path)?;

    let params = KBestParams {
        k: k_best,
        cutoff_seconds: Seconds::from_minutes(cutoff_minutes),
        overflow_cutoff_seconds: Seconds::from_minutes(overflow_cutoff_minutes),
        batch_size,
    };
    let engine = KBestEngine::new(&network, &sites, params)?;
    let labels = engine.run(&mut NoopObserver);

    let mut rows = Vec::new();
    let mut total_cells = 0usize;
    for (res, table_path) in resolutions.iter().zip(cell_tables.iter()) {
        let table = tc_config::load_cell_table_csv(table_path)?;
        if table.resolution() != *res {
            return Err(CliError::Invariant(format!(
                "cell table {} is resolution {} but --res asked for {}",
                table_path.display(),
                table.resolution(),
                res
            )));
        }
        total_cells += table.len();
        rows.extend(tc_kbest::aggregate_cells(&labels, &table, k_best));
    }

    let cells_written: HashSet<&str> = rows.iter().map(|r| r.cell_id.as_str()).collect();
    let cells_written_count = cells_written.len();
    let unreachable_cells = total_cells.saturating_sub(cells_written_count);
    if unreachable_cells > 0 {
        warn!(unreachable_cells, "cells with no anchor reachable within the overflow cutoff");
    }

    tc_codec::write_t_hex(out_path, &rows, mode.as_str(), snapshot_ts)?;

    Ok(RunSummary {
        anchors: Some(sites.len()),
        cells_written: Some(cells_written_count),
        unreachable_cells: Some(unreachable_cells),
        cutoff_seconds: Some(params.cutoff_seconds.0 as u32),
        runtime_seconds: t0.elapsed().as_secs_f64(),
        ..Default::default()
    })
}

#[allow(clippy::too_many_arguments)]
pub fn compute_d_anchor(
    kind: EntityKind,
    extract_path: &Path,
    anchors_path: &Path,
    mode: TravelMode,
    cutoff_minutes: f32,
    overflow_cutoff_minutes: f32,
    entity_config_path: Option<&Path>,
    entities: &[u32],
    force: bool,
    out_dir: &Path,
) -> CliResult<RunSummary> {
    let t0 = Instant::now();

    let network = tc_graph::osm::load_from_pbf(extract_path, mode)?;
    let sites = tc_codec::read_anchors_parquet(anchors_path)?;

    let entity_config = match entity_config_path {
        Some(path) => tc_config::load_entity_config_csv(path)?,
        None => {
            let csv = format!("entity_id,max_minutes,top_k\n_defaults,{cutoff_minutes},1\n");
            tc_config::load_entity_config_reader(std::io::Cursor::new(csv))?
        }
    };
    // `--overflow-cutoff` is the hard ceiling on search radius regardless of
    // what an entity's own config row asks for; the narrower of the two
    // wins, same two-tier shape as `KBestParams`'s primary/overflow split.
    let overflow_cutoff = Seconds::from_minutes(overflow_cutoff_minutes);

    let entity_ids: Vec<u32> = if entities.is_empty() {
        let mut ids = BTreeSet::new();
        for site in &sites {
            match kind {
                EntityKind::Category => ids.extend(site.category_ids.iter().copied()),
                EntityKind::Brand => ids.extend(site.brand_ids.iter().copied()),
            }
        }
        ids.into_iter().collect()
    } else {
        entities.to_vec()
    };

    let id_map_path = derive_id_map_path(anchors_path);
    let current_fingerprint = tc_fingerprint::compute_fingerprint(anchors_path, &id_map_path)?;
    let kind_mode_dir = out_dir.join(format!("d_anchor_{kind}")).join(format!("mode={mode}"));
    let hash_file = kind_mode_dir.join(".fingerprint.hash");
    let stored_fingerprint = tc_fingerprint::read_stored_fingerprint(&hash_file);
    let inputs_stale = tc_fingerprint::is_stale(current_fingerprint, stored_fingerprint);

    let engine = tc_danchor::DAnchorEngine::new(&network, &sites);

    let mut entities_ok = 0usize;
    let mut entities_failed = 0usize;
    let mut source_counts = Vec::with_capacity(entity_ids.len());

    for entity_id in entity_ids {
        let dir = tc_danchor::partition_dir(out_dir, kind, mode, entity_id);
        if !tc_danchor::should_recompute(&dir, force, inputs_stale) {
            entities_ok += 1;
            continue;
        }

        let sources = sites
            .iter()
            .filter(|s| match kind {
                EntityKind::Category => s.category_ids.contains(&entity_id),
                EntityKind::Brand => s.brand_ids.contains(&entity_id),
            })
            .count();
        source_counts.push(sources);

        let cutoff = Seconds(entity_config.cutoff_for(entity_id).cutoff.0.min(overflow_cutoff.0));
        let rows = engine.compute_slice(kind, entity_id, cutoff);

        match tc_codec::write_d_anchor(&dir.join("part-00000.parquet"), &rows) {
            Ok(()) => entities_ok += 1,
            Err(e) => {
                warn!(entity_id, kind = %kind, error = %e, "entity failed, continuing with remaining entities");
                entities_failed += 1;
            }
        }
    }

    // Written once the whole entity loop is done, even if some entities
    // failed: a failed entity's missing `part-00000.parquet` makes
    // `should_recompute` retry it next run regardless of fingerprint state.
    tc_fingerprint::write_fingerprint(&hash_file, current_fingerprint)?;

    Ok(RunSummary {
        anchors: Some(sites.len()),
        sources_per_entity_median: median_usize(&mut source_counts),
        entities_ok: Some(entities_ok),
        entities_failed: Some(entities_failed),
        cutoff_seconds: Some(overflow_cutoff.0 as u32),
        runtime_seconds: t0.elapsed().as_secs_f64(),
        ..Default::default()
    })
}
