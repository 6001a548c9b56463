//! Argument surface. Grounded on `valinor-cli`'s `#[derive(Parser)]` /
//! `#[derive(Subcommand)]` shape — the teacher has no binary crate of its
//! own to follow here.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tc_core::{EntityKind, TravelMode};

#[derive(Parser, Debug)]
#[command(name = "tc", author, version, about = "Anchor snapping and travel-time table builder.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Snap a POI table onto a road graph and write the anchor tables.
    BuildAnchors {
        #[arg(long)]
        mode: TravelMode,
        /// POI input, parquet.
        #[arg(long)]
        pois: PathBuf,
        /// OSM PBF extract to build the routable graph from.
        #[arg(long)]
        extract: PathBuf,
        #[arg(long = "out-sites")]
        out_sites: PathBuf,
        #[arg(long = "out-map")]
        out_map: PathBuf,
    },

    /// Compute the T_hex top-K table for one mode, at one or more cell
    /// resolutions.
    ComputeTHex {
        #[arg(long)]
        extract: PathBuf,
        /// `anchors_{mode}.parquet` from a prior `build-anchors` run.
        #[arg(long)]
        anchors: PathBuf,
        #[arg(long)]
        mode: TravelMode,
        /// Primary cutoff, in minutes.
        #[arg(long)]
        cutoff: f32,
        /// Overflow cutoff, in minutes; must be >= `--cutoff`.
        #[arg(long = "overflow-cutoff")]
        overflow_cutoff: f32,
        #[arg(long = "k-best")]
        k_best: usize,
        /// Cell resolutions to aggregate to, e.g. `--res 7 8`.
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        res: Vec<u8>,
        /// Node-to-cell table per resolution, same order as `--res`.
        #[arg(long = "cell-table", num_args = 1.., value_delimiter = ',')]
        cell_table: Vec<PathBuf>,
        #[arg(long = "snapshot-ts")]
        snapshot_ts: String,
        #[arg(long = "batch-size", default_value_t = 5000)]
        batch_size: usize,
        #[arg(long)]
        out: PathBuf,
    },

    /// Compute D_anchor slices for one or more entities of one kind.
    ComputeDAnchor {
        #[arg(long)]
        kind: EntityKind,
        #[arg(long)]
        extract: PathBuf,
        #[arg(long)]
        anchors: PathBuf,
        #[arg(long)]
        mode: TravelMode,
        /// Fallback primary cutoff in minutes, used for any entity not
        /// covered by `--entity-config` (or for all entities, if
        /// `--entity-config` is omitted).
        #[arg(long)]
        cutoff: f32,
        /// Fallback overflow cutoff in minutes; see `--cutoff`.
        #[arg(long = "overflow-cutoff")]
        overflow_cutoff: f32,
        /// Per-entity `{max_minutes, top_k}` table with a `_defaults` row.
        #[arg(long = "entity-config")]
        entity_config: Option<PathBuf>,
        /// Restrict the run to these entity ids; defaults to every entity
        /// id referenced by the anchor table's `category_ids`/`brand_ids`.
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        entity: Vec<u32>,
        #[arg(long)]
        force: bool,
        #[arg(long = "out-dir")]
        out_dir: PathBuf,
    },
}
