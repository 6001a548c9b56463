//! `tc` — anchor snapping and travel-time table driver.
//!
//! Three subcommands, each a thin wrapper over `tc-graph`/`tc-config`/
//! `tc-kbest`/`tc-danchor`/`tc-fingerprint`/`tc-codec`: `build-anchors`,
//! `compute-t-hex`, `compute-d-anchor`.

mod cli;
mod commands;
mod error;
mod summary;

use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use cli::{Cli, Command};
use error::CliResult;
use summary::RunSummary;
use tc_core::Classify;

fn init_logging() {
    let filter = std::env::var("TOWNSCOUT_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    match run(cli) {
        Ok(summary) => info!(%summary, "run complete"),
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            std::process::exit(e.severity().exit_code());
        }
    }
}

fn run(cli: Cli) -> CliResult<RunSummary> {
    match cli.command {
        Command::BuildAnchors { mode, pois, extract, out_sites, out_map } => {
            info!(
                %mode,
                pois = %pois.display(),
                extract = %extract.display(),
                out_sites = %out_sites.display(),
                out_map = %out_map.display(),
                "build-anchors"
            );
            commands::build_anchors(mode, &pois, &extract, &out_sites, &out_map)
        }

        Command::ComputeTHex {
            extract,
            anchors,
            mode,
            cutoff,
            overflow_cutoff,
            k_best,
            res,
            cell_table,
            snapshot_ts,
            batch_size,
            out,
        } => {
            info!(
                %mode,
                extract = %extract.display(),
                anchors = %anchors.display(),
                cutoff,
                overflow_cutoff,
                k_best,
                ?res,
                out = %out.display(),
                "compute-t-hex"
            );
            commands::compute_t_hex(
                &extract,
                &anchors,
                mode,
                cutoff,
                overflow_cutoff,
                k_best,
                &res,
                &cell_table,
                &snapshot_ts,
                batch_size,
                &out,
            )
        }

        Command::ComputeDAnchor {
            kind,
            extract,
            anchors,
            mode,
            cutoff,
            overflow_cutoff,
            entity_config,
            entity,
            force,
            out_dir,
        } => {
            info!(
                %kind,
                %mode,
                extract = %extract.display(),
                anchors = %anchors.display(),
                cutoff,
                overflow_cutoff,
                entity_config = ?entity_config.as_ref().map(|p| p.display().to_string()),
                force,
                out_dir = %out_dir.display(),
                "compute-d-anchor"
            );
            commands::compute_d_anchor(
                kind,
                &extract,
                &anchors,
                mode,
                cutoff,
                overflow_cutoff,
                entity_config.as_deref(),
                &entity,
                force,
                &out_dir,
            )
        }
    }
}
