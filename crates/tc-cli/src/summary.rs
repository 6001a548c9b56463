//! The one-line run summary emitted at the end of every command.

/// Counts from one command invocation. Every field besides `runtime_seconds`
/// is `None` when the command that ran has no notion of it (e.g.
/// `build-anchors` never touches `cells_written`).
#[derive(Default, Debug)]
pub struct RunSummary {
    pub anchors: Option<usize>,
    pub sources_per_entity_median: Option<usize>,
    pub cells_written: Option<usize>,
    pub unreachable_cells: Option<usize>,
    pub entities_ok: Option<usize>,
    pub entities_failed: Option<usize>,
    /// The run's own primary cutoff, in seconds. A reader comparing a row's
    /// `seconds` against this value recovers the overflow-tier flag the long
    /// form otherwise drops.
    pub cutoff_seconds: Option<u32>,
    pub runtime_seconds: f64,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        macro_rules! field {
            ($name:literal, $val:expr) => {
                if let Some(v) = $val {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, concat!($name, "={}"), v)?;
                    first = false;
                }
            };
        }
        field!("anchors", self.anchors);
        field!("sources_per_entity_median", self.sources_per_entity_median);
        field!("cells_written", self.cells_written);
        field!("unreachable_cells", self.unreachable_cells);
        field!("entities_ok", self.entities_ok);
        field!("entities_failed", self.entities_failed);
        field!("cutoff_seconds", self.cutoff_seconds);
        if !first {
            write!(f, ", ")?;
        }
        write!(f, "runtime_seconds={:.3}}}", self.runtime_seconds)
    }
}

/// Median of `values`, sorting in place. `None` for an empty slice.
pub fn median_usize(values: &mut [usize]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    Some(values[values.len() / 2])
}
