//! Per-entity D_anchor configuration: a `max_minutes` cutoff and a `top_k`,
//! with a `_defaults` row supplying both for any entity id the file is
//! silent on.
//!
//! # CSV format
//!
//! ```csv
//! entity_id,max_minutes,top_k
//! _defaults,30,1
//! 42,15,1
//! ```
//!
//! `entity_id` is either a non-negative integer or the literal `_defaults`.
//! A file with no `_defaults` row is a config error — every entity not
//! explicitly listed still needs a cutoff to run against.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tc_core::Seconds;

use crate::ConfigError;

#[derive(Deserialize)]
struct EntityConfigRecord {
    entity_id: String,
    max_minutes: f32,
    top_k: u32,
}

/// The resolved cutoff and top-K for a single entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EntityCutoff {
    pub cutoff: Seconds,
    pub top_k: u32,
}

/// Per-entity overrides plus the `_defaults` fallback.
pub struct EntityConfigTable {
    defaults: EntityCutoff,
    overrides: HashMap<u32, EntityCutoff>,
}

impl EntityConfigTable {
    /// Resolve the cutoff for `entity_id`, falling back to `_defaults` if
    /// the file had no row for it.
    pub fn cutoff_for(&self, entity_id: u32) -> EntityCutoff {
        self.overrides.get(&entity_id).copied().unwrap_or(self.defaults)
    }

    pub fn defaults(&self) -> EntityCutoff {
        self.defaults
    }
}

/// Load an [`EntityConfigTable`] from a CSV file.
pub fn load_entity_config_csv(path: &Path) -> Result<EntityConfigTable, ConfigError> {
    let file = std::fs::File::open(path)?;
    load_entity_config_reader(file)
}

/// Like [`load_entity_config_csv`] but accepts any `Read` source.
pub fn load_entity_config_reader<R: Read>(reader: R) -> Result<EntityConfigTable, ConfigError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut overrides = HashMap::new();
    let mut defaults: Option<EntityCutoff> = None;

    for result in csv_reader.deserialize::<EntityConfigRecord>() {
        let row = result.map_err(|e| ConfigError::Parse(e.to_string()))?;
        let cutoff = EntityCutoff {
            cutoff: Seconds::from_minutes(row.max_minutes),
            top_k: row.top_k,
        };

        if row.entity_id == "_defaults" {
            defaults = Some(cutoff);
            continue;
        }

        let id: u32 = row.entity_id.parse().map_err(|_| {
            ConfigError::Parse(format!(
                "invalid entity_id {:?}: expected a non-negative integer or \"_defaults\"",
                row.entity_id
            ))
        })?;
        overrides.insert(id, cutoff);
    }

    let defaults = defaults
        .ok_or_else(|| ConfigError::Parse("entity config is missing a _defaults row".into()))?;

    Ok(EntityConfigTable { defaults, overrides })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn override_wins_over_defaults() {
        let csv = "entity_id,max_minutes,top_k\n_defaults,30,1\n42,15,2\n";
        let table = load_entity_config_reader(Cursor::new(csv)).unwrap();
        assert_eq!(table.cutoff_for(42).top_k, 2);
        assert_eq!(table.cutoff_for(42).cutoff, Seconds::from_minutes(15.0));
    }

    #[test]
    fn absent_entity_falls_back_to_defaults() {
        let csv = "entity_id,max_minutes,top_k\n_defaults,30,1\n42,15,2\n";
        let table = load_entity_config_reader(Cursor::new(csv)).unwrap();
        assert_eq!(table.cutoff_for(7), table.defaults());
        assert_eq!(table.cutoff_for(7).cutoff, Seconds::from_minutes(30.0));
    }

    #[test]
    fn missing_defaults_row_is_an_error() {
        let csv = "entity_id,max_minutes,top_k\n42,15,2\n";
        let err = load_entity_config_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_entity_id_is_an_error() {
        let csv = "entity_id,max_minutes,top_k\n_defaults,30,1\nnot_a_number,15,2\n";
        let err = load_entity_config_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
