//! Travel mode enum shared across every stage of the engine.
//!
//! A snapshot is built, anchored, and routed independently per mode — the
//! graph, anchor table, T_hex, and D_anchor outputs all carry a mode tag and
//! never mix modes within one file.

/// The travel mode a graph/anchor-table/output snapshot was built for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TravelMode {
    /// Free-flow car speeds derived from highway classification.
    Drive,
    /// Fixed pedestrian speed; motorway-class edges excluded.
    Walk,
}

impl TravelMode {
    /// Parse a CLI/config value (`"drive"` / `"walk"`).
    pub fn parse(s: &str) -> Option<TravelMode> {
        match s {
            "drive" => Some(TravelMode::Drive),
            "walk" => Some(TravelMode::Walk),
            _ => None,
        }
    }

    /// Label used in file names, Hive partition values, and output columns.
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Drive => "drive",
            TravelMode::Walk => "walk",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TravelMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TravelMode::parse(s).ok_or_else(|| format!("unknown travel mode {s:?} (expected drive|walk)"))
    }
}
