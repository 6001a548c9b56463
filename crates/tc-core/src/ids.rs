//! Strongly typed identifier wrappers and the `Seconds` cost domain.
//!
//! All ids are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony. The inner integer is `pub` to allow
//! direct indexing into CSR `Vec`s via `id.0 as usize`, but callers should
//! prefer the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid id" — equivalent to the inner type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a CSR index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized ids are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a road-network node in the CSR graph.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed road-network edge in the CSR graph.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Dense integer id for an anchor site, assigned by sorting `site_id`
    /// (a uuid5) ascending. Written to parquet as `int32`.
    pub struct AnchorIntId(u32);
}

// ── Seconds: the uint16 cost domain ───────────────────────────────────────────

/// A travel-time cost in whole seconds, represented in the spec's `uint16`
/// domain. `65535` is a reserved sentinel meaning "unreachable or beyond
/// cutoff"; every real cost satisfies `0 <= seconds <= 65534`.
///
/// Arithmetic over `Seconds` forms the monoid `(+, 0, saturate_at_65534)`:
/// summing two real costs never produces the sentinel value by overflow —
/// it saturates at `65534` instead. Only the K-best/D_anchor output stages
/// ever construct [`Seconds::UNREACHABLE`] directly, for nodes/anchors with
/// no path at all.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seconds(pub u16);

impl Seconds {
    /// The reserved "unreachable or beyond cutoff" sentinel.
    pub const UNREACHABLE: Seconds = Seconds(u16::MAX);

    /// Largest representable real cost. One less than the sentinel.
    pub const MAX_REAL: Seconds = Seconds(u16::MAX - 1);

    pub const ZERO: Seconds = Seconds(0);

    #[inline]
    pub fn new(secs: u16) -> Self {
        Seconds(secs)
    }

    /// `true` if this is the reserved sentinel, not a real cost.
    #[inline]
    pub fn is_unreachable(self) -> bool {
        self.0 == Self::UNREACHABLE.0
    }

    /// Add two real costs, saturating at [`Seconds::MAX_REAL`] rather than
    /// overflowing into the sentinel. Adding the sentinel to anything yields
    /// the sentinel (an unreachable source contributes no real path).
    #[inline]
    pub fn saturating_add(self, rhs: Seconds) -> Seconds {
        if self.is_unreachable() || rhs.is_unreachable() {
            return Seconds::UNREACHABLE;
        }
        let sum = self.0 as u32 + rhs.0 as u32;
        if sum >= Self::UNREACHABLE.0 as u32 {
            Self::MAX_REAL
        } else {
            Seconds(sum as u16)
        }
    }

    /// `ceil(length_meters / speed_meters_per_second)`, clamped to
    /// [`Seconds::MAX_REAL`]. Used by the graph builder to derive edge
    /// weights.
    pub fn from_distance(length_m: f32, speed_mps: f32) -> Seconds {
        let secs = (length_m / speed_mps).ceil();
        if !secs.is_finite() || secs >= Self::UNREACHABLE.0 as f32 {
            Self::MAX_REAL
        } else {
            Seconds(secs.max(0.0) as u16)
        }
    }

    /// Convert a minutes-denominated cutoff (as configured by an operator)
    /// into a `Seconds` cost, clamped the same way `from_distance` is.
    pub fn from_minutes(minutes: f32) -> Seconds {
        let secs = (minutes * 60.0).ceil();
        if !secs.is_finite() || secs >= Self::UNREACHABLE.0 as f32 {
            Self::MAX_REAL
        } else {
            Seconds(secs.max(0.0) as u16)
        }
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unreachable() {
            write!(f, "∞")
        } else {
            write!(f, "{}s", self.0)
        }
    }
}
