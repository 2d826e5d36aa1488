//! Strongly typed identifier wrappers.
//!
//! Way and node identifiers come from the upstream map data (OSM ids are
//! signed 64-bit), so the wrappers carry the raw value untouched.  They are
//! `Copy + Ord + Hash` and usable as map keys without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The raw upstream identifier.
            #[inline(always)]
            pub fn raw(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;
            fn from_str(s: &str) -> Result<$name, Self::Err> {
                s.trim().parse::<$inner>().map($name)
            }
        }
    };
}

typed_id! {
    /// Identifier of a road way.  Stable for the lifetime of the map data.
    pub struct WayId(i64);
}

typed_id! {
    /// Identifier of a map node referenced by a way's node list.
    pub struct NodeId(i64);
}
