//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` so ring
//! arithmetic can work on it directly, but callers should prefer the
//! `.index()` helper when indexing a `Vec`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
///
/// `$label` is the human-readable prefix used by `Display`
/// (`Package_3`, `Vehicle_0`, `DPoint_2`).
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $label, self.0)
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
    /// Position of a distribution point in the ring (`0..N`).
    pub struct PointId(u32) => "DPoint";
}

typed_id! {
    /// Index of a vehicle in the fleet.
    pub struct VehicleId(u32) => "Vehicle";
}

typed_id! {
    /// Index of a package.  Doubles as its unique name (`Package_<n>`).
    pub struct PackageId(u32) => "Package";
}

impl PointId {
    /// The next point clockwise on a ring of `ring_len` points.
    ///
    /// # Panics
    /// Panics if `ring_len == 0`.
    #[inline]
    pub fn next_on_ring(self, ring_len: usize) -> PointId {
        PointId(((self.index() + 1) % ring_len) as u32)
    }
}
