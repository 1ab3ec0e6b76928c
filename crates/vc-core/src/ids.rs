use core::fmt;
use core::num::NonZeroU32;

/// Compact arena identifier for components, ports and junctions.
///
/// Stored as `index + 1` so that `Option<Id>` stays the size of `Id`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based arena index.
    pub fn from_index(index: u32) -> Self {
        match NonZeroU32::new(index.wrapping_add(1)) {
            Some(raw) => Self(raw),
            // u32::MAX wraps to zero; arenas never get that large
            None => Self(NonZeroU32::MIN),
        }
    }

    /// Recover the 0-based arena index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Arena index as `usize`, for slice access.
    pub fn slot(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

pub type CompId = Id;
pub type PortId = Id;
pub type JunctionId = Id;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<Id>(),
            core::mem::size_of::<Option<Id>>()
        );
    }

    #[test]
    fn slot_matches_index() {
        let id = Id::from_index(7);
        assert_eq!(id.slot(), 7);
        assert_eq!(format!("{id}"), "7");
        assert_eq!(format!("{id:?}"), "Id(7)");
    }

    proptest! {
        #[test]
        fn id_round_trip_index(i in 0u32..1_000_000) {
            prop_assert_eq!(Id::from_index(i).index(), i);
        }
    }
}
