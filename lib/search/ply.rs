use crate::util::{Bounded, Int};

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(transparent)]
pub struct PlyRepr(#[cfg_attr(test, strategy(Self::MIN..=Self::MAX))] <Self as Int>::Repr);

unsafe impl Int for PlyRepr {
    type Repr = i16;
    const MIN: Self::Repr = 0;
    const MAX: Self::Repr = 127;
}

/// The number of half-moves played since the root.
pub type Ply = Bounded<PlyRepr>;
