use crate::util::{Bounded, Int};

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(transparent)]
pub struct DepthRepr(#[cfg_attr(test, strategy(Self::MIN..=Self::MAX))] <Self as Int>::Repr);

unsafe impl Int for DepthRepr {
    type Repr = i8;
    const MIN: Self::Repr = 0;
    const MAX: Self::Repr = 63;
}

/// The remaining search depth.
pub type Depth = Bounded<DepthRepr>;

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn depth_never_drops_below_zero(d: Depth, r: i8) {
        assert!(d - r.saturating_abs() >= 0i8);
    }
}
