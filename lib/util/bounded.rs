use crate::util::{Int, IntRepr, Signed};
use derive_more::with_trait::{Debug, Display};
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// An integer clamped to the range of `T`.
///
/// Arithmetic saturates instead of overflowing, and comparisons accept any other [`Int`].
#[derive(Debug, Display, Default, Copy, Clone, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[cfg_attr(test, arbitrary(bound(T, Self: Debug)))]
#[debug("Bounded({})", self.get())]
#[debug(bounds(T: Int<Repr: Signed>))]
#[display("{}", self.get())]
#[display(bounds(T: Int<Repr: Signed>))]
#[repr(transparent)]
pub struct Bounded<T>(T);

unsafe impl<T: Int<Repr: Signed>> Int for Bounded<T> {
    type Repr = T::Repr;
    const MIN: Self::Repr = T::MIN;
    const MAX: Self::Repr = T::MAX;
}

impl<T: Int<Repr: Signed>> Eq for Bounded<T> {}

impl<T: Int<Repr: Signed>, U: Int> PartialEq<U> for Bounded<T> {
    #[inline(always)]
    fn eq(&self, other: &U) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl<T: Int<Repr: Signed>> Ord for Bounded<T> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        self.get().cmp(&other.get())
    }
}

impl<T: Int<Repr: Signed>, U: Int> PartialOrd<U> for Bounded<T> {
    #[inline(always)]
    fn partial_cmp(&self, other: &U) -> Option<Ordering> {
        Some(self.get().widen().cmp(&other.get().widen()))
    }
}

impl<T: Int<Repr: Signed>> Neg for Bounded<T> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        (-self.get().widen()).saturate()
    }
}

macro_rules! saturating {
    ($op:ident, $f:ident, $assign:ident, $fa:ident) => {
        impl<T: Int<Repr: Signed>, U: Int> $op<U> for Bounded<T> {
            type Output = Self;

            #[inline(always)]
            fn $f(self, rhs: U) -> Self {
                self.get().widen().$f(rhs.get().widen()).saturate()
            }
        }

        impl<T: Int<Repr: Signed>, U: Int> $assign<U> for Bounded<T> {
            #[inline(always)]
            fn $fa(&mut self, rhs: U) {
                *self = (*self).$f(rhs);
            }
        }
    };
}

saturating!(Add, add, AddAssign, add_assign);
saturating!(Sub, sub, SubAssign, sub_assign);

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;
    use test_strategy::proptest;

    #[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
    #[cfg_attr(test, derive(test_strategy::Arbitrary))]
    #[repr(transparent)]
    struct Percent(#[cfg_attr(test, strategy(Self::MIN..=Self::MAX))] <Self as Int>::Repr);

    unsafe impl Int for Percent {
        type Repr = i8;
        const MIN: Self::Repr = -100;
        const MAX: Self::Repr = 100;
    }

    #[proptest]
    fn compares_by_value_across_types(a: Bounded<Percent>, b: i32) {
        assert_eq!(a == b, i32::from(a.get()) == b);
        assert_eq!(a < b, i32::from(a.get()) < b);
    }

    #[proptest]
    fn arithmetic_clamps_to_range(a: Bounded<Percent>, b: i16) {
        let sum = i32::from(a.get()) + i32::from(b);
        let diff = i32::from(a.get()) - i32::from(b);
        assert_eq!(a + b, sum.clamp(-100, 100));
        assert_eq!(a - b, diff.clamp(-100, 100));

        let mut c = a;
        c += b;
        c -= b;
        assert!((-100..=100).contains(&c.get()));
    }

    #[test]
    fn negation_is_symmetric_within_range() {
        let p: Bounded<Percent> = 37i8.saturate();
        assert_eq!(-p, -37);
        assert_eq!(-(-p), p);
        assert_eq!(Bounded::<Percent>::upper() + 1i8, 100);
    }

    #[test]
    fn prints_the_plain_number() {
        let p: Bounded<Percent> = (-5i8).saturate();
        assert_eq!(p.to_string(), "-5");
        assert_eq!(format!("{p:?}"), "Bounded(-5)");
    }
}
