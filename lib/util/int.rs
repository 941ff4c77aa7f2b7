use crate::util::Assume;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::marker::PhantomData;
use std::mem::transmute_copy;
use std::ops::{Add, Mul, Neg, RangeInclusive, Sub};

/// A type whose values are exactly the integers `MIN..=MAX` of a primitive [`Int::Repr`].
///
/// Enums with explicit discriminants and range-restricted newtypes implement this to get
/// checked construction, conversions and iteration for free.
///
/// # Safety
///
/// `Self` must have the same layout as `Repr`, and every integer in `MIN..=MAX` must be a
/// valid bit pattern of `Self`.
pub unsafe trait Int: 'static + Send + Sync + Copy {
    type Repr: IntRepr;

    const MIN: Self::Repr;
    const MAX: Self::Repr;

    /// The value at [`Int::MIN`].
    #[inline(always)]
    fn lower() -> Self {
        Self::new(Self::MIN)
    }

    /// The value at [`Int::MAX`].
    #[inline(always)]
    fn upper() -> Self {
        Self::new(Self::MAX)
    }

    /// Reinterprets `i`, which must lie in `MIN..=MAX`.
    #[track_caller]
    #[inline(always)]
    fn new(i: Self::Repr) -> Self {
        const { assert!(size_of::<Self>() == size_of::<Self::Repr>()) }
        (Self::MIN..=Self::MAX).contains(&i).assume();
        // SAFETY: the layouts match and `i` is in range.
        unsafe { transmute_copy(&i) }
    }

    #[inline(always)]
    fn get(self) -> Self::Repr {
        const { assert!(size_of::<Self>() == size_of::<Self::Repr>()) }
        // SAFETY: the layouts match.
        unsafe { transmute_copy(&self) }
    }

    /// Converts with the semantics of `as`, wrapping if out of range.
    #[inline(always)]
    fn cast<I: IntRepr>(self) -> I {
        I::wrap(self.get().widen())
    }

    /// Converts to `I`, unless the value is not one of its values.
    #[inline(always)]
    fn convert<I: Int>(self) -> Option<I> {
        let i = self.get().widen();
        let range = I::MIN.widen()..=I::MAX.widen();
        range.contains(&i).then(|| I::new(I::Repr::wrap(i)))
    }

    /// Converts to `I`, clamping to its bounds.
    #[inline(always)]
    fn saturate<I: Int>(self) -> I {
        let i = self.get().widen().clamp(I::MIN.widen(), I::MAX.widen());
        I::new(I::Repr::wrap(i))
    }

    /// Every value, in ascending order.
    #[inline(always)]
    fn iter() -> Ints<Self> {
        Ints(Self::MIN.widen()..=Self::MAX.widen(), PhantomData)
    }
}

/// The iterator returned by [`Int::iter`].
#[derive(Debug)]
pub struct Ints<I>(RangeInclusive<i128>, PhantomData<I>);

impl<I: Int> Iterator for Ints<I> {
    type Item = I;

    #[inline(always)]
    fn next(&mut self) -> Option<I> {
        self.0.next().map(|i| I::new(I::Repr::wrap(i)))
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.size_hint().0;
        (len, Some(len))
    }
}

impl<I: Int> DoubleEndedIterator for Ints<I> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<I> {
        self.0.next_back().map(|i| I::new(I::Repr::wrap(i)))
    }
}

impl<I: Int> ExactSizeIterator for Ints<I> {}

/// The primitive integers that back an [`Int`].
pub trait IntRepr:
    Int<Repr = Self>
    + Debug
    + Display
    + Default
    + Eq
    + Ord
    + Hash
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
    /// Lossless conversion to `i128`.
    fn widen(self) -> i128;

    /// Truncating conversion from `i128`.
    fn wrap(i: i128) -> Self;
}

/// The signed [`IntRepr`]s.
pub trait Signed: IntRepr + Neg<Output = Self> {}

macro_rules! primitives {
    ($($i:ty),*) => {$(
        impl IntRepr for $i {
            #[inline(always)]
            fn widen(self) -> i128 {
                self as i128
            }

            #[inline(always)]
            fn wrap(i: i128) -> Self {
                i as $i
            }
        }

        unsafe impl Int for $i {
            type Repr = $i;
            const MIN: $i = <$i>::MIN;
            const MAX: $i = <$i>::MAX;
        }
    )*};
}

macro_rules! signed {
    ($($i:ty),*) => {$(
        impl Signed for $i {}
    )*};
}

primitives!(u8, u16, u32, u64, usize, i8, i16, i32, i64, i128, isize);
signed!(i8, i16, i32, i64, i128, isize);
