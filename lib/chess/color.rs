use crate::util::Int;
use derive_more::with_trait::Display;
use std::ops::Not;

/// One of the two sides.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Color {
    #[display("w")]
    White,
    #[display("b")]
    Black,
}

impl Color {
    /// The factor that turns this side's material into a white-relative balance.
    #[inline(always)]
    pub fn sign(self) -> i16 {
        1 - 2 * i16::from(self.get())
    }
}

unsafe impl Int for Color {
    type Repr = u8;
    const MIN: Self::Repr = 0;
    const MAX: Self::Repr = 1;
}

impl Not for Color {
    type Output = Self;

    /// The opponent.
    #[inline(always)]
    fn not(self) -> Self {
        Color::new(self.get() ^ 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn opponent_of_opponent_is_self(c: Color) {
        assert_ne!(!c, c);
        assert_eq!(!!c, c);
    }

    #[test]
    fn white_counts_positively() {
        assert_eq!(Color::White.sign(), 1);
        assert_eq!(Color::Black.sign(), -1);
    }

    #[test]
    fn colors_print_as_in_fen() {
        assert_eq!(Color::White.to_string(), "w");
        assert_eq!(Color::Black.to_string(), "b");
    }
}
