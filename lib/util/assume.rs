/// Unwraps values that the engine's invariants guarantee to be present.
///
/// A failed assumption is a bug, so it panics and reports the caller's location.
pub trait Assume {
    type Assumed;

    fn assume(self) -> Self::Assumed;
}

impl Assume for bool {
    type Assumed = ();

    #[track_caller]
    #[inline(always)]
    fn assume(self) {
        if !self {
            panic!("assumption violated");
        }
    }
}

impl<T> Assume for Option<T> {
    type Assumed = T;

    #[track_caller]
    #[inline(always)]
    fn assume(self) -> T {
        let Some(t) = self else {
            panic!("assumed a value, found none");
        };

        t
    }
}

impl<T, E: std::fmt::Display> Assume for Result<T, E> {
    type Assumed = T;

    #[track_caller]
    #[inline(always)]
    fn assume(self) -> T {
        match self {
            Ok(t) => t,
            Err(e) => panic!("assumed success, failed with: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn present_values_pass_through(v: i64) {
        assert_eq!(Some(v).assume(), v);
        assert_eq!(Ok::<_, String>(v).assume(), v);
        (v == v).assume();
    }

    #[test]
    #[should_panic(expected = "found none")]
    fn missing_value_panics() {
        None::<u8>.assume();
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn error_message_is_reported() {
        Err::<u8, _>("boom").assume();
    }

    #[test]
    #[should_panic(expected = "assumption violated")]
    fn false_condition_panics() {
        false.assume();
    }
}
