//! Helpers for internal invariants that must never be broken.
//!
//! Everything here panics in release builds as well: carrying on with a corrupted game state is
//! worse than stopping.

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}

/// Log the given message at `error` level, then panic with it.
///
/// ```should_panic
/// utils::fatal!("reached state {}", "Promotion");
/// ```
#[macro_export]
macro_rules! fatal {
    ($($tt:tt)*) => {{
        $crate::__private::tracing::error!($($tt)*);
        ::core::panic!($($tt)*)
    }};
}

/// Assert that the given condition is false.
///
/// If it holds, this logs and panics like [`fatal`].
///
/// ```
/// utils::impossible!(1 + 1 == 3, "arithmetic broke");
/// ```
#[macro_export]
macro_rules! impossible {
    ($cond:expr $(,)?) => {
        $crate::impossible!($cond, "{}", ::core::stringify!($cond))
    };
    ($cond:expr, $( $tt:tt )+) => {
        if $cond {
            $crate::fatal!($( $tt )+)
        }
    };
}

/// A type which holds a value that the surrounding code guarantees is present
pub trait ExpectInvariant {
    /// The type which we expect to produce
    type Target;

    /// Produce the [`Self::Target`] value, or log and panic with `msg`.
    fn expect_invariant(self, msg: &str) -> Self::Target;
}

impl<T> ExpectInvariant for Option<T> {
    type Target = T;

    #[track_caller]
    fn expect_invariant(self, msg: &str) -> Self::Target {
        match self {
            Some(value) => value,
            None => fatal!("invariant violated: {msg}"),
        }
    }
}

impl<T, E: core::fmt::Debug> ExpectInvariant for Result<T, E> {
    type Target = T;

    #[track_caller]
    fn expect_invariant(self, msg: &str) -> Self::Target {
        match self {
            Ok(value) => value,
            Err(err) => fatal!("invariant violated: {msg}: {err:?}"),
        }
    }
}
