//! Small internal helpers shared across modules.

/// Open a profiling span that lasts until the end of the enclosing scope.
///
/// Expands to nothing unless the `tracy` feature is enabled.
/// The second argument names the calling function for the profiler's source view.
#[cfg(feature = "tracy")]
macro_rules! tracy_span {
    ($name:expr, $fn_name:expr) => {
        tracy_client::span!($name)
    };
}

#[cfg(not(feature = "tracy"))]
macro_rules! tracy_span {
    ($name:expr, $fn_name:expr) => {
        ()
    };
}

pub(crate) use tracy_span;
