//! Useful macros.

// Emits a trace event prefixed with the buffer tag. Only compiled in with the
// `debug` feature on a debug build.
#[cfg(all(debug_assertions, feature = "debug"))]
macro_rules! tracing {
    ($fmt:literal $(, $args:expr )* $(,)?) => {
        tracing::trace!("STAGEBUF DEBUG[RingBuffer]: {}", format_args!($fmt $(, $args )*))
    };
}

#[cfg(not(all(debug_assertions, feature = "debug")))]
macro_rules! tracing {
    ($fmt:literal $(, $args:expr )* $(,)?) => {{
        $( let _ = &$args; )*
    }};
}
