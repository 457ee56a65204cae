//! Logging facade.
//!
//! With the `tracing` feature the pipeline logs through `tracing`. Without it the
//! macros swallow their arguments, so field expressions are never evaluated.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, info, warn};

#[cfg(not(feature = "tracing"))]
mod silent {
    macro_rules! silent {
        ($($arg:tt)*) => {};
    }

    pub(crate) use silent as debug;
    pub(crate) use silent as info;
    pub(crate) use silent as warn;
}

#[cfg(not(feature = "tracing"))]
pub(crate) use silent::{debug, info, warn};
