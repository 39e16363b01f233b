use std::fmt;
use std::time::{Duration, Instant};

pub(crate) fn measure<T>(f: impl FnOnce() -> T) -> (T, Elapsed) {
    let tt = Instant::now();
    let val = f();

    (val, Elapsed(tt.elapsed()))
}

/// Duration of a measured operation, as printed into logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Elapsed(pub Duration);

impl fmt::Display for Elapsed {
    #[cfg(feature = "metrics")]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", humantime::format_duration(self.0))
    }

    #[cfg(not(feature = "metrics"))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
