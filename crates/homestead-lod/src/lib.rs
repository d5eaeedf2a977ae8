//! Level-of-detail management: per-chunk detail levels, distance-based
//! selection and the throttle for periodic re-evaluation.

mod level;
mod selector;
mod timer;

pub use level::LodLevel;
pub use selector::{LodSelector, LodThresholds, chunk_distance};
pub use timer::LodCheckTimer;
