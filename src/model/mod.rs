mod roster;
mod snapshot;
mod standings;
mod stats;

pub use roster::*;
pub use snapshot::*;
pub use standings::*;
pub use stats::*;
