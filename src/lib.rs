pub mod io;
mod schedule;
pub mod types;

pub use schedule::{StreamCodec, TimeControlSchedule, TimeControlSegment, FORMAT_VERSION};
