use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::types::Color;

mod codec;

pub use codec::{StreamCodec, FORMAT_VERSION};

/// One row of time-control parameters. All times are in milliseconds.
///
/// No range checking is done here; negative or otherwise odd values are carried as-is.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TimeControlSegment {
    time_control: i32,
    moves_per_session: i32,
    increment: i32,
    move_time: i32,
}

impl TimeControlSegment {
    /// 5 minutes for 60 moves, no increment, no per-move cap.
    pub const DEFAULT: Self = Self::new(5 * 60 * 1000, 60, 0, 0);

    #[inline]
    pub const fn new(
        time_control: i32,
        moves_per_session: i32,
        increment: i32,
        move_time: i32,
    ) -> Self {
        Self {
            time_control,
            moves_per_session,
            increment,
            move_time,
        }
    }

    #[inline]
    pub const fn time_control(self) -> i32 {
        self.time_control
    }

    #[inline]
    pub const fn moves_per_session(self) -> i32 {
        self.moves_per_session
    }

    #[inline]
    pub const fn increment(self) -> i32 {
        self.increment
    }

    /// Fixed time per move. When nonzero it overrides the session and increment for this segment.
    #[inline]
    pub const fn move_time(self) -> i32 {
        self.move_time
    }

    /// Compares everything but `move_time`. Schedules use this for symmetry and equality,
    /// whereas `==` on a segment compares all four fields.
    #[inline]
    pub const fn same_control(self, other: Self) -> bool {
        self.time_control == other.time_control
            && self.moves_per_session == other.moves_per_session
            && self.increment == other.increment
    }
}

impl Default for TimeControlSegment {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Formats a millisecond count as `m:ss`, or as raw milliseconds when that would lose information.
fn fmt_millis(f: &mut Formatter<'_>, ms: i32) -> fmt::Result {
    if ms < 0 || ms % 1000 != 0 {
        return write!(f, "{}ms", ms);
    }
    let secs = ms / 1000;
    write!(f, "{}:{:02}", secs / 60, secs % 60)
}

impl Display for TimeControlSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.move_time != 0 {
            write!(f, "move ")?;
            return fmt_millis(f, self.move_time);
        }
        fmt_millis(f, self.time_control)?;
        write!(f, "/{}", self.moves_per_session)?;
        if self.increment > 0 {
            write!(f, "+")?;
        }
        if self.increment != 0 {
            fmt_millis(f, self.increment)?;
        }
        Ok(())
    }
}

fn same_controls(a: &[TimeControlSegment], b: &[TimeControlSegment]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_control(*y))
}

/// The time controls of both players in a game.
///
/// Each side has an ordered list of segments which a clock steps through as move-count
/// boundaries are passed. A fresh schedule has exactly one [`TimeControlSegment::DEFAULT`] per
/// side.
///
/// `==` follows the same rule as [`TimeControlSchedule::is_symmetric`]: segment lists must have
/// the same length and agree on everything but `move_time`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeControlSchedule {
    white: Vec<TimeControlSegment>,
    black: Vec<TimeControlSegment>,
}

impl TimeControlSchedule {
    pub fn new() -> Self {
        Self {
            white: vec![TimeControlSegment::DEFAULT],
            black: vec![TimeControlSegment::DEFAULT],
        }
    }

    /// Sets a single time control for both white and black, discarding any earlier segments.
    pub fn set_uniform(&mut self, time: i32, moves: i32, inc: i32, move_time: i32) {
        let segment = TimeControlSegment::new(time, moves, inc, move_time);
        self.white = vec![segment];
        self.black = vec![segment];
    }

    #[inline]
    pub fn segments_for(&self, color: Color) -> &[TimeControlSegment] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Hands out the live segment list of `color` for in-place editing.
    #[inline]
    pub fn segments_for_mut(&mut self, color: Color) -> &mut Vec<TimeControlSegment> {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Returns true if white and black have equal time controls, ignoring per-move caps.
    pub fn is_symmetric(&self) -> bool {
        same_controls(&self.white, &self.black)
    }
}

impl Default for TimeControlSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for TimeControlSchedule {
    fn eq(&self, other: &Self) -> bool {
        same_controls(&self.white, &other.white) && same_controls(&self.black, &other.black)
    }
}

impl Display for TimeControlSchedule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // Per-move caps are printed, so only merge sides that match on every field
        if self.white == self.black {
            return write!(f, "both: {}", self.white.iter().join(", "));
        }
        writeln!(f, "white: {}", self.white.iter().join(", "))?;
        write!(f, "black: {}", self.black.iter().join(", "))
    }
}
