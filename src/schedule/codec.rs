use std::io;

use log::debug;

use super::{TimeControlSchedule, TimeControlSegment};
use crate::io::{DataInput, DataOutput, StreamError, StreamResult};

/// Format version passed to [`TimeControlSchedule::read_from`] by default. The layout does not
/// vary with it yet.
pub const FORMAT_VERSION: i32 = 1;

/// White, black, and a third block which is written as a copy of black and skipped when read.
const WIRE_BLOCKS: usize = 3;
const WORD_LEN: usize = 4;
const SEGMENT_LEN: usize = 4 * WORD_LEN;
// Counts come straight off the wire, so don't let them size the allocation
const MAX_PREALLOC: usize = 64;

/// Binary encoding of a single value as a run of big-endian `i32` words.
pub trait StreamCodec: Sized {
    fn encode<O: DataOutput>(&self, output: &mut O) -> StreamResult<()>;
    fn decode<I: DataInput>(input: &mut I) -> StreamResult<Self>;
}

impl StreamCodec for TimeControlSegment {
    fn encode<O: DataOutput>(&self, output: &mut O) -> StreamResult<()> {
        output.write_word(self.time_control)?;
        output.write_word(self.moves_per_session)?;
        output.write_word(self.increment)?;
        output.write_word(self.move_time)
    }

    fn decode<I: DataInput>(input: &mut I) -> StreamResult<Self> {
        let time_control = input.read_word()?;
        let moves_per_session = input.read_word()?;
        let increment = input.read_word()?;
        let move_time = input.read_word()?;
        Ok(Self::new(time_control, moves_per_session, increment, move_time))
    }
}

/// A block: the segment count followed by the segments.
impl StreamCodec for Vec<TimeControlSegment> {
    fn encode<O: DataOutput>(&self, output: &mut O) -> StreamResult<()> {
        let count = i32::try_from(self.len()).map_err(|_| {
            StreamError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} segments do not fit in a block header", self.len()),
            ))
        })?;
        output.write_word(count)?;
        for segment in self {
            segment.encode(output)?;
        }
        Ok(())
    }

    fn decode<I: DataInput>(input: &mut I) -> StreamResult<Self> {
        // Negative counts read as an empty block
        let count = usize::try_from(input.read_word()?).unwrap_or(0);
        let mut segments = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            segments.push(TimeControlSegment::decode(input)?);
        }
        Ok(segments)
    }
}

impl TimeControlSchedule {
    fn wire_blocks(&self) -> [&Vec<TimeControlSegment>; WIRE_BLOCKS] {
        [&self.white, &self.black, &self.black]
    }

    /// Replaces both sides with the schedule read from `input`.
    ///
    /// The schedule is only modified once all three blocks have been read, so on error it keeps
    /// its previous contents.
    pub fn read_from<I: DataInput>(&mut self, input: &mut I, version: i32) -> StreamResult<()> {
        let white = Vec::<TimeControlSegment>::decode(input)?;
        let black = Vec::<TimeControlSegment>::decode(input)?;
        let spare = Vec::<TimeControlSegment>::decode(input)?;
        if spare != black {
            debug!(
                "Third time control block ({} segments) differs from black, ignoring it",
                spare.len()
            );
        }

        debug!(
            "Read time controls (version {}): {} white, {} black segments",
            version,
            white.len(),
            black.len()
        );
        self.white = white;
        self.black = black;
        Ok(())
    }

    pub fn write_to<O: DataOutput>(&self, output: &mut O) -> StreamResult<()> {
        for block in self.wire_blocks() {
            block.encode(output)?;
        }
        debug!(
            "Wrote time controls: {} white, {} black segments",
            self.white.len(),
            self.black.len()
        );
        Ok(())
    }

    /// Number of bytes [`TimeControlSchedule::write_to`] produces.
    pub fn encoded_len(&self) -> usize {
        self.wire_blocks()
            .iter()
            .map(|block| WORD_LEN + block.len() * SEGMENT_LEN)
            .sum()
    }

    pub fn to_bytes(&self) -> StreamResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Decodes a schedule from the start of `bytes`. Anything after the third block is ignored.
    pub fn from_bytes(bytes: &[u8], version: i32) -> StreamResult<Self> {
        let mut input = bytes;
        let mut schedule = Self::new();
        schedule.read_from(&mut input, version)?;
        if !input.is_empty() {
            debug!("Ignoring {} trailing bytes after time controls", input.len());
        }
        Ok(schedule)
    }
}
