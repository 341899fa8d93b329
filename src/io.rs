use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::trace;

#[derive(thiserror::Error, Debug)]
pub enum StreamError {
    #[error("stream ended before the value was complete")]
    UnexpectedEof,
    #[error("stream i/o failed: {0}")]
    Io(io::Error),
}

impl From<io::Error> for StreamError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => StreamError::UnexpectedEof,
            _ => StreamError::Io(err),
        }
    }
}

pub type StreamResult<T> = Result<T, StreamError>;

/// A source of big-endian 32-bit integers.
pub trait DataInput {
    fn read_word(&mut self) -> StreamResult<i32>;
}

/// A sink for big-endian 32-bit integers.
pub trait DataOutput {
    fn write_word(&mut self, value: i32) -> StreamResult<()>;
}

impl<R: Read> DataInput for R {
    fn read_word(&mut self) -> StreamResult<i32> {
        Ok(self.read_i32::<BigEndian>()?)
    }
}

impl<W: Write> DataOutput for W {
    fn write_word(&mut self, value: i32) -> StreamResult<()> {
        Ok(self.write_i32::<BigEndian>(value)?)
    }
}

/// Logs every value passing through the wrapped stream at trace level.
pub struct Logging<T>(pub T);

impl<T: DataInput> DataInput for Logging<T> {
    fn read_word(&mut self) -> StreamResult<i32> {
        self.0.read_word().map(|v| {
            trace!("read {}", v);
            v
        })
    }
}

impl<T: DataOutput> DataOutput for Logging<T> {
    fn write_word(&mut self, value: i32) -> StreamResult<()> {
        trace!("write {}", value);
        self.0.write_word(value)
    }
}
