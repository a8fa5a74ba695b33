//! The `error` module defines the common error and result types used
//! throughout the codec core and its adapters.

use std::error;
use std::fmt;
use std::io;

/// `Error` enumerates everything that can prevent the codec from producing
/// or consuming a valid bitstream.
#[derive(Debug)]
pub enum Error {
    /// An IO error occurred while reading or writing the underlying stream.
    Io(io::Error),
    /// The input does not start with the `hello` magic, or a WAV input is
    /// missing its `RIFF`/`WAVE` markers.
    BadMagic,
    /// The input is well-formed but not something this codec can handle,
    /// e.g. a non-PCM WAV, or a `bits_per_sample` other than 16.
    UnsupportedFormat(&'static str),
    /// The stream ended earlier than a complete media-info block or frame
    /// record required.
    Truncated(&'static str),
    /// A value that should be unreachable given correct encoder output was
    /// observed (Rice parameter out of `[0, 31]`, LPC order over
    /// `MAX_LPC_ORDER`, reconstructed sample outside `i16` range). Indicates
    /// a bug in this crate or a corrupted, non-short-read stream.
    InternalInvariant(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::BadMagic => write!(f, "input does not begin with the expected magic"),
            Error::UnsupportedFormat(msg) => write!(f, "unsupported format: {}", msg),
            Error::Truncated(msg) => write!(f, "truncated stream: {}", msg),
            Error::InternalInvariant(msg) => write!(f, "internal invariant violated: {}", msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

/// Either `T` on success, or an `Error` on failure.
pub type Result<T> = std::result::Result<T, Error>;

/// Builds a `Truncated` error as a `Result<T>`, for short-circuiting reads.
pub fn truncated<T>(what: &'static str) -> Result<T> {
    Err(Error::Truncated(what))
}

/// Builds an `UnsupportedFormat` error as a `Result<T>`.
pub fn unsupported<T>(what: &'static str) -> Result<T> {
    Err(Error::UnsupportedFormat(what))
}

/// Builds an `InternalInvariant` error as a `Result<T>`.
pub fn invariant<T>(what: &'static str) -> Result<T> {
    Err(Error::InternalInvariant(what))
}
