//! Definition of errors.

use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// A specialized Result type for the decoder.
pub type Result<T, E = CsrrgError> = std::result::Result<T, E>;

/// The error type for the decoder.
#[derive(Debug)]
pub enum CsrrgError {
    /// The error variant for [`OpenFileError`] raised on the input file.
    OpenInput(OpenFileError),

    /// The error variant for [`OpenFileError`] raised on the output file.
    OpenOutput(OpenFileError),

    /// The error variant for [`InsufficientHeaderError`].
    InsufficientHeader(InsufficientHeaderError),

    /// The error variant for [`InvalidTokenError`].
    InvalidToken(InvalidTokenError),

    /// The error variant for [`InvalidArgumentError`].
    InvalidArgument(InvalidArgumentError),

    /// The error variant for [`TryReserveError`].
    TryReserve(TryReserveError),

    /// The error variant for [`DecodeError`](bincode::error::DecodeError).
    BincodeDecode(bincode::error::DecodeError),

    /// The error variant for [`EncodeError`](bincode::error::EncodeError).
    BincodeEncode(bincode::error::EncodeError),

    /// The error variant for [`std::io::Error`].
    StdIo(std::io::Error),
}

impl CsrrgError {
    pub(crate) fn open_input<P>(path: P, source: std::io::Error) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::OpenInput(OpenFileError {
            path: path.into(),
            source,
        })
    }

    pub(crate) fn open_output<P>(path: P, source: std::io::Error) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::OpenOutput(OpenFileError {
            path: path.into(),
            source,
        })
    }

    pub(crate) const fn insufficient_header(found: usize) -> Self {
        Self::InsufficientHeader(InsufficientHeaderError { found })
    }

    pub(crate) fn invalid_token<S, M>(line: usize, token: S, msg: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidToken(InvalidTokenError {
            line,
            token: token.into(),
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// Returns the signed status code reported for this kind of failure.
    ///
    /// `0` is reserved for success. The values are stable across releases so
    /// that scripts can tell the failure kinds apart.
    pub const fn status_code(&self) -> i32 {
        match self {
            Self::InsufficientHeader(_) => -1,
            Self::TryReserve(_) => -2,
            Self::OpenOutput(_) => -3,
            Self::OpenInput(_) => -4,
            Self::InvalidToken(_) | Self::InvalidArgument(_) => -6,
            Self::BincodeDecode(_) | Self::BincodeEncode(_) | Self::StdIo(_) => -7,
        }
    }
}

impl fmt::Display for CsrrgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::OpenInput(e) => write!(f, "Error opening input file {e}"),
            Self::OpenOutput(e) => write!(f, "Error opening output file {e}"),
            Self::InsufficientHeader(e) => e.fmt(f),
            Self::InvalidToken(e) => e.fmt(f),
            Self::InvalidArgument(e) => e.fmt(f),
            Self::TryReserve(e) => write!(f, "Memory allocation error: {e}"),
            Self::BincodeDecode(e) => e.fmt(f),
            Self::BincodeEncode(e) => e.fmt(f),
            Self::StdIo(e) => e.fmt(f),
        }
    }
}

impl Error for CsrrgError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::OpenInput(e) | Self::OpenOutput(e) => Some(&e.source),
            Self::TryReserve(e) => Some(e),
            Self::StdIo(e) => Some(e),
            _ => None,
        }
    }
}

/// Error used when a file cannot be opened or created.
#[derive(Debug)]
pub struct OpenFileError {
    /// Path of the file.
    pub(crate) path: PathBuf,

    /// Underlying I/O error.
    pub(crate) source: std::io::Error,
}

impl OpenFileError {
    /// Path of the file that could not be opened.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl fmt::Display for OpenFileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

impl Error for OpenFileError {}

/// Error used when the input ends before the three header lines are read.
#[derive(Debug)]
pub struct InsufficientHeaderError {
    /// Number of non-blank lines found before the end of input.
    pub(crate) found: usize,
}

impl fmt::Display for InsufficientHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Insufficient header lines in file: expected 3, found {}",
            self.found
        )
    }
}

impl Error for InsufficientHeaderError {}

/// Error used when a token or an offset sequence is rejected in strict mode.
#[derive(Debug)]
pub struct InvalidTokenError {
    /// 1-based line number in the input.
    pub(crate) line: usize,

    /// The offending token.
    pub(crate) token: String,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidTokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "InvalidTokenError: line {}: {:?}: {}",
            self.line, self.token, self.msg
        )
    }
}

impl Error for InvalidTokenError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

impl From<TryReserveError> for CsrrgError {
    fn from(error: TryReserveError) -> Self {
        Self::TryReserve(error)
    }
}

impl From<bincode::error::DecodeError> for CsrrgError {
    fn from(error: bincode::error::DecodeError) -> Self {
        Self::BincodeDecode(error)
    }
}

impl From<bincode::error::EncodeError> for CsrrgError {
    fn from(error: bincode::error::EncodeError) -> Self {
        Self::BincodeEncode(error)
    }
}

impl From<std::io::Error> for CsrrgError {
    fn from(error: std::io::Error) -> Self {
        Self::StdIo(error)
    }
}
