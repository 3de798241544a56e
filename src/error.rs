use core::fmt;

/// Platform-specific error details.
///
/// Native status codes (e.g. `media_status_t` from the Android NDK) are
/// preserved as-is. Use [`Display`](fmt::Display) to obtain a human-readable
/// description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlatformError {
    Message(&'static str),
    Status(i32),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(msg) => f.write_str(msg),
            Self::Status(code) => write!(f, "native status {code}"),
        }
    }
}

impl core::error::Error for PlatformError {}

/// Top-level crate error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Width or height is non-positive or beyond the accepted range.
    InvalidGeometry { width: i64, height: i64 },
    UnsupportedFormat,
    /// A computed size does not fit the target integer type.
    Overflow,
    /// Row alignment is not a non-zero power of two.
    InvalidAlignment(u32),
    Platform(PlatformError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { width, height } => {
                write!(f, "invalid frame geometry {width}x{height}")
            }
            Self::UnsupportedFormat => f.write_str("unsupported pixel format"),
            Self::Overflow => f.write_str("buffer size overflows"),
            Self::InvalidAlignment(align) => {
                write!(f, "row alignment {align} is not a power of two")
            }
            Self::Platform(e) => write!(f, "platform error: {e}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Platform(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlatformError> for Error {
    fn from(e: PlatformError) -> Self {
        Self::Platform(e)
    }
}
