use core::fmt::{self, Debug, Display};

use crate::protocol::ResponseWriterError;

/// An error which may occur during a debugging session.
///
/// Only transport failures are reported this way. Anything the client gets
/// wrong (malformed packets, bad checksums, breakpoint table overflow, ...)
/// is answered on the wire and never interrupts the simulation.
#[derive(Debug)]
#[non_exhaustive]
pub enum GdbStubError<C> {
    /// Connection Error while setting up the session (bind / accept /
    /// configuring the socket).
    ConnectionInit(C),
    /// Connection Error while reading request.
    ConnectionRead(C),
    /// Connection Error while writing response.
    ConnectionWrite(C),
}

impl<C> From<ResponseWriterError<C>> for GdbStubError<C> {
    fn from(e: ResponseWriterError<C>) -> Self {
        match e {
            ResponseWriterError::Write(e) => GdbStubError::ConnectionWrite(e),
            ResponseWriterError::Read(e) => GdbStubError::ConnectionRead(e),
        }
    }
}

impl<C> Display for GdbStubError<C>
where
    C: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::GdbStubError::*;
        match self {
            ConnectionInit(e) => write!(f, "Connection Error while initializing the session: {:?}", e),
            ConnectionRead(e) => write!(f, "Connection Error while reading request: {:?}", e),
            ConnectionWrite(e) => write!(f, "Connection Error while writing response: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<C> std::error::Error for GdbStubError<C> where C: Debug {}

/// A recoverable command failure, reported to the client as `E<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NonFatalError(pub u8);

impl NonFatalError {
    /// The breakpoint table is full, or the breakpoint doesn't exist.
    pub const BREAKPOINT: Self = Self(0x00);
    /// The command's arguments could not be parsed.
    pub const MALFORMED: Self = Self(0x01);
    /// `M` data ended early or was not hex.
    pub const BAD_DATA: Self = Self(0x03);
}
