use core::fmt::{self, Display};
use core::marker::PhantomData;

use managed::ManagedSlice;

use crate::breakpoints::Breakpoints;
use crate::conn::Connection;
use crate::target::Target;

use super::core_impl::GdbStubImpl;
use super::GdbStub;

/// An error which may occur when building a [`GdbStub`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GdbStubBuilderError {
    /// Must provide buffer using `with_packet_buffer` in `#![no_std]` mode.
    MissingPacketBuffer,
    /// Must provide buffer using `with_breakpoint_buffer` in `#![no_std]`
    /// mode.
    MissingBreakpointBuffer,
    /// Custom packet buffer size doesn't fit in the buffer provided to
    /// `with_packet_buffer`.
    PacketBufSizeMismatch,
    /// Word size must be between 1 and 8 bytes.
    InvalidWordSize(usize),
    /// The breakpoint table must hold at least one breakpoint.
    ZeroBreakpointCapacity,
}

impl Display for GdbStubBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::GdbStubBuilderError::*;
        match self {
            MissingPacketBuffer => write!(
                f,
                "Must provide buffer using `with_packet_buffer` in `#![no_std]` mode."
            ),
            MissingBreakpointBuffer => write!(
                f,
                "Must provide buffer using `with_breakpoint_buffer` in `#![no_std]` mode."
            ),
            PacketBufSizeMismatch => write!(
                f,
                "`packet_buffer_size` doesn't fit in `with_packet_buffer`'s buffer."
            ),
            InvalidWordSize(size) => {
                write!(f, "word size must be between 1 and 8 bytes (got {})", size)
            }
            ZeroBreakpointCapacity => write!(f, "breakpoint capacity must be non-zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GdbStubBuilderError {}

/// Helper to construct and customize [`GdbStub`].
pub struct GdbStubBuilder<'a, T: Target, C: Connection> {
    packet_buffer: Option<&'a mut [u8]>,
    packet_buffer_size: Option<usize>,
    breakpoint_buffer: Option<&'a mut [Option<u64>]>,
    breakpoint_capacity: Option<usize>,
    word_size: usize,
    port: u16,

    _target: PhantomData<T>,
    _connection: PhantomData<C>,
}

impl<'a, T: Target, C: Connection> GdbStubBuilder<'a, T, C> {
    /// Create a new `GdbStubBuilder` with default settings.
    pub fn new() -> GdbStubBuilder<'static, T, C> {
        GdbStubBuilder {
            packet_buffer: None,
            packet_buffer_size: None,
            breakpoint_buffer: None,
            breakpoint_capacity: None,
            word_size: 4,
            port: crate::DEFAULT_PORT,

            _target: PhantomData,
            _connection: PhantomData,
        }
    }

    /// Use a pre-allocated packet buffer (instead of heap-allocating).
    ///
    /// The buffer is split in two equal halves: one for incoming packets, one
    /// for outgoing replies (which must be kept around in case the debugger
    /// requests a retransmission).
    ///
    /// _Note:_ This method is _required_ when the `alloc` feature is disabled!
    pub fn with_packet_buffer(mut self, packet_buffer: &'a mut [u8]) -> Self {
        self.packet_buffer = Some(packet_buffer);
        self
    }

    /// Specify a custom size for the packet buffer. Defaults to 2048 bytes.
    ///
    /// When used alongside `with_packet_buffer`, the provided buffer must be
    /// at least `2 * size` bytes long.
    pub fn packet_buffer_size(mut self, size: usize) -> Self {
        self.packet_buffer_size = Some(size);
        self
    }

    /// Use a pre-allocated breakpoint table (instead of heap-allocating).
    ///
    /// _Note:_ This method is _required_ when the `alloc` feature is disabled!
    pub fn with_breakpoint_buffer(mut self, breakpoint_buffer: &'a mut [Option<u64>]) -> Self {
        self.breakpoint_buffer = Some(breakpoint_buffer);
        self
    }

    /// Maximum number of simultaneous breakpoints. Defaults to 200.
    ///
    /// When used alongside `with_breakpoint_buffer`, only the first
    /// `capacity` slots of the buffer are used.
    pub fn breakpoint_capacity(mut self, capacity: usize) -> Self {
        self.breakpoint_capacity = Some(capacity);
        self
    }

    /// Width of a register on the wire, in bytes. Defaults to 4.
    pub fn word_size(mut self, size: usize) -> Self {
        self.word_size = size;
        self
    }

    /// TCP port used by `establish_connection`. Defaults to 5000.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Build the GdbStub, returning an error if something went wrong.
    pub fn build(self) -> Result<GdbStub<'a, T, C>, GdbStubBuilderError> {
        if !(1..=8).contains(&self.word_size) {
            return Err(GdbStubBuilderError::InvalidWordSize(self.word_size));
        }
        if self.breakpoint_capacity == Some(0) {
            return Err(GdbStubBuilderError::ZeroBreakpointCapacity);
        }

        let (packet_buffer, reply_buffer) = match self.packet_buffer {
            Some(buf) => {
                let len = match self.packet_buffer_size {
                    Some(custom_len) => {
                        if custom_len.saturating_mul(2) > buf.len() {
                            return Err(GdbStubBuilderError::PacketBufSizeMismatch);
                        }
                        custom_len
                    }
                    None => buf.len() / 2,
                };
                if len == 0 {
                    return Err(GdbStubBuilderError::PacketBufSizeMismatch);
                }
                let (packet, rest) = buf.split_at_mut(len);
                (
                    ManagedSlice::Borrowed(packet),
                    ManagedSlice::Borrowed(&mut rest[..len]),
                )
            }
            None => {
                cfg_if::cfg_if! {
                    if #[cfg(feature = "alloc")] {
                        use alloc::vec;
                        let len = self
                            .packet_buffer_size
                            .unwrap_or(crate::DEFAULT_PACKET_BUFFER_SIZE);
                        if len == 0 {
                            return Err(GdbStubBuilderError::PacketBufSizeMismatch);
                        }
                        (ManagedSlice::Owned(vec![0; len]), ManagedSlice::Owned(vec![0; len]))
                    } else {
                        return Err(GdbStubBuilderError::MissingPacketBuffer);
                    }
                }
            }
        };

        let breakpoints = match self.breakpoint_buffer {
            Some(buf) => {
                let len = match self.breakpoint_capacity {
                    Some(capacity) => capacity.min(buf.len()),
                    None => buf.len(),
                };
                if len == 0 {
                    return Err(GdbStubBuilderError::ZeroBreakpointCapacity);
                }
                Breakpoints::new(&mut buf[..len])
            }
            None => {
                cfg_if::cfg_if! {
                    if #[cfg(feature = "alloc")] {
                        Breakpoints::with_capacity(
                            self.breakpoint_capacity
                                .unwrap_or(crate::DEFAULT_BREAKPOINT_CAPACITY),
                        )
                    } else {
                        return Err(GdbStubBuilderError::MissingBreakpointBuffer);
                    }
                }
            }
        };

        let packet_buffer_size = packet_buffer.len();
        Ok(GdbStub {
            conn: None,
            packet_buffer,
            reply_buffer,
            port: self.port,
            inner: GdbStubImpl::new(breakpoints, self.word_size, packet_buffer_size),
        })
    }
}

impl<T: Target, C: Connection> Default for GdbStubBuilder<'static, T, C> {
    fn default() -> Self {
        Self::new()
    }
}
