use managed::ManagedSlice;

use crate::conn::ConnectionExt;
use crate::protocol::common::encode_hex_byte;
use crate::util::managed_vec::ManagedVec;

/// Connection error raised while sending a packet.
#[derive(Debug, Clone)]
pub enum Error<C> {
    /// Writing the packet failed.
    Write(C),
    /// Reading the client's acknowledgement failed.
    Read(C),
}

/// Accumulates a reply payload in a fixed-size buffer.
///
/// The payload is kept around (instead of being streamed straight to the
/// connection) so that it can be retransmitted verbatim if the client NACKs
/// it. Writes past the end of the buffer are silently dropped.
pub struct ResponseWriter<'a, 'b> {
    buf: ManagedVec<'a, 'b, u8>,
    truncated: bool,
}

impl<'a, 'b> ResponseWriter<'a, 'b> {
    /// Creates a new, empty ResponseWriter
    pub fn new(reply_buffer: &'b mut ManagedSlice<'a, u8>) -> Self {
        Self {
            buf: ManagedVec::new(reply_buffer),
            truncated: false,
        }
    }

    /// Maximum payload length this writer can hold.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Write a single raw byte.
    pub fn write(&mut self, byte: u8) {
        if self.buf.push(byte).is_err() {
            self.truncated = true;
        }
    }

    /// Write an entire string.
    pub fn write_str(&mut self, s: &str) {
        for b in s.as_bytes().iter() {
            self.write(*b);
        }
    }

    /// Write a single byte as a hex string (two ascii chars)
    pub fn write_hex(&mut self, byte: u8) {
        for &c in encode_hex_byte(byte).iter() {
            self.write(c);
        }
    }

    /// Write a byte-buffer as a hex string (i.e: two ascii chars / byte).
    pub fn write_hex_buf(&mut self, data: &[u8]) {
        for b in data.iter() {
            self.write_hex(*b);
        }
    }

    /// Frame the accumulated payload and send it, retransmitting until the
    /// client acknowledges it.
    pub fn flush<C: ConnectionExt>(self, conn: &mut C) -> Result<(), Error<C::Error>> {
        if self.truncated {
            warn!(
                "reply truncated to the {} byte reply buffer",
                self.buf.capacity()
            );
        }
        send_packet(conn, self.buf.as_slice())
    }
}

/// Send `payload` as `$<payload>#<checksum>`, blocking until the client
/// acknowledges it with `+`. Any other acknowledgement byte triggers a
/// retransmission of the whole packet.
pub fn send_packet<C: ConnectionExt>(conn: &mut C, payload: &[u8]) -> Result<(), Error<C::Error>> {
    loop {
        let mut checksum = 0u8;

        conn.write(b'$').map_err(Error::Write)?;
        for &b in payload {
            conn.write(b).map_err(Error::Write)?;
            checksum = checksum.wrapping_add(b);
        }
        conn.write(b'#').map_err(Error::Write)?;
        conn.write_all(&encode_hex_byte(checksum))
            .map_err(Error::Write)?;
        conn.flush().map_err(Error::Write)?;

        #[cfg(feature = "trace-pkt")]
        trace!(
            "--> ${}#{:02x}",
            core::str::from_utf8(payload).unwrap_or("<invalid packet>"),
            checksum
        );

        match conn.read().map_err(Error::Read)? & 0x7f {
            b'+' => return Ok(()),
            b'-' => debug!("client nack'd the last packet, retransmitting"),
            other => warn!("expected an ack, got {:#04x}; retransmitting", other),
        }
    }
}
