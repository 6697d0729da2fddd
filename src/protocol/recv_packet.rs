use managed::ManagedSlice;

use crate::conn::ConnectionExt;
use crate::protocol::common::{ascii2byte, decode_hex_byte};
use crate::util::managed_vec::ManagedVec;

/// Ctrl-C, sent by the debugger outside of any packet framing.
pub const INTERRUPT: u8 = 0x03;

/// What came in over the wire.
#[derive(Debug, PartialEq, Eq)]
pub enum RecvPacket<'b> {
    /// A bare Ctrl-C byte arrived while waiting for a packet.
    Interrupt,
    /// A packet body with framing, checksum and sequence id stripped.
    Payload(&'b mut [u8]),
}

/// Receives a packet by pulling bytes from a blocking connection.
///
/// Corrupted packets are NACKed and re-read transparently: the caller only
/// ever sees packets whose checksum matched.
pub struct RecvPacketBlocking;

impl RecvPacketBlocking {
    pub fn recv<'b, C: ConnectionExt>(
        packet_buffer: &'b mut ManagedSlice<'_, u8>,
        conn: &mut C,
    ) -> Result<RecvPacket<'b>, C::Error> {
        let (start, end) = loop {
            // wait around for the start character, ignore all other characters
            loop {
                let c = conn.read()?;
                if c == INTERRUPT {
                    return Ok(RecvPacket::Interrupt);
                }
                if c & 0x7f == b'$' {
                    break;
                }
            }

            let mut buf = ManagedVec::new(&mut *packet_buffer);
            let mut checksum = 0u8;

            // read until a '#' or the end of the buffer is found
            let mut overflow = false;
            loop {
                if buf.len() == buf.capacity() {
                    overflow = true;
                    break;
                }
                let c = conn.read()?;
                if c == b'#' {
                    break;
                }
                checksum = checksum.wrapping_add(c);
                // infallible, capacity was checked above
                let _ = buf.push(c);
            }

            if overflow {
                warn!(
                    "dropping packet larger than the {} byte packet buffer",
                    buf.capacity()
                );
                continue;
            }

            let hi = conn.read()? & 0x7f;
            let lo = conn.read()? & 0x7f;
            let xmitcsum = decode_hex_byte(hi, lo);

            #[cfg(feature = "trace-pkt")]
            trace!(
                "<-- ${}#{}{}",
                core::str::from_utf8(buf.as_slice()).unwrap_or("<invalid packet>"),
                hi as char,
                lo as char
            );

            if xmitcsum != Some(checksum) {
                if ascii2byte(hi).is_none() || ascii2byte(lo).is_none() {
                    warn!("malformed packet checksum, requesting retransmission");
                } else {
                    warn!(
                        "packet checksum mismatch (calculated {:02x}), requesting retransmission",
                        checksum
                    );
                }
                conn.write(b'-')?;
                conn.flush()?;
                continue;
            }

            conn.write(b'+')?;

            // if a sequence id is present, echo it back and strip it
            let body = buf.as_slice();
            let start = if body.len() >= 3 && body[2] == b':' {
                conn.write(body[0])?;
                conn.write(body[1])?;
                3
            } else {
                0
            };
            conn.flush()?;

            break (start, buf.len());
        };

        let buf: &'b mut [u8] = packet_buffer;
        Ok(RecvPacket::Payload(&mut buf[start..end]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conn::mock::{frame, MockConnection};

    fn recv_one(input: &[u8], capacity: usize) -> (Result<Vec<u8>, ()>, MockConnection) {
        let mut conn = MockConnection::new(input);
        let mut storage = vec![0; capacity];
        let mut buf = ManagedSlice::Borrowed(&mut storage[..]);
        let res = match RecvPacketBlocking::recv(&mut buf, &mut conn) {
            Ok(RecvPacket::Payload(body)) => Ok(body.to_vec()),
            Ok(RecvPacket::Interrupt) => Ok(vec![INTERRUPT]),
            Err(_) => Err(()),
        };
        (res, conn)
    }

    #[test]
    fn recv_valid_packet() {
        let (res, conn) = recv_one(frame("m1000,4").as_bytes(), 64);
        assert_eq!(res.unwrap(), b"m1000,4");
        assert_eq!(conn.output, b"+");
    }

    #[test]
    fn leading_garbage_is_skipped() {
        let input = format!("+-junk{}", frame("?"));
        let (res, _) = recv_one(input.as_bytes(), 64);
        assert_eq!(res.unwrap(), b"?");
    }

    #[test]
    fn bad_checksum_is_nacked_and_reread() {
        let input = format!("$g#00{}", frame("g"));
        let (res, conn) = recv_one(input.as_bytes(), 64);
        assert_eq!(res.unwrap(), b"g");
        assert_eq!(conn.output, b"-+");
    }

    #[test]
    fn non_hex_checksum_is_nacked() {
        let input = format!("$g#zz{}", frame("s"));
        let (res, conn) = recv_one(input.as_bytes(), 64);
        assert_eq!(res.unwrap(), b"s");
        assert_eq!(conn.output, b"-+");
    }

    #[test]
    fn sequence_id_is_echoed_and_stripped() {
        let (res, conn) = recv_one(frame("01:m0,2").as_bytes(), 64);
        assert_eq!(res.unwrap(), b"m0,2");
        assert_eq!(conn.output, b"+01");
    }

    #[test]
    fn oversized_packet_is_dropped() {
        // capacity 4: "m1000" overflows, the following packet fits
        let input = format!("{}{}", frame("m1000"), frame("k"));
        let (res, conn) = recv_one(input.as_bytes(), 4);
        assert_eq!(res.unwrap(), b"k");
        assert_eq!(conn.output, b"+");
    }

    #[test]
    fn bare_interrupt_byte() {
        let (res, conn) = recv_one(&[b'+', INTERRUPT], 16);
        assert_eq!(res.unwrap(), vec![INTERRUPT]);
        assert!(conn.output.is_empty());
    }

    #[test]
    fn high_bit_interrupt_lookalike_is_skipped() {
        let mut input = vec![INTERRUPT | 0x80];
        input.extend_from_slice(frame("k").as_bytes());
        let (res, conn) = recv_one(&input, 16);
        assert_eq!(res.unwrap(), b"k");
        assert_eq!(conn.output, b"+");
    }

    #[test]
    fn eof_is_an_error() {
        let (res, _) = recv_one(b"$m10", 64);
        assert!(res.is_err());
    }
}
