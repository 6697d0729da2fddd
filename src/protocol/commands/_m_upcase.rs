use core::convert::TryFrom;

use crate::protocol::common::decode_hex;

/// `MAA..AA,LLLL:XX..`
#[derive(Debug, PartialEq, Eq)]
pub struct M<'a> {
    pub addr: u64,
    pub len: usize,
    /// Length of everything preceding the data, including the `M` and the
    /// `:`. Used to figure out how much data could possibly fit in the packet
    /// buffer.
    pub header_len: usize,
    /// Hex-encoded data, not yet validated.
    pub val: &'a [u8],
}

impl<'a> TryFrom<&'a [u8]> for M<'a> {
    type Error = ();

    fn try_from(body: &'a [u8]) -> Result<Self, ()> {
        let colon = body.iter().position(|b| *b == b':').ok_or(())?;
        let (header, val) = (&body[..colon], &body[colon + 1..]);

        let mut header = header.split(|b| *b == b',');
        let addr = decode_hex(header.next().ok_or(())?).map_err(drop)?;
        let len = decode_hex(header.next().ok_or(())?).map_err(drop)?;

        Ok(M {
            addr,
            len,
            header_len: 1 + colon + 1,
            val,
        })
    }
}
