use core::convert::TryFrom;

use crate::protocol::common::decode_hex;

#[derive(Debug, PartialEq, Eq)]
pub struct m {
    pub addr: u64,
    pub len: usize,
}

impl TryFrom<&[u8]> for m {
    type Error = ();

    fn try_from(body: &[u8]) -> Result<Self, ()> {
        let mut body = body.split(|b| *b == b',');
        let addr = decode_hex(body.next().ok_or(())?).map_err(drop)?;
        let len = decode_hex(body.next().ok_or(())?).map_err(drop)?;

        Ok(m { addr, len })
    }
}
