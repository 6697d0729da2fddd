use core::convert::TryFrom;

use crate::protocol::common::decode_hex_prefix;

#[derive(Debug, PartialEq, Eq)]
pub struct s {
    pub addr: Option<u64>,
}

impl TryFrom<&[u8]> for s {
    type Error = ();

    fn try_from(body: &[u8]) -> Result<Self, ()> {
        Ok(s {
            addr: decode_hex_prefix(body),
        })
    }
}
