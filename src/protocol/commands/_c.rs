use core::convert::TryFrom;

use crate::protocol::common::decode_hex_prefix;

#[derive(Debug, PartialEq, Eq)]
pub struct c {
    pub addr: Option<u64>,
}

impl TryFrom<&[u8]> for c {
    type Error = ();

    fn try_from(body: &[u8]) -> Result<Self, ()> {
        // an unparsable address resumes from the current pc
        Ok(c {
            addr: decode_hex_prefix(body),
        })
    }
}
