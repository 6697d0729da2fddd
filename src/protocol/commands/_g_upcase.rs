use core::convert::TryFrom;

/// Raw register data. Splitting it into words requires the register count
/// and word size, so decoding happens in the handler.
#[derive(Debug, PartialEq, Eq)]
pub struct G<'a> {
    pub vals: &'a [u8],
}

impl<'a> TryFrom<&'a [u8]> for G<'a> {
    type Error = ();

    fn try_from(body: &'a [u8]) -> Result<Self, ()> {
        Ok(G { vals: body })
    }
}
