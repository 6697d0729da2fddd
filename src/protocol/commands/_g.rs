use core::convert::TryFrom;

#[derive(Debug, PartialEq, Eq)]
pub struct g;

impl TryFrom<&[u8]> for g {
    type Error = ();

    fn try_from(_body: &[u8]) -> Result<Self, ()> {
        Ok(g)
    }
}
