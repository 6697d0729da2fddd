use core::convert::TryFrom;

use super::breakpoint::BasicBreakpoint;

#[derive(Debug, PartialEq, Eq)]
pub struct z(pub BasicBreakpoint);

impl TryFrom<&[u8]> for z {
    type Error = ();

    fn try_from(body: &[u8]) -> Result<Self, ()> {
        BasicBreakpoint::from_slice(body).map(z).ok_or(())
    }
}
