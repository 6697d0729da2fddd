use core::convert::TryFrom;

use super::breakpoint::BasicBreakpoint;

#[derive(Debug, PartialEq, Eq)]
pub struct Z(pub BasicBreakpoint);

impl TryFrom<&[u8]> for Z {
    type Error = ();

    fn try_from(body: &[u8]) -> Result<Self, ()> {
        BasicBreakpoint::from_slice(body).map(Z).ok_or(())
    }
}
