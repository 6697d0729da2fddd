use core::convert::TryFrom;

#[derive(Debug, PartialEq, Eq)]
pub struct QuestionMark;

impl TryFrom<&[u8]> for QuestionMark {
    type Error = ();

    fn try_from(_body: &[u8]) -> Result<Self, ()> {
        Ok(QuestionMark)
    }
}
