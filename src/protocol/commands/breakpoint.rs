use crate::protocol::common::decode_hex;

/// Body shared by the `Z` and `z` packets: `type,addr,kind`.
///
/// For software breakpoints `kind` is an architecture-specific breakpoint
/// size; for watchpoints it is the length of the watched region. Neither
/// affects the stub, so it's parsed but otherwise unused.
#[derive(Debug, PartialEq, Eq)]
pub struct BasicBreakpoint {
    pub type_: u32,
    pub addr: u64,
    pub kind: u64,
}

impl BasicBreakpoint {
    pub fn from_slice(body: &[u8]) -> Option<BasicBreakpoint> {
        let mut body = body.splitn(3, |b| *b == b',');
        let type_ = decode_hex(body.next()?).ok()?;
        let addr = decode_hex(body.next()?).ok()?;
        // conditions / commands trailing the kind aren't supported
        let kind = body.next()?.split(|b| *b == b';').next()?;
        let kind = decode_hex(kind).ok()?;

        Some(BasicBreakpoint { type_, addr, kind })
    }
}
