/// Signal numbers reported to the debugger in stop replies.
///
/// The values are GDB's target-independent signal numbers (see `signals.def`
/// in binutils-gdb), _not_ the host's. Only the handful a simulator can
/// meaningfully report are named here; any other number can still be built
/// with `Signal(n)`.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signal(pub u8);

#[allow(clippy::upper_case_acronyms)]
#[rustfmt::skip]
impl Signal {
    #[doc = "Signal 0 (shouldn't be used)"]    pub const SIGZERO:    Self = Self(0);
    #[doc = "Interrupt"]                       pub const SIGINT:     Self = Self(2);
    #[doc = "Illegal instruction"]             pub const SIGILL:     Self = Self(4);
    #[doc = "Trace/breakpoint trap"]           pub const SIGTRAP:    Self = Self(5);
    #[doc = "Aborted"]                         pub const SIGABRT:    Self = Self(6);
    #[doc = "Arithmetic exception"]            pub const SIGFPE:     Self = Self(8);
    #[doc = "Killed"]                          pub const SIGKILL:    Self = Self(9);
    #[doc = "Bus error"]                       pub const SIGBUS:     Self = Self(10);
    #[doc = "Segmentation fault"]              pub const SIGSEGV:    Self = Self(11);
    #[doc = "Terminated"]                      pub const SIGTERM:    Self = Self(15);
}

impl core::fmt::Display for Signal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        #[rustfmt::skip]
        let s = match *self {
            Signal::SIGZERO => "SIGZERO - Signal 0",
            Signal::SIGINT  => "SIGINT - Interrupt",
            Signal::SIGILL  => "SIGILL - Illegal instruction",
            Signal::SIGTRAP => "SIGTRAP - Trace/breakpoint trap",
            Signal::SIGABRT => "SIGABRT - Aborted",
            Signal::SIGFPE  => "SIGFPE - Arithmetic exception",
            Signal::SIGKILL => "SIGKILL - Killed",
            Signal::SIGBUS  => "SIGBUS - Bus error",
            Signal::SIGSEGV => "SIGSEGV - Segmentation fault",
            Signal::SIGTERM => "SIGTERM - Terminated",
            _ => "signal not named by this crate",
        };

        write!(f, "{}", s)
    }
}
