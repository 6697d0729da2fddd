//! A GDB Remote Serial Protocol stub meant to be embedded directly into an
//! instruction-set simulator.
//!
//! The stub itself is architecture-agnostic: everything that depends on the
//! simulated ISA (register file layout, memory accesses, the program counter,
//! byte order) is provided by the simulator through the [`Target`] trait.
//!
//! The simulator drives the stub from its main loop:
//!
//! ```ignore
//! let mut stub = GdbStub::<MyCpu, TcpStream>::builder().port(5000).build()?;
//! stub.enable();
//! stub.establish_connection()?;
//!
//! loop {
//!     let pc = cpu.pc();
//!     if stub.should_stop(pc) {
//!         stub.handle_halt(&mut cpu)?;
//!     }
//!     if cpu.step() == Event::Exited(code) {
//!         stub.notify_exit(code)?;
//!         break;
//!     }
//! }
//! ```
//!
//! ## Features
//!
//! - `std` (default): implements [`Connection`](conn::Connection) for
//!   [`TcpStream`](std::net::TcpStream), enables
//!   [`GdbStub::establish_connection`], and implements `std::error::Error`
//!   for the crate's error types.
//! - `alloc`: allows the stub to heap-allocate its packet buffer and
//!   breakpoint table when none are provided.
//! - `trace-pkt` (default): logs every incoming and outgoing packet at the
//!   `trace` level.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
extern crate log;

pub mod breakpoints;
pub mod common;
pub mod conn;
pub mod stub;
pub mod target;

mod protocol;
mod util;

pub use breakpoints::{BreakpointError, Breakpoints};
pub use stub::{ExecMode, GdbStub, GdbStubBuilder, GdbStubBuilderError, GdbStubError};
pub use target::Target;

/// Default size of the incoming packet buffer (and of the reply buffer).
pub const DEFAULT_PACKET_BUFFER_SIZE: usize = 2048;

/// Default number of breakpoint slots.
pub const DEFAULT_BREAKPOINT_CAPACITY: usize = 200;

/// Default TCP port the stub listens on.
pub const DEFAULT_PORT: u16 = 5000;
