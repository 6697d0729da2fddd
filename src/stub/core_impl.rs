use core::marker::PhantomData;

use managed::ManagedSlice;

use crate::breakpoints::Breakpoints;
use crate::common::Signal;
use crate::conn::ConnectionExt;
use crate::protocol::commands::{Command, CommandParseError};
use crate::protocol::{RecvPacket, ResponseWriter, INTERRUPT};
use crate::stub::error::{GdbStubError, NonFatalError};
use crate::target::Target;

/// Common imports used by every handler module.
mod prelude {
    pub(super) use crate::protocol::ResponseWriter;
    pub(super) use crate::stub::core_impl::GdbStubImpl;
    pub(super) use crate::stub::core_impl::HandlerStatus;
    pub(super) use crate::stub::error::NonFatalError;
    pub(super) use crate::target::Target;
}

mod base;
mod breakpoints;
mod memory;
mod registers;
mod resume;

/// How the simulation proceeds once the command loop hands control back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Nothing has halted yet. The very first instruction boundary stops, so
    /// a debugger attaching at startup gets control before anything runs.
    FirstStop,
    /// Stop again at the next instruction boundary.
    Step,
    /// Run until a breakpoint is hit.
    Run,
}

/// What the command loop should do after a packet has been handled.
pub enum State {
    /// Wait for the next packet.
    Pump,
    /// Hand control back to the simulator.
    Resume,
}

pub enum HandlerStatus {
    /// The handler wrote its own reply (possibly an empty one).
    Handled,
    /// Reply with `OK`.
    NeedsOk,
    /// Resume the simulation without replying. The reply is the stop
    /// notification sent by the next halt.
    Resume,
}

pub(crate) struct GdbStubImpl<'a, T: Target, C> {
    _target: PhantomData<T>,
    _connection: PhantomData<C>,

    breakpoints: Breakpoints<'a>,
    exec_mode: ExecMode,
    flags: SessionFlags,
    word_size: usize,
    packet_buffer_size: usize,
}

impl<'a, T: Target, C> GdbStubImpl<'a, T, C> {
    pub fn new(
        breakpoints: Breakpoints<'a>,
        word_size: usize,
        packet_buffer_size: usize,
    ) -> GdbStubImpl<'a, T, C> {
        GdbStubImpl {
            _target: PhantomData,
            _connection: PhantomData,

            breakpoints,
            exec_mode: ExecMode::FirstStop,
            flags: SessionFlags::empty(),
            word_size,
            packet_buffer_size,
        }
    }

    pub fn enabled(&self) -> bool {
        self.flags.contains(SessionFlags::ENABLED)
    }

    pub fn set_enabled(&mut self, val: bool) {
        self.flags.set(SessionFlags::ENABLED, val)
    }

    pub fn exec_mode(&self) -> ExecMode {
        self.exec_mode
    }

    pub fn word_size(&self) -> usize {
        self.word_size
    }

    pub fn breakpoints(&self) -> &Breakpoints<'a> {
        &self.breakpoints
    }

    pub fn breakpoints_mut(&mut self) -> &mut Breakpoints<'a> {
        &mut self.breakpoints
    }

    pub fn should_stop(&self, addr: u64) -> bool {
        if !self.enabled() {
            return false;
        }

        match self.exec_mode {
            ExecMode::FirstStop | ExecMode::Step => true,
            ExecMode::Run => self.breakpoints.exists(addr),
        }
    }

    /// Record a Ctrl-C that arrived while the simulation was running.
    pub fn interrupt(&mut self) {
        self.flags.insert(SessionFlags::INTERRUPTED);
        self.exec_mode = ExecMode::Step;
    }

    /// Called on entry to the halt handler. Returns the signal to announce.
    pub fn begin_halt(&mut self) -> Signal {
        if self.exec_mode == ExecMode::FirstStop {
            self.exec_mode = ExecMode::Run;
        }

        if self.flags.contains(SessionFlags::INTERRUPTED) {
            self.flags.remove(SessionFlags::INTERRUPTED);
            Signal::SIGINT
        } else {
            Signal::SIGTRAP
        }
    }
}

impl<'a, T: Target, C: ConnectionExt> GdbStubImpl<'a, T, C> {
    pub fn handle_packet(
        &mut self,
        target: &mut T,
        conn: &mut C,
        reply_buffer: &mut ManagedSlice<'_, u8>,
        packet: RecvPacket<'_>,
    ) -> Result<State, GdbStubError<C::Error>> {
        let body = match packet {
            RecvPacket::Interrupt => return self.handle_interrupt(conn, reply_buffer),
            // some clients wrap the Ctrl-C byte in a regular packet
            RecvPacket::Payload(body) if body.first() == Some(&INTERRUPT) => {
                return self.handle_interrupt(conn, reply_buffer)
            }
            RecvPacket::Payload(body) => body,
        };

        let mut res = ResponseWriter::new(reply_buffer);
        let status = match Command::from_packet_body(body) {
            Ok(cmd) => self.handle_command(&mut res, target, cmd),
            // an empty packet gets an empty reply
            Err(CommandParseError::Empty) => Ok(HandlerStatus::Handled),
            Err(CommandParseError::MalformedCommand(name)) => {
                warn!(
                    "malformed '{}' packet: {:?}",
                    core::str::from_utf8(name).unwrap_or("<invalid>"),
                    core::str::from_utf8(body).unwrap_or("<invalid packet>")
                );
                Err(NonFatalError::MALFORMED)
            }
        };

        match status {
            Ok(HandlerStatus::Handled) => {}
            Ok(HandlerStatus::NeedsOk) => res.write_str("OK"),
            Ok(HandlerStatus::Resume) => return Ok(State::Resume),
            Err(NonFatalError(code)) => {
                res.write(b'E');
                res.write_hex(code);
            }
        }

        res.flush(conn)?;
        Ok(State::Pump)
    }

    fn handle_interrupt(
        &mut self,
        conn: &mut C,
        reply_buffer: &mut ManagedSlice<'_, u8>,
    ) -> Result<State, GdbStubError<C::Error>> {
        debug!("<-- interrupt packet");
        self.exec_mode = ExecMode::Step;

        let mut res = ResponseWriter::new(reply_buffer);
        res.write(b'S');
        res.write_hex(Signal::SIGINT.0);
        res.flush(conn)?;

        Ok(State::Resume)
    }

    fn handle_command(
        &mut self,
        res: &mut ResponseWriter<'_, '_>,
        target: &mut T,
        cmd: Command<'_>,
    ) -> Result<HandlerStatus, NonFatalError> {
        match cmd {
            // `handle_X` methods are defined in the submodules
            Command::QuestionMark(_) => self.handle_question_mark(res),
            Command::k(_) => self.handle_kill(target),
            Command::g(_) => self.handle_read_registers(res, target),
            Command::G(cmd) => self.handle_write_registers(target, cmd),
            Command::m(cmd) => self.handle_read_memory(res, target, cmd),
            Command::M(cmd) => self.handle_write_memory(target, cmd),
            Command::c(cmd) => self.handle_continue(target, cmd),
            Command::s(cmd) => self.handle_step(target, cmd),
            Command::Z(cmd) => self.handle_add_breakpoint(cmd),
            Command::z(cmd) => self.handle_remove_breakpoint(cmd),
            Command::Unknown(cmd) => {
                info!("Unknown command: {:?}", core::str::from_utf8(cmd));
                Ok(HandlerStatus::Handled)
            }
        }
    }
}

#[derive(Copy, Clone)]
#[repr(transparent)]
struct SessionFlags(u8);

// Internal session state, not part of the protocol.
bitflags::bitflags! {
    impl SessionFlags: u8 {
        const ENABLED = 1 << 0;
        const INTERRUPTED = 1 << 1;
    }
}
