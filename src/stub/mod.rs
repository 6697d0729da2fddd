//! The core [`GdbStub`] type, used to drive a GDB debugging session for a
//! particular [`Target`] over a given [`Connection`].

use managed::ManagedSlice;

use crate::breakpoints::Breakpoints;
use crate::conn::{Connection, ConnectionExt};
use crate::protocol::{RecvPacketBlocking, ResponseWriter, INTERRUPT};
use crate::target::Target;

mod builder;
mod core_impl;
mod error;

pub use builder::{GdbStubBuilder, GdbStubBuilderError};
pub use core_impl::ExecMode;
pub use error::GdbStubError;

use core_impl::{GdbStubImpl, State};
use GdbStubError as Error;

/// Debug a simulated processor using the GDB Remote Serial Protocol.
///
/// The simulator drives the session from its main loop: before executing
/// each instruction it asks [`should_stop`](Self::should_stop), and on `true`
/// hands control to [`handle_halt`](Self::handle_halt), which serves
/// debugger requests until the debugger resumes execution.
///
/// A freshly built stub is disabled. Until [`enable`](Self::enable) is
/// called it never stops the simulation and never touches the connection.
pub struct GdbStub<'a, T: Target, C: Connection> {
    conn: Option<C>,
    packet_buffer: ManagedSlice<'a, u8>,
    reply_buffer: ManagedSlice<'a, u8>,
    port: u16,
    inner: GdbStubImpl<'a, T, C>,
}

impl<'a, T: Target, C: Connection> GdbStub<'a, T, C> {
    /// Create a [`GdbStubBuilder`].
    pub fn builder() -> GdbStubBuilder<'static, T, C> {
        GdbStubBuilder::new()
    }

    /// Enable the stub. Stopping and the command loop only happen while
    /// enabled.
    pub fn enable(&mut self) {
        self.inner.set_enabled(true)
    }

    /// Disable the stub. The connection (if any) is kept open.
    pub fn disable(&mut self) {
        self.inner.set_enabled(false)
    }

    /// Whether the stub is disabled.
    pub fn is_disabled(&self) -> bool {
        !self.inner.enabled()
    }

    /// Set the TCP port used by `establish_connection`.
    pub fn set_port(&mut self, port: u16) {
        self.port = port
    }

    /// TCP port used by `establish_connection`.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether a debugger is attached.
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Current execution mode.
    pub fn exec_mode(&self) -> ExecMode {
        self.inner.exec_mode()
    }

    /// Width of a register on the wire, in bytes.
    pub fn word_size(&self) -> usize {
        self.inner.word_size()
    }

    /// Breakpoints currently set by the debugger.
    pub fn breakpoints(&self) -> &Breakpoints<'a> {
        self.inner.breakpoints()
    }

    /// Mutable access to the breakpoint table, e.g. to install breakpoints
    /// before the debugger attaches.
    pub fn breakpoints_mut(&mut self) -> &mut Breakpoints<'a> {
        self.inner.breakpoints_mut()
    }

    /// Should the simulation halt before executing the instruction at `addr`?
    ///
    /// True on the very first call after enabling (so the debugger gets
    /// control before anything runs), after a single-step, and whenever
    /// `addr` holds a breakpoint. Always false while disabled.
    pub fn should_stop(&self, addr: u64) -> bool {
        self.inner.should_stop(addr)
    }

    /// Install a connection to an attached debugger.
    ///
    /// `establish_connection` does this for TCP. Other transports can be
    /// connected manually and passed in here. Only one debugger is ever
    /// served per session: once connected, further connections are dropped.
    pub fn attach(&mut self, mut conn: C) -> Result<(), Error<C::Error>> {
        if self.is_disabled() {
            warn!("stub is disabled, ignoring connection");
            return Ok(());
        }
        if self.conn.is_some() {
            warn!("a debugger is already attached, ignoring connection");
            return Ok(());
        }

        conn.on_session_start().map_err(Error::ConnectionInit)?;
        self.conn = Some(conn);
        Ok(())
    }

    /// Report that the simulated program exited with `status`.
    pub fn notify_exit(&mut self, status: u8) -> Result<(), Error<C::Error>>
    where
        C: ConnectionExt,
    {
        if self.is_disabled() {
            return Ok(());
        }
        let conn = match self.conn.as_mut() {
            Some(conn) => conn,
            None => return Ok(()),
        };

        info!("target exited with status {}", status);
        let mut res = ResponseWriter::new(&mut self.reply_buffer);
        res.write(b'W');
        res.write_hex(status);
        res.flush(conn)?;
        Ok(())
    }

    /// Check for a Ctrl-C sent while the simulation is running, without
    /// blocking.
    ///
    /// When one is pending the stub switches to single-step mode, so the
    /// simulation halts at the next instruction and reports `SIGINT`.
    /// Returns `true` if an interrupt was received.
    pub fn poll_interrupt(&mut self) -> Result<bool, Error<C::Error>>
    where
        C: ConnectionExt,
    {
        if self.is_disabled() {
            return Ok(false);
        }
        let conn = match self.conn.as_mut() {
            Some(conn) => conn,
            None => return Ok(false),
        };

        match conn.peek().map_err(Error::ConnectionRead)? {
            None => Ok(false),
            // a packet is on its way, leave it for the command loop
            Some(b'$') => Ok(false),
            Some(byte) => {
                conn.read().map_err(Error::ConnectionRead)?;
                if byte != INTERRUPT {
                    debug!("discarding stray byte {:#04x}", byte);
                    return Ok(false);
                }

                debug!("<-- interrupt");
                self.inner.interrupt();
                Ok(true)
            }
        }
    }

    /// Serve the debugger until it resumes execution.
    ///
    /// Announces the halt with a stop notification (`S05`, or `S02` after an
    /// interrupt), then handles requests until a continue, step or interrupt
    /// packet is received. Without an attached debugger this returns
    /// immediately.
    pub fn handle_halt(&mut self, target: &mut T) -> Result<(), Error<C::Error>>
    where
        C: ConnectionExt,
    {
        if self.is_disabled() {
            return Ok(());
        }

        let signal = self.inner.begin_halt();
        let conn = match self.conn.as_mut() {
            Some(conn) => conn,
            None => return Ok(()),
        };

        debug!("target halted with {}", signal);
        let mut res = ResponseWriter::new(&mut self.reply_buffer);
        res.write(b'S');
        res.write_hex(signal.0);
        res.flush(conn)?;

        loop {
            let packet = RecvPacketBlocking::recv(&mut self.packet_buffer, conn)
                .map_err(Error::ConnectionRead)?;
            match self
                .inner
                .handle_packet(target, conn, &mut self.reply_buffer, packet)?
            {
                State::Pump => {}
                State::Resume => {
                    debug!("resuming in {:?} mode", self.inner.exec_mode());
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(feature = "std")]
impl<'a, T: Target> GdbStub<'a, T, std::net::TcpStream> {
    /// Wait for a debugger to connect over TCP.
    ///
    /// Listens on all interfaces at [`port`](Self::port) and blocks until a
    /// single client connects. Does nothing while disabled or when a
    /// debugger is already attached.
    pub fn establish_connection(&mut self) -> Result<(), Error<std::io::Error>> {
        use std::net::{Ipv4Addr, TcpListener};

        if self.is_disabled() {
            warn!("stub is disabled, not waiting for a debugger");
            return Ok(());
        }
        if self.is_connected() {
            return Ok(());
        }

        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, self.port))
            .map_err(Error::ConnectionInit)?;
        info!("Waiting for a GDB connection on port {}...", self.port);

        let (stream, addr) = listener.accept().map_err(Error::ConnectionInit)?;
        info!("Debugger connected from {}", addr);

        self.attach(stream)
    }
}
