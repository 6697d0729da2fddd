use std::net::TcpStream;

use simstub::{GdbStub, GdbStubError};

pub type DynResult<T> = Result<T, Box<dyn std::error::Error>>;

mod emu;
mod gdb;

use emu::{Emu, Event, ADDI, DEC, HALT, JNZ, LDI};

/// Count down from 10, then exit with status 42.
#[rustfmt::skip]
static PROGRAM: &[u8] = &[
    LDI, 10,
    DEC, 0,
    JNZ, 0x02,
    ADDI, 42,
    HALT, 0,
];

/// How many instructions to run between checks for a Ctrl-C.
const INTERRUPT_POLL_INTERVAL: usize = 1024;

fn main() -> DynResult<()> {
    pretty_env_logger::init();

    let port = match std::env::args().nth(1) {
        Some(port) => port.parse()?,
        None => simstub::DEFAULT_PORT,
    };

    let mut emu = Emu::new(PROGRAM);

    let mut debugger = GdbStub::<Emu, TcpStream>::builder()
        .port(port)
        .word_size(4)
        .build()?;
    debugger.enable();
    if let Err(e) = debugger.establish_connection() {
        eprintln!("Could not start the debug session: {}", e);
        std::process::exit(127);
    }

    let mut steps = 0;
    while emu.running {
        steps += 1;
        if steps % INTERRUPT_POLL_INTERVAL == 0 {
            debugger.poll_interrupt()?;
        }

        if debugger.should_stop(emu.pc.into()) {
            match debugger.handle_halt(&mut emu) {
                Ok(()) => {}
                // GDB hangs up right after a kill request
                Err(GdbStubError::ConnectionRead(_)) if !emu.running => break,
                Err(e) => return Err(e.into()),
            }
            if !emu.running {
                break;
            }
        }

        match emu.step() {
            None => {}
            Some(Event::Exited(status)) => {
                debugger.notify_exit(status)?;
                println!("Program completed. Exit status: {}", status);
            }
            Some(Event::IllegalInstruction(opcode)) => {
                eprintln!("Illegal instruction {:#04x} at {:#x}", opcode, emu.pc.wrapping_sub(2));
            }
        }
    }

    Ok(())
}
