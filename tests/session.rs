//! Full debugging sessions driven over an in-memory connection.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use simstub::conn::{Connection, ConnectionExt};
use simstub::{ExecMode, GdbStub, GdbStubBuilder, GdbStubError, Target};

#[derive(Debug)]
struct Hangup;

/// Replays scripted debugger input, and records everything the stub sends.
struct Pipe {
    input: VecDeque<u8>,
    output: Rc<RefCell<Vec<u8>>>,
}

impl Connection for Pipe {
    type Error = Hangup;

    fn write(&mut self, byte: u8) -> Result<(), Hangup> {
        self.output.borrow_mut().push(byte);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Hangup> {
        Ok(())
    }
}

impl ConnectionExt for Pipe {
    fn read(&mut self) -> Result<u8, Hangup> {
        self.input.pop_front().ok_or(Hangup)
    }

    fn peek(&mut self) -> Result<Option<u8>, Hangup> {
        Ok(self.input.front().copied())
    }
}

struct Machine {
    regs: Vec<u64>,
    mem: Vec<u8>,
    pc: u64,
    big_endian: bool,
    kills: usize,
}

impl Machine {
    fn new(big_endian: bool) -> Machine {
        Machine {
            regs: vec![0; 4],
            mem: vec![0; 0x10000],
            pc: 0,
            big_endian,
            kills: 0,
        }
    }
}

impl Target for Machine {
    fn register_count(&self) -> usize {
        self.regs.len()
    }

    fn read_register(&mut self, idx: usize) -> u64 {
        self.regs[idx]
    }

    fn write_register(&mut self, idx: usize, val: u64) {
        self.regs[idx] = val;
    }

    fn read_byte(&mut self, addr: u64) -> u8 {
        self.mem[addr as usize & 0xffff]
    }

    fn write_byte(&mut self, addr: u64, val: u8) {
        self.mem[addr as usize & 0xffff] = val;
    }

    fn set_pc(&mut self, addr: u64) {
        self.pc = addr;
    }

    fn stop_simulation(&mut self) {
        self.kills += 1;
    }

    fn is_big_endian(&self) -> bool {
        self.big_endian
    }
}

fn frame(body: &[u8]) -> Vec<u8> {
    let checksum = body.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    let mut packet = vec![b'$'];
    packet.extend_from_slice(body);
    packet.extend_from_slice(format!("#{:02x}", checksum).as_bytes());
    packet
}

/// Debugger input acking every stub packet. `c`/`s` get no reply, so the ack
/// following them is consumed by the next stop notification.
fn script(cmds: &[&str]) -> Vec<u8> {
    let mut input = vec![b'+'];
    for cmd in cmds {
        input.extend(frame(cmd.as_bytes()));
        input.push(b'+');
    }
    input
}

/// Payloads of every packet sent by the stub, in order.
fn payloads(output: &[u8]) -> Vec<String> {
    let mut packets = Vec::new();
    let mut bytes = output.iter();
    while let Some(&b) = bytes.next() {
        if b != b'$' {
            continue;
        }
        let body: Vec<u8> = bytes.by_ref().take_while(|&&b| b != b'#').copied().collect();
        bytes.nth(1);
        packets.push(String::from_utf8(body).unwrap());
    }
    packets
}

type Stub = GdbStub<'static, Machine, Pipe>;
type Output = Rc<RefCell<Vec<u8>>>;

fn session(builder: GdbStubBuilder<'static, Machine, Pipe>, input: &[u8]) -> (Stub, Output) {
    let output = Rc::new(RefCell::new(Vec::new()));
    let pipe = Pipe {
        input: input.iter().copied().collect(),
        output: output.clone(),
    };

    let mut stub = builder.build().unwrap();
    stub.enable();
    stub.attach(pipe).unwrap();
    (stub, output)
}

#[test]
fn registers_and_memory() {
    let input = script(&[
        "?",
        "g",
        "G44332211000000000000000078563412",
        "g",
        "m1000,4",
        "M1004,2:cafe",
        "m1002,4",
        "c",
    ]);
    let (mut stub, output) = session(Stub::builder(), &input);
    let mut target = Machine::new(false);
    target.regs = vec![1, 2, 3, 0x8000_0000];
    target.mem[0x1000..0x1004].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

    assert!(stub.should_stop(0));
    stub.handle_halt(&mut target).unwrap();

    assert_eq!(
        payloads(&output.borrow()),
        vec![
            "S05",
            "S05",
            "01000000020000000300000000000080",
            "OK",
            "44332211000000000000000078563412",
            "deadbeef",
            "OK",
            "beefcafe",
        ]
    );
    assert_eq!(target.regs, vec![0x1122_3344, 0, 0, 0x1234_5678]);
    assert_eq!(stub.exec_mode(), ExecMode::Run);
}

#[test]
fn big_endian_words() {
    let input = script(&["g", "G00ff010000000000", "s"]);
    let (mut stub, output) = session(Stub::builder().word_size(2), &input);
    let mut target = Machine::new(true);
    target.regs = vec![0x1234, 0xabcd, 0, 0xfe_0001];

    stub.handle_halt(&mut target).unwrap();

    assert_eq!(
        payloads(&output.borrow()),
        vec!["S05", "1234abcd00000001", "OK"]
    );
    assert_eq!(target.regs, vec![0xff, 0x100, 0, 0]);
    assert_eq!(stub.exec_mode(), ExecMode::Step);
}

#[test]
fn run_to_breakpoint() {
    let input = script(&["Z0,2000,1", "c", "z0,2000,1", "z0,2000,1", "s2010"]);
    let (mut stub, output) = session(Stub::builder(), &input);
    let mut target = Machine::new(false);

    // first halt: the debugger sets a breakpoint and continues
    stub.handle_halt(&mut target).unwrap();
    assert!(stub.breakpoints().exists(0x2000));
    assert!(!stub.should_stop(0x1ffc));
    assert!(stub.should_stop(0x2000));

    // second halt: the breakpoint is hit, removed twice, then single-step
    stub.handle_halt(&mut target).unwrap();
    assert!(stub.breakpoints().is_empty());
    assert_eq!(target.pc, 0x2010);
    assert!(stub.should_stop(0x2014));

    assert_eq!(
        payloads(&output.borrow()),
        vec!["S05", "OK", "S05", "OK", "E00"]
    );
}

#[test]
fn unsupported_breakpoint_kinds() {
    let input = script(&["Z1,2000,4", "Z2,3000,4", "z4,3000,4", "Z7,0,0", "c"]);
    let (mut stub, output) = session(Stub::builder(), &input);

    stub.handle_halt(&mut Machine::new(false)).unwrap();

    assert_eq!(payloads(&output.borrow()), vec!["S05", "", "", "", ""]);
    assert!(stub.breakpoints().is_empty());
}

#[test]
fn breakpoint_table_full() {
    let input = script(&["Z0,10,4", "Z0,10,4", "Z0,20,4", "c"]);
    let (mut stub, output) = session(Stub::builder().breakpoint_capacity(1), &input);

    stub.handle_halt(&mut Machine::new(false)).unwrap();

    assert_eq!(payloads(&output.borrow()), vec!["S05", "OK", "OK", "E00"]);
    assert_eq!(stub.breakpoints().iter().collect::<Vec<_>>(), vec![0x10]);
}

#[test]
fn malformed_requests() {
    let input = script(&[
        "mzz,4",
        "M1000,4:de",
        "M1000,2de",
        "G1234",
        "Zq",
        "",
        "vMustReplyEmpty",
        "c",
    ]);
    let (mut stub, output) = session(Stub::builder(), &input);
    let mut target = Machine::new(false);

    stub.handle_halt(&mut target).unwrap();

    assert_eq!(
        payloads(&output.borrow()),
        vec!["S05", "E01", "E03", "E01", "E01", "E01", "", ""]
    );
    assert!(target.mem[0x1000..0x1004].iter().all(|&b| b == 0));
    assert_eq!(target.regs, vec![0; 4]);
}

#[test]
fn memory_writes_are_clamped() {
    // header `M0,ff:` leaves room for (16 - 6) / 2 - 1 = 4 bytes of data
    let input = script(&["M0,ff:01020304", "m0,5", "M10,ff:0102", "c"]);
    let (mut stub, output) = session(Stub::builder().packet_buffer_size(16), &input);
    let mut target = Machine::new(false);

    stub.handle_halt(&mut target).unwrap();

    assert_eq!(
        payloads(&output.borrow()),
        vec!["S05", "OK", "0102030400", "E03"]
    );
    assert_eq!(&target.mem[..5], &[1, 2, 3, 4, 0]);
    assert!(target.mem[0x10..0x14].iter().all(|&b| b == 0));
}

#[test]
fn second_debugger_is_ignored() {
    let input = script(&["c"]);
    let (mut stub, output) = session(Stub::builder(), &input);

    let late = Rc::new(RefCell::new(Vec::new()));
    stub.attach(Pipe {
        input: script(&["k"]).into_iter().collect(),
        output: late.clone(),
    })
    .unwrap();

    let mut target = Machine::new(false);
    stub.handle_halt(&mut target).unwrap();

    assert!(late.borrow().is_empty());
    assert_eq!(payloads(&output.borrow()), vec!["S05"]);
    assert_eq!(target.kills, 0);
    assert_eq!(stub.exec_mode(), ExecMode::Run);
}

#[test]
fn kill_stops_the_simulation_once() {
    let input = script(&["k", "c"]);
    let (mut stub, output) = session(Stub::builder(), &input);
    let mut target = Machine::new(false);

    stub.handle_halt(&mut target).unwrap();

    assert_eq!(target.kills, 1);
    assert_eq!(payloads(&output.borrow()), vec!["S05", ""]);
}

#[test]
fn memory_reads_are_clamped() {
    let input = script(&["m0,100", "c"]);
    let (mut stub, output) = session(Stub::builder().packet_buffer_size(16), &input);
    let mut target = Machine::new(false);
    target.mem[..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);

    stub.handle_halt(&mut target).unwrap();

    assert_eq!(payloads(&output.borrow()), vec!["S05", "01020304050607"]);
}

#[test]
fn corrupted_packet_is_retransmitted() {
    let mut input = b"+$g#00".to_vec();
    input.extend(frame(b"c"));
    let (mut stub, output) = session(Stub::builder(), &input);

    stub.handle_halt(&mut Machine::new(false)).unwrap();

    assert_eq!(&output.borrow()[..], &b"$S05#b8-+"[..]);
}

#[test]
fn nacked_reply_is_resent() {
    let mut input = b"-+".to_vec();
    input.extend(frame(b"c"));
    let (mut stub, output) = session(Stub::builder(), &input);

    stub.handle_halt(&mut Machine::new(false)).unwrap();

    assert_eq!(payloads(&output.borrow()), vec!["S05", "S05"]);
}

#[test]
fn sequence_ids_are_echoed() {
    let input = script(&["1f:?", "c"]);
    let (mut stub, output) = session(Stub::builder(), &input);

    stub.handle_halt(&mut Machine::new(false)).unwrap();

    let output = output.borrow();
    assert!(output.starts_with(b"$S05#b8+1f$S05#b8"));
}

#[test]
fn interrupt_during_halt() {
    let input = [b'+', 0x03, b'+'];
    let (mut stub, output) = session(Stub::builder(), &input);

    stub.handle_halt(&mut Machine::new(false)).unwrap();

    assert_eq!(payloads(&output.borrow()), vec!["S05", "S02"]);
    assert_eq!(stub.exec_mode(), ExecMode::Step);
}

#[test]
fn stray_bytes_are_not_interrupts() {
    let input = script(&["c"]);
    let (mut stub, _) = session(Stub::builder(), &input);

    stub.handle_halt(&mut Machine::new(false)).unwrap();

    // the trailing ack is dropped, not mistaken for a Ctrl-C
    assert!(!stub.poll_interrupt().unwrap());
    assert!(!stub.poll_interrupt().unwrap());
    assert_eq!(stub.exec_mode(), ExecMode::Run);
}

#[test]
fn ctrl_c_then_halt_reports_sigint() {
    let mut input = script(&["c"]);
    input.pop();
    input.push(0x03);
    input.push(b'+');
    input.extend(frame(b"c"));
    let (mut stub, output) = session(Stub::builder(), &input);
    let mut target = Machine::new(false);

    stub.handle_halt(&mut target).unwrap();
    assert!(!stub.should_stop(0x40));

    assert!(stub.poll_interrupt().unwrap());
    assert!(stub.should_stop(0x40));
    stub.handle_halt(&mut target).unwrap();

    assert_eq!(payloads(&output.borrow()), vec!["S05", "S02"]);
    assert_eq!(stub.exec_mode(), ExecMode::Run);
}

#[test]
fn exit_status_is_reported() {
    let (mut stub, output) = session(Stub::builder(), b"+");
    stub.notify_exit(0x11).unwrap();
    assert_eq!(payloads(&output.borrow()), vec!["W11"]);
}

#[test]
fn hangup_is_a_read_error() {
    let (mut stub, _) = session(Stub::builder(), b"+");
    let err = stub.handle_halt(&mut Machine::new(false)).unwrap_err();
    assert!(matches!(err, GdbStubError::ConnectionRead(Hangup)));
}
