//! A tiny accumulator machine.
//!
//! Every instruction is two bytes: an opcode and an 8-bit operand.
//!
//! | opcode | mnemonic   | effect                               |
//! |--------|------------|--------------------------------------|
//! | `0x00` | `HALT`     | exit, with the accumulator as status |
//! | `0x01` | `LDI imm`  | `acc = imm`                          |
//! | `0x02` | `ADDI imm` | `acc += imm`                         |
//! | `0x03` | `DEC`      | `acc -= 1`                           |
//! | `0x04` | `JNZ addr` | `if acc != 0 { pc = addr }`          |

pub const MEM_SIZE: usize = 0x1_0000;

pub const HALT: u8 = 0x00;
pub const LDI: u8 = 0x01;
pub const ADDI: u8 = 0x02;
pub const DEC: u8 = 0x03;
pub const JNZ: u8 = 0x04;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Exited(u8),
    IllegalInstruction(u8),
}

pub struct Emu {
    pub acc: u32,
    pub pc: u32,
    pub mem: Vec<u8>,
    pub running: bool,
}

impl Emu {
    pub fn new(program: &[u8]) -> Emu {
        let mut mem = vec![0; MEM_SIZE];
        mem[..program.len()].copy_from_slice(program);

        Emu {
            acc: 0,
            pc: 0,
            mem,
            running: true,
        }
    }

    fn fetch(&self, addr: u32) -> u8 {
        self.mem[addr as usize % MEM_SIZE]
    }

    /// Execute a single instruction.
    pub fn step(&mut self) -> Option<Event> {
        let opcode = self.fetch(self.pc);
        let operand = self.fetch(self.pc.wrapping_add(1));
        self.pc = self.pc.wrapping_add(2);

        match opcode {
            HALT => {
                self.running = false;
                return Some(Event::Exited(self.acc as u8));
            }
            LDI => self.acc = operand.into(),
            ADDI => self.acc = self.acc.wrapping_add(operand.into()),
            DEC => self.acc = self.acc.wrapping_sub(1),
            JNZ => {
                if self.acc != 0 {
                    self.pc = operand.into();
                }
            }
            _ => {
                self.running = false;
                return Some(Event::IllegalInstruction(opcode));
            }
        }

        None
    }
}
