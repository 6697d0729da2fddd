use simstub::Target;

use crate::emu::{Emu, MEM_SIZE};

/// `acc`, then `pc`.
const REGISTER_COUNT: usize = 2;

impl Target for Emu {
    fn register_count(&self) -> usize {
        REGISTER_COUNT
    }

    fn read_register(&mut self, idx: usize) -> u64 {
        match idx {
            0 => self.acc.into(),
            1 => self.pc.into(),
            _ => 0,
        }
    }

    fn write_register(&mut self, idx: usize, val: u64) {
        match idx {
            0 => self.acc = val as u32,
            1 => self.pc = val as u32,
            _ => {}
        }
    }

    fn read_byte(&mut self, addr: u64) -> u8 {
        self.mem[addr as usize % MEM_SIZE]
    }

    fn write_byte(&mut self, addr: u64, val: u8) {
        self.mem[addr as usize % MEM_SIZE] = val
    }

    fn set_pc(&mut self, addr: u64) {
        self.pc = addr as u32
    }

    fn stop_simulation(&mut self) {
        self.running = false
    }

    fn is_big_endian(&self) -> bool {
        false
    }
}
