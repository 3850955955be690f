pub mod memory;
pub mod registers;

use crate::console::Console;
use crate::error::VmError;
pub use memory::{Memory, KBDR, KBSR, MEMORY_SIZE};
pub use registers::{Register, Registers};
use std::fmt;

/// Programs are conventionally loaded at and started from this address.
pub const PC_START: u16 = 0x3000;

/// The complete machine. Every instruction handler gets exclusive access to it, and the host
/// console it reaches through is owned here rather than held globally.
pub struct State<C> {
    pub memory: Memory,
    pub registers: Registers,
    pub pc: u16,
    pub condition: Condition,
    pub running: bool,
    pub console: C,
}

impl<C: Console> State<C> {
    pub fn new(console: C) -> State<C> {
        State {
            memory: Memory::new(),
            registers: Registers::new(),
            pc: PC_START,
            condition: Condition::Z,
            running: true,
            console,
        }
    }

    /// Sets the condition code from the signed value now held in `register`.
    pub fn update_flags(&mut self, register: Register) {
        self.condition = Condition::from_value(self.registers.read(register));
    }

    /// Instruction-visible memory read. Reading KBSR polls the host keyboard and latches a ready
    /// key into KBDR.
    pub fn read_memory(&mut self, address: u16) -> Result<u16, VmError> {
        if address == KBSR {
            match self.console.poll_key()? {
                Some(key) => {
                    self.memory.write(KBSR, 1 << 15);
                    self.memory.write(KBDR, u16::from(key));
                }
                None => self.memory.write(KBSR, 0),
            }
        }

        Ok(self.memory.read(address))
    }

    pub fn write_memory(&mut self, address: u16, value: u16) {
        self.memory.write(address, value);
    }
}

impl<C> fmt::Debug for State<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "registers: {:?}, pc: {:#06x}, condition: {:?}",
            self.registers.registers(),
            self.pc,
            self.condition
        )
    }
}

/// Exactly one of these is set at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    P = 1 << 0,
    Z = 1 << 1,
    N = 1 << 2,
}

impl Condition {
    pub fn from_value(value: u16) -> Condition {
        if value >> 15 == 1 {
            Condition::N
        } else if value == 0 {
            Condition::Z
        } else {
            Condition::P
        }
    }

    /// The COND register as a word.
    pub fn bits(self) -> u16 {
        self as u16
    }
}
