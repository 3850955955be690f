use std::fmt;

/// General purpose registers. R7 doubles as the link register for JSR, JSRR and TRAP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
}

impl Register {
    /// Only the low three bits of `n` are significant.
    pub fn from(n: u16) -> Register {
        match n & 0x7 {
            0 => Register::R0,
            1 => Register::R1,
            2 => Register::R2,
            3 => Register::R3,
            4 => Register::R4,
            5 => Register::R5,
            6 => Register::R6,
            _ => Register::R7,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Default)]
pub struct Registers {
    registers: [u16; 8],
}

impl Registers {
    pub fn new() -> Self {
        Self { registers: [0; 8] }
    }

    pub fn read(&self, register: Register) -> u16 {
        self.registers[register as usize]
    }

    pub fn write(&mut self, register: Register, value: u16) {
        self.registers[register as usize] = value
    }

    pub fn registers(&self) -> [u16; 8] {
        self.registers
    }
}
