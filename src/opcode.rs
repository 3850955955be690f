use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    BR = 0x0,
    ADD = 0x1,
    LD = 0x2,
    ST = 0x3,
    JSR = 0x4,
    AND = 0x5,
    LDR = 0x6,
    STR = 0x7,
    RTI = 0x8,
    NOT = 0x9,
    LDI = 0xa,
    STI = 0xb,
    JMP = 0xc,
    RES = 0xd,
    LEA = 0xe,
    TRAP = 0xf,
}

impl Opcode {
    pub fn from_instruction(instruction: u16) -> Opcode {
        match instruction >> 12 {
            0x00 => Opcode::BR,
            0x01 => Opcode::ADD,
            0x02 => Opcode::LD,
            0x03 => Opcode::ST,
            0x04 => Opcode::JSR,
            0x05 => Opcode::AND,
            0x06 => Opcode::LDR,
            0x07 => Opcode::STR,
            0x08 => Opcode::RTI,
            0x09 => Opcode::NOT,
            0x0a => Opcode::LDI,
            0x0b => Opcode::STI,
            0x0c => Opcode::JMP,
            0x0d => Opcode::RES,
            0x0e => Opcode::LEA,
            // A u16 shifted right by 12 leaves four bits.
            _ => Opcode::TRAP,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_from_top_nibble() {
        assert_eq!(Opcode::from_instruction(0x0000), Opcode::BR);
        assert_eq!(Opcode::from_instruction(0x1261), Opcode::ADD);
        assert_eq!(Opcode::from_instruction(0x8000), Opcode::RTI);
        assert_eq!(Opcode::from_instruction(0xd123), Opcode::RES);
        assert_eq!(Opcode::from_instruction(0xf025), Opcode::TRAP);
    }

    #[test]
    fn opcode_discriminant_matches_encoding() {
        for nibble in 0..16u16 {
            assert_eq!(Opcode::from_instruction(nibble << 12) as u16, nibble);
        }
    }
}
