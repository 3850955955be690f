#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapVector {
    GETC = 0x20,
    OUT = 0x21,
    PUTS = 0x22,
    IN = 0x23,
    PUTSP = 0x24,
    HALT = 0x25,
}

impl TrapVector {
    /// Decodes trapvect8 from the low byte of a TRAP instruction. Unknown vectors are returned
    /// as the raw byte.
    pub fn from_instruction(instruction: u16) -> Result<TrapVector, u8> {
        let value = (instruction & 0xFF) as u8;

        match value {
            0x20 => Ok(TrapVector::GETC),
            0x21 => Ok(TrapVector::OUT),
            0x22 => Ok(TrapVector::PUTS),
            0x23 => Ok(TrapVector::IN),
            0x24 => Ok(TrapVector::PUTSP),
            0x25 => Ok(TrapVector::HALT),
            _ => Err(value),
        }
    }
}
