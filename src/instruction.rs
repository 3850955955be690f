use crate::opcode::Opcode;
use crate::state::Register;
use crate::trap_vector::TrapVector;
use crate::utilities::{field, SignExtend};
use std::fmt;

/// A raw instruction word with accessors for the LC-3 operand fields. Which fields are
/// meaningful depends on the opcode; offsets and immediates come back sign-extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction(pub u16);

impl Instruction {
    pub fn opcode(self) -> Opcode {
        Opcode::from_instruction(self.0)
    }

    /// DR, and SR for the store instructions. Bits [11:9].
    pub fn dr(self) -> Register {
        Register::from(field(self.0, 9, 3))
    }

    /// Bits [8:6].
    pub fn sr1(self) -> Register {
        Register::from(field(self.0, 6, 3))
    }

    /// Bits [2:0].
    pub fn sr2(self) -> Register {
        Register::from(field(self.0, 0, 3))
    }

    /// Bits [8:6].
    pub fn base_r(self) -> Register {
        self.sr1()
    }

    /// Bit [5] selects imm5 over SR2 for ADD and AND.
    pub fn imm_flag(self) -> bool {
        field(self.0, 5, 1) == 1
    }

    pub fn imm5(self) -> u16 {
        field(self.0, 0, 5).sign_extend(5)
    }

    pub fn offset6(self) -> u16 {
        field(self.0, 0, 6).sign_extend(6)
    }

    pub fn pc_offset9(self) -> u16 {
        field(self.0, 0, 9).sign_extend(9)
    }

    pub fn pc_offset11(self) -> u16 {
        field(self.0, 0, 11).sign_extend(11)
    }

    /// The BR condition mask, laid out like the condition register (n = 4, z = 2, p = 1).
    pub fn nzp(self) -> u16 {
        field(self.0, 9, 3)
    }

    /// Bit [11] selects JSR over JSRR.
    pub fn long_flag(self) -> bool {
        field(self.0, 11, 1) == 1
    }

    pub fn trap_vector(self) -> Result<TrapVector, u8> {
        TrapVector::from_instruction(self.0)
    }
}

/// Assembly rendering used in trace logs and diagnostics. PC-relative operands are shown as
/// signed offsets since the label is unknown.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let i = *self;
        let signed = |value: u16| value as i16;

        match i.opcode() {
            Opcode::BR => {
                let nzp = i.nzp();
                if nzp == 0 {
                    return write!(f, "NOP");
                }
                let n = if nzp & 0b100 != 0 { "n" } else { "" };
                let z = if nzp & 0b010 != 0 { "z" } else { "" };
                let p = if nzp & 0b001 != 0 { "p" } else { "" };
                write!(f, "BR{}{}{} #{}", n, z, p, signed(i.pc_offset9()))
            }
            Opcode::ADD | Opcode::AND => {
                write!(f, "{} {}, {}, ", i.opcode(), i.dr(), i.sr1())?;
                if i.imm_flag() {
                    write!(f, "#{}", signed(i.imm5()))
                } else {
                    write!(f, "{}", i.sr2())
                }
            }
            Opcode::LD | Opcode::ST | Opcode::LDI | Opcode::STI | Opcode::LEA => {
                write!(f, "{} {}, #{}", i.opcode(), i.dr(), signed(i.pc_offset9()))
            }
            Opcode::JSR => {
                if i.long_flag() {
                    write!(f, "JSR #{}", signed(i.pc_offset11()))
                } else {
                    write!(f, "JSRR {}", i.base_r())
                }
            }
            Opcode::LDR | Opcode::STR => write!(
                f,
                "{} {}, {}, #{}",
                i.opcode(),
                i.dr(),
                i.base_r(),
                signed(i.offset6())
            ),
            Opcode::NOT => write!(f, "NOT {}, {}", i.dr(), i.sr1()),
            Opcode::JMP => match i.base_r() {
                Register::R7 => write!(f, "RET"),
                base_r => write!(f, "JMP {}", base_r),
            },
            Opcode::TRAP => match i.trap_vector() {
                Ok(vector) => write!(f, "TRAP {:?}", vector),
                Err(vector) => write!(f, "TRAP x{:02X}", vector),
            },
            Opcode::RTI | Opcode::RES => write!(f, "{} (illegal)", i.opcode()),
        }
    }
}
