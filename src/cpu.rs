use crate::console::Console;
use crate::error::VmError;
use crate::instruction::Instruction;
use crate::state::Register::*;
use crate::state::State;

type Handler<C> = fn(&mut State<C>, Instruction) -> Result<(), VmError>;

impl<C: Console> State<C> {
    /// Indexed by opcode. RTI and RES get entries like every other opcode.
    const HANDLERS: [Handler<C>; 16] = [
        Self::br,   // 0000
        Self::add,  // 0001
        Self::ld,   // 0010
        Self::st,   // 0011
        Self::jsr,  // 0100
        Self::and,  // 0101
        Self::ldr,  // 0110
        Self::str,  // 0111
        Self::rti,  // 1000
        Self::not,  // 1001
        Self::ldi,  // 1010
        Self::sti,  // 1011
        Self::jmp,  // 1100
        Self::res,  // 1101
        Self::lea,  // 1110
        Self::trap, // 1111
    ];

    /// Executes one already-fetched instruction. `pc` must already point past it.
    pub fn execute(&mut self, instruction: Instruction) -> Result<(), VmError> {
        let handler = Self::HANDLERS[usize::from(instruction.0 >> 12)];
        handler(self, instruction)
    }

    // BR - Conditional Branch
    //
    // Encoding
    //
    //      |0 0 0 0|0|0|0|0 0 0 0 0 0 0 0 0|
    //      |BR     |n|z|p|pc_offset_9      |
    //
    // The condition codes specified by bits [11:9] are tested. If any of the tested codes is
    // set, the program branches to the incremented PC plus the sign-extended PCoffset9. With no
    // bits set the branch is never taken; with all three it always is.
    fn br(&mut self, i: Instruction) -> Result<(), VmError> {
        if i.nzp() & self.condition.bits() != 0 {
            self.pc = self.pc.wrapping_add(i.pc_offset9());
        }

        Ok(())
    }

    // ADD - Addition
    //
    // Encodings
    //
    //      |0 0 0 1|0 0 0|0 0 0|0|0 0|0 0 0|
    //      |ADD    |DR   |SR1  |x|   |SR2  |
    //
    //      |0 0 0 1|0 0 0|0 0 0|1|0 0 0 0 0|
    //      |ADD    |DR   |SR1  |x|imm_5    |
    //
    //      x: bit [5] (immediate flag)
    fn add(&mut self, i: Instruction) -> Result<(), VmError> {
        let value = self.registers.read(i.sr1()).wrapping_add(self.operand(i));

        self.registers.write(i.dr(), value);
        self.update_flags(i.dr());
        Ok(())
    }

    // LD - Load
    //
    //      |0 0 1 0|0 0 0|0 0 0 0 0 0 0 0 0|
    //      |LD     |DR   |pc_offset_9      |
    fn ld(&mut self, i: Instruction) -> Result<(), VmError> {
        let value = self.read_memory(self.pc.wrapping_add(i.pc_offset9()))?;

        self.registers.write(i.dr(), value);
        self.update_flags(i.dr());
        Ok(())
    }

    // ST - Store
    //
    //      |0 0 1 1|0 0 0|0 0 0 0 0 0 0 0 0|
    //      |ST     |SR   |pc_offset_9      |
    fn st(&mut self, i: Instruction) -> Result<(), VmError> {
        let address = self.pc.wrapping_add(i.pc_offset9());

        self.write_memory(address, self.registers.read(i.dr()));
        Ok(())
    }

    // JSR - Jump to Subroutine
    // JSRR
    //
    //      |0 1 0 0|1|0 0 0 0 0 0 0 0 0 0 0|
    //      |JSR    |x|pc_offset_11         |
    //
    //      |0 1 0 0|0|0 0|0 0 0|0 0 0 0 0 0|
    //      |JSRR   |x|   |BR   |           |
    //
    // The target is read before R7 is written so that JSRR R7 jumps to the old R7.
    fn jsr(&mut self, i: Instruction) -> Result<(), VmError> {
        let link = self.pc;
        let target = if i.long_flag() {
            link.wrapping_add(i.pc_offset11())
        } else {
            self.registers.read(i.base_r())
        };

        self.registers.write(R7, link);
        self.pc = target;
        Ok(())
    }

    // AND - Bit-wise Logical AND
    //
    //      |0 1 0 1|0 0 0|0 0 0|0|0 0|0 0 0|
    //      |AND    |DR   |SR1  |x|   |SR2  |
    //
    //      |0 1 0 1|0 0 0|0 0 0|1|0 0 0 0 0|
    //      |AND    |DR   |SR1  |x|imm_5    |
    fn and(&mut self, i: Instruction) -> Result<(), VmError> {
        let value = self.registers.read(i.sr1()) & self.operand(i);

        self.registers.write(i.dr(), value);
        self.update_flags(i.dr());
        Ok(())
    }

    // LDR - Load Base+offset
    //
    //      |0 1 1 0|0 0 0|0 0 0|0 0 0 0 0 0|
    //      |LDR    |DR   |BR   |offset_6   |
    fn ldr(&mut self, i: Instruction) -> Result<(), VmError> {
        let address = self.registers.read(i.base_r()).wrapping_add(i.offset6());
        let value = self.read_memory(address)?;

        self.registers.write(i.dr(), value);
        self.update_flags(i.dr());
        Ok(())
    }

    // STR - Store Base+offset
    //
    //      |0 1 1 1|0 0 0|0 0 0|0 0 0 0 0 0|
    //      |STR    |SR   |BR   |offset_6   |
    fn str(&mut self, i: Instruction) -> Result<(), VmError> {
        let address = self.registers.read(i.base_r()).wrapping_add(i.offset6());

        self.write_memory(address, self.registers.read(i.dr()));
        Ok(())
    }

    fn rti(&mut self, i: Instruction) -> Result<(), VmError> {
        self.illegal(i)
    }

    // NOT - Bit-Wise Complement
    //
    //      |1 0 0 1|0 0 0|0 0 0|1|1 1 1 1 1|
    //      |NOT    |DR   |SR   |           |
    fn not(&mut self, i: Instruction) -> Result<(), VmError> {
        self.registers.write(i.dr(), !self.registers.read(i.sr1()));
        self.update_flags(i.dr());
        Ok(())
    }

    // LDI - Load Indirect
    //
    //      |1 0 1 0|0 0 0|0 0 0 0 0 0 0 0 0|
    //      |LDI    |DR   |pc_offset_9      |
    fn ldi(&mut self, i: Instruction) -> Result<(), VmError> {
        let pointer = self.read_memory(self.pc.wrapping_add(i.pc_offset9()))?;
        let value = self.read_memory(pointer)?;

        self.registers.write(i.dr(), value);
        self.update_flags(i.dr());
        Ok(())
    }

    // STI - Store Indirect
    //
    //      |1 0 1 1|0 0 0|0 0 0 0 0 0 0 0 0|
    //      |STI    |SR   |pc_offset_9      |
    //
    // The word at PC + offset is the address that receives SR.
    fn sti(&mut self, i: Instruction) -> Result<(), VmError> {
        let address = self.read_memory(self.pc.wrapping_add(i.pc_offset9()))?;

        self.write_memory(address, self.registers.read(i.dr()));
        Ok(())
    }

    // JMP - Jump
    // RET - Return from Subroutine (JMP R7)
    //
    //      |1 1 0 0|0 0 0|0 0 0|0 0 0 0 0 0|
    //      |JMP    |     |BR   |           |
    fn jmp(&mut self, i: Instruction) -> Result<(), VmError> {
        self.pc = self.registers.read(i.base_r());
        Ok(())
    }

    fn res(&mut self, i: Instruction) -> Result<(), VmError> {
        self.illegal(i)
    }

    // LEA - Load Effective Address
    //
    //      |1 1 1 0|0 0 0|0 0 0 0 0 0 0 0 0|
    //      |LEA    |DR   |pc_offset_9      |
    //
    // The address itself is loaded into DR; memory is not read.
    fn lea(&mut self, i: Instruction) -> Result<(), VmError> {
        self.registers
            .write(i.dr(), self.pc.wrapping_add(i.pc_offset9()));
        self.update_flags(i.dr());
        Ok(())
    }

    // TRAP - System Call
    //
    //      |1 1 1 1|0 0 0 0|0 0 0 0 0 0 0 0|
    //      |TRAP   |       |trap_vector_8  |
    //
    // R7 is loaded with the incremented PC before the service routine runs.
    fn trap(&mut self, i: Instruction) -> Result<(), VmError> {
        self.registers.write(R7, self.pc);

        match i.trap_vector() {
            Ok(vector) => self.service(vector),
            Err(vector) => {
                self.running = false;
                tracing::error!(vector, "unknown trap vector");
                Err(VmError::UnknownTrap {
                    vector,
                    address: self.pc.wrapping_sub(1),
                })
            }
        }
    }

    /// Second operand of ADD and AND: sign-extended imm5 or SR2.
    fn operand(&self, i: Instruction) -> u16 {
        if i.imm_flag() {
            i.imm5()
        } else {
            self.registers.read(i.sr2())
        }
    }

    fn illegal(&mut self, i: Instruction) -> Result<(), VmError> {
        self.running = false;
        tracing::error!(instruction = i.0, "illegal opcode {}", i.opcode());
        Err(VmError::IllegalOpcode {
            opcode: i.opcode(),
            instruction: i.0,
            address: self.pc.wrapping_sub(1),
        })
    }
}
