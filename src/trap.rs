use crate::console::Console;
use crate::error::VmError;
use crate::state::Register::*;
use crate::state::State;
use crate::trap_vector::TrapVector;

pub const IN_PROMPT: &str = "Enter a character: ";
pub const HALT_MESSAGE: &str = "HALT";

impl<C: Console> State<C> {
    /// Runs a TRAP service routine natively. R7 has already been linked by the TRAP handler.
    pub(crate) fn service(&mut self, vector: TrapVector) -> Result<(), VmError> {
        match vector {
            // Read a single character from the keyboard. The character is not echoed onto the
            // console. Its ASCII code is copied into R0. The high eight bits of R0 are cleared.
            TrapVector::GETC => {
                let key = self.console.read_key()?;

                self.registers.write(R0, u16::from(key));
                self.update_flags(R0);
            }

            // Write a character in R0[7:0] to the console display.
            TrapVector::OUT => {
                let character = (self.registers.read(R0) & 0xFF) as u8;

                self.console.write(&[character])?;
                self.console.flush()?;
            }

            // Write a string of ASCII characters to the console display. The characters are
            // contained in consecutive memory locations, one character per memory location,
            // starting with the address specified in R0. Writing terminates with the occurrence
            // of x0000 in a memory location.
            TrapVector::PUTS => {
                let mut bytes = Vec::new();
                let mut address = self.registers.read(R0);

                loop {
                    let word = self.memory.read(address);
                    if word == 0 {
                        break;
                    }
                    bytes.push((word & 0xFF) as u8);
                    address = address.wrapping_add(1);
                }

                self.console.write(&bytes)?;
                self.console.flush()?;
            }

            // Print a prompt on the screen and read a single character from the keyboard. The
            // character is echoed onto the console monitor, and its ASCII code is copied into R0.
            // The high eight bits of R0 are cleared.
            TrapVector::IN => {
                self.console.write(IN_PROMPT.as_bytes())?;
                self.console.flush()?;

                let key = self.console.read_key()?;
                self.console.write(&[key])?;
                self.console.flush()?;

                self.registers.write(R0, u16::from(key));
                self.update_flags(R0);
            }

            // Write a string of ASCII characters to the console. The characters are contained in
            // consecutive memory locations, two characters per memory location, starting with
            // the address specified in R0. The ASCII code contained in bits [7:0] of a memory
            // location is written to the console first. Then the ASCII code contained in bits
            // [15:8] of that memory location is written to the console. (A character string
            // consisting of an odd number of characters to be written will have x00 in bits
            // [15:8] of the memory location containing the last character to be written.)
            // Writing terminates with the occurrence of x0000 in a memory location.
            TrapVector::PUTSP => {
                let mut bytes = Vec::new();
                let mut address = self.registers.read(R0);

                loop {
                    let word = self.memory.read(address);
                    if word == 0 {
                        break;
                    }
                    let [high, low] = word.to_be_bytes();
                    bytes.push(low);
                    if high != 0 {
                        bytes.push(high);
                    }
                    address = address.wrapping_add(1);
                }

                self.console.write(&bytes)?;
                self.console.flush()?;
            }

            // Halt execution and print a message on the console.
            TrapVector::HALT => {
                self.console.flush()?;
                self.console.notify(HALT_MESSAGE)?;
                self.running = false;
                tracing::info!(pc = self.pc, "halted");
            }
        }

        Ok(())
    }
}
