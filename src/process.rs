use crate::console::Console;
use crate::error::VmError;
use crate::instruction::Instruction;
use crate::state::{Condition, State, PC_START};

impl<C: Console> State<C> {
    /// Fetch, increment, dispatch.
    pub fn step(&mut self) -> Result<(), VmError> {
        let address = self.pc;
        let instruction = Instruction(self.read_memory(address)?);
        self.pc = self.pc.wrapping_add(1);

        tracing::trace!(pc = address, "{}", instruction);

        self.execute(instruction)
    }
}

/// Starts the machine at `PC_START` with the Z flag set and executes until HALT or a fatal
/// error.
pub fn run<C: Console>(state: &mut State<C>) -> Result<(), VmError> {
    state.pc = PC_START;
    state.condition = Condition::Z;
    state.running = true;

    tracing::info!(pc = state.pc, "running");

    while state.running {
        state.step()?;
    }

    Ok(())
}
