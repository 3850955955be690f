mod config;
mod console;
mod cpu;
mod error;
mod file_loader;
mod instruction;
mod opcode;
mod process;
mod state;
mod terminal;
mod trap;
mod trap_vector;
mod utilities;

pub use crate::config::Config;
pub use crate::console::{Console, HostConsole};
pub use crate::error::{ImageError, VmError};
pub use crate::file_loader::{load_file, load_image};
pub use crate::instruction::Instruction;
pub use crate::opcode::Opcode;
pub use crate::process::run as run_processor;
pub use crate::state::{Condition, Memory, Register, State, KBDR, KBSR, MEMORY_SIZE, PC_START};
pub use crate::terminal::{TerminalGuard, INTERRUPTED_EXIT_CODE};
pub use crate::trap_vector::TrapVector;
pub use crate::utilities::SignExtend;

/// Loads every image, then runs the program on the host console with the terminal in
/// non-canonical mode for the duration.
pub fn run(config: Config) -> Result<(), VmError> {
    let mut state = State::new(HostConsole::new());

    for image in &config.images {
        load_file(image, &mut state.memory)?;
    }

    let _terminal = TerminalGuard::acquire()?;

    run_processor(&mut state)
}
