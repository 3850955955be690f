use crate::opcode::Opcode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VmError {
    #[error("unable to load image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("illegal instruction {instruction:#06x} ({opcode}) at {address:#06x}")]
    IllegalOpcode {
        opcode: Opcode,
        instruction: u16,
        address: u16,
    },

    #[error("unknown trap vector {vector:#04x} at {address:#06x}")]
    UnknownTrap { vector: u8, address: u16 },

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl VmError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            VmError::Image { .. } => 3,
            VmError::IllegalOpcode { .. } | VmError::UnknownTrap { .. } | VmError::Io(_) => 2,
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("file is too short to contain an origin address")]
    MissingOrigin,

    #[error("file has a trailing odd byte")]
    OddLength,

    #[error("{words} words at origin {origin:#06x} do not fit in memory")]
    Overflow { origin: u16, words: usize },
}
