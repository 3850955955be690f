/// Number of addressable words. Every u16 is a valid address.
pub const MEMORY_SIZE: usize = 1 << 16;

// Keyboard status register. The ready bit (bit [15]) indicates if the keyboard has received a new
// character.
pub const KBSR: u16 = 0xfe00;

// Keyboard data register. Bits [7:0] contain the last character typed on the keyboard.
pub const KBDR: u16 = 0xfe02;

pub struct Memory {
    memory: Box<[u16]>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            memory: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }

    /// Raw read without device side effects. `State::read_memory` is the instruction path.
    pub fn read(&self, address: u16) -> u16 {
        self.memory[usize::from(address)]
    }

    pub fn write(&mut self, address: u16, value: u16) {
        self.memory[usize::from(address)] = value;
    }

    /// Copies `words` into memory starting at `origin`. The caller guarantees they fit.
    pub(crate) fn load(&mut self, origin: u16, words: &[u16]) {
        let start = usize::from(origin);
        self.memory[start..start + words.len()].copy_from_slice(words);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.memory.len()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
