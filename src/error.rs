use thiserror::Error;

/// Any fault that stops the machine from executing further instructions.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ProcessError {
    #[error("Invalid memory access '{0}'.")]
    Memory(#[from] MemoryError),
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum MemoryError {
    #[error("Address {address:#06X} is out of bounds, memory len is {len:#06X}")]
    OutOfBounds { address: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Full,
    #[error("Stack is empty!")]
    Empty,
}

/// Errors raised while building a [`Rom`](crate::resources::Rom), never by the
/// running machine.
#[derive(Error, Debug)]
pub enum RomError {
    #[error("The rom '{name}' is {len} bytes long, but at most {max} bytes fit into memory.")]
    TooLarge {
        name: String,
        len: usize,
        max: usize,
    },
    #[error("The rom '{0}' does not contain any data.")]
    Empty(String),
    #[error("Unable to read the rom: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unable to read the rom archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}
