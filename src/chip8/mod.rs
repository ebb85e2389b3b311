//! The full implementation of the chip8 virtual machine, from the opcodes to an option to pretty
//! print it.
mod chipset;
mod opcodes;
mod print;

/// reexport chipset structs and data for simpler usage
pub use chipset::*;
