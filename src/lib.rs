pub mod chip8;
pub mod config;
pub mod definitions;
pub mod devices;
pub mod opcode;
pub mod resources;
pub mod timer;
mod error;
mod runner;

// reexporting for convenience
pub use error::*;
pub use runner::*;
