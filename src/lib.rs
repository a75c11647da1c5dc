//! A CHIP-8 interpreter.
//!
//! [`Chip8`] owns memory, registers, timers and the frame buffer. A host loop
//! calls [`Chip8::step`], redraws whenever [`Chip8::take_frame`] hands back a
//! frame and forwards key transitions with [`Chip8::set_key`].

pub use chip8::{Chip8, Step};
pub use config::{Config, ShiftFlag};
pub use constants::CLOCK_SPEED;
pub use error::MachineError;
pub use instruction::Instruction;
pub use state::{FrameBuffer, Keypad, Mode};

mod chip8;
mod config;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
mod state;
