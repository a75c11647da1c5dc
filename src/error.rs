use std::io;

use thiserror::Error;

use crate::constants::STACK_DEPTH;

/// Things that can go wrong while loading or running a program.
///
/// Unknown opcodes are deliberately absent: they stall the machine instead of
/// failing it (see `Step::Stalled`).
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("ROM is {size} bytes but at most {max} bytes fit above 0x200")]
    RomTooLarge { size: usize, max: usize },

    #[error("unable to read ROM")]
    Io(#[from] io::Error),

    #[error("stack overflow: more than {} nested calls at {pc:#05X}", STACK_DEPTH)]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return with an empty stack at {pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("key {0:#X} is not on the keypad (0x0..=0xF)")]
    InvalidKey(u8),
}
