use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_START, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET,
    STACK_DEPTH,
};
use crate::error::MachineError;
use crate::opcode::Opcode;

/// Addresses are 12 bits wide; anything above wraps back to the start of memory
const ADDRESS_MASK: u16 = (MEMORY_SIZE - 1) as u16;

/// The FrameBuffer is indexed as [y][x], each cell is 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Pressed state of keys 0x0..=0xF
pub type Keypad = [bool; 16];

/// Whether the CPU is executing or parked on FX0A waiting for a key
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Running,
    AwaitingKey { register: u8 },
}

/// How the program counter moves once an instruction has been executed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// on to the following instruction
    Next,
    /// over the following instruction
    Skip,
    /// exactly onto an address
    Jump(u16),
    /// nowhere; the same instruction is fetched again
    Wait,
}

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 8-bit registers V0..VF; VF doubles as the carry/borrow/collision flag
/// - (i) a 16-bit index register, only the low 12 bits are ever set
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Stack
/// - 16 return addresses with an 8-bit stack pointer
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down at 60Hz
///
/// ## Memory
/// - 4096 bytes, the font sprites at 0x000 and the program from 0x200
/// - every access wraps modulo 4096 so a runaway program can't index out of it
///
/// ## Display
/// - 64x32 frame buffer and a flag set whenever it changes
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub mode: Mode,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay_timer: 0,
            sound_timer: 0,
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            // the host should paint the blank screen once before anything is drawn
            draw_flag: true,
            mode: Mode::Running,
        }
    }

    /// Reads a byte, wrapping the address into memory
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDRESS_MASK) as usize]
    }

    /// Writes a byte, wrapping the address into memory
    pub fn write(&mut self, addr: u16, byte: u8) {
        self.memory[(addr & ADDRESS_MASK) as usize] = byte;
    }

    /// The big-endian word at PC
    pub fn fetch(&self) -> u16 {
        u16::from_bytes(self.read(self.pc), self.read(self.pc.wrapping_add(1)))
    }

    /// Sets VF to 1 or 0
    pub fn set_flag(&mut self, flag: bool) {
        self.v[0xF] = flag as u8;
    }

    pub fn push(&mut self, addr: u16) -> Result<(), MachineError> {
        if self.sp as usize == STACK_DEPTH {
            return Err(MachineError::StackOverflow { pc: self.pc });
        }
        self.stack[self.sp as usize] = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, MachineError> {
        if self.sp == 0 {
            return Err(MachineError::StackUnderflow { pc: self.pc });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Moves the program counter once an instruction has run
    pub fn advance(&mut self, flow: Flow) {
        let pc = match flow {
            Flow::Next => self.pc.wrapping_add(2),
            Flow::Skip => self.pc.wrapping_add(4),
            Flow::Jump(addr) => addr,
            Flow::Wait => self.pc,
        };
        self.pc = pc & ADDRESS_MASK;
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
