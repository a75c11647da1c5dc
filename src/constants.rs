use std::time::Duration;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// 4KiB of addressable memory; addresses wrap at this boundary
pub const MEMORY_SIZE: usize = 4096;

/// ROMs are loaded here, everything below is reserved for the interpreter
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Return addresses for up to 16 nested subroutine calls
pub const STACK_DEPTH: usize = 16;

/// Delay and sound timers count down at 60Hz regardless of clock speed
pub const TIMER_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Nanoseconds per CPU cycle (~540Hz)
pub const CLOCK_SPEED: u64 = 1_851_851;

/// How many past states are kept around for rewinding
pub const MAX_SAVED_STATES: usize = 600;

/// Each glyph is 5 bytes tall so glyph `n` lives at `FONT_START + 5 * n`
pub const FONT_START: u16 = 0x000;
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Sprite Sheet
/// Hexadecimal digits 0..F, each drawn as a 4x5 sprite.
///
/// ```text
/// 0xF0 -> ####
/// 0x90 -> #  #
/// 0x90 -> #  #
/// 0x90 -> #  #
/// 0xF0 -> ####
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
