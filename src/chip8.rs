use std::collections::VecDeque;
use std::io::Read;
use std::mem;
use std::time::Instant;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::constants::{MAX_ROM_SIZE, MAX_SAVED_STATES, PROGRAM_START, TIMER_PERIOD};
use crate::error::MachineError;
use crate::instruction::Instruction;
use crate::operations::execute;
use crate::state::{Flow, FrameBuffer, Keypad, Mode, State};

/// What a call to `step` did
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// an instruction ran and the machine state moved on
    Executed(Instruction),
    /// the opcode at `pc` isn't part of the instruction set; it will be fetched again
    Stalled { pc: u16, opcode: u16 },
    /// parked on FX0A until a key is pressed
    AwaitingKey,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - `pressed_keys` with public interfaces for manipulating them
///  - when the timers last ticked, so they run at 60Hz whatever the clock speed
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU forwards and rewinding it
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    pressed_keys: Keypad,
    config: Config,
    rng: StdRng,
    last_tick: Instant,
    beep: bool,
    stalled_at: Option<u16>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// A machine whose CXNN results are reproducible
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: Config, rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            previous_states: VecDeque::with_capacity(MAX_SAVED_STATES),
            pressed_keys: [false; 16],
            config,
            rng,
            last_tick: Instant::now(),
            beep: false,
            stalled_at: None,
        }
    }

    /// Puts the machine back in its power-on state; memory above the font is cleared
    pub fn reset(&mut self) {
        debug!("resetting machine");
        self.state = State::new();
        self.previous_states.clear();
        self.pressed_keys = [false; 16];
        self.last_tick = Instant::now();
        self.beep = false;
        self.stalled_at = None;
    }

    /// Resets the machine and copies `rom` to 0x200.
    ///
    /// ROMs that don't fit in memory are rejected before anything is touched.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), MachineError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(MachineError::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        self.reset();
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        debug!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Load a rom from some source
    ///
    /// # Arguments
    /// * `reader` a reader whose entire contents are the ROM
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<(), MachineError> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_rom(&rom)
    }

    /// Executes one instruction then ticks the timers if 1/60s has passed
    pub fn step(&mut self) -> Result<Step, MachineError> {
        self.step_at(Instant::now())
    }

    /// `step` against a caller-supplied clock
    ///
    /// The timers tick even when the instruction fails.
    pub fn step_at(&mut self, now: Instant) -> Result<Step, MachineError> {
        let step = self.advance_cpu();
        self.advance_timers(now);
        step
    }

    /// Advances the CPU by a single instruction
    /// - does nothing while awaiting a keypress
    /// - stalls on opcodes outside the instruction set
    /// - otherwise saves the current state for rewinding, then executes
    pub fn advance_cpu(&mut self) -> Result<Step, MachineError> {
        if self.state.mode != Mode::Running {
            return Ok(Step::AwaitingKey);
        }

        let pc = self.state.pc;
        let op = self.state.fetch();
        let instruction = Instruction::decode(op);

        if let Instruction::Unknown(opcode) = instruction {
            if self.stalled_at != Some(pc) {
                warn!("unknown opcode {:04X} at {:#05X}; stalling", opcode, pc);
                self.stalled_at = Some(pc);
            }
            return Ok(Step::Stalled { pc, opcode });
        }

        trace!(
            "{:03X} {:04X} {:<16} v{:02X?} i{:03X}",
            pc,
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i
        );

        let previous = self.state;
        let flow = execute(
            instruction,
            &mut self.state,
            &self.pressed_keys,
            &self.config,
            &mut self.rng,
        )?;
        self.state.advance(flow);
        self.save_state(previous);
        self.stalled_at = None;
        Ok(Step::Executed(instruction))
    }

    /// Decrements the delay and sound timers if a 60Hz period has passed since the last tick
    pub fn advance_timers(&mut self, now: Instant) {
        if now.saturating_duration_since(self.last_tick) < TIMER_PERIOD {
            return;
        }
        self.last_tick = now;

        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }

        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
            self.beep = true;
        }
    }

    /// Reverses the CPU by a single instruction if possible
    ///
    /// Returns whether there was anything to rewind to.
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                self.state = state;
                self.state.draw_flag = true;
                trace!("rewound to {:03X}", self.state.pc);
                true
            }
            None => false,
        }
    }

    /// Keeps `state` as the most recent rewind point
    /// - if there are already MAX_SAVED_STATES saved then the oldest is dropped
    fn save_state(&mut self, state: State) {
        if self.previous_states.len() == MAX_SAVED_STATES {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(state);
    }

    /// Set the pressed status of `key`
    ///
    /// A key going down while the CPU is parked on FX0A stores the key in Vx and
    /// moves on past the FX0A.
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<(), MachineError> {
        let slot = self
            .pressed_keys
            .get_mut(key as usize)
            .ok_or(MachineError::InvalidKey(key))?;
        let was_pressed = mem::replace(slot, pressed);

        if let Mode::AwaitingKey { register } = self.state.mode {
            if pressed && !was_pressed {
                self.state.v[register as usize] = key;
                self.state.mode = Mode::Running;
                self.state.advance(Flow::Next);
            }
        }
        Ok(())
    }

    pub fn key_press(&mut self, key: u8) -> Result<(), MachineError> {
        self.set_key(key, true)
    }

    pub fn key_release(&mut self, key: u8) -> Result<(), MachineError> {
        self.set_key(key, false)
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the request
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if mem::replace(&mut self.state.draw_flag, false) {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether the sound timer has ticked since this was last asked
    pub fn take_beep(&mut self) -> bool {
        mem::replace(&mut self.beep, false)
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn needs_redraw(&self) -> bool {
        self.state.draw_flag
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.state.v
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn memory(&self) -> &[u8] {
        &self.state.memory
    }

    pub fn keys(&self) -> &Keypad {
        &self.pressed_keys
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
