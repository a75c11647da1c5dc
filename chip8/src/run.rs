use std::fs::File;
use std::io::{BufReader, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Error, Result};
use log::{error, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_vm::Chip8;

use crate::display::Display;
use crate::keymap::keymap;
use crate::Args;

pub fn run(args: &Args) -> Result<()> {
    // Load the ROM before anything else so a bad path fails fast
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open ROM {}", args.rom.display()))?;
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(args.config(), seed),
        None => Chip8::with_config(args.config()),
    };
    chip8
        .load_rom_from(&mut BufReader::new(file))
        .with_context(|| format!("unable to load ROM {}", args.rom.display()))?;
    info!("loaded {}", args.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(Error::msg)?;
    let mut display = Display::new(&sdl, args.scale)?;
    let mut events = sdl.event_pump().map_err(Error::msg)?;

    // Set initial timing
    let cycle_time = Duration::from_nanos(1_000_000_000 / args.hz.max(1));
    let mut last_cycle = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;
    // Whether the game's state should be cycled forwards or backwards
    let mut rewind = false;

    'event: loop {
        if let Some(frame) = chip8.take_frame() {
            display.render(frame)?;
        }

        if chip8.take_beep() {
            // BEL; the terminal is the only speaker we have
            print!("\x07");
            std::io::stdout().flush()?;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc)?,
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => rewind = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc)?,
                    (Keycode::Space, _) => fast_forward = false,
                    (Keycode::Escape, _) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if rewind {
            chip8.rewind();
        } else if let Err(e) = chip8.step() {
            error!("machine halted at {:#05X}: {}", chip8.pc(), e);
            return Err(e.into());
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
