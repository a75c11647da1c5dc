use std::path::PathBuf;

use clap::Parser;

use chip8_vm::{Config, ShiftFlag, CLOCK_SPEED};

mod display;
mod keymap;
mod run;

/// Run a CHIP-8 ROM in an SDL2 window.
///
/// Space fast-forwards and Escape rewinds while held.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Path to the ROM to run
    rom: PathBuf,

    /// Instructions per second
    #[arg(long, default_value_t = 1_000_000_000 / CLOCK_SPEED)]
    hz: u64,

    /// Size of each CHIP-8 pixel on screen
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Leave 8XYE's raw high bit (0x00/0x80) in VF instead of 0/1
    #[arg(long)]
    raw_shl_flag: bool,

    /// Seed for CXNN, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            shl_flag: if self.raw_shl_flag {
                ShiftFlag::RawHighBit
            } else {
                ShiftFlag::Carry
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run::run(&args)
}
