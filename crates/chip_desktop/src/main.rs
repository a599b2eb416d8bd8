use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use chip_core::{Cpu, Quirks};
use clap::Parser;
use log::info;

mod app;
mod audio;
mod clock;
mod emulator;
mod keymap;
mod rom;

use clock::Clock;
use emulator::Emulator;

/// CHIP-8 interpreter.
///
/// Keypad: 1234 / QWER / ASDF / ZXCV. F1 reloads the rom, Escape quits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the rom image
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = 700, value_parser = clap::value_parser!(u32).range(1..))]
    ips: u32,

    /// Delay and sound timer rate in Hz
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    timer_hz: u32,

    /// Window pixels per CHIP-8 pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    scale: u32,

    /// FX55 / FX65 advance I past the registers transferred
    #[arg(long)]
    increment_index: bool,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the tone
    #[arg(long)]
    mute: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rom = rom::read_rom(&args.rom)?;
    info!("{}: {} bytes", args.rom.display(), rom.len());

    let seed = args.seed.unwrap_or_else(seed_from_time);
    let mut cpu = Cpu::with_seed(seed);
    cpu.set_quirks(Quirks { increment_index: args.increment_index });

    let tone = if args.mute { None } else { audio::get_device() };
    let emulator = Emulator::new(cpu, rom, Clock::new(args.ips, args.timer_hz), tone);
    app::run(emulator, args.scale)
}

fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
