// NES Emulator - Command-line entrypoint
//
// Loads an iNES ROM and drives the CPU/PPU coordinator for a fixed number
// of frames (or until an internal stop request, if one is ever issued).
// This binary owns argument parsing and exit-code mapping; all other
// diagnostics go through `tracing`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use nes_rs::Emulator;

/// Run an NES ROM against the CPU/PPU core.
#[derive(Parser, Debug)]
#[command(name = "nes-rs", version, about)]
struct Args {
    /// Path to an iNES (.nes) ROM file.
    rom: PathBuf,

    /// Number of frames to run before exiting.
    #[arg(long, default_value_t = 60)]
    frames: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut emulator = Emulator::new();
    if let Err(err) = emulator.load_rom(&args.rom) {
        tracing::error!(rom = %args.rom.display(), error = %err, "failed to load ROM");
        return ExitCode::FAILURE;
    }
    tracing::info!(rom = %args.rom.display(), "ROM loaded");

    for frame in 0..args.frames {
        if emulator.should_stop() {
            tracing::info!(frame, "stop requested, exiting");
            break;
        }
        emulator.run_frame();
        tracing::debug!(frame, "frame complete");
    }

    tracing::info!(frames = args.frames, "run complete");
    ExitCode::SUCCESS
}
