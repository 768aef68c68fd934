// NES Emulator - Main Entry Point

use nescade::display::{run_display, run_display_with_emulator, WindowConfig};
use nescade::emulator::Emulator;
use nescade::input::InputConfig;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("NES Emulator (nescade) v0.1.0");
    println!("==============================");
    println!();

    let config_path = "input_config.toml";
    let input_config = InputConfig::load_or_default(config_path);
    println!("Input configuration loaded from '{}'", config_path);
    println!();

    let window_config = WindowConfig::new()
        .with_scale(3)
        .with_fps(60)
        .with_vsync(true);

    let rom_path = env::args().nth(1);

    println!("Press the close button or Ctrl+C to exit.");
    println!();

    match rom_path {
        Some(path) => {
            let mut emulator = Emulator::new();
            emulator.load_rom(&path)?;
            println!("Loaded ROM '{}'", path);
            run_display_with_emulator(window_config, emulator)?;
        }
        None => {
            eprintln!("No ROM path given, showing test pattern. Usage: nescade <path-to.nes>");
            run_display(window_config)?;
        }
    }

    println!("Display window closed.");
    Ok(())
}

