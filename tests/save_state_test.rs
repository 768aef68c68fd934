// Integration tests for save states: verify that saving and restoring
// mid-emulation produces an emulator indistinguishable from one that was
// never perturbed, across subsequent frames.

use nescade::{Cartridge, Emulator, MemoryMappedDevice, SaveState};

/// Build a minimal NROM (mapper 0) iNES ROM whose reset vector points at a
/// small program that continuously drives the PPU and APU, so that running
/// frames actually changes CPU/PPU/APU state instead of idling.
fn build_test_rom() -> Vec<u8> {
    let mut rom = vec![0u8; 16 + 16384 + 8192];

    rom[0..4].copy_from_slice(&[0x4E, 0x45, 0x53, 0x1A]); // "NES\x1A"
    rom[4] = 1; // 1 x 16KB PRG-ROM
    rom[5] = 1; // 1 x 8KB CHR-ROM
    rom[6] = 0x00; // mapper 0, horizontal mirroring

    let prg = &mut rom[16..16 + 16384];

    // Program at $8000: enable APU pulse 1 and PPU rendering, then spin
    // writing to $4015/PPUMASK/PPUCTRL/$2007 so the APU/PPU clocks advance
    // with observable state instead of just ticking idle.
    let code: &[u8] = &[
        0xA9, 0x01, // LDA #$01
        0x8D, 0x15, 0x40, // STA $4015 (enable pulse 1)
        0xA9, 0xBF, // LDA #$BF
        0x8D, 0x00, 0x40, // STA $4000 (pulse 1 duty/volume)
        0xA9, 0x34, // LDA #$34
        0x8D, 0x02, 0x40, // STA $4002 (pulse 1 timer low)
        0xA9, 0x07, // LDA #$07
        0x8D, 0x03, 0x40, // STA $4003 (pulse 1 timer high / length)
        0xA9, 0x1E, // LDA #$1E
        0x8D, 0x01, 0x20, // STA $2001 (PPUMASK: show background/sprites)
        0xEE, 0x00, 0x03, // INC $0300 (scratch counter, keeps CPU state moving)
        0x4C, 0x18, 0x80, // JMP $8018 (loop back to the INC forever)
    ];
    prg[0..code.len()].copy_from_slice(code);

    // Reset vector -> $8000
    prg[16384 - 4] = 0x00;
    prg[16384 - 3] = 0x80;
    // IRQ/BRK vector -> $8000 (unused but must be valid)
    prg[16384 - 2] = 0x00;
    prg[16384 - 1] = 0x80;

    rom
}

fn new_loaded_emulator(rom: &[u8]) -> Emulator {
    let cartridge = Cartridge::from_ines_bytes(rom).expect("valid test ROM");
    let mut emulator = Emulator::new();
    emulator
        .bus_mut()
        .load_cartridge(cartridge)
        .expect("mapper 0 cartridge loads");
    emulator.reset();
    emulator
}

/// Snapshot of everything a post-restore frame could possibly diverge on.
#[derive(Debug, PartialEq)]
struct Fingerprint {
    cpu_a: u8,
    cpu_x: u8,
    cpu_y: u8,
    cpu_sp: u8,
    cpu_pc: u16,
    cpu_status: u8,
    cpu_cycles: u64,
    ppu_scanline: u16,
    ppu_cycle: u16,
    ppu_frame: u64,
    pulse1_output: u8,
    noise_output: u8,
}

fn fingerprint(emulator: &Emulator) -> Fingerprint {
    let cpu = emulator.cpu();
    let ppu = emulator.bus().ppu();
    let apu = emulator.bus().apu();
    Fingerprint {
        cpu_a: cpu.a,
        cpu_x: cpu.x,
        cpu_y: cpu.y,
        cpu_sp: cpu.sp,
        cpu_pc: cpu.pc,
        cpu_status: cpu.status,
        cpu_cycles: cpu.cycles,
        ppu_scanline: ppu.scanline(),
        ppu_cycle: ppu.cycle(),
        ppu_frame: ppu.frame_count(),
        pulse1_output: apu.pulse1_output(),
        noise_output: apu.noise_output(),
    }
}

#[test]
fn save_then_restore_matches_unperturbed_run() {
    let rom = build_test_rom();

    // Baseline: run a few frames, save, then keep running uninterrupted.
    let mut baseline = new_loaded_emulator(&rom);
    for _ in 0..5 {
        baseline.run_frame();
    }
    let saved = SaveState::from_emulator(&baseline).expect("capture save state");
    for _ in 0..10 {
        baseline.run_frame();
    }
    let baseline_fingerprint = fingerprint(&baseline);

    // Test subject: reach the identical point, then diverge heavily before
    // restoring the save state and re-running the same number of frames.
    let mut subject = new_loaded_emulator(&rom);
    for _ in 0..5 {
        subject.run_frame();
    }
    // subject now matches the point `saved` was captured at; perturb it.
    for _ in 0..37 {
        subject.run_frame();
    }
    subject.cpu_mut().a = 0xFF;
    subject.bus_mut().apu_mut().write(0x4003, 0x00);
    subject.bus_mut().apu_mut().write(0x400C, 0x3F);

    saved.restore_to_emulator(&mut subject).expect("restore save state");
    for _ in 0..10 {
        subject.run_frame();
    }
    let subject_fingerprint = fingerprint(&subject);

    assert_eq!(
        subject_fingerprint, baseline_fingerprint,
        "restoring a save state must make subsequent frames behave exactly \
         as if the emulator had never been perturbed"
    );
}

#[test]
fn save_state_restores_apu_channel_state() {
    let rom = build_test_rom();
    let mut emulator = new_loaded_emulator(&rom);
    for _ in 0..3 {
        emulator.run_frame();
    }

    let saved = SaveState::from_emulator(&emulator).expect("capture save state");
    let pulse1_before = emulator.bus().apu().pulse1_output();

    // Silence the channel entirely, then restore and confirm it's back.
    emulator.bus_mut().apu_mut().write(0x4015, 0x00);
    assert_eq!(emulator.bus().apu().pulse1_output(), 0);

    saved.restore_to_emulator(&mut emulator).expect("restore save state");
    assert_eq!(emulator.bus().apu().pulse1_output(), pulse1_before);
}
