// Bus module - Memory bus implementation
//
// This module implements the main memory bus that connects the CPU to all memory-mapped
// components in the NES system. It handles address routing, memory mirroring, OAM DMA,
// and cartridge/mapper wiring.
//
// # NES Memory Map (CPU Address Space)
//
// ```text
// $0000-$07FF: 2KB Internal RAM
// $0800-$1FFF: Mirrors of RAM (3 times)
// $2000-$2007: PPU Registers
// $2008-$3FFF: Mirrors of PPU Registers (repeating every 8 bytes)
// $4000-$4013, $4015: APU registers
// $4014: OAM DMA
// $4016: Controller 1 (read) / strobe (write)
// $4017: Controller 2 (read) / APU frame counter (write)
// $4018-$401F: APU and I/O test functionality (usually disabled)
// $4020-$FFFF: Cartridge space (PRG-ROM, PRG-RAM, and mapper registers)
// ```

use crate::apu::Apu;
use crate::cartridge::mappers::{create_mapper, MapperError};
use crate::cartridge::{Cartridge, Mapper};
use crate::input::ControllerIO;
use crate::ppu::Ppu;
use crate::ram::Ram;
use std::cell::RefCell;
use std::rc::Rc;

/// Trait for memory-mapped components
///
/// This trait defines the interface for components that can be mapped into the
/// CPU's address space. Components implementing this trait can handle read and
/// write operations for their specific memory ranges.
///
/// Reads take `&mut self` because several registers (PPUSTATUS, PPUDATA, the
/// controller shift registers) mutate internal state as a side effect of being read.
pub trait MemoryMappedDevice {
    /// Read a byte from the device
    fn read(&mut self, addr: u16) -> u8;

    /// Write a byte to the device
    fn write(&mut self, addr: u16, data: u8);
}

/// Main memory bus structure
///
/// The Bus connects the CPU to all memory-mapped components in the NES system.
/// It handles address decoding, memory mirroring, OAM DMA, and routes read/write
/// operations to the appropriate components.
pub struct Bus {
    /// Internal RAM: 2KB
    ram: Ram,

    /// Picture Processing Unit
    ppu: Ppu,

    /// Audio Processing Unit
    apu: Apu,

    /// Controller I/O ($4016/$4017)
    controllers: ControllerIO,

    /// Cartridge mapper, shared with the PPU so both sides see the same
    /// bank-switch/mirroring state. `None` until a cartridge is loaded.
    mapper: Option<Rc<RefCell<Box<dyn Mapper>>>>,

    /// Pending OAM DMA transfer, set by a write to $4014 and drained by the
    /// caller (the CPU execution loop) one cycle at a time so CPU stall
    /// accounting stays accurate.
    pending_dma: Option<DmaTransfer>,
}

/// State for an in-progress OAM DMA transfer ($4014)
struct DmaTransfer {
    /// High byte of the source address; the 256 bytes $XX00-$XXFF are copied
    page: u8,
    /// Next byte offset to copy (0-255)
    offset: u16,
}

impl Bus {
    /// Create a new bus instance with no cartridge loaded
    pub fn new() -> Self {
        Bus {
            ram: Ram::new(),
            ppu: Ppu::new(),
            apu: Apu::new(),
            controllers: ControllerIO::new(),
            mapper: None,
            pending_dma: None,
        }
    }

    /// Load a cartridge, constructing its mapper and sharing it with the PPU
    ///
    /// # Errors
    /// Returns `MapperError::UnsupportedMapper` if the cartridge's mapper
    /// number has no implementation.
    pub fn load_cartridge(&mut self, cartridge: Cartridge) -> Result<(), MapperError> {
        let mapper = create_mapper(cartridge)?;
        let mapper = Rc::new(RefCell::new(mapper));
        self.ppu.set_mapper(Rc::clone(&mapper));
        self.mapper = Some(mapper);
        Ok(())
    }

    /// Whether a cartridge (and therefore a mapper) is currently loaded
    pub fn has_cartridge(&self) -> bool {
        self.mapper.is_some()
    }

    /// Read a byte from the bus, routing to the appropriate device
    ///
    /// This is the read path used by the CPU for instruction fetch and
    /// operand reads. Reads are not side-effect-free in general (PPU/APU
    /// registers, controller shift registers), so this takes `&mut self`.
    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            // Internal RAM: $0000-$1FFF (2KB, mirrored 4 times)
            0x0000..=0x1FFF => self.ram.read(addr),

            // PPU registers: $2000-$3FFF (8 registers, mirrored every 8 bytes)
            0x2000..=0x3FFF => self.ppu.read(addr),

            // Controller 1/2: $4016/$4017 reads
            0x4016 | 0x4017 => self.controllers.read(addr),

            // APU registers (including $4015 status): everything else in $4000-$4017
            0x4000..=0x4015 => self.apu.read(addr),

            // $4014 (OAM DMA) and the APU/IO test range are open bus on read
            0x4014 | 0x4018..=0x401F => 0,

            // Cartridge space: $4020-$FFFF, routed through the mapper
            0x4020..=0xFFFF => {
                if let Some(ref mapper) = self.mapper {
                    mapper.borrow().cpu_read(addr)
                } else {
                    0
                }
            }
        }
    }

    /// Write a byte to the bus, routing to the appropriate device
    pub fn write(&mut self, addr: u16, data: u8) {
        match addr {
            // Internal RAM: $0000-$1FFF (2KB, mirrored 4 times)
            0x0000..=0x1FFF => self.ram.write(addr, data),

            // PPU registers: $2000-$3FFF (8 registers, mirrored every 8 bytes)
            0x2000..=0x3FFF => self.ppu.write(addr, data),

            // $4014: OAM DMA - begin a 256-byte transfer from page `data`
            0x4014 => {
                self.pending_dma = Some(DmaTransfer {
                    page: data,
                    offset: 0,
                });
            }

            // $4016: controller strobe
            0x4016 => self.controllers.write(addr, data),

            // $4017: APU frame counter (controller write is a no-op on this address)
            0x4017 => self.apu.write(addr, data),

            // APU registers $4000-$4013, $4015
            0x4000..=0x4013 | 0x4015 => self.apu.write(addr, data),

            // APU/IO test range: ignored
            0x4018..=0x401F => {}

            // Cartridge space: $4020-$FFFF, routed through the mapper
            0x4020..=0xFFFF => {
                if let Some(ref mapper) = self.mapper {
                    mapper.borrow_mut().cpu_write(addr, data);
                    let mirroring = mapper.borrow().mirroring();
                    self.ppu.set_mirroring(mirroring);
                }
            }
        }
    }

    /// Drive a pending OAM DMA transfer by one CPU cycle
    ///
    /// OAM DMA copies 256 bytes from `$XX00-$XXFF` (where `XX` is the page
    /// written to $4014) into PPU OAM, one byte per two CPU cycles (plus one
    /// extra cycle if the DMA begins on an odd CPU cycle - that alignment
    /// cycle is accounted for by the caller). Returns `true` once the
    /// transfer has completed this call.
    ///
    /// The caller is expected to stall the CPU for the duration of the
    /// transfer; see [`Bus::dma_active`].
    pub fn step_dma(&mut self) {
        let Some(dma) = self.pending_dma.as_mut() else {
            return;
        };

        let source = ((dma.page as u16) << 8) | dma.offset;
        let byte = self.read(source);
        self.ppu.write_oam(dma.offset as u8, byte);
        dma.offset += 1;

        if dma.offset == 256 {
            self.pending_dma = None;
        }
    }

    /// Whether an OAM DMA transfer is currently in progress
    pub fn dma_active(&self) -> bool {
        self.pending_dma.is_some()
    }

    /// Total CPU cycles a freshly-triggered OAM DMA transfer stalls the CPU for
    ///
    /// 513 cycles normally, 514 if the transfer starts on an odd CPU cycle
    /// (the extra cycle lets the DMA unit's read/write alternation line up).
    pub fn dma_stall_cycles(odd_cpu_cycle: bool) -> u16 {
        if odd_cpu_cycle {
            514
        } else {
            513
        }
    }

    /// Read a 16-bit word from the bus (little-endian)
    pub fn read_u16(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Write a 16-bit word to the bus (little-endian)
    pub fn write_u16(&mut self, addr: u16, data: u16) {
        let lo = (data & 0xFF) as u8;
        let hi = (data >> 8) as u8;
        self.write(addr, lo);
        self.write(addr.wrapping_add(1), hi);
    }

    /// Get a reference to the PPU
    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// Get a mutable reference to the PPU
    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    /// Get a reference to the APU
    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    /// Get a mutable reference to the APU
    pub fn apu_mut(&mut self) -> &mut Apu {
        &mut self.apu
    }

    /// Get a mutable reference to the controller I/O
    pub fn controllers_mut(&mut self) -> &mut ControllerIO {
        &mut self.controllers
    }

    /// Whether the mapper currently has an IRQ pending (e.g. MMC3 scanline IRQ)
    pub fn mapper_irq_pending(&self) -> bool {
        self.mapper
            .as_ref()
            .is_some_and(|m| m.borrow().irq_pending())
    }

    /// Acknowledge a pending mapper IRQ
    pub fn clear_mapper_irq(&mut self) {
        if let Some(ref mapper) = self.mapper {
            mapper.borrow_mut().clear_irq();
        }
    }

    /// Whether the APU has a frame or DMC IRQ pending
    pub fn apu_irq_pending(&self) -> bool {
        self.apu.irq_pending()
    }

    /// Advance the APU by one CPU cycle, servicing any pending DMC sample fetch first
    ///
    /// The DMC channel reads its sample bytes directly from CPU address space
    /// ($C000-$FFFF), so the fetch has to happen here rather than inside the
    /// APU itself, which has no memory map of its own.
    pub fn clock_apu(&mut self) {
        if let Some(addr) = self.apu.dmc_pending_fetch_address() {
            let byte = self.read(addr);
            self.apu.dmc_provide_sample(byte);
        }
        self.apu.clock();
    }

    /// Get the raw contents of internal RAM (for save states)
    pub fn ram_contents(&self) -> &[u8] {
        self.ram.contents()
    }

    /// Restore internal RAM contents (for save states)
    pub fn restore_ram_contents(&mut self, data: &[u8]) {
        self.ram.restore_contents(data);
    }

    /// Battery-backed cartridge PRG-RAM contents, if the loaded mapper has any.
    pub fn cartridge_ram(&self) -> Option<Vec<u8>> {
        self.mapper
            .as_ref()
            .and_then(|m| m.borrow().prg_ram().map(|ram| ram.to_vec()))
    }

    /// Restore battery-backed cartridge PRG-RAM contents (for save states)
    pub fn restore_cartridge_ram(&mut self, data: &[u8]) {
        if let Some(ref mapper) = self.mapper {
            if let Some(ram) = mapper.borrow_mut().prg_ram_mut() {
                if ram.len() == data.len() {
                    ram.copy_from_slice(data);
                }
            }
        }
    }

    /// Capture the loaded mapper's bank-select/IRQ-latch state (for save states)
    pub fn mapper_state(&self) -> Option<Vec<u8>> {
        self.mapper.as_ref().map(|m| m.borrow().save_state())
    }

    /// Restore the loaded mapper's bank-select/IRQ-latch state (for save states)
    pub fn restore_mapper_state(&mut self, data: &[u8]) {
        if let Some(ref mapper) = self.mapper {
            mapper.borrow_mut().restore_state(data);
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
