// 6502/2A03 opcode dispatch table
//
// Maps each of the 256 possible opcode bytes to its mnemonic, addressing
// mode, instruction length and base cycle count. `execute.rs` indexes this
// table to decode and time every instruction it runs, and `trace()` uses the
// same table to disassemble instructions for debug logging.
//
// Unofficial opcodes are included with their conventional `*`-prefixed
// mnemonics (matching the format nestest-style trace logs use) so that
// timing and disassembly stay accurate even though `execute_instruction`
// currently treats most of them as a no-op. The handful of opcodes the 6502
// never defines (commonly called JAM/KIL, since real silicon locks up on
// them) are mapped to a one-byte, two-cycle placeholder; this emulator never
// actually halts on them.

use crate::cpu::addressing::AddressingMode;

/// Decoded information about a single opcode
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    /// Assembly mnemonic, used for trace/disassembly output
    pub mnemonic: &'static str,

    /// Addressing mode this opcode uses to compute its operand
    pub mode: AddressingMode,

    /// Total instruction length in bytes (opcode + operand bytes)
    pub bytes: u8,

    /// Base cycle count, before any page-crossing penalty
    pub cycles: u8,

    /// Whether crossing a page boundary while computing the address adds
    /// one extra cycle
    pub page_cycle: bool,
}

/// Opcode table indexed by opcode byte
pub static OPCODE_TABLE: [OpcodeInfo; 256] = [
    OpcodeInfo { mnemonic: "BRK", mode: AddressingMode::Implied, bytes: 1, cycles: 7, page_cycle: false }, // 0x00
    OpcodeInfo { mnemonic: "ORA", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 6, page_cycle: false }, // 0x01
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x02
    OpcodeInfo { mnemonic: "*SLO", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 8, page_cycle: false }, // 0x03
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0x04
    OpcodeInfo { mnemonic: "ORA", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0x05
    OpcodeInfo { mnemonic: "ASL", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_cycle: false }, // 0x06
    OpcodeInfo { mnemonic: "*SLO", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_cycle: false }, // 0x07
    OpcodeInfo { mnemonic: "PHP", mode: AddressingMode::Implied, bytes: 1, cycles: 3, page_cycle: false }, // 0x08
    OpcodeInfo { mnemonic: "ORA", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0x09
    OpcodeInfo { mnemonic: "ASL", mode: AddressingMode::Accumulator, bytes: 1, cycles: 2, page_cycle: false }, // 0x0A
    OpcodeInfo { mnemonic: "*ANC", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0x0B
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0x0C
    OpcodeInfo { mnemonic: "ORA", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0x0D
    OpcodeInfo { mnemonic: "ASL", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0x0E
    OpcodeInfo { mnemonic: "*SLO", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0x0F
    OpcodeInfo { mnemonic: "BPL", mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_cycle: false }, // 0x10
    OpcodeInfo { mnemonic: "ORA", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 5, page_cycle: true }, // 0x11
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x12
    OpcodeInfo { mnemonic: "*SLO", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 8, page_cycle: false }, // 0x13
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0x14
    OpcodeInfo { mnemonic: "ORA", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0x15
    OpcodeInfo { mnemonic: "ASL", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_cycle: false }, // 0x16
    OpcodeInfo { mnemonic: "*SLO", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_cycle: false }, // 0x17
    OpcodeInfo { mnemonic: "CLC", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x18
    OpcodeInfo { mnemonic: "ORA", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_cycle: true }, // 0x19
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x1A
    OpcodeInfo { mnemonic: "*SLO", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 7, page_cycle: false }, // 0x1B
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0x1C
    OpcodeInfo { mnemonic: "ORA", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0x1D
    OpcodeInfo { mnemonic: "ASL", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_cycle: false }, // 0x1E
    OpcodeInfo { mnemonic: "*SLO", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_cycle: false }, // 0x1F
    OpcodeInfo { mnemonic: "JSR", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0x20
    OpcodeInfo { mnemonic: "AND", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 6, page_cycle: false }, // 0x21
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x22
    OpcodeInfo { mnemonic: "*RLA", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 8, page_cycle: false }, // 0x23
    OpcodeInfo { mnemonic: "BIT", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0x24
    OpcodeInfo { mnemonic: "AND", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0x25
    OpcodeInfo { mnemonic: "ROL", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_cycle: false }, // 0x26
    OpcodeInfo { mnemonic: "*RLA", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_cycle: false }, // 0x27
    OpcodeInfo { mnemonic: "PLP", mode: AddressingMode::Implied, bytes: 1, cycles: 4, page_cycle: false }, // 0x28
    OpcodeInfo { mnemonic: "AND", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0x29
    OpcodeInfo { mnemonic: "ROL", mode: AddressingMode::Accumulator, bytes: 1, cycles: 2, page_cycle: false }, // 0x2A
    OpcodeInfo { mnemonic: "*ANC", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0x2B
    OpcodeInfo { mnemonic: "BIT", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0x2C
    OpcodeInfo { mnemonic: "AND", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0x2D
    OpcodeInfo { mnemonic: "ROL", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0x2E
    OpcodeInfo { mnemonic: "*RLA", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0x2F
    OpcodeInfo { mnemonic: "BMI", mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_cycle: false }, // 0x30
    OpcodeInfo { mnemonic: "AND", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 5, page_cycle: true }, // 0x31
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x32
    OpcodeInfo { mnemonic: "*RLA", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 8, page_cycle: false }, // 0x33
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0x34
    OpcodeInfo { mnemonic: "AND", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0x35
    OpcodeInfo { mnemonic: "ROL", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_cycle: false }, // 0x36
    OpcodeInfo { mnemonic: "*RLA", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_cycle: false }, // 0x37
    OpcodeInfo { mnemonic: "SEC", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x38
    OpcodeInfo { mnemonic: "AND", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_cycle: true }, // 0x39
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x3A
    OpcodeInfo { mnemonic: "*RLA", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 7, page_cycle: false }, // 0x3B
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0x3C
    OpcodeInfo { mnemonic: "AND", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0x3D
    OpcodeInfo { mnemonic: "ROL", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_cycle: false }, // 0x3E
    OpcodeInfo { mnemonic: "*RLA", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_cycle: false }, // 0x3F
    OpcodeInfo { mnemonic: "RTI", mode: AddressingMode::Implied, bytes: 1, cycles: 6, page_cycle: false }, // 0x40
    OpcodeInfo { mnemonic: "EOR", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 6, page_cycle: false }, // 0x41
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x42
    OpcodeInfo { mnemonic: "*SRE", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 8, page_cycle: false }, // 0x43
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0x44
    OpcodeInfo { mnemonic: "EOR", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0x45
    OpcodeInfo { mnemonic: "LSR", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_cycle: false }, // 0x46
    OpcodeInfo { mnemonic: "*SRE", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_cycle: false }, // 0x47
    OpcodeInfo { mnemonic: "PHA", mode: AddressingMode::Implied, bytes: 1, cycles: 3, page_cycle: false }, // 0x48
    OpcodeInfo { mnemonic: "EOR", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0x49
    OpcodeInfo { mnemonic: "LSR", mode: AddressingMode::Accumulator, bytes: 1, cycles: 2, page_cycle: false }, // 0x4A
    OpcodeInfo { mnemonic: "*ALR", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0x4B
    OpcodeInfo { mnemonic: "JMP", mode: AddressingMode::Absolute, bytes: 3, cycles: 3, page_cycle: false }, // 0x4C
    OpcodeInfo { mnemonic: "EOR", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0x4D
    OpcodeInfo { mnemonic: "LSR", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0x4E
    OpcodeInfo { mnemonic: "*SRE", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0x4F
    OpcodeInfo { mnemonic: "BVC", mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_cycle: false }, // 0x50
    OpcodeInfo { mnemonic: "EOR", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 5, page_cycle: true }, // 0x51
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x52
    OpcodeInfo { mnemonic: "*SRE", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 8, page_cycle: false }, // 0x53
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0x54
    OpcodeInfo { mnemonic: "EOR", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0x55
    OpcodeInfo { mnemonic: "LSR", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_cycle: false }, // 0x56
    OpcodeInfo { mnemonic: "*SRE", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_cycle: false }, // 0x57
    OpcodeInfo { mnemonic: "CLI", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x58
    OpcodeInfo { mnemonic: "EOR", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_cycle: true }, // 0x59
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x5A
    OpcodeInfo { mnemonic: "*SRE", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 7, page_cycle: false }, // 0x5B
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0x5C
    OpcodeInfo { mnemonic: "EOR", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0x5D
    OpcodeInfo { mnemonic: "LSR", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_cycle: false }, // 0x5E
    OpcodeInfo { mnemonic: "*SRE", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_cycle: false }, // 0x5F
    OpcodeInfo { mnemonic: "RTS", mode: AddressingMode::Implied, bytes: 1, cycles: 6, page_cycle: false }, // 0x60
    OpcodeInfo { mnemonic: "ADC", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 6, page_cycle: false }, // 0x61
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x62
    OpcodeInfo { mnemonic: "*RRA", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 8, page_cycle: false }, // 0x63
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0x64
    OpcodeInfo { mnemonic: "ADC", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0x65
    OpcodeInfo { mnemonic: "ROR", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_cycle: false }, // 0x66
    OpcodeInfo { mnemonic: "*RRA", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_cycle: false }, // 0x67
    OpcodeInfo { mnemonic: "PLA", mode: AddressingMode::Implied, bytes: 1, cycles: 4, page_cycle: false }, // 0x68
    OpcodeInfo { mnemonic: "ADC", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0x69
    OpcodeInfo { mnemonic: "ROR", mode: AddressingMode::Accumulator, bytes: 1, cycles: 2, page_cycle: false }, // 0x6A
    OpcodeInfo { mnemonic: "*ARR", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0x6B
    OpcodeInfo { mnemonic: "JMP", mode: AddressingMode::Indirect, bytes: 3, cycles: 5, page_cycle: false }, // 0x6C
    OpcodeInfo { mnemonic: "ADC", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0x6D
    OpcodeInfo { mnemonic: "ROR", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0x6E
    OpcodeInfo { mnemonic: "*RRA", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0x6F
    OpcodeInfo { mnemonic: "BVS", mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_cycle: false }, // 0x70
    OpcodeInfo { mnemonic: "ADC", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 5, page_cycle: true }, // 0x71
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x72
    OpcodeInfo { mnemonic: "*RRA", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 8, page_cycle: false }, // 0x73
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0x74
    OpcodeInfo { mnemonic: "ADC", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0x75
    OpcodeInfo { mnemonic: "ROR", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_cycle: false }, // 0x76
    OpcodeInfo { mnemonic: "*RRA", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_cycle: false }, // 0x77
    OpcodeInfo { mnemonic: "SEI", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x78
    OpcodeInfo { mnemonic: "ADC", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_cycle: true }, // 0x79
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x7A
    OpcodeInfo { mnemonic: "*RRA", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 7, page_cycle: false }, // 0x7B
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0x7C
    OpcodeInfo { mnemonic: "ADC", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0x7D
    OpcodeInfo { mnemonic: "ROR", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_cycle: false }, // 0x7E
    OpcodeInfo { mnemonic: "*RRA", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_cycle: false }, // 0x7F
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0x80
    OpcodeInfo { mnemonic: "STA", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 6, page_cycle: false }, // 0x81
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0x82
    OpcodeInfo { mnemonic: "*SAX", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 6, page_cycle: false }, // 0x83
    OpcodeInfo { mnemonic: "STY", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0x84
    OpcodeInfo { mnemonic: "STA", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0x85
    OpcodeInfo { mnemonic: "STX", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0x86
    OpcodeInfo { mnemonic: "*SAX", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0x87
    OpcodeInfo { mnemonic: "DEY", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x88
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0x89
    OpcodeInfo { mnemonic: "TXA", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x8A
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x8B
    OpcodeInfo { mnemonic: "STY", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0x8C
    OpcodeInfo { mnemonic: "STA", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0x8D
    OpcodeInfo { mnemonic: "STX", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0x8E
    OpcodeInfo { mnemonic: "*SAX", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0x8F
    OpcodeInfo { mnemonic: "BCC", mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_cycle: false }, // 0x90
    OpcodeInfo { mnemonic: "STA", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 6, page_cycle: false }, // 0x91
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x92
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x93
    OpcodeInfo { mnemonic: "STY", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0x94
    OpcodeInfo { mnemonic: "STA", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0x95
    OpcodeInfo { mnemonic: "STX", mode: AddressingMode::ZeroPageY, bytes: 2, cycles: 4, page_cycle: false }, // 0x96
    OpcodeInfo { mnemonic: "*SAX", mode: AddressingMode::ZeroPageY, bytes: 2, cycles: 4, page_cycle: false }, // 0x97
    OpcodeInfo { mnemonic: "TYA", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x98
    OpcodeInfo { mnemonic: "STA", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 5, page_cycle: false }, // 0x99
    OpcodeInfo { mnemonic: "TXS", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x9A
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x9B
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x9C
    OpcodeInfo { mnemonic: "STA", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 5, page_cycle: false }, // 0x9D
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x9E
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0x9F
    OpcodeInfo { mnemonic: "LDY", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0xA0
    OpcodeInfo { mnemonic: "LDA", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 6, page_cycle: false }, // 0xA1
    OpcodeInfo { mnemonic: "LDX", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0xA2
    OpcodeInfo { mnemonic: "*LAX", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 6, page_cycle: false }, // 0xA3
    OpcodeInfo { mnemonic: "LDY", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0xA4
    OpcodeInfo { mnemonic: "LDA", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0xA5
    OpcodeInfo { mnemonic: "LDX", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0xA6
    OpcodeInfo { mnemonic: "*LAX", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0xA7
    OpcodeInfo { mnemonic: "TAY", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xA8
    OpcodeInfo { mnemonic: "LDA", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0xA9
    OpcodeInfo { mnemonic: "TAX", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xAA
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xAB
    OpcodeInfo { mnemonic: "LDY", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0xAC
    OpcodeInfo { mnemonic: "LDA", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0xAD
    OpcodeInfo { mnemonic: "LDX", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0xAE
    OpcodeInfo { mnemonic: "*LAX", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0xAF
    OpcodeInfo { mnemonic: "BCS", mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_cycle: false }, // 0xB0
    OpcodeInfo { mnemonic: "LDA", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 5, page_cycle: true }, // 0xB1
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xB2
    OpcodeInfo { mnemonic: "*LAX", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 5, page_cycle: true }, // 0xB3
    OpcodeInfo { mnemonic: "LDY", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0xB4
    OpcodeInfo { mnemonic: "LDA", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0xB5
    OpcodeInfo { mnemonic: "LDX", mode: AddressingMode::ZeroPageY, bytes: 2, cycles: 4, page_cycle: false }, // 0xB6
    OpcodeInfo { mnemonic: "*LAX", mode: AddressingMode::ZeroPageY, bytes: 2, cycles: 4, page_cycle: false }, // 0xB7
    OpcodeInfo { mnemonic: "CLV", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xB8
    OpcodeInfo { mnemonic: "LDA", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_cycle: true }, // 0xB9
    OpcodeInfo { mnemonic: "TSX", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xBA
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xBB
    OpcodeInfo { mnemonic: "LDY", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0xBC
    OpcodeInfo { mnemonic: "LDA", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0xBD
    OpcodeInfo { mnemonic: "LDX", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_cycle: true }, // 0xBE
    OpcodeInfo { mnemonic: "*LAX", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_cycle: true }, // 0xBF
    OpcodeInfo { mnemonic: "CPY", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0xC0
    OpcodeInfo { mnemonic: "CMP", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 6, page_cycle: false }, // 0xC1
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0xC2
    OpcodeInfo { mnemonic: "*DCP", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 8, page_cycle: false }, // 0xC3
    OpcodeInfo { mnemonic: "CPY", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0xC4
    OpcodeInfo { mnemonic: "CMP", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0xC5
    OpcodeInfo { mnemonic: "DEC", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_cycle: false }, // 0xC6
    OpcodeInfo { mnemonic: "*DCP", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_cycle: false }, // 0xC7
    OpcodeInfo { mnemonic: "INY", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xC8
    OpcodeInfo { mnemonic: "CMP", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0xC9
    OpcodeInfo { mnemonic: "DEX", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xCA
    OpcodeInfo { mnemonic: "*AXS", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0xCB
    OpcodeInfo { mnemonic: "CPY", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0xCC
    OpcodeInfo { mnemonic: "CMP", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0xCD
    OpcodeInfo { mnemonic: "DEC", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0xCE
    OpcodeInfo { mnemonic: "*DCP", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0xCF
    OpcodeInfo { mnemonic: "BNE", mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_cycle: false }, // 0xD0
    OpcodeInfo { mnemonic: "CMP", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 5, page_cycle: true }, // 0xD1
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xD2
    OpcodeInfo { mnemonic: "*DCP", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 8, page_cycle: false }, // 0xD3
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0xD4
    OpcodeInfo { mnemonic: "CMP", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0xD5
    OpcodeInfo { mnemonic: "DEC", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_cycle: false }, // 0xD6
    OpcodeInfo { mnemonic: "*DCP", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_cycle: false }, // 0xD7
    OpcodeInfo { mnemonic: "CLD", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xD8
    OpcodeInfo { mnemonic: "CMP", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_cycle: true }, // 0xD9
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xDA
    OpcodeInfo { mnemonic: "*DCP", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 7, page_cycle: false }, // 0xDB
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0xDC
    OpcodeInfo { mnemonic: "CMP", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0xDD
    OpcodeInfo { mnemonic: "DEC", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_cycle: false }, // 0xDE
    OpcodeInfo { mnemonic: "*DCP", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_cycle: false }, // 0xDF
    OpcodeInfo { mnemonic: "CPX", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0xE0
    OpcodeInfo { mnemonic: "SBC", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 6, page_cycle: false }, // 0xE1
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0xE2
    OpcodeInfo { mnemonic: "*ISB", mode: AddressingMode::IndexedIndirect, bytes: 2, cycles: 8, page_cycle: false }, // 0xE3
    OpcodeInfo { mnemonic: "CPX", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0xE4
    OpcodeInfo { mnemonic: "SBC", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_cycle: false }, // 0xE5
    OpcodeInfo { mnemonic: "INC", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_cycle: false }, // 0xE6
    OpcodeInfo { mnemonic: "*ISB", mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_cycle: false }, // 0xE7
    OpcodeInfo { mnemonic: "INX", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xE8
    OpcodeInfo { mnemonic: "SBC", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0xE9
    OpcodeInfo { mnemonic: "NOP", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xEA
    OpcodeInfo { mnemonic: "*SBC", mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_cycle: false }, // 0xEB
    OpcodeInfo { mnemonic: "CPX", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0xEC
    OpcodeInfo { mnemonic: "SBC", mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_cycle: false }, // 0xED
    OpcodeInfo { mnemonic: "INC", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0xEE
    OpcodeInfo { mnemonic: "*ISB", mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_cycle: false }, // 0xEF
    OpcodeInfo { mnemonic: "BEQ", mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_cycle: false }, // 0xF0
    OpcodeInfo { mnemonic: "SBC", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 5, page_cycle: true }, // 0xF1
    OpcodeInfo { mnemonic: "*JAM", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xF2
    OpcodeInfo { mnemonic: "*ISB", mode: AddressingMode::IndirectIndexed, bytes: 2, cycles: 8, page_cycle: false }, // 0xF3
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0xF4
    OpcodeInfo { mnemonic: "SBC", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_cycle: false }, // 0xF5
    OpcodeInfo { mnemonic: "INC", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_cycle: false }, // 0xF6
    OpcodeInfo { mnemonic: "*ISB", mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_cycle: false }, // 0xF7
    OpcodeInfo { mnemonic: "SED", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xF8
    OpcodeInfo { mnemonic: "SBC", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_cycle: true }, // 0xF9
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::Implied, bytes: 1, cycles: 2, page_cycle: false }, // 0xFA
    OpcodeInfo { mnemonic: "*ISB", mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 7, page_cycle: false }, // 0xFB
    OpcodeInfo { mnemonic: "*NOP", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0xFC
    OpcodeInfo { mnemonic: "SBC", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_cycle: true }, // 0xFD
    OpcodeInfo { mnemonic: "INC", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_cycle: false }, // 0xFE
    OpcodeInfo { mnemonic: "*ISB", mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_cycle: false }, // 0xFF
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_256_entries() {
        assert_eq!(OPCODE_TABLE.len(), 256);
    }

    #[test]
    fn test_known_official_opcodes() {
        assert_eq!(OPCODE_TABLE[0x00].mnemonic, "BRK");
        assert_eq!(OPCODE_TABLE[0xA9].mnemonic, "LDA");
        assert_eq!(OPCODE_TABLE[0xA9].mode, AddressingMode::Immediate);
        assert_eq!(OPCODE_TABLE[0xA9].bytes, 2);
        assert_eq!(OPCODE_TABLE[0xA9].cycles, 2);
        assert_eq!(OPCODE_TABLE[0xEA].mnemonic, "NOP");
        assert_eq!(OPCODE_TABLE[0x4C].mode, AddressingMode::Absolute);
    }

    #[test]
    fn test_page_crossing_flags_on_indexed_modes() {
        assert!(OPCODE_TABLE[0xBD].page_cycle); // LDA abs,X
        assert!(!OPCODE_TABLE[0x9D].page_cycle); // STA abs,X never gains a cycle
        assert!(OPCODE_TABLE[0xB1].page_cycle); // LDA (zp),Y
    }

    #[test]
    fn test_unofficial_opcodes_named_with_star_prefix() {
        assert_eq!(OPCODE_TABLE[0xA7].mnemonic, "*LAX");
        assert_eq!(OPCODE_TABLE[0xC7].mnemonic, "*DCP");
        assert_eq!(OPCODE_TABLE[0x02].mnemonic, "*JAM");
    }

    #[test]
    fn test_branch_instructions_use_relative_mode() {
        for op in [0x10, 0x30, 0x50, 0x70, 0x90, 0xB0, 0xD0, 0xF0] {
            assert_eq!(OPCODE_TABLE[op].mode, AddressingMode::Relative);
            assert_eq!(OPCODE_TABLE[op].bytes, 2);
        }
    }
}
