//! # Addressing Modes
//!
//! The addressing modes used by the supported opcodes. Each mode determines how
//! many operand bytes follow the opcode and how the CPU resolves them.

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied
/// - **1 byte**: Immediate, ZeroPage
/// - **2 bytes**: Absolute, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: TAX, RTS, NOP
    Implied,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10 (load immediate value 0x10 into accumulator)
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: STA $80 (store to address 0x0080)
    ZeroPage,

    /// Full 16-bit address, low byte first.
    ///
    /// Example: JMP $1234 (jump to address 0x1234)
    Absolute,

    /// Indirect jump through 16-bit pointer.
    ///
    /// Example: JMP ($FFFC) (jump to address stored at 0xFFFC/0xFFFD)
    /// Only used by JMP. The high byte of the target is fetched without carrying
    /// into the pointer's high byte, so JMP ($10FF) reads $10FF and $1000.
    Indirect,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode.
    pub fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied => 0,
            AddressingMode::Immediate | AddressingMode::ZeroPage => 1,
            AddressingMode::Absolute | AddressingMode::Indirect => 2,
        }
    }
}

/// Returns the address the high byte of an indirect target is read from.
///
/// Incrementing the pointer's low byte wraps within the same 256-byte page.
pub fn indirect_high_byte_address(pointer: u16) -> u16 {
    (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF)
}
