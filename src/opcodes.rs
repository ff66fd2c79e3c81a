//! # Opcode Metadata
//!
//! The closed set of opcodes this core executes, with the static information
//! needed to decode and charge each one.
//!
//! Each opcode carries:
//! - Mnemonic (instruction name)
//! - Addressing mode
//! - Budget units consumed, including the opcode fetch
//! - Instruction size in bytes
//!
//! Any byte that does not decode to an [`Opcode`] is an unknown opcode. The CPU
//! reports it and moves on to the next fetch.

use crate::addressing::AddressingMode;

/// Static metadata for a single opcode.
///
/// # Examples
///
/// ```
/// use bus6502::{AddressingMode, Opcode};
///
/// let lda_imm = Opcode::LdaImmediate.metadata();
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic (e.g., "LDA", "STA").
    pub mnemonic: &'static str,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Budget units consumed by the whole instruction, opcode fetch included.
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,
}

/// Every opcode the CPU implements.
///
/// Each discriminant is the opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // Load/store
    LdaImmediate = 0xA9,
    LdxImmediate = 0xA2,
    LdyImmediate = 0xA0,
    StaZeroPage = 0x85,
    StaAbsolute = 0x8D,
    StxZeroPage = 0x86,
    StyZeroPage = 0x84,

    // Register transfers
    Tax = 0xAA,
    Tay = 0xA8,
    Txa = 0x8A,
    Tya = 0x98,
    Tsx = 0xBA,
    Txs = 0x9A,

    // Stack
    Pha = 0x48,
    Php = 0x08,
    Pla = 0x68,
    Plp = 0x28,

    // Logical
    AndImmediate = 0x29,
    OraImmediate = 0x09,
    EorImmediate = 0x49,

    // Increment/decrement
    IncZeroPage = 0xE6,
    DecZeroPage = 0xC6,
    Inx = 0xE8,
    Iny = 0xC8,
    Dex = 0xCA,
    Dey = 0x88,

    // Jumps and calls
    JmpAbsolute = 0x4C,
    JmpIndirect = 0x6C,
    Jsr = 0x20,
    Rts = 0x60,

    // Status flag changes
    Clc = 0x18,
    Cld = 0xD8,
    Cli = 0x58,
    Clv = 0xB8,
    Sec = 0x38,
    Sed = 0xF8,
    Sei = 0x78,

    // System
    Brk = 0x00,
    Nop = 0xEA,
    Rti = 0x40,
}

impl Opcode {
    /// All implemented opcodes.
    pub const ALL: [Opcode; 40] = [
        Opcode::LdaImmediate,
        Opcode::LdxImmediate,
        Opcode::LdyImmediate,
        Opcode::StaZeroPage,
        Opcode::StaAbsolute,
        Opcode::StxZeroPage,
        Opcode::StyZeroPage,
        Opcode::Tax,
        Opcode::Tay,
        Opcode::Txa,
        Opcode::Tya,
        Opcode::Tsx,
        Opcode::Txs,
        Opcode::Pha,
        Opcode::Php,
        Opcode::Pla,
        Opcode::Plp,
        Opcode::AndImmediate,
        Opcode::OraImmediate,
        Opcode::EorImmediate,
        Opcode::IncZeroPage,
        Opcode::DecZeroPage,
        Opcode::Inx,
        Opcode::Iny,
        Opcode::Dex,
        Opcode::Dey,
        Opcode::JmpAbsolute,
        Opcode::JmpIndirect,
        Opcode::Jsr,
        Opcode::Rts,
        Opcode::Clc,
        Opcode::Cld,
        Opcode::Cli,
        Opcode::Clv,
        Opcode::Sec,
        Opcode::Sed,
        Opcode::Sei,
        Opcode::Brk,
        Opcode::Nop,
        Opcode::Rti,
    ];

    /// Decode an opcode byte. Returns `None` for bytes this core does not implement.
    ///
    /// ```
    /// use bus6502::Opcode;
    ///
    /// assert_eq!(Opcode::decode(0xA9), Some(Opcode::LdaImmediate));
    /// assert_eq!(Opcode::decode(0x69), None); // ADC is not implemented
    /// ```
    pub fn decode(byte: u8) -> Option<Opcode> {
        DECODE_TABLE[byte as usize]
    }

    /// The opcode byte.
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Mnemonic, addressing mode, budget cost and size of this opcode.
    pub fn metadata(self) -> OpcodeMetadata {
        use AddressingMode::*;

        let (mnemonic, addressing_mode, base_cycles) = match self {
            Opcode::LdaImmediate => ("LDA", Immediate, 2),
            Opcode::LdxImmediate => ("LDX", Immediate, 2),
            Opcode::LdyImmediate => ("LDY", Immediate, 2),
            Opcode::StaZeroPage => ("STA", ZeroPage, 3),
            Opcode::StaAbsolute => ("STA", Absolute, 4),
            Opcode::StxZeroPage => ("STX", ZeroPage, 3),
            Opcode::StyZeroPage => ("STY", ZeroPage, 3),
            Opcode::Tax => ("TAX", Implied, 2),
            Opcode::Tay => ("TAY", Implied, 2),
            Opcode::Txa => ("TXA", Implied, 2),
            Opcode::Tya => ("TYA", Implied, 2),
            Opcode::Tsx => ("TSX", Implied, 2),
            Opcode::Txs => ("TXS", Implied, 2),
            Opcode::Pha => ("PHA", Implied, 3),
            Opcode::Php => ("PHP", Implied, 3),
            Opcode::Pla => ("PLA", Implied, 4),
            Opcode::Plp => ("PLP", Implied, 4),
            Opcode::AndImmediate => ("AND", Immediate, 2),
            Opcode::OraImmediate => ("ORA", Immediate, 2),
            Opcode::EorImmediate => ("EOR", Immediate, 2),
            Opcode::IncZeroPage => ("INC", ZeroPage, 4),
            Opcode::DecZeroPage => ("DEC", ZeroPage, 4),
            Opcode::Inx => ("INX", Implied, 2),
            Opcode::Iny => ("INY", Implied, 2),
            Opcode::Dex => ("DEX", Implied, 2),
            Opcode::Dey => ("DEY", Implied, 2),
            Opcode::JmpAbsolute => ("JMP", Absolute, 3),
            Opcode::JmpIndirect => ("JMP", Indirect, 5),
            Opcode::Jsr => ("JSR", Absolute, 6),
            Opcode::Rts => ("RTS", Implied, 6),
            Opcode::Clc => ("CLC", Implied, 2),
            Opcode::Cld => ("CLD", Implied, 2),
            Opcode::Cli => ("CLI", Implied, 2),
            Opcode::Clv => ("CLV", Implied, 2),
            Opcode::Sec => ("SEC", Implied, 2),
            Opcode::Sed => ("SED", Implied, 2),
            Opcode::Sei => ("SEI", Implied, 2),
            Opcode::Brk => ("BRK", Implied, 7),
            // Charged for the fetch only
            Opcode::Nop => ("NOP", Implied, 1),
            Opcode::Rti => ("RTI", Implied, 6),
        };

        OpcodeMetadata {
            mnemonic,
            addressing_mode,
            base_cycles,
            size_bytes: 1 + addressing_mode.operand_bytes(),
        }
    }

    /// Budget units charged by the handler on top of the opcode fetch.
    pub(crate) fn extra_cycles(self) -> u64 {
        u64::from(self.metadata().base_cycles) - 1
    }
}

/// Byte-indexed decode table built from [`Opcode::ALL`].
const DECODE_TABLE: [Option<Opcode>; 256] = {
    let mut table = [None; 256];
    let mut i = 0;
    while i < Opcode::ALL.len() {
        let opcode = Opcode::ALL[i];
        table[opcode as usize] = Some(opcode);
        i += 1;
    }
    table
};

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Opcode::decode(byte).ok_or(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_decode_round_trips_every_opcode() {
        for opcode in Opcode::ALL {
            assert_eq!(Opcode::decode(opcode.byte()), Some(opcode));
        }
    }

    #[test]
    fn test_opcode_bytes_unique() {
        let bytes: HashSet<u8> = Opcode::ALL.iter().map(|op| op.byte()).collect();
        assert_eq!(bytes.len(), Opcode::ALL.len());
    }

    #[test]
    fn test_decode_count_matches_all() {
        let decoded = (0..=255u8).filter_map(Opcode::decode).count();
        assert_eq!(decoded, Opcode::ALL.len());
    }

    #[test]
    fn test_byte_is_discriminant() {
        assert_eq!(Opcode::Brk.byte(), 0x00);
        assert_eq!(Opcode::LdaImmediate.byte(), 0xA9);
        assert_eq!(Opcode::JmpIndirect as u8, 0x6C);
        assert_eq!(Opcode::decode(0xEA), Some(Opcode::Nop));
    }

    #[test]
    fn test_unknown_bytes() {
        assert_eq!(Opcode::decode(0x69), None); // ADC immediate
        assert_eq!(Opcode::decode(0x02), None); // Illegal
        assert_eq!(Opcode::try_from(0xFF), Err(0xFF));
    }

    #[test]
    fn test_sizes_follow_addressing_mode() {
        assert_eq!(Opcode::Nop.metadata().size_bytes, 1);
        assert_eq!(Opcode::LdaImmediate.metadata().size_bytes, 2);
        assert_eq!(Opcode::StaZeroPage.metadata().size_bytes, 2);
        assert_eq!(Opcode::StaAbsolute.metadata().size_bytes, 3);
        assert_eq!(Opcode::JmpIndirect.metadata().size_bytes, 3);
        assert_eq!(Opcode::Jsr.metadata().size_bytes, 3);
    }

    #[test]
    fn test_every_opcode_costs_at_least_the_fetch() {
        for opcode in Opcode::ALL {
            assert!(opcode.metadata().base_cycles >= 1, "{:?}", opcode);
        }
        assert_eq!(Opcode::Nop.extra_cycles(), 0);
        assert_eq!(Opcode::Brk.extra_cycles(), 6);
    }
}
