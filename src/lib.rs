//! # 6502 CPU Core with a Memory-Mapped Bus
//!
//! A small 6502-family CPU emulator built around two pieces:
//!
//! - a fetch-decode-execute engine ([`CPU`]) that runs against a cycle budget, and
//! - an address-dispatch [`Bus`] that routes every byte access to the first
//!   attached [`Device`] whose range contains the address.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use bus6502::{Bus, CPU, RamDevice};
//!
//! let ram = Rc::new(RefCell::new(RamDevice::new(0x0800)));
//!
//! let mut bus = Bus::new();
//! bus.attach(0x0000, 0x2000, ram.clone()); // 2KB mirrored across 8KB
//!
//! let mut cpu = CPU::new(bus);
//!
//! // LDA #$41 ; STA $0200
//! cpu.load_program(&[0xA9, 0x41, 0x8D, 0x00, 0x02], 0x0000).unwrap();
//! cpu.execute(4).unwrap();
//!
//! assert_eq!(cpu.read(0x0200), 0x41);
//! assert_eq!(cpu.a(), 0x41);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state, configuration and the execution loop
//! - `devices` - Device trait, the address-dispatch bus and stock devices
//! - `memory` - MemoryBus trait and a flat 64KB implementation
//! - `opcodes` - The closed set of supported opcodes and their metadata
//! - `addressing` - Addressing mode enumeration
//! - `status` - Processor status bitfield

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod devices;
pub mod memory;
pub mod opcodes;
pub mod status;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use config::{CpuConfig, StartAddress};
pub use cpu::{StepOutcome, CPU};
pub use devices::{
    BufferedDevice, Bus, BusError, Device, DeviceHandle, RamDevice, RomDevice,
    UNMAPPED_READ_VALUE,
};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Opcode, OpcodeMetadata};
pub use status::Status;

/// Errors that abort CPU execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// A bus access issued by an instruction failed.
    ///
    /// Registers changed earlier in the same instruction are not rolled back.
    Bus(BusError),
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::Bus(err) => write!(f, "Bus access failed: {}", err),
        }
    }
}

impl std::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecutionError::Bus(err) => Some(err),
        }
    }
}

impl From<BusError> for ExecutionError {
    fn from(err: BusError) -> Self {
        ExecutionError::Bus(err)
    }
}
