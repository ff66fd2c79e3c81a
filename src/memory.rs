//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations:
//!
//! - Flat 64KB RAM (`FlatMemory`, for tests and simple harnesses)
//! - Memory-mapped devices behind a [`Bus`](crate::Bus)
//!
//! ## Design Principles
//!
//! - Reads always succeed. An unmapped read yields a defined sentinel, never an error.
//! - Writes may fail. A write that no device claims is reported as a [`BusError`].
//! - Addresses are `u16`, so there is no out-of-range failure mode.

use crate::BusError;

/// Memory bus trait for CPU to read/write bytes.
///
/// The CPU accesses all memory (RAM, ROM, I/O) through this abstraction.
///
/// # Examples
///
/// ```
/// use bus6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42).unwrap();
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use bus6502::{BusError, MemoryBus};
///
/// struct LowRamOnly {
///     ram: [u8; 0x8000], // 32KB RAM (0x0000-0x7FFF)
/// }
///
/// impl MemoryBus for LowRamOnly {
///     fn read(&self, addr: u16) -> u8 {
///         self.ram.get(addr as usize).copied().unwrap_or(0xFF)
///     }
///
///     fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
///         match self.ram.get_mut(addr as usize) {
///             Some(slot) => {
///                 *slot = value;
///                 Ok(())
///             }
///             None => Err(BusError::UnmappedWrite { address: addr, value }),
///         }
///     }
/// }
///
/// let mut mem = LowRamOnly { ram: [0; 0x8000] };
/// assert!(mem.write(0x9000, 0x01).is_err());
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// This method must never panic.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// Returns `Err(BusError::UnmappedWrite)` when no storage claims the address.
    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError>;
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses (0x0000-0xFFFF) are writable RAM initialized to 0x00, so
/// writes never fail.
///
/// # Examples
///
/// ```
/// use bus6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0x0000, 0xEA).unwrap(); // NOP
///
/// let mut cpu = CPU::new(memory);
/// cpu.execute(1).unwrap();
/// assert_eq!(cpu.pc(), 0x0001);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        self.data[addr as usize] = value;
        Ok(())
    }
}
