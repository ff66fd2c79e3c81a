//! CPU power-on configuration.

/// Where the program counter points after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartAddress {
    /// PC starts at 0x0000.
    #[default]
    Zero,

    /// PC starts at the given address.
    Fixed(u16),

    /// PC is loaded little-endian from the reset vector at 0xFFFC/0xFFFD.
    ResetVector,
}

/// Initial register state for a [`CPU`](crate::CPU).
///
/// # Examples
///
/// ```
/// use bus6502::{CpuConfig, FlatMemory, MemoryBus, StartAddress, CPU};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00).unwrap();
/// memory.write(0xFFFD, 0x80).unwrap();
///
/// let config = CpuConfig::default().with_start(StartAddress::ResetVector);
/// let cpu = CPU::with_config(memory, config);
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    /// Initial program counter source.
    pub start: StartAddress,

    /// Initial stack pointer (offset into page 0x01).
    pub stack_pointer: u8,
}

impl CpuConfig {
    /// Default initial stack pointer.
    pub const DEFAULT_STACK_POINTER: u8 = 0xFD;

    /// Returns this configuration with a different program counter source.
    pub fn with_start(mut self, start: StartAddress) -> Self {
        self.start = start;
        self
    }

    /// Returns this configuration with a different initial stack pointer.
    pub fn with_stack_pointer(mut self, stack_pointer: u8) -> Self {
        self.stack_pointer = stack_pointer;
        self
    }
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            start: StartAddress::Zero,
            stack_pointer: Self::DEFAULT_STACK_POINTER,
        }
    }
}
