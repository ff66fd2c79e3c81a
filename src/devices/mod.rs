//! Memory-mapped device support for the 6502 emulator.
//!
//! This module provides the address-dispatch architecture that lets several
//! hardware devices (RAM, ROM, buffered peripherals) share the 6502 address space.
//!
//! # Architecture
//!
//! - **Device trait**: Byte-level interface every mapped component implements
//! - **Bus**: Routes read/write operations to attached devices by address range
//! - **Device implementations**: RAM, ROM and a generic buffered peripheral
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use bus6502::{Bus, CPU, RamDevice, RomDevice};
//!
//! let ram = Rc::new(RefCell::new(RamDevice::new(0x4000)));
//! let rom = Rc::new(RefCell::new(RomDevice::new(vec![0xEA; 0x4000])));
//!
//! let mut bus = Bus::new();
//! bus.attach(0x0000, 0x4000, ram); // 16KB RAM at 0x0000-0x3FFF
//! bus.attach(0xC000, 0x4000, rom); // 16KB ROM at 0xC000-0xFFFF
//!
//! let cpu = CPU::new(bus);
//! assert_eq!(cpu.read(0xC000), 0xEA);
//! ```

use crate::MemoryBus;
use std::cell::RefCell;
use std::rc::Rc;

// Device implementations
pub mod buffered;
pub mod ram;
pub mod rom;

// Re-export device types
pub use buffered::BufferedDevice;
pub use ram::RamDevice;
pub use rom::RomDevice;

/// Value returned for reads that no attached device claims.
pub const UNMAPPED_READ_VALUE: u8 = 0xFF;

/// Byte-level interface for memory-mapped hardware devices.
///
/// The bus calls these methods with a local offset (address minus the mapping
/// base), never with the global address. Devices mask or mirror offsets into
/// their own storage; an offset beyond the device's storage must not panic.
///
/// # Examples
///
/// ```rust
/// use bus6502::Device;
///
/// struct Latch {
///     value: u8,
/// }
///
/// impl Device for Latch {
///     fn read(&self, _offset: u16) -> u8 {
///         self.value
///     }
///
///     fn write(&mut self, _offset: u16, value: u8) {
///         self.value = value;
///     }
/// }
/// ```
pub trait Device {
    /// Read byte from device at offset relative to the mapping base.
    fn read(&self, offset: u16) -> u8;

    /// Write byte to device at offset relative to the mapping base.
    fn write(&mut self, offset: u16, value: u8);

    /// Read a byte for inspection, without the side effects of `read`.
    ///
    /// Devices whose reads change state (queues, latches) override this.
    fn peek(&self, offset: u16) -> u8 {
        self.read(offset)
    }
}

/// Shared handle to an attached device.
///
/// The bus holds one clone; whoever built the system may hold others to inspect
/// or feed the device between `execute` calls.
pub type DeviceHandle = Rc<RefCell<dyn Device>>;

/// Error returned by a bus write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// No attached device claims the written address.
    UnmappedWrite {
        /// Address of the rejected write
        address: u16,
        /// Byte that was being written
        value: u8,
    },
}

impl std::fmt::Display for BusError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BusError::UnmappedWrite { address, value } => {
                write!(
                    f,
                    "Write of 0x{:02X} to unmapped address 0x{:04X}",
                    value, address
                )
            }
        }
    }
}

impl std::error::Error for BusError {}

/// Internal mapping of a device to an address range.
struct DeviceMapping {
    base_addr: u16,
    size: u32,
    device: DeviceHandle,
}

impl DeviceMapping {
    /// Exclusive end of the range, clipped to the 64KB address space.
    fn end(&self) -> u32 {
        u32::from(self.base_addr)
            .saturating_add(self.size)
            .min(0x1_0000)
    }

    fn offset_of(&self, addr: u16) -> Option<u16> {
        if addr >= self.base_addr && u32::from(addr) < self.end() {
            Some(addr - self.base_addr)
        } else {
            None
        }
    }
}

/// Address-dispatch bus that routes read/write operations to attached devices.
///
/// # Address Routing
///
/// When the CPU reads or writes an address:
/// 1. Scan mappings in attach order
/// 2. The first mapping whose range `[base, base + size)` contains the address wins
/// 3. Its device is called with offset `address - base`
/// 4. If nothing matches, reads return [`UNMAPPED_READ_VALUE`] and writes fail with
///    [`BusError::UnmappedWrite`]
///
/// Overlapping ranges are accepted. The earlier mapping shadows the later one
/// wherever both match.
///
/// # Examples
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use bus6502::{Bus, BusError, MemoryBus, RamDevice};
///
/// let mut bus = Bus::new();
/// bus.attach(0x0000, 0x4000, Rc::new(RefCell::new(RamDevice::new(0x4000))));
///
/// bus.write(0x1234, 0x42).unwrap();
/// assert_eq!(bus.read(0x1234), 0x42);
///
/// // Unmapped address
/// assert_eq!(bus.read(0x8000), 0xFF);
/// assert_eq!(
///     bus.write(0x8000, 0x01),
///     Err(BusError::UnmappedWrite { address: 0x8000, value: 0x01 })
/// );
/// ```
pub struct Bus {
    devices: Vec<DeviceMapping>,
}

impl Bus {
    /// Create a new bus with no devices attached.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
        }
    }

    /// Attach a device covering `size` bytes starting at `base_addr`.
    ///
    /// A range running past 0xFFFF is clipped there; a size of 0 maps nothing.
    /// Overlaps with earlier mappings are allowed and logged.
    pub fn attach(&mut self, base_addr: u16, size: u32, device: DeviceHandle) {
        let mapping = DeviceMapping {
            base_addr,
            size,
            device,
        };

        for existing in &self.devices {
            if mapping.size > 0
                && existing.size > 0
                && u32::from(mapping.base_addr) < existing.end()
                && mapping.end() > u32::from(existing.base_addr)
            {
                log::warn!(
                    "device at 0x{:04X}-0x{:04X} overlaps earlier device at 0x{:04X}-0x{:04X}; earlier mapping wins",
                    mapping.base_addr,
                    mapping.end() - 1,
                    existing.base_addr,
                    existing.end() - 1
                );
            }
        }

        self.devices.push(mapping);
    }

    /// Number of attached mappings.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns true if no device is attached.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// `(base, size)` of each mapping, in attach order.
    pub fn mappings(&self) -> impl Iterator<Item = (u16, u32)> + '_ {
        self.devices.iter().map(|m| (m.base_addr, m.size))
    }

    /// Read `addr` for debugging or display without disturbing device state.
    ///
    /// Routes like [`MemoryBus::read`] but calls [`Device::peek`].
    pub fn peek(&self, addr: u16) -> u8 {
        match self.find_device(addr) {
            Some((device, offset)) => device.borrow().peek(offset),
            None => UNMAPPED_READ_VALUE,
        }
    }

    /// Find the first mapping that claims `addr`, with the local offset.
    fn find_device(&self, addr: u16) -> Option<(&DeviceHandle, u16)> {
        self.devices
            .iter()
            .find_map(|m| m.offset_of(addr).map(|offset| (&m.device, offset)))
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for Bus {
    fn read(&self, addr: u16) -> u8 {
        match self.find_device(addr) {
            Some((device, offset)) => device.borrow().read(offset),
            None => UNMAPPED_READ_VALUE,
        }
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        match self.find_device(addr) {
            Some((device, offset)) => {
                device.borrow_mut().write(offset, value);
                Ok(())
            }
            None => Err(BusError::UnmappedWrite {
                address: addr,
                value,
            }),
        }
    }
}
