//! RAM device implementation.
//!
//! Provides readable and writable memory storage via the Device trait.

use super::Device;

/// Simple RAM device with readable and writable storage.
///
/// Offsets beyond the storage size are mirrored (taken modulo the size), so a
/// 2KB device attached over an 8KB range repeats four times.
///
/// # Examples
///
/// ```rust
/// use bus6502::{RamDevice, Device};
///
/// let mut ram = RamDevice::new(0x0800); // 2KB RAM
///
/// ram.write(0x42, 0xAA);
/// assert_eq!(ram.read(0x42), 0xAA);
///
/// // Mirrored every 2KB
/// assert_eq!(ram.read(0x0842), 0xAA);
/// ```
pub struct RamDevice {
    data: Vec<u8>,
}

impl RamDevice {
    /// Create a new RAM device with `size` zeroed bytes.
    ///
    /// A zero-sized device reads as 0xFF and drops writes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Number of bytes of backing storage.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Load bytes into RAM starting at `offset`, wrapping around the storage.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bus6502::{RamDevice, Device};
    ///
    /// let mut ram = RamDevice::new(1024);
    /// ram.load_bytes(0x100, &[0x01, 0x02, 0x03]);
    ///
    /// assert_eq!(ram.read(0x100), 0x01);
    /// assert_eq!(ram.read(0x101), 0x02);
    /// assert_eq!(ram.read(0x102), 0x03);
    /// ```
    pub fn load_bytes(&mut self, offset: u16, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.write(offset.wrapping_add(i as u16), byte);
        }
    }

    fn index(&self, offset: u16) -> Option<usize> {
        if self.data.is_empty() {
            None
        } else {
            Some(offset as usize % self.data.len())
        }
    }
}

impl Device for RamDevice {
    fn read(&self, offset: u16) -> u8 {
        self.index(offset).map_or(0xFF, |i| self.data[i])
    }

    fn write(&mut self, offset: u16, value: u8) {
        if let Some(i) = self.index(offset) {
            self.data[i] = value;
        }
    }
}
