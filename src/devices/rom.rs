//! ROM device implementation.
//!
//! Provides read-only memory storage via the Device trait.

use super::Device;

/// Read-only memory device.
///
/// Writes are dropped, matching typical ROM hardware. The bus still treats the
/// address as mapped, so a write into ROM is not an unmapped-write error.
/// Reads mirror modulo the image length.
///
/// # Examples
///
/// ```rust
/// use bus6502::{RomDevice, Device};
///
/// let mut rom = RomDevice::new(vec![0xEA, 0xEA, 0xEA]);
///
/// assert_eq!(rom.read(0), 0xEA);
///
/// rom.write(0, 0xFF);
/// assert_eq!(rom.read(0), 0xEA); // Still original value
/// ```
pub struct RomDevice {
    data: Vec<u8>,
}

impl RomDevice {
    /// Create a new ROM device holding `data`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bus6502::RomDevice;
    ///
    /// // 16KB ROM for 0xC000-0xFFFF with the BRK vector pointing at 0xC000
    /// let mut rom_data = vec![0; 0x4000];
    /// rom_data[0x3FFE] = 0x00;
    /// rom_data[0x3FFF] = 0xC0;
    ///
    /// let rom = RomDevice::new(rom_data);
    /// assert_eq!(rom.size(), 0x4000);
    /// ```
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Length of the ROM image in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl Device for RomDevice {
    fn read(&self, offset: u16) -> u8 {
        if self.data.is_empty() {
            return 0xFF;
        }
        self.data[offset as usize % self.data.len()]
    }

    fn write(&mut self, offset: u16, value: u8) {
        log::trace!("ignored write of 0x{:02X} to ROM offset 0x{:04X}", value, offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rom_new() {
        let rom = RomDevice::new(vec![0xEA; 256]);

        assert_eq!(rom.size(), 256);
        assert_eq!(rom.read(0), 0xEA);
        assert_eq!(rom.read(255), 0xEA);
    }

    #[test]
    fn test_rom_read() {
        let rom = RomDevice::new(vec![0x01, 0x02, 0x03, 0x04]);

        assert_eq!(rom.read(0), 0x01);
        assert_eq!(rom.read(1), 0x02);
        assert_eq!(rom.read(2), 0x03);
        assert_eq!(rom.read(3), 0x04);
        // Mirrored
        assert_eq!(rom.read(5), 0x02);
    }

    #[test]
    fn test_rom_write_ignored() {
        let mut rom = RomDevice::new(vec![0xAA; 256]);

        rom.write(0, 0xFF);
        rom.write(100, 0xFF);

        assert_eq!(rom.read(0), 0xAA);
        assert_eq!(rom.read(100), 0xAA);
    }

    #[test]
    fn test_rom_empty_reads_ff() {
        let rom = RomDevice::new(Vec::new());
        assert_eq!(rom.read(0), 0xFF);
    }
}
