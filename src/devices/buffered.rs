//! Generic buffered peripheral.
//!
//! A four-register device that buffers bytes in both directions: bytes pushed in
//! by the host are queued until the CPU reads them, and bytes written by the CPU
//! are collected until the host takes them.

use super::Device;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Status bit: transmitter ready (always set).
pub const STATUS_TX_READY: u8 = 0x10;
/// Status bit: at least one received byte is waiting.
pub const STATUS_RX_READY: u8 = 0x08;
/// Status bit: a received byte was dropped because the queue was full.
pub const STATUS_OVERRUN: u8 = 0x04;

/// Capacity of the receive queue.
pub const RX_CAPACITY: usize = 256;

/// Buffered peripheral with a receive queue and a transmit log.
///
/// ## Register Map (offsets from the mapping base, mirrored every 4 bytes)
///
/// | Offset | Register | Access | Description |
/// |--------|----------|--------|-------------|
/// | 0      | Data     | R/W    | Read pops the receive queue; write transmits |
/// | 1      | Status   | R      | TX-ready, RX-ready and overrun bits |
/// | 2      | Scratch0 | R/W    | Plain storage |
/// | 3      | Scratch1 | R/W    | Plain storage |
///
/// Reading the data register with an empty queue returns the last byte
/// received. A successful read clears the overrun bit.
///
/// # Example
///
/// ```rust
/// use bus6502::{BufferedDevice, Device};
///
/// let mut port = BufferedDevice::new();
///
/// port.receive_byte(b'A');
/// assert_eq!(port.read(1) & 0x08, 0x08); // RX ready
/// assert_eq!(port.read(0), b'A');
///
/// port.write(0, b'Z');
/// assert_eq!(port.take_transmitted(), vec![b'Z']);
/// ```
pub struct BufferedDevice {
    // Reads mutate the queue, so receive state uses interior mutability
    rx_buffer: RefCell<VecDeque<u8>>,
    last_rx_byte: Cell<u8>,
    overrun: Cell<bool>,

    tx_log: Vec<u8>,
    on_transmit: Option<Box<dyn Fn(u8)>>,

    scratch: [u8; 2],
}

impl BufferedDevice {
    /// Create a device with empty queues, no callback and zeroed scratch registers.
    pub fn new() -> Self {
        Self {
            rx_buffer: RefCell::new(VecDeque::with_capacity(RX_CAPACITY)),
            last_rx_byte: Cell::new(0x00),
            overrun: Cell::new(false),
            tx_log: Vec::new(),
            on_transmit: None,
            scratch: [0; 2],
        }
    }

    /// Set a callback invoked for every byte the CPU writes to the data register.
    ///
    /// The byte is still appended to the transmit log.
    pub fn set_transmit_callback<F>(&mut self, callback: F)
    where
        F: Fn(u8) + 'static,
    {
        self.on_transmit = Some(Box::new(callback));
    }

    /// Queue a byte for the CPU to read.
    ///
    /// When the queue is full the byte is dropped and the overrun bit set.
    pub fn receive_byte(&mut self, byte: u8) {
        let mut rx_buffer = self.rx_buffer.borrow_mut();
        if rx_buffer.len() < RX_CAPACITY {
            rx_buffer.push_back(byte);
        } else {
            log::debug!("receive queue full, dropped 0x{:02X}", byte);
            self.overrun.set(true);
        }
    }

    /// Drain and return every byte written by the CPU so far.
    pub fn take_transmitted(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.tx_log)
    }

    /// Bytes written by the CPU that have not been taken yet.
    pub fn transmitted(&self) -> &[u8] {
        &self.tx_log
    }

    /// Number of received bytes waiting to be read.
    pub fn rx_len(&self) -> usize {
        self.rx_buffer.borrow().len()
    }

    /// Current status register value.
    pub fn status(&self) -> u8 {
        let mut status = STATUS_TX_READY;
        if !self.rx_buffer.borrow().is_empty() {
            status |= STATUS_RX_READY;
        }
        if self.overrun.get() {
            status |= STATUS_OVERRUN;
        }
        status
    }

    fn read_data_register(&self) -> u8 {
        match self.rx_buffer.borrow_mut().pop_front() {
            Some(byte) => {
                self.overrun.set(false);
                self.last_rx_byte.set(byte);
                byte
            }
            None => self.last_rx_byte.get(),
        }
    }

    fn write_data_register(&mut self, value: u8) {
        self.tx_log.push(value);
        if let Some(ref callback) = self.on_transmit {
            callback(value);
        }
    }
}

impl Default for BufferedDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for BufferedDevice {
    fn read(&self, offset: u16) -> u8 {
        match offset & 0x03 {
            0 => self.read_data_register(),
            _ => self.peek(offset),
        }
    }

    fn peek(&self, offset: u16) -> u8 {
        match offset & 0x03 {
            0 => self
                .rx_buffer
                .borrow()
                .front()
                .copied()
                .unwrap_or_else(|| self.last_rx_byte.get()),
            1 => self.status(),
            2 => self.scratch[0],
            _ => self.scratch[1],
        }
    }

    fn write(&mut self, offset: u16, value: u8) {
        match offset & 0x03 {
            0 => self.write_data_register(value),
            1 => {
                // Status register is read-only
            }
            2 => self.scratch[0] = value,
            _ => self.scratch[1] = value,
        }
    }
}
