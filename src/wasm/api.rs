//! WASM API for the 6502 emulator.
//!
//! Provides JavaScript-callable interfaces for loading programs, running them
//! against a cycle budget, feeding the byte port and inspecting state.
//!
//! ## Memory Map
//!
//! | Range         | Device                     |
//! |---------------|----------------------------|
//! | $0000-$7FFF   | 32KB RAM                   |
//! | $A000-$A003   | Buffered byte port         |
//! | $C000-$FFFF   | 16KB ROM (NOP fill)        |
//!
//! The ROM's reset vector points at $0600. Its IRQ/BRK vector points at an RTI
//! at $FF00, so a BRK in a user program returns to the byte after its padding.

use crate::{
    BufferedDevice, Bus, CpuConfig, RamDevice, RomDevice, StartAddress, StepOutcome,
    CPU,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

const RAM_BASE: u16 = 0x0000;
const RAM_SIZE: usize = 0x8000;
const PORT_BASE: u16 = 0xA000;
const PORT_SIZE: u32 = 4;
const ROM_BASE: u16 = 0xC000;
const ROM_SIZE: usize = 0x4000;
const DEFAULT_PROGRAM_START: u16 = 0x0600;
const BRK_HANDLER: u16 = 0xFF00;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: CPU<Bus>,
    ram: Rc<RefCell<RamDevice>>,
    port: Rc<RefCell<BufferedDevice>>,
    on_transmit: js_sys::Function,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Create a new emulator. `on_transmit` is called with a one-character
    /// string for every byte the program writes to the port.
    #[wasm_bindgen(constructor)]
    pub fn new(on_transmit: js_sys::Function) -> Self {
        let ram = Rc::new(RefCell::new(RamDevice::new(RAM_SIZE)));
        let port = Self::new_port(&on_transmit);
        let cpu = Self::boot(&ram, &port);

        Emulator6502 {
            cpu,
            ram,
            port,
            on_transmit,
        }
    }

    /// Restart the CPU from the reset vector. RAM contents survive; the port
    /// is replaced with an empty one.
    pub fn reset(&mut self) {
        self.port = Self::new_port(&self.on_transmit);
        self.cpu = Self::boot(&self.ram, &self.port);
    }

    /// Execute a single instruction. Returns false if the opcode was unknown.
    pub fn step(&mut self) -> Result<bool, JsError> {
        self.cpu
            .step()
            .map(|outcome| matches!(outcome, StepOutcome::Executed(_)))
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Run for at least `cycles` budget units and return the units consumed.
    pub fn execute(&mut self, cycles: u32) -> Result<f64, JsError> {
        self.cpu
            .execute(cycles as u64)
            .map(|c| c as f64) // u64 does not cross the boundary
            .map_err(|e| JsError::new(&e.to_string()))
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64
    }

    // Flag getters
    #[wasm_bindgen(getter)]
    pub fn flag_n(&self) -> bool {
        self.cpu.flag_n()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_v(&self) -> bool {
        self.cpu.flag_v()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_d(&self) -> bool {
        self.cpu.flag_d()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_i(&self) -> bool {
        self.cpu.flag_i()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flag_z()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.cpu.flag_c()
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    /// Queue a byte from the terminal for the program to read.
    pub fn receive_byte(&mut self, byte: u8) {
        self.port.borrow_mut().receive_byte(byte);
    }

    /// Read a single byte from memory without disturbing the port.
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().peek(addr)
    }

    /// Read a 256-byte page from memory (for efficient display).
    ///
    /// Peeks rather than reads, so viewing the port page leaves its queue intact.
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as u16) << 8;
        (0..256).map(|i| self.cpu.memory().peek(start + i)).collect()
    }

    /// Load a program into memory and point PC at it.
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) -> Result<(), JsError> {
        self.cpu
            .load_program(program, start_addr)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.cpu.set_pc(start_addr);
        Ok(())
    }
}

impl Emulator6502 {
    fn new_port(on_transmit: &js_sys::Function) -> Rc<RefCell<BufferedDevice>> {
        let port = Rc::new(RefCell::new(BufferedDevice::new()));
        let on_transmit = on_transmit.clone();
        port.borrow_mut().set_transmit_callback(move |byte| {
            let char_str = String::from_utf8(vec![byte]).unwrap_or_else(|_| "?".to_string());
            let _ = on_transmit.call1(&JsValue::NULL, &JsValue::from_str(&char_str));
        });
        port
    }

    /// NOP-filled ROM with the reset vector at the program start and the
    /// IRQ/BRK vector at an RTI.
    fn rom_image() -> Vec<u8> {
        let rom_offset = |addr: u16| (addr - ROM_BASE) as usize;

        let mut rom_data = vec![0xEA; ROM_SIZE];
        rom_data[rom_offset(BRK_HANDLER)] = 0x40; // RTI
        rom_data[rom_offset(0xFFFC)] = (DEFAULT_PROGRAM_START & 0xFF) as u8;
        rom_data[rom_offset(0xFFFD)] = (DEFAULT_PROGRAM_START >> 8) as u8;
        rom_data[rom_offset(0xFFFE)] = (BRK_HANDLER & 0xFF) as u8;
        rom_data[rom_offset(0xFFFF)] = (BRK_HANDLER >> 8) as u8;
        rom_data
    }

    fn boot(ram: &Rc<RefCell<RamDevice>>, port: &Rc<RefCell<BufferedDevice>>) -> CPU<Bus> {
        let mut bus = Bus::new();
        bus.attach(RAM_BASE, RAM_SIZE as u32, ram.clone());
        bus.attach(PORT_BASE, PORT_SIZE, port.clone());
        bus.attach(
            ROM_BASE,
            ROM_SIZE as u32,
            Rc::new(RefCell::new(RomDevice::new(Self::rom_image()))),
        );

        CPU::with_config(
            bus,
            CpuConfig::default().with_start(StartAddress::ResetVector),
        )
    }
}
