//! WebAssembly bindings for the bus6502 emulator.
//!
//! Exposes a preassembled machine (RAM, a buffered byte port and ROM on one
//! bus) to JavaScript.

pub mod api;

pub use api::Emulator6502;
