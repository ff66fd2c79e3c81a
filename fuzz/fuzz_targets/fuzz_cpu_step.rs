//! Fuzz target for CPU execution on a mapped bus.
//!
//! Builds a bus from arbitrary device mappings, seeds registers and memory,
//! then runs a short cycle budget looking for panics and broken invariants.

#![no_main]

use arbitrary::Arbitrary;
use bus6502::{Bus, BusError, ExecutionError, MemoryBus, RamDevice, RomDevice, CPU};
use libfuzzer_sys::fuzz_target;
use std::cell::RefCell;
use std::rc::Rc;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    status: u8,
}

/// One device mapping
#[derive(Debug, Arbitrary)]
enum FuzzDevice {
    Ram { base: u16, size: u32, storage: u16 },
    Rom { base: u16, size: u32, image: Vec<u8> },
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    devices: Vec<FuzzDevice>,
    /// Bytes written at PC before running (instruction + operands)
    program: Vec<u8>,
    budget: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut bus = Bus::new();
    for device in input.devices.iter().take(8) {
        match device {
            FuzzDevice::Ram {
                base,
                size,
                storage,
            } => bus.attach(
                *base,
                *size,
                Rc::new(RefCell::new(RamDevice::new(*storage as usize))),
            ),
            FuzzDevice::Rom { base, size, image } => bus.attach(
                *base,
                *size,
                Rc::new(RefCell::new(RomDevice::new(image.clone()))),
            ),
        }
    }

    let mut cpu = CPU::new(bus);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_pc(input.cpu_state.pc);
    cpu.set_status(input.cpu_state.status);

    // Unmapped writes are expected here, only panics matter
    let _ = cpu.load_program(&input.program, input.cpu_state.pc);

    let budget = input.budget as u64;
    match cpu.execute(budget) {
        Ok(consumed) => {
            assert!(consumed >= budget);
            // BRK is the most expensive instruction
            assert!(consumed < budget + 7);
            assert_eq!(cpu.cycles(), consumed);
        }
        Err(ExecutionError::Bus(BusError::UnmappedWrite { address, .. })) => {
            assert_eq!(cpu.memory().read(address), 0xFF);
        }
    }
});
