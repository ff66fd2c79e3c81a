//! End-to-end scenarios on a RAM-backed bus.

use bus6502::{Bus, MemoryBus, RamDevice, CPU};
use std::cell::RefCell;
use std::rc::Rc;

/// 2KB RAM mirrored across $0000-$1FFF, nothing else mapped.
fn setup_cpu() -> CPU<Bus> {
    let mut bus = Bus::new();
    bus.attach(0x0000, 0x2000, Rc::new(RefCell::new(RamDevice::new(0x0800))));
    CPU::new(bus)
}

#[test]
fn test_load_zero_sets_zero_flag() {
    let mut cpu = setup_cpu();
    cpu.load_program(&[0xA9, 0x00], 0x0000).unwrap();
    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_load_0x80_sets_negative_flag() {
    let mut cpu = setup_cpu();
    cpu.load_program(&[0xA9, 0x80], 0x0000).unwrap();
    cpu.step().unwrap();

    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
}

#[test]
fn test_subroutine_call_and_return() {
    let mut cpu = setup_cpu();
    cpu.load_program(&[0x20, 0x00, 0x06], 0x0000).unwrap();
    cpu.load_program(&[0x60], 0x0600).unwrap();

    cpu.execute(12).unwrap();

    assert_eq!(cpu.pc(), 0x0003);
}

#[test]
fn test_load_store_with_budget_of_four() {
    let mut cpu = setup_cpu();
    cpu.load_program(&[0xA9, 0x41, 0x8D, 0x00, 0x02], 0x0000)
        .unwrap();

    cpu.execute(4).unwrap();

    assert_eq!(cpu.memory().read(0x0200), 0x41);
}

#[test]
fn test_read_with_no_device() {
    let cpu = setup_cpu();
    assert_eq!(cpu.read(0x4000), 0xFF);
}
