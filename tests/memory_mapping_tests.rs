//! Integration tests for the address-dispatch bus.
//!
//! These tests verify device routing, mirroring, unmapped access and the CPU
//! running on top of a bus.

use bus6502::{
    BufferedDevice, Bus, BusError, Device, ExecutionError, MemoryBus, RamDevice, RomDevice, CPU,
    UNMAPPED_READ_VALUE,
};
use std::cell::RefCell;
use std::rc::Rc;

fn ram(size: usize) -> Rc<RefCell<RamDevice>> {
    Rc::new(RefCell::new(RamDevice::new(size)))
}

#[test]
fn test_ram_read_write_through_bus() {
    let mut bus = Bus::new();
    bus.attach(0x0000, 0x0400, ram(0x0400));

    bus.write(0x0000, 0x42).unwrap();
    bus.write(0x0100, 0xAA).unwrap();
    bus.write(0x03FF, 0xFF).unwrap();

    assert_eq!(bus.read(0x0000), 0x42);
    assert_eq!(bus.read(0x0100), 0xAA);
    assert_eq!(bus.read(0x03FF), 0xFF);
}

#[test]
fn test_unmapped_read_returns_sentinel() {
    let mut bus = Bus::new();
    bus.attach(0x0000, 0x0400, ram(0x0400));

    assert_eq!(bus.read(0x0400), UNMAPPED_READ_VALUE);
    assert_eq!(bus.read(0x1000), 0xFF);
    assert_eq!(Bus::new().read(0x0000), 0xFF);
}

#[test]
fn test_unmapped_write_is_reported() {
    let mut bus = Bus::new();
    bus.attach(0x0000, 0x0400, ram(0x0400));

    let result = bus.write(0x8000, 0x12);

    assert_eq!(
        result,
        Err(BusError::UnmappedWrite {
            address: 0x8000,
            value: 0x12
        })
    );
}

#[test]
fn test_device_sees_offset_from_base() {
    let device = ram(0x0100);
    let mut bus = Bus::new();
    bus.attach(0x4000, 0x0100, device.clone());

    bus.write(0x4010, 0x99).unwrap();

    assert_eq!(device.borrow().read(0x0010), 0x99);
}

#[test]
fn test_ram_mirroring() {
    let device = ram(0x0800);
    let mut bus = Bus::new();
    bus.attach(0x0000, 0x2000, device);

    bus.write(0x0001, 0x5A).unwrap();

    assert_eq!(bus.read(0x0801), 0x5A);
    assert_eq!(bus.read(0x1001), 0x5A);
    assert_eq!(bus.read(0x1801), 0x5A);
}

#[test]
fn test_first_match_wins_on_overlap() {
    let low = ram(0x1000);
    let high = ram(0x1000);
    let mut bus = Bus::new();
    bus.attach(0x0000, 0x1000, low.clone());
    bus.attach(0x0800, 0x1000, high.clone());

    bus.write(0x0900, 0x11).unwrap();
    bus.write(0x1100, 0x22).unwrap();

    // 0x0900 lies in both ranges and lands on the first device
    assert_eq!(low.borrow().read(0x0900), 0x11);
    assert_eq!(high.borrow().read(0x0100), 0x00);
    // 0x1100 only lies in the second range
    assert_eq!(high.borrow().read(0x0900), 0x22);
    assert_eq!(bus.len(), 2);
}

#[test]
fn test_rom_ignores_writes() {
    let mut bus = Bus::new();
    bus.attach(
        0x8000,
        0x0004,
        Rc::new(RefCell::new(RomDevice::new(vec![0x01, 0x02, 0x03, 0x04]))),
    );

    assert_eq!(bus.write(0x8000, 0xFF), Ok(()));
    assert_eq!(bus.read(0x8000), 0x01);
    assert_eq!(bus.read(0x8003), 0x04);
}

#[test]
fn test_range_clipped_at_top_of_address_space() {
    let mut bus = Bus::new();
    bus.attach(0xFF00, 0x1000, ram(0x1000));

    bus.write(0xFFFF, 0x77).unwrap();
    assert_eq!(bus.read(0xFFFF), 0x77);

    // Does not wrap to the bottom
    assert_eq!(bus.read(0x0000), 0xFF);
    assert!(bus.write(0x0000, 0x01).is_err());
}

#[test]
fn test_size_past_u32_range_is_clipped() {
    let device = ram(0x1_0000);
    let mut bus = Bus::new();
    bus.attach(0x0001, u32::MAX, device.clone());

    bus.write(0x0010, 0x42).unwrap();
    bus.write(0xFFFF, 0x99).unwrap();

    assert_eq!(bus.read(0x0010), 0x42);
    assert_eq!(device.borrow().read(0x000F), 0x42);
    assert_eq!(bus.read(0xFFFF), 0x99);
    assert_eq!(bus.read(0x0000), 0xFF);
    assert!(bus.write(0x0000, 0x01).is_err());

    // A later overlapping attach with a huge size is accepted too
    bus.attach(0xFFFF, u32::MAX, ram(1));
    assert_eq!(bus.read(0xFFFF), 0x99);
    assert_eq!(bus.len(), 2);
}

#[test]
fn test_cpu_on_bus() {
    let mut rom_image = vec![0xEA; 0x4000];
    rom_image[0x3FFC] = 0x00;
    rom_image[0x3FFD] = 0x06;

    let mut bus = Bus::new();
    bus.attach(0x0000, 0x8000, ram(0x8000));
    bus.attach(0xC000, 0x4000, Rc::new(RefCell::new(RomDevice::new(rom_image))));

    let mut cpu = CPU::new(bus);
    cpu.set_pc(0x0600);

    // LDA #$41 ; STA $0200
    cpu.load_program(&[0xA9, 0x41, 0x8D, 0x00, 0x02], 0x0600)
        .unwrap();
    cpu.execute(4).unwrap();

    assert_eq!(cpu.read(0x0200), 0x41);
    assert_eq!(cpu.read(0xFFFD), 0x06);
}

#[test]
fn test_unmapped_store_aborts_execute() {
    let mut bus = Bus::new();
    bus.attach(0x0000, 0x0100, ram(0x0100));
    let mut cpu = CPU::new(bus);

    // LDA #$41 ; STA $0200 ; LDA #$00
    cpu.load_program(&[0xA9, 0x41, 0x8D, 0x00, 0x02, 0xA9, 0x00], 0x0000)
        .unwrap();
    let result = cpu.execute(100);

    assert_eq!(
        result,
        Err(ExecutionError::Bus(BusError::UnmappedWrite {
            address: 0x0200,
            value: 0x41
        }))
    );
    // Stopped right after the failing store, which is charged in full
    assert_eq!(cpu.pc(), 0x0005);
    assert_eq!(cpu.a(), 0x41);
    assert_eq!(cpu.cycles(), 2 + 4);
}

#[test]
fn test_failed_push_is_charged_in_full() {
    let mut bus = Bus::new();
    bus.attach(0x0000, 0x0100, ram(0x0100));
    let mut cpu = CPU::new(bus);

    // PHA with no stack page mapped
    cpu.load_program(&[0x48], 0x0000).unwrap();
    let result = cpu.step();

    assert_eq!(
        result,
        Err(ExecutionError::Bus(BusError::UnmappedWrite {
            address: 0x01FD,
            value: 0x00
        }))
    );
    assert_eq!(cpu.cycles(), 3);
    assert_eq!(cpu.sp(), 0xFD);
}

#[test]
fn test_failed_jsr_is_charged_in_full() {
    let mut bus = Bus::new();
    bus.attach(0x0000, 0x0100, ram(0x0100));
    let mut cpu = CPU::new(bus);

    // JSR $0040 with no stack page mapped
    cpu.load_program(&[0x20, 0x40, 0x00], 0x0000).unwrap();

    assert!(cpu.execute(1).is_err());
    assert_eq!(cpu.cycles(), 6);
    assert_eq!(cpu.pc(), 0x0003);
}

#[test]
fn test_buffered_device_on_bus() {
    let port = Rc::new(RefCell::new(BufferedDevice::new()));
    let mut bus = Bus::new();
    bus.attach(0x0000, 0x0100, ram(0x0100));
    bus.attach(0xA000, 4, port.clone());

    port.borrow_mut().receive_byte(b'H');

    let mut cpu = CPU::new(bus);
    cpu.set_a(b'i');

    // STA $A000
    cpu.load_program(&[0x8D, 0x00, 0xA0], 0x0000).unwrap();
    cpu.step().unwrap();

    assert_eq!(port.borrow_mut().take_transmitted(), vec![b'i']);
    assert_eq!(cpu.read(0xA001) & 0x08, 0x08);
    assert_eq!(cpu.read(0xA000), b'H');
    assert_eq!(cpu.read(0xA001) & 0x08, 0x00);
}

#[test]
fn test_peek_does_not_consume_port_input() {
    let port = Rc::new(RefCell::new(BufferedDevice::new()));
    let mut bus = Bus::new();
    bus.attach(0xA000, 4, port.clone());

    port.borrow_mut().receive_byte(b'A');
    port.borrow_mut().receive_byte(b'B');

    assert_eq!(bus.peek(0xA000), b'A');
    assert_eq!(bus.peek(0xA000), b'A');
    assert_eq!(bus.peek(0xA001) & 0x08, 0x08);
    assert_eq!(port.borrow().rx_len(), 2);

    assert_eq!(bus.read(0xA000), b'A');
    assert_eq!(bus.peek(0xA000), b'B');
    assert_eq!(bus.peek(0xB000), UNMAPPED_READ_VALUE);
}
