//! Tests for JSR and RTS.

use bus6502::{FlatMemory, MemoryBus, CPU};

#[test]
fn test_jsr_pushes_return_address() {
    let mut cpu = CPU::new(FlatMemory::new());

    // JSR $0600
    cpu.load_program(&[0x20, 0x00, 0x06], 0x0000).unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0600);
    assert_eq!(cpu.sp(), 0xFB);
    // Return address is the last byte of the JSR: $0002
    assert_eq!(cpu.memory().read(0x01FD), 0x00);
    assert_eq!(cpu.memory().read(0x01FC), 0x02);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_jsr_rts_returns_after_call() {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.load_program(&[0x20, 0x00, 0x06], 0x0000).unwrap();
    cpu.load_program(&[0x60], 0x0600).unwrap();

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0003);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.cycles(), 12);
}

#[test]
fn test_rts_adds_one_to_pulled_address() {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.set_sp(0xFB);
    cpu.memory_mut().write(0x01FC, 0xFF).unwrap();
    cpu.memory_mut().write(0x01FD, 0x12).unwrap();

    cpu.load_program(&[0x60], 0x0000).unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1300);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_nested_subroutines() {
    let mut cpu = CPU::new(FlatMemory::new());

    // $0000: JSR $0010
    // $0010: JSR $0020 ; RTS
    // $0020: LDX #$07 ; RTS
    cpu.load_program(&[0x20, 0x10, 0x00], 0x0000).unwrap();
    cpu.load_program(&[0x20, 0x20, 0x00, 0x60], 0x0010).unwrap();
    cpu.load_program(&[0xA2, 0x07, 0x60], 0x0020).unwrap();

    for _ in 0..5 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.x(), 0x07);
    assert_eq!(cpu.pc(), 0x0003);
    assert_eq!(cpu.sp(), 0xFD);
}

#[test]
fn test_rts_from_empty_stack_wraps_sp() {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.set_sp(0xFF);
    cpu.memory_mut().write(0x0100, 0x00).unwrap();
    cpu.memory_mut().write(0x0101, 0x40).unwrap();

    cpu.load_program(&[0x60], 0x0000).unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.sp(), 0x01);
    assert_eq!(cpu.pc(), 0x4001);
}
