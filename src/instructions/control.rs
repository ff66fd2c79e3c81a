//! # Control Flow Instructions
//!
//! This module implements jumps, subroutine calls and software interrupts:
//! - JMP: Jump (absolute, indirect)
//! - JSR: Jump to Subroutine
//! - RTS: Return from Subroutine
//! - BRK: Force Break
//! - RTI: Return from Interrupt
//! - NOP: No Operation

use crate::cpu::IRQ_VECTOR;
use crate::{ExecutionError, MemoryBus, Opcode, Status, CPU};

/// Executes the JMP (Jump) instruction.
///
/// Addressing modes:
/// - Absolute (0x4C): JMP $1234
/// - Indirect (0x6C): JMP ($1234)
///
/// The indirect form never carries into the pointer's high byte: a pointer at
/// $xxFF takes its high byte from $xx00.
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.pc = cpu.effective_address(opcode.metadata().addressing_mode);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR instruction (high byte
/// first) and jumps to the target.
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    let target = cpu.fetch_word();
    let return_addr = cpu.pc.wrapping_sub(1);

    cpu.cycles += opcode.extra_cycles();

    cpu.push((return_addr >> 8) as u8)?;
    cpu.push((return_addr & 0xFF) as u8)?;
    cpu.pc = target;

    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the return address (low byte first) and resumes one past it.
pub(crate) fn execute_rts<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    let low = cpu.pull() as u16;
    let high = cpu.pull() as u16;
    cpu.pc = ((high << 8) | low).wrapping_add(1);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the BRK (Force Break) instruction.
///
/// BRK is a two-byte instruction; the byte after the opcode is skipped.
///
/// 1. Push PC + 2 (high byte, then low byte)
/// 2. Push status with the Break bit set
/// 3. Set the Interrupt Disable flag
/// 4. Load PC from the IRQ vector at 0xFFFE/0xFFFF
pub(crate) fn execute_brk<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    // Skip the padding byte
    cpu.pc = cpu.pc.wrapping_add(1);
    let return_addr = cpu.pc;

    cpu.cycles += opcode.extra_cycles();

    cpu.push((return_addr >> 8) as u8)?;
    cpu.push((return_addr & 0xFF) as u8)?;
    let status = cpu.status.pushed();
    cpu.push(status)?;

    cpu.status.insert(Status::INTERRUPT_DISABLE);
    cpu.pc = cpu.read_word(IRQ_VECTOR);

    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the whole status byte, then PC (low byte first). Unlike RTS, the
/// pulled address is used as is.
pub(crate) fn execute_rti<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.status = Status::from_bits_retain(cpu.pull());
    let low = cpu.pull() as u16;
    let high = cpu.pull() as u16;
    cpu.pc = (high << 8) | low;

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the NOP (No Operation) instruction.
pub(crate) fn execute_nop<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.cycles += opcode.extra_cycles();

    Ok(())
}
