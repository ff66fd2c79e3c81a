//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA: Load Accumulator (immediate)
//! - LDX: Load X Register (immediate)
//! - LDY: Load Y Register (immediate)
//! - STA: Store Accumulator (zero page, absolute)
//! - STX: Store X Register (zero page)
//! - STY: Store Y Register (zero page)

use crate::{ExecutionError, MemoryBus, Opcode, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// Loads a byte of memory into the accumulator, setting the zero and negative
/// flags as appropriate.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Other flags: Not affected
pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_value(opcode.metadata().addressing_mode);

    cpu.a = value;
    cpu.status.set_zn(value);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
///
/// Same flag behavior as LDA, applied to X.
pub(crate) fn execute_ldx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_value(opcode.metadata().addressing_mode);

    cpu.x = value;
    cpu.status.set_zn(value);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_value(opcode.metadata().addressing_mode);

    cpu.y = value;
    cpu.status.set_zn(value);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the STA (Store Accumulator) instruction.
///
/// Stores the accumulator at the effective address. No flags affected.
///
/// Addressing modes:
/// - Zero Page (0x85): STA $80
/// - Absolute (0x8D): STA $1234
pub(crate) fn execute_sta<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    let value = cpu.a;
    store(cpu, opcode, value)
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    let value = cpu.x;
    store(cpu, opcode, value)
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    let value = cpu.y;
    store(cpu, opcode, value)
}

fn store<M: MemoryBus>(cpu: &mut CPU<M>, opcode: Opcode, value: u8) -> Result<(), ExecutionError> {
    let addr = cpu.effective_address(opcode.metadata().addressing_mode);

    // Charged before the write so an aborted store still counts in full
    cpu.cycles += opcode.extra_cycles();

    cpu.memory.write(addr, value)?;

    Ok(())
}
