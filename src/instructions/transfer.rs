//! # Register Transfer Instructions
//!
//! This module implements register transfer operations:
//! - TAX: Transfer Accumulator to X
//! - TAY: Transfer Accumulator to Y
//! - TXA: Transfer X to Accumulator
//! - TYA: Transfer Y to Accumulator
//! - TSX: Transfer Stack Pointer to X
//! - TXS: Transfer X to Stack Pointer
//!
//! All but TXS update Z and N from the destination register.

use crate::{ExecutionError, MemoryBus, Opcode, CPU};

/// Executes the TAX (Transfer Accumulator to X) instruction.
pub(crate) fn execute_tax<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.a;
    cpu.status.set_zn(cpu.x);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(crate) fn execute_tay<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.a;
    cpu.status.set_zn(cpu.y);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(crate) fn execute_txa<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.x;
    cpu.status.set_zn(cpu.a);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(crate) fn execute_tya<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.y;
    cpu.status.set_zn(cpu.a);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
pub(crate) fn execute_tsx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.sp;
    cpu.status.set_zn(cpu.x);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
///
/// Unlike the other transfers, TXS leaves every flag untouched.
pub(crate) fn execute_txs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.sp = cpu.x;

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}
