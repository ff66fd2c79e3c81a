//! # Increment and Decrement Instructions
//!
//! - INC/DEC: Increment/decrement a zero page byte
//! - INX/INY: Increment X/Y
//! - DEX/DEY: Decrement X/Y
//!
//! All wrap at 8 bits and update Z and N from the result.

use crate::{ExecutionError, MemoryBus, Opcode, CPU};

/// Executes the INC (Increment Memory) instruction.
///
/// Read-modify-write through the bus. A failed write leaves the flags
/// unchanged.
pub(crate) fn execute_inc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    modify_memory(cpu, opcode, |value| value.wrapping_add(1))
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    modify_memory(cpu, opcode, |value| value.wrapping_sub(1))
}

/// Executes the INX (Increment X) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.status.set_zn(cpu.x);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the INY (Increment Y) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.status.set_zn(cpu.y);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the DEX (Decrement X) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.status.set_zn(cpu.x);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the DEY (Decrement Y) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.status.set_zn(cpu.y);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

fn modify_memory<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
    op: impl Fn(u8) -> u8,
) -> Result<(), ExecutionError> {
    let addr = cpu.effective_address(opcode.metadata().addressing_mode);
    let result = op(cpu.memory.read(addr));

    cpu.cycles += opcode.extra_cycles();

    cpu.memory.write(addr, result)?;
    cpu.status.set_zn(result);

    Ok(())
}
