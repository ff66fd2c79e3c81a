//! # Logical Instructions
//!
//! Bitwise operations between the accumulator and an immediate operand:
//! - AND: Logical AND
//! - ORA: Logical Inclusive OR
//! - EOR: Exclusive OR
//!
//! Each stores the result in A and updates Z and N. Carry and Overflow are
//! untouched.

use crate::{ExecutionError, MemoryBus, Opcode, CPU};

/// Executes the AND (Logical AND) instruction.
///
/// # Examples
///
/// ```text
/// A = 0b1100_1100, operand = 0b1010_1010
/// A & operand = 0b1000_1000 (N=1, Z=0)
/// ```
pub(crate) fn execute_and<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    logical(cpu, opcode, |a, operand| a & operand)
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    logical(cpu, opcode, |a, operand| a | operand)
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    logical(cpu, opcode, |a, operand| a ^ operand)
}

fn logical<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
    op: impl Fn(u8, u8) -> u8,
) -> Result<(), ExecutionError> {
    let operand = cpu.operand_value(opcode.metadata().addressing_mode);

    cpu.a = op(cpu.a, operand);
    cpu.status.set_zn(cpu.a);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}
