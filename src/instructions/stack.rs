//! # Stack Instructions
//!
//! This module implements stack push and pull operations:
//! - PHA: Push Accumulator
//! - PHP: Push Processor Status
//! - PLA: Pull Accumulator
//! - PLP: Pull Processor Status
//!
//! The stack lives in page 1 (0x0100-0x01FF) and grows downward. SP wraps
//! within the page in both directions.

use crate::{ExecutionError, MemoryBus, Opcode, Status, CPU};

/// Executes the PHA (Push Accumulator) instruction.
///
/// No flags affected.
pub(crate) fn execute_pha<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.cycles += opcode.extra_cycles();

    let value = cpu.a;
    cpu.push(value)?;

    Ok(())
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy always has the Break bit set. The live status register is
/// not modified.
pub(crate) fn execute_php<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.cycles += opcode.extra_cycles();

    let value = cpu.status.pushed();
    cpu.push(value)?;

    Ok(())
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if the pulled value is 0
/// - Negative (N): Set if bit 7 of the pulled value is set
pub(crate) fn execute_pla<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    let value = cpu.pull();

    cpu.a = value;
    cpu.status.set_zn(value);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Replaces the entire status byte with the pulled value, Break and unused
/// bits included.
pub(crate) fn execute_plp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
) -> Result<(), ExecutionError> {
    cpu.status = Status::from_bits_retain(cpu.pull());

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}
