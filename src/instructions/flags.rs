//! # Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV each set or clear a single status
//! bit and touch nothing else.

use crate::{ExecutionError, MemoryBus, Opcode, Status, CPU};

/// Sets `flag` to `value` in the status register.
pub(crate) fn execute_flag_op<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: Opcode,
    flag: Status,
    value: bool,
) -> Result<(), ExecutionError> {
    cpu.status.set(flag, value);

    cpu.cycles += opcode.extra_cycles();

    Ok(())
}
