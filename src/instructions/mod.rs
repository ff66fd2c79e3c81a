//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of the supported instructions, organized
//! by category. Each instruction is a standalone function that takes a mutable
//! reference to the CPU and the decoded opcode.
//!
//! Handlers run after the opcode fetch: PC already points past the opcode byte and
//! one budget unit is already charged. A handler consumes its own operand bytes and
//! charges the rest of the opcode's budget.
//!
//! ## Categories
//!
//! - **alu**: Logical operations with an immediate operand (AND, ORA, EOR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, BRK, RTI, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub mod alu;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod stack;
pub mod transfer;
