//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status register**: N, V, B, D, I, Z, C plus the unused bit, stored raw
//! - **Cycle counter**: budget units consumed since construction
//!
//! ## Execution Model
//!
//! - `step()`: Fetch, decode and execute one instruction
//! - `execute()`: Run whole instructions until the cycle budget is spent
//!
//! The budget is checked only between instructions, so the last instruction may
//! run past it. Unknown opcodes are logged and skipped.

use crate::addressing::indirect_high_byte_address;
use crate::config::{CpuConfig, StartAddress};
use crate::instructions::{alu, control, flags, inc_dec, load_store, stack, transfer};
use crate::{AddressingMode, BusError, ExecutionError, MemoryBus, Opcode, Status};

/// Base address of the stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// Reset vector location (little-endian).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// BRK/IRQ vector location (little-endian).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// What a single `step()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A supported instruction ran to completion.
    Executed(Opcode),

    /// The fetched byte is not a supported opcode. Only the fetch took effect.
    UnknownOpcode {
        /// The unrecognized byte
        opcode: u8,
        /// Address it was fetched from
        address: u16,
    },
}

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait; every
/// access an instruction performs goes through it.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use bus6502::{CPU, FlatMemory};
///
/// let mut cpu = CPU::new(FlatMemory::new());
///
/// assert_eq!(cpu.pc(), 0x0000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.status(), 0x00);
///
/// // LDX #$80
/// cpu.load_program(&[0xA2, 0x80], 0x0000).unwrap();
/// cpu.execute(2).unwrap();
/// assert_eq!(cpu.x(), 0x80);
/// assert!(cpu.flag_n());
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Processor status
    pub(crate) status: Status,

    /// Budget units consumed since construction
    pub(crate) cycles: u64,

    /// Unknown opcodes fetched since construction
    unknown_opcodes: u64,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the default configuration.
    ///
    /// PC starts at 0x0000, SP at 0xFD, and every other register (status
    /// included) at zero.
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    /// Creates a new CPU with an explicit configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus6502::{CpuConfig, FlatMemory, StartAddress, CPU};
    ///
    /// let config = CpuConfig::default()
    ///     .with_start(StartAddress::Fixed(0x0600))
    ///     .with_stack_pointer(0xFF);
    /// let cpu = CPU::with_config(FlatMemory::new(), config);
    ///
    /// assert_eq!(cpu.pc(), 0x0600);
    /// assert_eq!(cpu.sp(), 0xFF);
    /// ```
    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        let pc = match config.start {
            StartAddress::Zero => 0x0000,
            StartAddress::Fixed(addr) => addr,
            StartAddress::ResetVector => {
                let pc_low = memory.read(RESET_VECTOR) as u16;
                let pc_high = memory.read(RESET_VECTOR.wrapping_add(1)) as u16;
                (pc_high << 8) | pc_low
            }
        };

        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc,
            sp: config.stack_pointer,
            status: Status::empty(),
            cycles: 0,
            unknown_opcodes: 0,
            memory,
        }
    }

    /// Executes one instruction.
    ///
    /// 1. Fetch opcode byte at PC, advance PC, charge one budget unit
    /// 2. Decode it into an [`Opcode`]
    /// 3. Run its handler, which charges the remaining units
    ///
    /// An unknown opcode is logged and counted; no register other than the PC
    /// advance from the fetch changes.
    ///
    /// An instruction aborted by a bus error is still charged its full cost.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::Bus` if a write issued by the instruction has no
    /// device to land on.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus6502::{CPU, FlatMemory, Opcode, StepOutcome};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.load_program(&[0xEA, 0xFF], 0x0000).unwrap();
    ///
    /// assert_eq!(cpu.step().unwrap(), StepOutcome::Executed(Opcode::Nop));
    /// assert_eq!(
    ///     cpu.step().unwrap(),
    ///     StepOutcome::UnknownOpcode { opcode: 0xFF, address: 0x0001 }
    /// );
    /// ```
    pub fn step(&mut self) -> Result<StepOutcome, ExecutionError> {
        let address = self.pc;
        let byte = self.fetch_byte();
        self.cycles += 1;

        let Some(opcode) = Opcode::decode(byte) else {
            self.unknown_opcodes += 1;
            log::warn!("unknown opcode 0x{:02X} at 0x{:04X}", byte, address);
            return Ok(StepOutcome::UnknownOpcode {
                opcode: byte,
                address,
            });
        };

        log::trace!(
            "0x{:04X}: {} (A={:02X} X={:02X} Y={:02X} SP={:02X} P={:02X})",
            address,
            opcode.metadata().mnemonic,
            self.a,
            self.x,
            self.y,
            self.sp,
            self.status.bits()
        );

        self.dispatch(opcode)?;
        Ok(StepOutcome::Executed(opcode))
    }

    /// Runs whole instructions while the cycle budget is above zero.
    ///
    /// Returns the number of budget units actually consumed. This can exceed the
    /// budget, because an instruction that starts always finishes.
    ///
    /// # Errors
    ///
    /// Stops at the first instruction whose bus write fails and returns that
    /// error; the instruction is not rolled back, and its full cost stays
    /// charged in [`cycles`](Self::cycles).
    ///
    /// # Examples
    ///
    /// ```
    /// use bus6502::{CPU, FlatMemory};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    ///
    /// // LDA #$41 (2 units) ; STA $0200 (4 units)
    /// cpu.load_program(&[0xA9, 0x41, 0x8D, 0x00, 0x02], 0x0000).unwrap();
    ///
    /// let consumed = cpu.execute(4).unwrap();
    /// assert_eq!(consumed, 6);
    /// assert_eq!(cpu.read(0x0200), 0x41);
    /// ```
    pub fn execute(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        log::debug!("starting execution for {} cycles at 0x{:04X}", cycle_budget, self.pc);

        let start_cycles = self.cycles;
        while self.cycles - start_cycles < cycle_budget {
            self.step()?;
        }

        let consumed = self.cycles - start_cycles;
        log::debug!(
            "finished execution after {} cycles at 0x{:04X}",
            consumed,
            self.pc
        );
        Ok(consumed)
    }

    fn dispatch(&mut self, opcode: Opcode) -> Result<(), ExecutionError> {
        match opcode {
            Opcode::LdaImmediate => load_store::execute_lda(self, opcode),
            Opcode::LdxImmediate => load_store::execute_ldx(self, opcode),
            Opcode::LdyImmediate => load_store::execute_ldy(self, opcode),
            Opcode::StaZeroPage | Opcode::StaAbsolute => load_store::execute_sta(self, opcode),
            Opcode::StxZeroPage => load_store::execute_stx(self, opcode),
            Opcode::StyZeroPage => load_store::execute_sty(self, opcode),

            Opcode::Tax => transfer::execute_tax(self, opcode),
            Opcode::Tay => transfer::execute_tay(self, opcode),
            Opcode::Txa => transfer::execute_txa(self, opcode),
            Opcode::Tya => transfer::execute_tya(self, opcode),
            Opcode::Tsx => transfer::execute_tsx(self, opcode),
            Opcode::Txs => transfer::execute_txs(self, opcode),

            Opcode::Pha => stack::execute_pha(self, opcode),
            Opcode::Php => stack::execute_php(self, opcode),
            Opcode::Pla => stack::execute_pla(self, opcode),
            Opcode::Plp => stack::execute_plp(self, opcode),

            Opcode::AndImmediate => alu::execute_and(self, opcode),
            Opcode::OraImmediate => alu::execute_ora(self, opcode),
            Opcode::EorImmediate => alu::execute_eor(self, opcode),

            Opcode::IncZeroPage => inc_dec::execute_inc(self, opcode),
            Opcode::DecZeroPage => inc_dec::execute_dec(self, opcode),
            Opcode::Inx => inc_dec::execute_inx(self, opcode),
            Opcode::Iny => inc_dec::execute_iny(self, opcode),
            Opcode::Dex => inc_dec::execute_dex(self, opcode),
            Opcode::Dey => inc_dec::execute_dey(self, opcode),

            Opcode::JmpAbsolute | Opcode::JmpIndirect => control::execute_jmp(self, opcode),
            Opcode::Jsr => control::execute_jsr(self, opcode),
            Opcode::Rts => control::execute_rts(self, opcode),
            Opcode::Brk => control::execute_brk(self, opcode),
            Opcode::Rti => control::execute_rti(self, opcode),
            Opcode::Nop => control::execute_nop(self, opcode),

            Opcode::Clc => flags::execute_flag_op(self, opcode, Status::CARRY, false),
            Opcode::Sec => flags::execute_flag_op(self, opcode, Status::CARRY, true),
            Opcode::Cli => {
                flags::execute_flag_op(self, opcode, Status::INTERRUPT_DISABLE, false)
            }
            Opcode::Sei => flags::execute_flag_op(self, opcode, Status::INTERRUPT_DISABLE, true),
            Opcode::Cld => flags::execute_flag_op(self, opcode, Status::DECIMAL_MODE, false),
            Opcode::Sed => flags::execute_flag_op(self, opcode, Status::DECIMAL_MODE, true),
            Opcode::Clv => flags::execute_flag_op(self, opcode, Status::OVERFLOW, false),
        }
    }

    // ========== Bus Access ==========

    /// Reads a byte through the bus.
    pub fn read(&self, address: u16) -> u8 {
        self.memory.read(address)
    }

    /// Writes a byte through the bus.
    pub fn write(&mut self, address: u16, value: u8) -> Result<(), BusError> {
        self.memory.write(address, value)
    }

    /// Writes `program` byte by byte starting at `start_address`.
    ///
    /// Addresses wrap at 0xFFFF. Loading is not atomic: if a write fails, the
    /// bytes before it stay written.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    /// use bus6502::{Bus, BusError, CPU, RamDevice};
    ///
    /// let mut bus = Bus::new();
    /// bus.attach(0x0000, 0x0100, Rc::new(RefCell::new(RamDevice::new(0x0100))));
    /// let mut cpu = CPU::new(bus);
    ///
    /// let result = cpu.load_program(&[0x11, 0x22, 0x33], 0x00FF);
    /// assert_eq!(result, Err(BusError::UnmappedWrite { address: 0x0100, value: 0x22 }));
    /// assert_eq!(cpu.read(0x00FF), 0x11);
    /// ```
    pub fn load_program(&mut self, program: &[u8], start_address: u16) -> Result<(), BusError> {
        for (i, &byte) in program.iter().enumerate() {
            self.memory
                .write(start_address.wrapping_add(i as u16), byte)?;
        }
        Ok(())
    }

    /// Reads the byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads a little-endian word at PC and advances PC past it.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let low = self.fetch_byte() as u16;
        let high = self.fetch_byte() as u16;
        (high << 8) | low
    }

    /// Reads a little-endian word at `addr`, carrying into the high byte.
    pub(crate) fn read_word(&self, addr: u16) -> u16 {
        let low = self.memory.read(addr) as u16;
        let high = self.memory.read(addr.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    /// Consumes the operand bytes of `mode` and returns the effective address.
    ///
    /// For Immediate this is the address of the operand byte itself. Implied
    /// consumes nothing and yields the current PC.
    pub(crate) fn effective_address(&mut self, mode: AddressingMode) -> u16 {
        match mode {
            AddressingMode::Implied => self.pc,
            AddressingMode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                addr
            }
            AddressingMode::ZeroPage => self.fetch_byte() as u16,
            AddressingMode::Absolute => self.fetch_word(),
            AddressingMode::Indirect => {
                let pointer = self.fetch_word();
                let low = self.memory.read(pointer) as u16;
                let high = self.memory.read(indirect_high_byte_address(pointer)) as u16;
                (high << 8) | low
            }
        }
    }

    /// Consumes the operand bytes of `mode` and reads the operand.
    pub(crate) fn operand_value(&mut self, mode: AddressingMode) -> u8 {
        let addr = self.effective_address(mode);
        self.memory.read(addr)
    }

    /// Pushes a byte to `0x0100 + SP`, then decrements SP.
    pub(crate) fn push(&mut self, value: u8) -> Result<(), BusError> {
        self.memory.write(STACK_PAGE | self.sp as u16, value)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    /// Increments SP, then reads the byte at `0x0100 + SP`.
    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_PAGE | self.sp as u16)
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a raw byte (NV-BDIZC).
    pub fn status(&self) -> u8 {
        self.status.bits()
    }

    /// Returns the status register as flags.
    pub fn status_flags(&self) -> Status {
        self.status
    }

    /// Returns the number of budget units consumed since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns how many unknown opcodes have been fetched since construction.
    pub fn unknown_opcodes(&self) -> u64 {
        self.unknown_opcodes
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.status.contains(Status::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.status.contains(Status::OVERFLOW)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.status.contains(Status::BREAK)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.status.contains(Status::DECIMAL_MODE)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.status.contains(Status::INTERRUPT_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.status.contains(Status::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.status.contains(Status::CARRY)
    }

    // ========== Register Setters ==========

    /// Sets the accumulator. Flags are not touched.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the program counter. The next `step()` fetches from here.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the stack pointer (offset into page 0x01).
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Overwrites the whole status byte.
    pub fn set_status(&mut self, value: u8) {
        self.status = Status::from_bits_retain(value);
    }

    // ========== Memory Access ==========

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and returns its memory bus.
    pub fn into_memory(self) -> M {
        self.memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_cpu_initialization() {
        let cpu = CPU::new(FlatMemory::new());

        assert_eq!(cpu.pc(), 0x0000);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.status(), 0x00);
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.unknown_opcodes(), 0);
    }

    #[test]
    fn test_reset_vector_start() {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x34).unwrap();
        mem.write(0xFFFD, 0x12).unwrap();

        let cpu = CPU::with_config(
            mem,
            CpuConfig::default().with_start(StartAddress::ResetVector),
        );
        assert_eq!(cpu.pc(), 0x1234);
    }

    #[test]
    fn test_step_unknown_opcode() {
        let mut mem = FlatMemory::new();
        mem.write(0x0000, 0x69).unwrap(); // ADC immediate, not implemented

        let mut cpu = CPU::new(mem);
        let outcome = cpu.step().unwrap();

        assert_eq!(
            outcome,
            StepOutcome::UnknownOpcode {
                opcode: 0x69,
                address: 0x0000
            }
        );
        assert_eq!(cpu.pc(), 0x0001);
        assert_eq!(cpu.cycles(), 1);
        assert_eq!(cpu.unknown_opcodes(), 1);
    }

    #[test]
    fn test_execute_runs_whole_instructions() {
        let mut mem = FlatMemory::new();
        // JSR $0600 costs 6 units
        mem.write(0x0000, 0x20).unwrap();
        mem.write(0x0001, 0x00).unwrap();
        mem.write(0x0002, 0x06).unwrap();

        let mut cpu = CPU::new(mem);
        let consumed = cpu.execute(1).unwrap();

        assert_eq!(consumed, 6);
        assert_eq!(cpu.pc(), 0x0600);
    }

    #[test]
    fn test_execute_zero_budget_does_nothing() {
        let mut cpu = CPU::new(FlatMemory::new());
        assert_eq!(cpu.execute(0).unwrap(), 0);
        assert_eq!(cpu.pc(), 0x0000);
    }

    #[test]
    fn test_push_pull_wrap() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.set_sp(0x00);

        cpu.push(0xAB).unwrap();
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.read(0x0100), 0xAB);

        assert_eq!(cpu.pull(), 0xAB);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn test_fetch_wraps_program_counter() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.set_pc(0xFFFF);
        cpu.write(0xFFFF, 0x34).unwrap();
        cpu.write(0x0000, 0x12).unwrap();

        assert_eq!(cpu.fetch_word(), 0x1234);
        assert_eq!(cpu.pc(), 0x0001);
    }
}
