//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the processor state, the
//! per-cycle bus helpers every instruction is built from, and the step loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, D, I, Z, C (individual bool fields; B only exists on the stack)
//! - **Pins**: RESB/NMIB edge latches, IRQB level, BE, and the output signals
//! - **Cycle counter**: u64 count of bus cycles since the last reset of the counter
//!
//! ## Execution Model
//!
//! Timing is never looked up. Every cycle is a call to [`MemoryBus::access`]
//! followed by [`MemoryBus::tick`], so an instruction costs exactly as many cycles
//! as the bus transactions its handler performs:
//! - `step()`: Service a pending reset or interrupt, or execute one instruction
//! - `run_for_cycles()`: Step until a cycle budget is exhausted

use crate::config::CpuConfig;
use crate::instructions::{build_dispatch_table, Handler};
use crate::interrupts::RunState;
use crate::pins::{EdgeTriggered, Signals};
use crate::status::StatusFlags;
use crate::{ExecutionError, MemoryBus};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "trace")]
use crate::trace::TraceSink;

/// Snapshot of the programmer-visible registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    /// Packed status as PHP would see it minus the B bit.
    pub status: u8,
}

/// 6502 / 65C02 CPU state and execution context.
///
/// The CPU struct contains all processor state including registers, flags, program counter,
/// stack pointer, pin state and cycle counter. It is generic over the bus implementation via
/// the `MemoryBus` trait.
///
/// # Type Parameters
///
/// * `M` - Bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use w65sim::{CPU, FlatMemory};
///
/// // Create memory and set reset vector
/// let mut memory = FlatMemory::new();
/// memory.set_vector(0xFFFC, 0x8000);
///
/// // Initialize CPU - runs the 7-cycle power-on reset
/// let cpu = CPU::new(memory);
///
/// // Inspect initial state
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.flag_i(), true); // Interrupt disable set on reset
/// assert_eq!(cpu.cycle_count(), 7);
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

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Decimal mode flag (enables BCD arithmetic)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag (blocks IRQ when set)
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag (set on unsigned overflow/underflow)
    pub(crate) flag_c: bool,

    /// Bus cycles since construction or the last `reset_cycle_count`
    pub(crate) cycles: u64,

    /// Bus implementation
    pub(crate) memory: M,

    pub(crate) config: CpuConfig,

    /// Handler per opcode, fixed at construction
    pub(crate) dispatch: [Handler<M>; 256],

    /// Opcode of the instruction in flight
    pub(crate) opcode: u8,

    pub(crate) reset_line: EdgeTriggered,
    pub(crate) nmi_line: EdgeTriggered,
    pub(crate) irq_line: bool,
    pub(crate) bus_enabled: bool,

    /// NMI recognised at the last instruction boundary
    pub(crate) nmi_recognized: bool,

    /// IRQ recognised at the last instruction boundary
    pub(crate) irq_recognized: bool,

    pub(crate) run_state: RunState,

    /// Output pins for the cycle in progress
    pub(crate) signals: Signals,

    #[cfg(feature = "trace")]
    pub(crate) tracer: Option<Box<dyn TraceSink>>,

    /// PC of the traced instruction and the operand bytes seen so far
    #[cfg(feature = "trace")]
    pub(crate) trace_pc: u16,
    #[cfg(feature = "trace")]
    pub(crate) trace_operands: [u8; 2],
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a full 65C02 on the given bus and runs the power-on reset.
    ///
    /// See [`CPU::with_config`].
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    /// Creates a new CPU with the given bus and configuration.
    ///
    /// A, X and Y start at zero. The power-on reset sequence then runs through the
    /// bus (7 cycles, ending with the vector pull from 0xFFFC/0xFFFD), leaving:
    /// - PC loaded from the reset vector
    /// - SP = 0xFD
    /// - I set (and D cleared on the 65C02)
    /// - Cycle counter at 7
    ///
    /// # Examples
    ///
    /// ```
    /// use w65sim::{CpuConfig, CPU, FlatMemory};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.set_vector(0xFFFC, 0xC000);
    ///
    /// let cpu = CPU::with_config(mem, CpuConfig::nmos());
    /// assert_eq!(cpu.pc(), 0xC000);
    /// ```
    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        let mut cpu = Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: 0x00,
            flag_n: false,
            flag_v: false,
            flag_d: false,
            flag_i: true,
            flag_z: false,
            flag_c: false,
            cycles: 0,
            memory,
            config,
            dispatch: build_dispatch_table::<M>(&config),
            opcode: 0x00,
            reset_line: EdgeTriggered::default(),
            nmi_line: EdgeTriggered::default(),
            irq_line: false,
            bus_enabled: true,
            nmi_recognized: false,
            irq_recognized: false,
            run_state: RunState::Running,
            signals: Signals::IDLE,
            #[cfg(feature = "trace")]
            tracer: None,
            #[cfg(feature = "trace")]
            trace_pc: 0,
            #[cfg(feature = "trace")]
            trace_operands: [0; 2],
        };
        cpu.reset();
        cpu
    }

    /// Advances the processor by one unit of work.
    ///
    /// Exactly one of the following happens, in priority order:
    /// 1. A latched RESB edge runs the reset sequence
    /// 2. A stopped processor idles for one cycle
    /// 3. A waiting processor either wakes or idles for one cycle
    /// 4. A recognised NMI, then IRQ, is serviced
    /// 5. One instruction is fetched and executed
    ///
    /// Interrupt lines are sampled at the end of every instruction, so an interrupt
    /// raised before this call is serviced by the *following* call.
    ///
    /// # Returns
    ///
    /// - `Ok(())` on success
    /// - `Err(ExecutionError::UnsupportedOpcode(op))` if the fetched opcode is not
    ///   decoded by this configuration. The fetch cycle has been spent and PC points
    ///   past the opcode, so stepping again continues with the next byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use w65sim::{CpuConfig, CPU, ExecutionError, FlatMemory};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.set_vector(0xFFFC, 0x8000);
    /// mem.write(0x8000, 0xDA); // PHX, 65C02 only
    ///
    /// let mut cpu = CPU::with_config(mem, CpuConfig::nmos());
    ///
    /// match cpu.step() {
    ///     Err(ExecutionError::UnsupportedOpcode(op)) => assert_eq!(op, 0xDA),
    ///     other => panic!("unexpected {:?}", other),
    /// }
    /// assert_eq!(cpu.pc(), 0x8001);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        if self.reset_line.take() {
            self.reset();
            return Ok(());
        }

        match self.run_state {
            RunState::Stopped => {
                self.idle_cycle();
                return Ok(());
            }
            RunState::Waiting => {
                if !self.wake_from_wait() {
                    self.idle_cycle();
                    return Ok(());
                }
            }
            RunState::Running => {}
        }

        if self.nmi_recognized {
            self.service_nmi();
            return Ok(());
        }
        if self.irq_recognized {
            self.service_irq();
            return Ok(());
        }

        self.execute_instruction()
    }

    fn execute_instruction(&mut self) -> Result<(), ExecutionError> {
        let i_before = self.flag_i;

        #[cfg(feature = "trace")]
        let before = self.begin_trace();

        let opcode = self.fetch_opcode();
        self.opcode = opcode;
        let handler = self.dispatch[opcode as usize];
        let result = handler(self, opcode);

        #[cfg(feature = "trace")]
        self.finish_trace(before);

        if let Err(error) = result {
            log::warn!("{} at ${:04X}", error, self.pc.wrapping_sub(1));
            return Err(error);
        }

        self.poll_interrupts(i_before);
        Ok(())
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Steps until the cycle budget is exhausted or an error occurs. Returns the
    /// actual number of cycles consumed, which may overshoot the budget by up to
    /// one instruction.
    ///
    /// # Arguments
    ///
    /// * `cycle_budget` - Minimum number of cycles to run
    ///
    /// # Examples
    ///
    /// ```
    /// use w65sim::{CPU, FlatMemory};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.set_vector(0xFFFC, 0x8000);
    /// mem.load(0x8000, &[0xEA; 16]); // NOPs, 2 cycles each
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.reset_cycle_count();
    /// assert_eq!(cpu.run_for_cycles(10).unwrap(), 10);
    /// assert_eq!(cpu.pc(), 0x8005);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    // ========== Pins ==========

    /// Drives RESB. `true` asserts the line.
    ///
    /// The asserting edge latches a reset that the next [`step`](Self::step)
    /// services. Holding the line has no further effect.
    pub fn reset_pin(&mut self, asserted: bool) {
        if self.reset_line.set(asserted) {
            log::debug!("RESB asserted");
        }
    }

    /// Drives NMIB. `true` asserts the line.
    ///
    /// Edge-triggered: each assertion requests exactly one NMI.
    pub fn nmi_pin(&mut self, asserted: bool) {
        if self.nmi_line.set(asserted) {
            log::debug!("NMIB asserted");
        }
    }

    /// Drives IRQB. `true` asserts the line.
    ///
    /// Level-triggered: an IRQ is recognised at every instruction boundary while the
    /// line is held and I is clear.
    pub fn irq_pin(&mut self, asserted: bool) {
        self.irq_line = asserted;
    }

    /// Drives BE. `false` takes the processor off the bus.
    ///
    /// While disabled, reads present address 0x0000 to the host and writes are not
    /// delivered at all. Cycles still elapse and `tick` is still called.
    pub fn bus_enable_pin(&mut self, enabled: bool) {
        self.bus_enabled = enabled;
    }

    // ========== Cycle Counter ==========

    /// Returns the number of bus cycles since construction or the last
    /// [`reset_cycle_count`](Self::reset_cycle_count).
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    /// Zeroes the cycle counter.
    pub fn reset_cycle_count(&mut self) {
        self.cycles = 0;
    }

    /// Moves PC without spending a cycle.
    ///
    /// A debugging aid for test harnesses that start execution mid-image; real
    /// silicon has no equivalent.
    pub fn force_pc(&mut self, address: u16) {
        self.pc = address;
    }

    // ========== Bus Cycles ==========

    fn bus_cycle(&mut self, address: u16, data: u8, is_write: bool) -> u8 {
        let value = match (self.bus_enabled, is_write) {
            (true, _) => self.memory.access(address, data, is_write),
            (false, false) => self.memory.access(0x0000, 0x00, false),
            (false, true) => 0x00,
        };

        #[cfg(feature = "trace")]
        if !is_write {
            self.capture_operand(address, value);
        }

        self.cycles += 1;
        self.memory.tick(self.signals);
        value
    }

    /// One read cycle.
    pub(crate) fn read(&mut self, address: u16) -> u8 {
        self.bus_cycle(address, 0x00, false)
    }

    /// One write cycle.
    pub(crate) fn write(&mut self, address: u16, value: u8) {
        self.bus_cycle(address, value, true);
    }

    /// One cycle with no bus transaction (WAI/STP parking).
    pub(crate) fn idle_cycle(&mut self) {
        self.cycles += 1;
        self.memory.tick(self.signals);
    }

    /// Discarded read of the byte after the opcode, the filler cycle of every
    /// single-byte instruction.
    pub(crate) fn dummy_read_pc(&mut self) {
        self.read(self.pc);
    }

    pub(crate) fn fetch_opcode(&mut self) -> u8 {
        self.signals.sync = true;
        let opcode = self.read(self.pc);
        self.signals.sync = false;
        self.pc = self.pc.wrapping_add(1);
        opcode
    }

    pub(crate) fn fetch_operand(&mut self) -> u8 {
        let value = self.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    pub(crate) fn fetch_operand_word(&mut self) -> u16 {
        let lo = self.fetch_operand();
        let hi = self.fetch_operand();
        u16::from_le_bytes([lo, hi])
    }

    /// Two reads with VPB low.
    pub(crate) fn read_vector(&mut self, vector: u16) -> u16 {
        self.signals.vpb = false;
        let lo = self.read(vector);
        let hi = self.read(vector.wrapping_add(1));
        self.signals.vpb = true;
        u16::from_le_bytes([lo, hi])
    }

    /// Read, dummy write-back, final write of `address` with MLB held low.
    pub(crate) fn read_modify_write(&mut self, address: u16, modify: impl FnOnce(&mut Self, u8) -> u8) {
        self.signals.mlb = false;
        let value = self.read(address);
        self.write(address, value);
        let result = modify(self, value);
        self.write(address, result);
        self.signals.mlb = true;
    }

    // ========== Stack ==========

    pub(crate) fn push(&mut self, value: u8) {
        self.write(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn push_word(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi);
        self.push(lo);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.read(0x0100 | self.sp as u16)
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull();
        let hi = self.pull();
        u16::from_le_bytes([lo, hi])
    }

    /// Discarded read at the current stack slot, the internal cycle before a pull.
    pub(crate) fn dummy_stack_read(&mut self) {
        self.read(0x0100 | self.sp as u16);
    }

    // ========== Flags ==========

    pub(crate) fn set_nz(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }

    /// Returns the status flags. B is never set; it only exists in pushed copies.
    pub fn status_flags(&self) -> StatusFlags {
        let mut flags = StatusFlags::UNUSED;
        flags.set(StatusFlags::NEGATIVE, self.flag_n);
        flags.set(StatusFlags::OVERFLOW, self.flag_v);
        flags.set(StatusFlags::DECIMAL, self.flag_d);
        flags.set(StatusFlags::INTERRUPT_DISABLE, self.flag_i);
        flags.set(StatusFlags::ZERO, self.flag_z);
        flags.set(StatusFlags::CARRY, self.flag_c);
        flags
    }

    /// Returns the status register as a packed byte (NV-BDIZC, bit 5 set, B clear).
    ///
    /// # Examples
    ///
    /// ```
    /// use w65sim::{CPU, FlatMemory};
    ///
    /// let cpu = CPU::new(FlatMemory::new());
    /// // I flag set (bit 2), bit 5 always 1
    /// assert_eq!(cpu.status(), 0b0010_0100);
    /// ```
    pub fn status(&self) -> u8 {
        self.status_flags().bits()
    }

    /// Loads all flags from a packed byte, as PLP does. B and bit 5 are ignored.
    pub fn set_status(&mut self, value: u8) {
        let flags = StatusFlags::pulled(value);
        self.flag_n = flags.contains(StatusFlags::NEGATIVE);
        self.flag_v = flags.contains(StatusFlags::OVERFLOW);
        self.flag_d = flags.contains(StatusFlags::DECIMAL);
        self.flag_i = flags.contains(StatusFlags::INTERRUPT_DISABLE);
        self.flag_z = flags.contains(StatusFlags::ZERO);
        self.flag_c = flags.contains(StatusFlags::CARRY);
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
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns all registers at once.
    pub fn registers(&self) -> Registers {
        Registers {
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            pc: self.pc,
            status: self.status(),
        }
    }

    /// Returns the configuration fixed at construction.
    pub fn config(&self) -> CpuConfig {
        self.config
    }

    /// Output pins as they stood during the most recent cycle.
    pub fn signals(&self) -> Signals {
        self.signals
    }

    /// Running, parked by WAI, or halted by STP.
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Returns a reference to the bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU, returning the bus.
    pub fn into_memory(self) -> M {
        self.memory
    }

    // ========== Register Setters ==========

    /// Sets the accumulator.
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

    /// Sets the stack pointer (offset into page 0x01).
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Status Flag Setters ==========

    /// Sets or clears the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    /// Sets or clears the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets or clears the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets or clears the Interrupt Disable flag.
    ///
    /// IRQ recognition sees the change at the next instruction boundary.
    ///
    /// # Examples
    ///
    /// ```
    /// use w65sim::{CPU, FlatMemory};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.set_vector(0xFFFC, 0x8000);
    /// mem.set_vector(0xFFFE, 0x9000);
    /// mem.load(0x8000, &[0xEA, 0xEA]);
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.irq_pin(true);
    /// cpu.set_flag_i(false);
    ///
    /// cpu.step().unwrap(); // NOP, IRQ recognised as it retires
    /// cpu.step().unwrap(); // IRQ entry
    /// assert_eq!(cpu.pc(), 0x9000);
    /// ```
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets or clears the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets or clears the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }
}
