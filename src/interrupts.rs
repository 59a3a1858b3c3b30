//! # Reset, Interrupts and Low-Power States
//!
//! Sequencing for everything that is not an ordinary instruction: the reset
//! sequence, NMI and IRQ entry, the instruction-boundary poll, and the WAI/STP
//! parking states.
//!
//! ## Recognition
//!
//! Lines are sampled when an instruction retires. A recognised interrupt is
//! serviced by the next [`CPU::step`], before any further instruction:
//! - RESB is edge-latched and always wins
//! - NMIB is edge-latched; one NMI per assertion
//! - IRQB is level-sensitive and masked by I
//!
//! CLI, SEI and PLP change I too late for the poll that ends them, so the poll
//! sees the value I had before they ran. One more instruction executes after CLI
//! before a waiting IRQ is taken.

use crate::pins::Signals;
use crate::{MemoryBus, CPU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// NMI vector (0xFFFA/0xFFFB).
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector (0xFFFC/0xFFFD).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector (0xFFFE/0xFFFF).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Execution state of the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunState {
    /// Fetching and executing instructions.
    #[default]
    Running,
    /// Parked by WAI until IRQB or NMIB is asserted.
    Waiting,
    /// Halted by STP until reset.
    Stopped,
}

impl<M: MemoryBus> CPU<M> {
    /// Runs the reset sequence immediately.
    ///
    /// Seven cycles: two discarded reads at PC, three stack reads with SP counting
    /// down (the suppressed pushes of an interrupt entry), then the vector pull from
    /// 0xFFFC/0xFFFD. SP ends at 0xFD, I is set, and the 65C02 clears D.
    /// Registers A, X and Y are not touched.
    ///
    /// Any pending reset, NMI or IRQ recognition is discarded and WAI/STP are
    /// released.
    ///
    /// # Examples
    ///
    /// ```
    /// use w65sim::{CPU, FlatMemory};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.set_vector(0xFFFC, 0x8000);
    /// let mut cpu = CPU::new(mem);
    ///
    /// cpu.force_pc(0x1234);
    /// cpu.reset_cycle_count();
    /// cpu.reset();
    ///
    /// assert_eq!(cpu.pc(), 0x8000);
    /// assert_eq!(cpu.cycle_count(), 7);
    /// ```
    pub fn reset(&mut self) {
        self.signals = Signals::IDLE;

        self.dummy_read_pc();
        self.dummy_read_pc();
        for _ in 0..3 {
            self.dummy_stack_read();
            self.sp = self.sp.wrapping_sub(1);
        }

        self.sp = 0xFD;
        self.flag_i = true;
        if self.config.variant.is_cmos() {
            self.flag_d = false;
        }
        self.pc = self.read_vector(RESET_VECTOR);

        self.reset_line.clear();
        self.nmi_line.clear();
        self.nmi_recognized = false;
        self.irq_recognized = false;
        self.run_state = RunState::Running;

        log::debug!("reset: PC=${:04X}", self.pc);
    }

    pub(crate) fn service_nmi(&mut self) {
        self.nmi_line.clear();
        self.nmi_recognized = false;
        self.enter_interrupt(NMI_VECTOR);
        log::debug!("NMI: PC=${:04X}", self.pc);
    }

    pub(crate) fn service_irq(&mut self) {
        self.irq_recognized = false;
        self.enter_interrupt(IRQ_VECTOR);
        log::debug!("IRQ: PC=${:04X}", self.pc);
    }

    /// Hardware interrupt entry. The opcode fetch at PC is discarded, PC is not
    /// advanced, and the status byte is pushed with B clear.
    fn enter_interrupt(&mut self, vector: u16) {
        self.signals.sync = true;
        self.dummy_read_pc();
        self.signals.sync = false;
        self.dummy_read_pc();

        self.push_word(self.pc);
        self.push(self.status_flags().pushed(false));
        self.flag_i = true;
        if self.config.variant.is_cmos() {
            self.flag_d = false;
        }
        self.pc = self.read_vector(vector);

        // Only an NMI can be recognised over the freshly set I
        self.irq_recognized = false;
        self.nmi_recognized = self.nmi_line.is_latched();
    }

    /// Samples the interrupt lines at an instruction boundary.
    pub(crate) fn poll_interrupts(&mut self, i_before: bool) {
        let mask = match self.opcode {
            0x58 | 0x78 | 0x28 => i_before,
            _ => self.flag_i,
        };
        self.irq_recognized = self.irq_line && !mask;
        self.nmi_recognized = self.nmi_line.is_latched();
    }

    /// Checks the lines while parked by WAI. Returns true if the processor woke.
    ///
    /// IRQB wakes the processor even with I set; it then simply resumes at the
    /// instruction after WAI without taking the interrupt.
    pub(crate) fn wake_from_wait(&mut self) -> bool {
        let nmi = self.nmi_line.is_latched();
        if !self.irq_line && !nmi {
            return false;
        }

        self.run_state = RunState::Running;
        self.signals.rdy = true;
        self.irq_recognized = self.irq_line && !self.flag_i;
        self.nmi_recognized = nmi;
        log::debug!("WAI released at ${:04X}", self.pc);
        true
    }

    /// Parks the processor until an interrupt arrives.
    pub(crate) fn enter_wait(&mut self) {
        self.run_state = RunState::Waiting;
        self.signals.rdy = false;
        log::debug!("WAI at ${:04X}", self.pc.wrapping_sub(1));
    }

    /// Halts the processor until reset.
    pub(crate) fn enter_stop(&mut self) {
        self.run_state = RunState::Stopped;
        self.signals.rdy = false;
        log::debug!("STP at ${:04X}", self.pc.wrapping_sub(1));
    }
}
