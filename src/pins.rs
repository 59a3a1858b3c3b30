//! Processor pins.
//!
//! Inputs are modelled as logical levels: `true` means the line is asserted,
//! regardless of the electrical polarity (RESB, NMIB and IRQB are all active-low
//! on the package). Outputs are reported per cycle in [`Signals`].

/// An input pin that latches on its asserting edge.
///
/// The latch persists until the processor takes it, no matter what the line does
/// in the meantime. Used for RESB and NMIB.
///
/// # Examples
///
/// ```
/// use w65sim::EdgeTriggered;
///
/// let mut nmi = EdgeTriggered::default();
/// assert!(nmi.set(true)); // edge
/// assert!(!nmi.set(true)); // still held, no new edge
/// assert!(nmi.take());
/// assert!(!nmi.take());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTriggered {
    level: bool,
    latched: bool,
}

impl EdgeTriggered {
    /// Drives the line to `level`. Returns true if this call latched an edge.
    pub fn set(&mut self, level: bool) -> bool {
        let edge = level && !self.level;
        self.level = level;
        if edge {
            self.latched = true;
        }
        edge
    }

    /// Current line level.
    pub fn level(&self) -> bool {
        self.level
    }

    /// True while an edge is waiting to be serviced.
    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Consumes the latch, returning whether it was set.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.latched)
    }

    /// Drops any pending edge without touching the line level.
    pub fn clear(&mut self) {
        self.latched = false;
    }
}

/// Output pins during one bus cycle.
///
/// Fields hold the *electrical* level so that the active-low outputs read the way
/// a logic analyser would show them: `vpb == false` during a vector pull,
/// `mlb == false` during a locked read-modify-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signals {
    /// High during an opcode fetch.
    pub sync: bool,
    /// Low while a vector byte is being read.
    pub vpb: bool,
    /// Low during the read, dummy write and final write of a read-modify-write.
    pub mlb: bool,
    /// Low while the processor is parked by WAI or halted by STP.
    pub rdy: bool,
}

impl Signals {
    /// Idle state: no fetch, no vector pull, bus unlocked, ready.
    pub const IDLE: Signals = Signals {
        sync: false,
        vpb: true,
        mlb: true,
        rdy: true,
    };
}

impl Default for Signals {
    fn default() -> Self {
        Self::IDLE
    }
}
