//! WebAssembly bindings for the simulator.
//!
//! This module provides JavaScript-callable interfaces to the CPU core, enabling
//! browser-based stepping, pin control and memory inspection.

pub mod api;

pub use api::Emulator65C02;
