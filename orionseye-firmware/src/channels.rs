//! Inter-task communication
//!
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Idle tick count, signalled by the idle task after every idle period
pub static IDLE_TICK: Signal<CriticalSectionRawMutex, u32> = Signal::new();
