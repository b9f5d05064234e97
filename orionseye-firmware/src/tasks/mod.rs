//! Embassy async tasks

pub mod idle;

pub use idle::idle_task;
