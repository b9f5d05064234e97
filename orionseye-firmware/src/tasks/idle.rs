//! Idle task
//!
//! Runs the lifecycle idle hook forever. The hook itself only waits one
//! idle period; every completed period is published on [`IDLE_TICK`] so the
//! main task can log a heartbeat.

use defmt::*;
use embassy_time::{Delay, Timer};

use orionseye_core::lifecycle::Lifecycle;

use crate::channels::IDLE_TICK;

/// Idle task - owns the lifecycle after setup
#[embassy_executor::task]
pub async fn idle_task(mut lifecycle: Lifecycle<'static>) {
    info!("Idle task started, period {} ms", lifecycle.idle_period_ms());

    let mut delay = Delay;

    loop {
        match lifecycle.idle_async(&mut delay).await {
            Ok(ticks) => {
                trace!("Idle tick {}", ticks);
                IDLE_TICK.signal(ticks);
            }
            Err(e) => {
                // Setup always runs before this task is spawned
                error!("Idle hook rejected: {}", e);
                Timer::after_millis(lifecycle.idle_period_ms() as u64).await;
            }
        }
    }
}
