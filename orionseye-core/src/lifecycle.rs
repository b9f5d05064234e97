//! Firmware lifecycle
//!
//! Two hooks drive the device:
//!
//! - **setup** runs once after reset: waits for the console to settle,
//!   prints the startup banner and moves to the idle phase.
//! - **idle** runs forever afterwards, one idle period per call.
//!
//! The phase only moves forward. Once idle, the device never leaves that
//! phase, even if the console failed during setup.

use embedded_hal::delay::DelayNs;
use orionseye_hal::ConsoleTx;

use crate::config::FirmwareConfig;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Power-on, nothing initialized
    Reset,
    /// Setup hook in progress
    Setup,
    /// Idle hook running forever
    Idle,
}

/// Hook called out of order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleError {
    /// Setup was already run
    AlreadyStarted,
    /// Idle called before setup
    NotStarted,
}

/// Setup hook failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError<E> {
    /// Hook called out of order
    Lifecycle(LifecycleError),
    /// Console write or flush failed; the device is idle anyway
    Console(E),
}

impl<E> From<LifecycleError> for SetupError<E> {
    fn from(e: LifecycleError) -> Self {
        SetupError::Lifecycle(e)
    }
}

/// Setup/idle state for one boot
#[derive(Debug, Clone)]
pub struct Lifecycle<'a> {
    config: &'a FirmwareConfig,
    phase: Phase,
    idle_ticks: u32,
}

impl<'a> Lifecycle<'a> {
    /// Create a lifecycle in the reset phase
    pub fn new(config: &'a FirmwareConfig) -> Self {
        Self {
            config,
            phase: Phase::Reset,
            idle_ticks: 0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of completed idle periods (wraps)
    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    /// Idle hook period
    pub fn idle_period_ms(&self) -> u32 {
        self.config.idle_period_ms
    }

    /// Initialization hook
    ///
    /// The console must already be open at the configured baud rate.
    /// Waits `settle_ms`, then writes the banner line and flushes.
    pub fn setup<C, D>(&mut self, console: &mut C, delay: &mut D) -> Result<(), SetupError<C::Error>>
    where
        C: ConsoleTx,
        D: DelayNs,
    {
        if self.phase != Phase::Reset {
            return Err(LifecycleError::AlreadyStarted.into());
        }
        self.phase = Phase::Setup;

        delay.delay_ms(self.config.settle_ms);
        let result = console
            .write_line(self.config.banner.as_str())
            .and_then(|()| console.flush());

        self.phase = Phase::Idle;
        result.map_err(SetupError::Console)
    }

    /// Idle hook
    ///
    /// Waits one idle period and returns the new tick count.
    pub fn idle<D: DelayNs>(&mut self, delay: &mut D) -> Result<u32, LifecycleError> {
        self.ensure_idle()?;
        delay.delay_ms(self.config.idle_period_ms);
        Ok(self.tick())
    }

    /// Async idle hook, for executors with an async timer
    pub async fn idle_async<D>(&mut self, delay: &mut D) -> Result<u32, LifecycleError>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.ensure_idle()?;
        delay.delay_ms(self.config.idle_period_ms).await;
        Ok(self.tick())
    }

    /// Run setup once, then the idle hook forever
    ///
    /// For boards without an executor. Setup failures are ignored: there is
    /// nowhere to report them when the console itself is broken.
    pub fn run_blocking<C, D>(mut self, console: &mut C, delay: &mut D) -> !
    where
        C: ConsoleTx,
        D: DelayNs,
    {
        let _ = self.setup(console, delay);
        loop {
            let _ = self.idle(delay);
        }
    }

    fn ensure_idle(&self) -> Result<(), LifecycleError> {
        match self.phase {
            Phase::Idle => Ok(()),
            Phase::Reset | Phase::Setup => Err(LifecycleError::NotStarted),
        }
    }

    fn tick(&mut self) -> u32 {
        self.idle_ticks = self.idle_ticks.wrapping_add(1);
        self.idle_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Console that records everything written to it
    #[derive(Default)]
    struct MockConsole {
        out: Vec<u8, 128>,
        flushed: bool,
        fail: bool,
    }

    impl ConsoleTx for MockConsole {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.out.extend_from_slice(data)
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.flushed = true;
            Ok(())
        }
    }

    /// Delay that records requested durations instead of sleeping
    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
        calls: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
            self.calls += 1;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ns += ms as u64 * 1_000_000;
            self.calls += 1;
        }
    }

    impl embedded_hal_async::delay::DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            DelayNs::delay_ns(self, ns);
        }
    }

    #[test]
    fn test_setup_prints_banner_after_settle() {
        let config = FirmwareConfig::default();
        let mut lifecycle = Lifecycle::new(&config);
        let mut console = MockConsole::default();
        let mut delay = MockDelay::default();

        assert_eq!(lifecycle.phase(), Phase::Reset);
        lifecycle.setup(&mut console, &mut delay).unwrap();

        assert_eq!(console.out.as_slice(), b"ESP32 backend starting...\r\n");
        assert!(console.flushed);
        assert_eq!(delay.total_ns, 100 * 1_000_000);
        assert_eq!(lifecycle.phase(), Phase::Idle);
    }

    #[test]
    fn test_setup_runs_once() {
        let config = FirmwareConfig::default();
        let mut lifecycle = Lifecycle::new(&config);
        let mut console = MockConsole::default();
        let mut delay = MockDelay::default();

        lifecycle.setup(&mut console, &mut delay).unwrap();
        let again = lifecycle.setup(&mut console, &mut delay);
        assert_eq!(again, Err(SetupError::Lifecycle(LifecycleError::AlreadyStarted)));
        // Banner printed exactly once
        assert_eq!(console.out.len(), "ESP32 backend starting...\r\n".len());
    }

    #[test]
    fn test_console_failure_still_reaches_idle() {
        let config = FirmwareConfig::default();
        let mut lifecycle = Lifecycle::new(&config);
        let mut console = MockConsole {
            fail: true,
            ..Default::default()
        };
        let mut delay = MockDelay::default();

        assert_eq!(
            lifecycle.setup(&mut console, &mut delay),
            Err(SetupError::Console(()))
        );
        assert_eq!(lifecycle.phase(), Phase::Idle);
        assert_eq!(lifecycle.idle(&mut delay), Ok(1));
    }

    #[test]
    fn test_idle_before_setup_rejected() {
        let config = FirmwareConfig::default();
        let mut lifecycle = Lifecycle::new(&config);
        let mut delay = MockDelay::default();

        assert_eq!(lifecycle.idle(&mut delay), Err(LifecycleError::NotStarted));
        assert_eq!(delay.calls, 0);
    }

    #[test]
    fn test_idle_waits_one_period_per_call() {
        let config = FirmwareConfig::default();
        let mut lifecycle = Lifecycle::new(&config);
        let mut console = MockConsole::default();
        let mut delay = MockDelay::default();
        lifecycle.setup(&mut console, &mut delay).unwrap();

        let mut idle_delay = MockDelay::default();
        for expected in 1..=5 {
            assert_eq!(lifecycle.idle(&mut idle_delay), Ok(expected));
        }
        assert_eq!(idle_delay.total_ns, 5 * 1000 * 1_000_000);
        assert_eq!(lifecycle.phase(), Phase::Idle);
        // Idle writes nothing
        assert_eq!(console.out.len(), "ESP32 backend starting...\r\n".len());
    }

    #[test]
    fn test_idle_async_matches_blocking() {
        let mut config = FirmwareConfig::default();
        config.idle_period_ms = 250;
        let mut lifecycle = Lifecycle::new(&config);
        let mut console = MockConsole::default();
        let mut delay = MockDelay::default();
        lifecycle.setup(&mut console, &mut delay).unwrap();

        let mut idle_delay = MockDelay::default();
        let ticks = embassy_futures::block_on(lifecycle.idle_async(&mut idle_delay));
        assert_eq!(ticks, Ok(1));
        assert_eq!(idle_delay.total_ns, 250 * 1_000_000);
    }

    #[cfg(feature = "defmt")]
    #[test]
    fn test_errors_are_defmt_loggable() {
        fn assert_format<T: defmt::Format>() {}
        assert_format::<LifecycleError>();
        assert_format::<SetupError<u8>>();
    }

    #[test]
    fn test_idle_ticks_wrap() {
        let config = FirmwareConfig::default();
        let mut lifecycle = Lifecycle::new(&config);
        lifecycle.phase = Phase::Idle;
        lifecycle.idle_ticks = u32::MAX;

        let mut delay = MockDelay::default();
        assert_eq!(lifecycle.idle(&mut delay), Ok(0));
    }
}
