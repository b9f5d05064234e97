//! UART0 serial console
//!
//! ESP32-CAM boards route UART0 (TX GPIO1, RX GPIO3) to the programming
//! header, so that is where the boot banner appears. Only TX is claimed.

use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::peripherals::UART0;
use esp_hal::uart::{self, ConfigError, TxError, UartTx};
use esp_hal::Blocking;

use orionseye_hal::console::{DataBits, Parity, StopBits};
use orionseye_hal::{ConsoleConfig, ConsoleTx};

/// Blocking console on UART0
pub struct Esp32Console<'d> {
    tx: UartTx<'d, Blocking>,
}

/// Open UART0 for transmit with the given line settings
pub fn open_console<'d>(
    uart0: UART0<'d>,
    tx_pin: impl PeripheralOutput<'d>,
    config: &ConsoleConfig,
) -> Result<Esp32Console<'d>, ConfigError> {
    let tx = UartTx::new(uart0, uart_config(config))?.with_tx(tx_pin);
    Ok(Esp32Console { tx })
}

/// Translate console settings to esp-hal UART config
fn uart_config(config: &ConsoleConfig) -> uart::Config {
    let data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::_7,
        DataBits::Eight => uart::DataBits::_8,
    };
    let parity = match config.parity {
        Parity::None => uart::Parity::None,
        Parity::Even => uart::Parity::Even,
        Parity::Odd => uart::Parity::Odd,
    };
    let stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::_1,
        StopBits::Two => uart::StopBits::_2,
    };

    uart::Config::default()
        .with_baudrate(config.baudrate)
        .with_data_bits(data_bits)
        .with_parity(parity)
        .with_stop_bits(stop_bits)
}

impl ConsoleTx for Esp32Console<'_> {
    type Error = TxError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let mut remaining = data;
        while !remaining.is_empty() {
            let written = self.tx.write(remaining)?;
            remaining = &remaining[written..];
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.flush()
    }
}
