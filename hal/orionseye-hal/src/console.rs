//! Serial console abstractions
//!
//! The console is the UART the boot banner is printed on. Only the
//! transmit side is used by the firmware.

/// Console transmitter
pub trait ConsoleTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the console
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Write a line terminated with `\r\n`
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        self.write_blocking(line.as_bytes())?;
        self.write_blocking(b"\r\n")
    }
}

impl<T: ConsoleTx + ?Sized> ConsoleTx for &mut T {
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_blocking(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}

/// Console that discards everything
///
/// Stands in when the real console could not be opened, so the lifecycle
/// still runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullConsole;

impl ConsoleTx for NullConsole {
    type Error = core::convert::Infallible;

    fn write_blocking(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Default console baud rate
pub const DEFAULT_BAUDRATE: u32 = 115_200;

/// Console line settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsoleConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl ConsoleConfig {
    /// Default 8N1 settings at the given baud rate
    pub fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            ..Self::default()
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        buf: [u8; 32],
        len: usize,
    }

    impl ConsoleTx for Recorder {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            let end = self.len + data.len();
            if end > self.buf.len() {
                return Err(());
            }
            self.buf[self.len..end].copy_from_slice(data);
            self.len = end;
            Ok(())
        }

        fn flush(&mut self) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_is_115200_8n1() {
        let cfg = ConsoleConfig::default();
        assert_eq!(cfg.baudrate, 115_200);
        assert_eq!(cfg.data_bits, DataBits::Eight);
        assert_eq!(cfg.parity, Parity::None);
        assert_eq!(cfg.stop_bits, StopBits::One);
    }

    #[test]
    fn test_write_line_appends_crlf() {
        let mut rec = Recorder { buf: [0; 32], len: 0 };
        rec.write_line("hi").unwrap();
        assert_eq!(&rec.buf[..rec.len], b"hi\r\n");
    }

    #[test]
    fn test_null_console_accepts_everything() {
        assert!(NullConsole.write_line("dropped").is_ok());
        assert!(NullConsole.flush().is_ok());
    }

    fn print_ok<C: ConsoleTx>(mut console: C) -> Result<(), C::Error> {
        console.write_line("ok")
    }

    #[test]
    fn test_write_through_mut_ref() {
        let mut rec = Recorder { buf: [0; 32], len: 0 };
        print_ok(&mut rec).unwrap();
        assert_eq!(&rec.buf[..rec.len], b"ok\r\n");
    }
}
