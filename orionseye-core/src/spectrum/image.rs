//! Borrowed view of a raw camera frame

use super::{SpectrumError, MAX_COLUMNS};

/// Pixel layout of a frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// 8-bit grayscale
    Gray8,
    /// 8-bit R, G, B, row-major
    Rgb888,
}

impl PixelFormat {
    /// Bytes per pixel
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb888 => 3,
        }
    }
}

/// Row-major frame, not yet validated
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    width: u16,
    height: u16,
    format: PixelFormat,
    pixels: &'a [u8],
}

impl<'a> ImageView<'a> {
    /// Wrap a raw frame; call [`ImageView::validate`] before reading pixels
    pub fn new(width: u16, height: u16, format: PixelFormat, pixels: &'a [u8]) -> Self {
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Columns (the wavelength axis)
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Rows averaged into each column
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pixel layout of the buffer
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Raw pixel bytes, row-major
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// Check dimensions against the buffer
    pub fn validate(&self) -> Result<(), SpectrumError> {
        if self.width == 0 || self.height == 0 {
            return Err(SpectrumError::EmptyImage);
        }
        if self.width as usize > MAX_COLUMNS {
            return Err(SpectrumError::TooWide);
        }
        let expected = self.width as usize * self.height as usize * self.format.channels();
        if self.pixels.len() != expected {
            return Err(SpectrumError::BufferSizeMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let px = [0u8; 12];
        assert_eq!(ImageView::new(2, 2, PixelFormat::Rgb888, &px).validate(), Ok(()));
        assert_eq!(ImageView::new(4, 3, PixelFormat::Gray8, &px).validate(), Ok(()));
        assert_eq!(
            ImageView::new(2, 2, PixelFormat::Gray8, &px).validate(),
            Err(SpectrumError::BufferSizeMismatch)
        );
        assert_eq!(
            ImageView::new(0, 2, PixelFormat::Gray8, &[]).validate(),
            Err(SpectrumError::EmptyImage)
        );
        assert_eq!(
            ImageView::new(641, 1, PixelFormat::Gray8, &[0u8; 641]).validate(),
            Err(SpectrumError::TooWide)
        );
    }
}
