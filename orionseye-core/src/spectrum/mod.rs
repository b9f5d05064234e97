//! Spectral analysis of camera frames
//!
//! The spectrometer images a diffraction grating: wavelength runs along the
//! horizontal axis, so each image column maps to one wavelength.
//!
//! Pipeline:
//! 1. Convert to grayscale (mean of R, G, B)
//! 2. Average each column over all rows to get the spectrum profile
//! 3. Normalize the profile to 0..=100
//! 4. Detect local maxima above [`PEAK_THRESHOLD`]
//! 5. Map each peak column to a wavelength (linear 400..=700 nm) and match
//!    it against known emission lines
//!
//! The wavelength mapping is uncalibrated; it assumes the visible band
//! spans the full image width.

pub mod elements;
pub mod image;

use heapless::Vec;

pub use elements::{identify_element, Element, MATCH_TOLERANCE_NM};
pub use image::{ImageView, PixelFormat};

/// Widest supported frame (VGA)
pub const MAX_COLUMNS: usize = 640;

/// Maximum spectral lines kept per analysis
pub const MAX_LINES: usize = 32;

/// Normalized intensity a peak must exceed
pub const PEAK_THRESHOLD: f32 = 70.0;

/// Wavelength of the first column (nm)
pub const WAVELENGTH_MIN_NM: f32 = 400.0;

/// Wavelength of the last column (nm)
pub const WAVELENGTH_MAX_NM: f32 = 700.0;

/// Analysis errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpectrumError {
    /// Width or height is zero
    EmptyImage,
    /// Width exceeds [`MAX_COLUMNS`]
    TooWide,
    /// Pixel buffer length does not match width * height * channels
    BufferSizeMismatch,
}

/// One detected emission line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpectralLine {
    /// Profile column the peak was found at
    pub column: u16,
    /// Wavelength in hundredths of a nm (65630 = 656.30 nm)
    pub wavelength_cnm: u32,
    /// Normalized intensity in hundredths of a percent (10000 = 100%)
    pub intensity_centi: u16,
    /// Best matching element
    pub element: Element,
}

impl SpectralLine {
    /// Wavelength in nm
    pub fn wavelength_nm(&self) -> f32 {
        self.wavelength_cnm as f32 / 100.0
    }

    /// Intensity in percent
    pub fn intensity(&self) -> f32 {
        self.intensity_centi as f32 / 100.0
    }
}

/// Result of analyzing one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Normalized profile, one value per column, each in 0..=100
    pub profile: Vec<f32, MAX_COLUMNS>,
    /// Detected lines, in column order (at most [`MAX_LINES`])
    pub lines: Vec<SpectralLine, MAX_LINES>,
    /// Number of peaks found, including any beyond [`MAX_LINES`]
    pub peak_count: usize,
    /// Mean of the normalized profile
    pub average_intensity: f32,
    /// Max of the normalized profile
    pub max_intensity: f32,
    /// Source image (width, height)
    pub image_size: (u16, u16),
}

impl Spectrum {
    /// Wavelength of each profile column in nm
    pub fn wavelengths(&self) -> impl Iterator<Item = f32> + '_ {
        let n = self.profile.len();
        (0..n).map(move |i| wavelength_at(i, n))
    }
}

/// Analyze one frame
pub fn analyze(image: &ImageView<'_>) -> Result<Spectrum, SpectrumError> {
    let raw = column_profile(image)?;
    let profile = normalize(&raw);
    let n = profile.len();

    let mut lines = Vec::new();
    let mut peak_count = 0;
    for column in detect_peaks(&profile, PEAK_THRESHOLD) {
        peak_count += 1;
        let wavelength = wavelength_at(column, n);
        let line = SpectralLine {
            column: column as u16,
            wavelength_cnm: to_centi(wavelength) as u32,
            intensity_centi: to_centi(profile[column]) as u16,
            element: identify_element(wavelength),
        };
        // Keep the first MAX_LINES, count the rest
        let _ = lines.push(line);
    }

    let sum: f32 = profile.iter().sum();
    let max_intensity = profile.iter().copied().fold(0.0f32, f32::max);

    Ok(Spectrum {
        average_intensity: sum / n as f32,
        max_intensity,
        peak_count,
        lines,
        profile,
        image_size: (image.width(), image.height()),
    })
}

/// Per-column mean gray level
pub fn column_profile(image: &ImageView<'_>) -> Result<Vec<f32, MAX_COLUMNS>, SpectrumError> {
    image.validate()?;

    let width = image.width() as usize;
    let height = image.height() as usize;
    let channels = image.format().channels();

    let mut sums: Vec<u32, MAX_COLUMNS> = Vec::new();
    // Width already checked against MAX_COLUMNS
    let _ = sums.resize(width, 0);

    for row in image.pixels().chunks_exact(width * channels) {
        for (col, px) in row.chunks_exact(channels).enumerate() {
            sums[col] += px.iter().map(|&c| c as u32).sum::<u32>();
        }
    }

    let divisor = (height * channels) as f32;
    Ok(sums.iter().map(|&s| s as f32 / divisor).collect())
}

/// Scale a profile to 0..=100
///
/// A flat profile (every value equal) has no contrast to scale and maps to
/// all zeros.
pub fn normalize(profile: &[f32]) -> Vec<f32, MAX_COLUMNS> {
    let (min, max) = profile
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;

    profile
        .iter()
        .take(MAX_COLUMNS)
        .map(|&v| if range > 0.0 { (v - min) / range * 100.0 } else { 0.0 })
        .collect()
}

/// Indices of strict local maxima above `threshold`
///
/// The first and last samples are never peaks.
pub fn detect_peaks(data: &[f32], threshold: f32) -> impl Iterator<Item = usize> + '_ {
    data.windows(3)
        .enumerate()
        .filter(move |(_, w)| w[1] > threshold && w[1] > w[0] && w[1] > w[2])
        .map(|(i, _)| i + 1)
}

/// Wavelength in nm of column `index` out of `columns`
pub fn wavelength_at(index: usize, columns: usize) -> f32 {
    if columns < 2 {
        return WAVELENGTH_MIN_NM;
    }
    let span = WAVELENGTH_MAX_NM - WAVELENGTH_MIN_NM;
    WAVELENGTH_MIN_NM + span * index as f32 / (columns - 1) as f32
}

/// Round a non-negative value to hundredths, as an integer
fn to_centi(value: f32) -> u32 {
    (value * 100.0 + 0.5) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Gray image, one row, all black except the given bright columns
    fn bright_columns<const W: usize>(bright: &[usize]) -> [u8; W] {
        let mut px = [0u8; W];
        for &c in bright {
            px[c] = 255;
        }
        px
    }

    #[test]
    fn test_wavelength_mapping() {
        assert_eq!(wavelength_at(0, 301), 400.0);
        assert_eq!(wavelength_at(300, 301), 700.0);
        assert_eq!(wavelength_at(150, 301), 550.0);
        assert_eq!(wavelength_at(0, 1), 400.0);
    }

    #[test]
    fn test_single_peak_identified_as_h_alpha() {
        // 301 columns -> 1 nm per column, column 256 = 656 nm
        let px = bright_columns::<301>(&[256]);
        let image = ImageView::new(301, 1, PixelFormat::Gray8, &px);

        let spectrum = analyze(&image).unwrap();
        assert_eq!(spectrum.peak_count, 1);
        assert_eq!(spectrum.lines.len(), 1);

        let line = spectrum.lines[0];
        assert_eq!(line.column, 256);
        assert_eq!(line.wavelength_cnm, 65600);
        assert_eq!(line.intensity_centi, 10000);
        assert_eq!(line.element, Element::HAlpha);
        assert_eq!(spectrum.max_intensity, 100.0);
        assert_eq!(spectrum.image_size, (301, 1));
    }

    #[test]
    fn test_multiple_lines_in_column_order() {
        // 487 nm -> H-beta, 588 nm -> He (listed before Na-D)
        let px = bright_columns::<301>(&[188, 87]);
        let image = ImageView::new(301, 1, PixelFormat::Gray8, &px);

        let spectrum = analyze(&image).unwrap();
        let elements: heapless::Vec<Element, 4> = spectrum.lines.iter().map(|l| l.element).collect();
        assert_eq!(elements.as_slice(), &[Element::HBeta, Element::Helium]);
    }

    #[test]
    fn test_flat_image_has_no_peaks() {
        let px = [42u8; 64];
        let image = ImageView::new(16, 4, PixelFormat::Gray8, &px);

        let spectrum = analyze(&image).unwrap();
        assert!(spectrum.profile.iter().all(|&v| v == 0.0));
        assert_eq!(spectrum.peak_count, 0);
        assert_eq!(spectrum.average_intensity, 0.0);
        assert_eq!(spectrum.max_intensity, 0.0);
    }

    #[test]
    fn test_rgb_is_averaged_over_channels_and_rows() {
        // 2x2 RGB: column 0 rows (30,60,90) and (0,0,0); column 1 all 255
        let px = [30, 60, 90, 255, 255, 255, 0, 0, 0, 255, 255, 255];
        let image = ImageView::new(2, 2, PixelFormat::Rgb888, &px);

        let profile = column_profile(&image).unwrap();
        assert_eq!(profile.as_slice(), &[30.0, 255.0]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let data = [0.0, 70.0, 0.0, 70.5, 0.0];
        let peaks: heapless::Vec<usize, 4> = detect_peaks(&data, PEAK_THRESHOLD).collect();
        assert_eq!(peaks.as_slice(), &[3]);
    }

    #[test]
    fn test_plateau_is_not_a_peak() {
        let data = [0.0, 90.0, 90.0, 0.0];
        assert_eq!(detect_peaks(&data, PEAK_THRESHOLD).count(), 0);
    }

    #[test]
    fn test_edges_are_not_peaks() {
        let data = [100.0, 0.0, 100.0];
        assert_eq!(detect_peaks(&data, PEAK_THRESHOLD).count(), 0);
    }

    #[test]
    fn test_lines_capped_but_counted() {
        // Every other column bright -> 319 interior peaks on 640 columns
        let mut px = [0u8; MAX_COLUMNS];
        for c in (1..MAX_COLUMNS - 1).step_by(2) {
            px[c] = 200;
        }
        let image = ImageView::new(MAX_COLUMNS as u16, 1, PixelFormat::Gray8, &px);

        let spectrum = analyze(&image).unwrap();
        assert_eq!(spectrum.lines.len(), MAX_LINES);
        assert_eq!(spectrum.peak_count, 319);
    }

    #[test]
    fn test_wavelengths_iterator() {
        let px = [0u8, 10, 20];
        let image = ImageView::new(3, 1, PixelFormat::Gray8, &px);
        let spectrum = analyze(&image).unwrap();
        let wl: heapless::Vec<f32, 3> = spectrum.wavelengths().collect();
        assert_eq!(wl.as_slice(), &[400.0, 550.0, 700.0]);
    }

    proptest::proptest! {
        #[test]
        fn prop_normalized_in_range(values in proptest::collection::vec(0.0f32..=255.0, 1..64)) {
            let normalized = normalize(&values);
            proptest::prop_assert_eq!(normalized.len(), values.len());
            for v in normalized.iter() {
                proptest::prop_assert!((0.0..=100.0).contains(v));
            }
        }
    }
}
