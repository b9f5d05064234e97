//! Known emission lines
//!
//! A coarse lookup only. Without per-device calibration the wavelength
//! estimate is good to a few nm at best.

/// Maximum distance (exclusive) between a peak and a reference line
pub const MATCH_TOLERANCE_NM: f32 = 5.0;

/// Element or line a peak was matched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    /// Hydrogen Balmer alpha
    HAlpha,
    /// Hydrogen Balmer beta
    HBeta,
    Helium,
    /// Sodium D doublet
    SodiumD,
    Oxygen,
    Iron,
    Calcium,
    Unknown,
}

/// Reference lines in match priority order
const REFERENCE_LINES: [(Element, f32); 7] = [
    (Element::HAlpha, 656.3),
    (Element::HBeta, 486.1),
    (Element::Helium, 587.6),
    (Element::SodiumD, 589.0),
    (Element::Oxygen, 630.0),
    (Element::Iron, 532.8),
    (Element::Calcium, 422.7),
];

impl Element {
    /// Short label as reported to the backend
    pub fn as_str(self) -> &'static str {
        match self {
            Element::HAlpha => "H-alpha",
            Element::HBeta => "H-beta",
            Element::Helium => "He",
            Element::SodiumD => "Na-D",
            Element::Oxygen => "O",
            Element::Iron => "Fe",
            Element::Calcium => "Ca",
            Element::Unknown => "Unknown",
        }
    }

    /// Reference wavelength in nm, if this is a known line
    pub fn reference_nm(self) -> Option<f32> {
        REFERENCE_LINES
            .iter()
            .find(|(e, _)| *e == self)
            .map(|&(_, nm)| nm)
    }
}

/// Match a wavelength against the reference table
///
/// The first entry within tolerance wins, so 588 nm reports helium even
/// though sodium is also in range.
pub fn identify_element(wavelength_nm: f32) -> Element {
    REFERENCE_LINES
        .iter()
        .find(|&&(_, nm)| abs(wavelength_nm - nm) < MATCH_TOLERANCE_NM)
        .map_or(Element::Unknown, |&(e, _)| e)
}

// f32::abs is not in core
fn abs(x: f32) -> f32 {
    if x < 0.0 {
        -x
    } else {
        x
    }
}
