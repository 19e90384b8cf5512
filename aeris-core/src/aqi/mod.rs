//! AQI scoring engine
//!
//! Maps a pollutant concentration to an Air Quality Index score and a
//! severity color by piecewise-linear interpolation over an ordered
//! breakpoint table, per the AirNow technical assistance document:
//! <https://www.airnow.gov/publications/air-quality-index/technical-assistance-document-for-reporting-the-daily-aqi>
//!
//! The engine is table-agnostic; the PM2.5 and PM10 tables this
//! monitor uses live in [`tables`].

pub mod tables;

use aeris_protocol::ParticulateSample;

/// A packed RGB color in 5-6-5 bit layout, as TFT controllers take it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Pack channel values (red/blue 0-31, green 0-63).
    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self(red << 11 | green << 5 | blue)
    }
}

/// Severity colors for the AQI bands, approximating the EPA palette.
pub mod colors {
    use super::Rgb565;

    pub const GREEN: Rgb565 = Rgb565::new(0, 57, 0);
    pub const YELLOW: Rgb565 = Rgb565::new(31, 63, 0);
    pub const ORANGE: Rgb565 = Rgb565::new(31, 31, 0);
    pub const RED: Rgb565 = Rgb565::new(31, 0, 0);
    pub const PURPLE: Rgb565 = Rgb565::new(18, 16, 8);
    pub const MAROON: Rgb565 = Rgb565::new(16, 0, 4);
    /// Shown when a concentration exceeds every breakpoint
    pub const OUT_OF_RANGE: Rgb565 = Rgb565::new(31, 63, 31);
}

/// One row of a breakpoint table.
///
/// The concentration range is inclusive-low, exclusive-high. Rows must
/// be ordered and contiguous from index 0; the first matching row wins.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AqiBreakpoint {
    /// AQI at the bottom of the band
    pub aqi_lo: u16,
    /// AQI at the top of the band
    pub aqi_hi: u16,
    /// Concentration where the band starts [µg/m³], inclusive
    pub conc_lo: f32,
    /// Concentration where the band ends [µg/m³], exclusive
    pub conc_hi: f32,
    /// Severity color for the band
    pub color: Rgb565,
}

/// An interpolated AQI score with its band color.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AqiReading {
    /// Interpolated AQI value
    pub value: f32,
    /// Color of the matched band
    pub color: Rgb565,
}

/// A breakpoint table for one pollutant.
#[derive(Debug, Clone, Copy)]
pub struct AqiScale {
    breakpoints: &'static [AqiBreakpoint],
}

impl AqiScale {
    /// Wrap an ordered breakpoint table.
    pub const fn new(breakpoints: &'static [AqiBreakpoint]) -> Self {
        Self { breakpoints }
    }

    /// Score a concentration in µg/m³.
    ///
    /// Sensor words are 16-bit integers; widen them with `f32::from`
    /// before calling. Returns `None` when the concentration exceeds
    /// the top breakpoint, which callers must render as
    /// [`colors::OUT_OF_RANGE`] rather than an extrapolated score.
    pub fn score(&self, concentration: f32) -> Option<AqiReading> {
        self.breakpoints
            .iter()
            .find(|b| concentration >= b.conc_lo && concentration < b.conc_hi)
            .map(|b| AqiReading {
                value: f32::from(b.aqi_lo)
                    + f32::from(b.aqi_hi - b.aqi_lo) / (b.conc_hi - b.conc_lo)
                        * (concentration - b.conc_lo),
                color: b.color,
            })
    }
}

/// AQI scores for one sample's PM2.5 and PM10 readings.
///
/// Scoring uses the atmospheric concentration group. `None` means the
/// concentration was beyond the top of its table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AqiAssessment {
    pub pm2_5: Option<AqiReading>,
    pub pm10: Option<AqiReading>,
}

impl AqiAssessment {
    /// Score a decoded sample against the standard tables.
    pub fn of(sample: &ParticulateSample) -> Self {
        Self {
            pm2_5: tables::PM2_5.score(f32::from(sample.atmospheric.pm2_5)),
            pm10: tables::PM10.score(f32::from(sample.atmospheric.pm10)),
        }
    }

    /// The color summarizing the worse of the two pollutants.
    ///
    /// PM2.5 wins only on strict excess; an equal score selects PM10.
    /// A pollutant that is out of range loses to one that scored, and
    /// if both are out of range the result is
    /// [`colors::OUT_OF_RANGE`].
    pub fn overall_color(&self) -> Rgb565 {
        match (self.pm2_5, self.pm10) {
            (Some(fine), Some(coarse)) => {
                if fine.value > coarse.value {
                    fine.color
                } else {
                    coarse.color
                }
            }
            (Some(fine), None) => fine.color,
            (None, Some(coarse)) => coarse.color,
            (None, None) => colors::OUT_OF_RANGE,
        }
    }
}
