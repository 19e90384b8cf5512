//! Decoded sensor readings
//!
//! Plain value types produced by a successful frame decode. All fields
//! are raw 16-bit sensor words; no cross-field consistency is enforced
//! (the sensor may report bin counts that disagree with the mass
//! readings, and we pass that through as-is).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mass concentrations in µg/m³ for the three reported particle sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MassConcentration {
    /// PM1.0 [µg/m³]
    pub pm1_0: u16,
    /// PM2.5 [µg/m³]
    pub pm2_5: u16,
    /// PM10 [µg/m³]
    pub pm10: u16,
}

/// Cumulative particle counts per 0.1 L of air, by minimum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParticleCounts {
    /// Particles > 0.3 µm [#/dL]
    pub gt0_3um: u16,
    /// Particles > 0.5 µm [#/dL]
    pub gt0_5um: u16,
    /// Particles > 1.0 µm [#/dL]
    pub gt1_0um: u16,
    /// Particles > 2.5 µm [#/dL]
    pub gt2_5um: u16,
    /// Particles > 5.0 µm [#/dL]
    pub gt5_0um: u16,
    /// Particles > 10 µm [#/dL]
    pub gt10um: u16,
}

/// One complete reading from the sensor.
///
/// `standard` uses the factory particle-density assumption ("CF=1"),
/// `atmospheric` corrects for ambient conditions. AQI scoring uses the
/// atmospheric group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParticulateSample {
    /// Mass concentrations, standard particle density
    pub standard: MassConcentration,
    /// Mass concentrations, ambient conditions
    pub atmospheric: MassConcentration,
    /// Particle count bins
    pub bins: ParticleCounts,
}
