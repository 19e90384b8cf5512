//! Telemetry sink trait for the networked variant

use aeris_protocol::ParticulateSample;

use crate::aqi::AqiAssessment;

/// One reported measurement: the raw sample plus its AQI scores.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Observation {
    pub sample: ParticulateSample,
    pub assessment: AqiAssessment,
}

/// A time-series recorder, invoked at most once per report interval.
///
/// Write failures stay inside the implementation (logged, dropped);
/// the pipeline never sees them and keeps its cadence either way.
pub trait TelemetrySink {
    /// Record one observation.
    fn record(&mut self, observation: &Observation);
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for &mut T {
    fn record(&mut self, observation: &Observation) {
        (**self).record(observation)
    }
}

/// Absent telemetry, for the display-only variant.
impl TelemetrySink for () {
    fn record(&mut self, _observation: &Observation) {}
}
