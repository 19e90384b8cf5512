//! Telegraf telemetry sink

use aeris_core::traits::{Observation, TelemetrySink};
use log::{debug, warn};
use telegraf::{Client, Metric};

/// One Influx point per observation.
///
/// AQI fields use `-1.0` for an off-scale reading so dashboards can
/// filter it; the typed `Option` never leaves the process.
#[derive(Metric)]
#[measurement = "particulates"]
struct ParticulateMetric {
    /// AQI for PM2.5, -1 when off-scale
    aqi_pm2_5: f32,
    /// AQI for PM10, -1 when off-scale
    aqi_pm10: f32,
    /// Mass Concentration PM1.0 [µg/m³], ambient
    pm1_0: f32,
    /// Mass Concentration PM2.5 [µg/m³], ambient
    pm2_5: f32,
    /// Mass Concentration PM10 [µg/m³], ambient
    pm10: f32,
    /// Mass Concentration PM1.0 [µg/m³], standard density
    pm1_0_std: f32,
    /// Mass Concentration PM2.5 [µg/m³], standard density
    pm2_5_std: f32,
    /// Mass Concentration PM10 [µg/m³], standard density
    pm10_std: f32,
    /// Particles > 0.3 µm [#/dL]
    gt0_3um: f32,
    /// Particles > 0.5 µm [#/dL]
    gt0_5um: f32,
    /// Particles > 1.0 µm [#/dL]
    gt1_0um: f32,
    /// Particles > 2.5 µm [#/dL]
    gt2_5um: f32,
    /// Particles > 5.0 µm [#/dL]
    gt5_0um: f32,
    /// Particles > 10 µm [#/dL]
    gt10um: f32,
    #[telegraf(tag)]
    location: String,
}

impl ParticulateMetric {
    fn new(observation: &Observation, location: &str) -> Self {
        let sample = &observation.sample;
        let aqi = |reading: Option<aeris_core::aqi::AqiReading>| {
            reading.map(|r| r.value).unwrap_or(-1.0)
        };
        Self {
            aqi_pm2_5: aqi(observation.assessment.pm2_5),
            aqi_pm10: aqi(observation.assessment.pm10),
            pm1_0: f32::from(sample.atmospheric.pm1_0),
            pm2_5: f32::from(sample.atmospheric.pm2_5),
            pm10: f32::from(sample.atmospheric.pm10),
            pm1_0_std: f32::from(sample.standard.pm1_0),
            pm2_5_std: f32::from(sample.standard.pm2_5),
            pm10_std: f32::from(sample.standard.pm10),
            gt0_3um: f32::from(sample.bins.gt0_3um),
            gt0_5um: f32::from(sample.bins.gt0_5um),
            gt1_0um: f32::from(sample.bins.gt1_0um),
            gt2_5um: f32::from(sample.bins.gt2_5um),
            gt5_0um: f32::from(sample.bins.gt5_0um),
            gt10um: f32::from(sample.bins.gt10um),
            location: location.to_string(),
        }
    }
}

/// Writes observations to a Telegraf socket listener.
pub struct TelegrafSink {
    client: Client,
    location: String,
}

impl TelegrafSink {
    /// Connect to a Telegraf listener, e.g. `tcp://localhost:8094`.
    pub fn connect(address: &str, location: &str) -> Result<Self, telegraf::TelegrafError> {
        Ok(Self {
            client: Client::new(address)?,
            location: location.to_string(),
        })
    }
}

impl TelemetrySink for TelegrafSink {
    fn record(&mut self, observation: &Observation) {
        let point = ParticulateMetric::new(observation, &self.location);
        // Telemetry is best-effort; a failed write never stalls the loop
        match self.client.write(&point) {
            Ok(()) => debug!("telegraf point written"),
            Err(e) => warn!("telegraf write failed: {:?}", e),
        }
    }
}
