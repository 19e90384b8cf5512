//! Console stand-ins for the display and watchdog collaborators
//!
//! On the handheld build the display is a TFT and the watchdog is the
//! SoC's timer; on the host those roles fall to the log output and the
//! supervising service manager respectively.

use aeris_core::aqi::{AqiAssessment, AqiReading};
use aeris_core::traits::{DisplaySink, Watchdog};
use log::{info, trace};

fn fmt(reading: Option<AqiReading>) -> String {
    match reading {
        Some(r) => format!("{:.1} (#{:04x})", r.value, r.color.0),
        None => "off-scale".to_string(),
    }
}

/// Renders AQI updates to the log.
#[derive(Default)]
pub struct LogDisplay;

impl DisplaySink for LogDisplay {
    fn render(&mut self, assessment: &AqiAssessment) {
        info!(
            "AQI pm2.5 {}  pm10 {}  overall #{:04x}",
            fmt(assessment.pm2_5),
            fmt(assessment.pm10),
            assessment.overall_color().0,
        );
    }
}

/// Liveness guard that only leaves a trace; restarts are the service
/// manager's job on the host.
#[derive(Default)]
pub struct LogWatchdog;

impl Watchdog for LogWatchdog {
    fn feed(&mut self) {
        trace!("watchdog fed");
    }
}
