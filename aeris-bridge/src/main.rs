//! Serial-to-Telegraf bridge
//!
//! Networked variant of the monitor: reads PMS5003 frames from a
//! serial port, scores them, logs the readings, and forwards points
//! to a Telegraf socket listener. Without `--telegraf-address` it
//! degrades to the display-only variant and just logs.

mod console;
mod serial;
mod telemetry;

use std::io;
use std::thread::sleep;
use std::time::{Duration, Instant};

use aeris_core::pipeline::{Pipeline, TickOutcome};
use aeris_core::traits::{ByteSource, DisplaySink, TelemetrySink, Watchdog};
use clap::Parser;
use log::{debug, error, info, warn};

use crate::console::{LogDisplay, LogWatchdog};
use crate::serial::SerialSource;
use crate::telemetry::TelegrafSink;

/// Delay before retrying a serial port that failed to open
const REOPEN_DELAY: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[clap(author, version, about = "PMS5003 serial-to-Telegraf bridge", long_about = None)]
struct Config {
    /// Serial port the sensor is attached to, e.g. /dev/ttyUSB0
    port: String,
    /// Location tag attached to every telemetry point
    #[clap(long, default_value = "default")]
    location: String,
    /// Telegraf socket listener, e.g. tcp://localhost:8094.
    /// Omit to run without telemetry.
    #[clap(long)]
    telegraf_address: Option<String>,
    /// Sensor baud rate
    #[clap(long, default_value_t = 9600)]
    baud: u32,
    /// Minimum seconds between telemetry reports
    #[clap(long, default_value_t = 15)]
    report_interval: u64,
}

fn main() {
    env_logger::init();
    let config = Config::parse();

    let mut telemetry = match &config.telegraf_address {
        Some(address) => match TelegrafSink::connect(address, &config.location) {
            Ok(sink) => {
                info!("reporting to {} as location '{}'", address, config.location);
                Some(sink)
            }
            Err(e) => {
                error!("cannot reach telegraf at {}: {:?}", address, e);
                std::process::exit(1);
            }
        },
        None => {
            info!("no telegraf address given, running display-only");
            None
        }
    };

    let started = Instant::now();
    let interval_ms = config.report_interval * 1_000;

    loop {
        match SerialSource::open(&config.port, config.baud) {
            Ok(source) => {
                info!("opened {} at {} baud", config.port, config.baud);
                let display = LogDisplay::default();
                let watchdog = LogWatchdog::default();
                match telemetry.as_mut() {
                    Some(sink) => drive(
                        Pipeline::new(source, display, watchdog)
                            .with_telemetry(sink, interval_ms),
                        started,
                    ),
                    None => drive(Pipeline::new(source, display, watchdog), started),
                }
            }
            Err(e) => warn!("failed to open {}: {}", config.port, e),
        }
        sleep(REOPEN_DELAY);
    }
}

/// Tick the pipeline until the serial transport fails, then return so
/// the caller can reopen the port.
fn drive<S, D, W, T>(mut pipeline: Pipeline<S, D, W, T>, started: Instant)
where
    S: ByteSource<Error = io::Error>,
    D: DisplaySink,
    W: Watchdog,
    T: TelemetrySink,
{
    loop {
        let now_ms = started.elapsed().as_millis() as u64;
        match pipeline.tick(now_ms) {
            Ok(TickOutcome::Discarded(e)) => debug!("dropped damaged frame: {:?}", e),
            Ok(_) => {}
            Err(e) => {
                error!("serial transport failed: {}", e);
                return;
            }
        }
    }
}
