//! Sample pipeline
//!
//! Drives one monitor iteration: read a chunk from the byte source,
//! recover frames from it, score them, and push the results at the
//! display, watchdog and (if present) telemetry collaborators.
//!
//! The pipeline is single-threaded and owns no clock; the caller
//! passes a monotonic millisecond timestamp into every [`Pipeline::tick`].

pub mod schedule;

use aeris_protocol::{DecodeError, FrameParser};

use crate::aqi::AqiAssessment;
use crate::traits::{ByteSource, DisplaySink, Observation, TelemetrySink, Watchdog};

pub use schedule::ReportSchedule;

/// Bytes requested from the source per tick.
///
/// Large enough for a few back-to-back frames; the parser carries any
/// split frame over to the next tick.
pub const READ_CHUNK: usize = 128;

/// Default spacing between telemetry reports
pub const DEFAULT_REPORT_INTERVAL_MS: u64 = 15_000;

/// What one tick accomplished.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Nothing arrived this tick
    Idle,
    /// Bytes arrived but no frame completed yet
    Pending,
    /// Only damaged frames completed; the last error, frames dropped
    Discarded(DecodeError),
    /// At least one frame was scored and reported (the last assessment)
    Scored(AqiAssessment),
}

/// The read -> decode -> score -> report orchestrator.
///
/// Telemetry is an optional capability: the display-only variant
/// constructs the pipeline without one and everything else behaves
/// identically.
pub struct Pipeline<S, D, W, T> {
    source: S,
    display: D,
    watchdog: W,
    telemetry: Option<T>,
    parser: FrameParser,
    schedule: ReportSchedule,
}

impl<S, D, W> Pipeline<S, D, W, ()>
where
    S: ByteSource,
    D: DisplaySink,
    W: Watchdog,
{
    /// Pipeline without telemetry (display-only variant).
    pub fn new(source: S, display: D, watchdog: W) -> Self {
        Self {
            source,
            display,
            watchdog,
            telemetry: None,
            parser: FrameParser::new(),
            schedule: ReportSchedule::new(DEFAULT_REPORT_INTERVAL_MS),
        }
    }
}

impl<S, D, W, T> Pipeline<S, D, W, T>
where
    S: ByteSource,
    D: DisplaySink,
    W: Watchdog,
    T: TelemetrySink,
{
    /// Attach a telemetry sink reporting at most every `interval_ms`.
    pub fn with_telemetry<T2: TelemetrySink>(
        self,
        sink: T2,
        interval_ms: u64,
    ) -> Pipeline<S, D, W, T2> {
        Pipeline {
            source: self.source,
            display: self.display,
            watchdog: self.watchdog,
            telemetry: Some(sink),
            parser: self.parser,
            schedule: ReportSchedule::new(interval_ms),
        }
    }

    /// Run one iteration at the given monotonic time.
    ///
    /// Decode failures are local: the damaged frame is dropped, the
    /// outcome records the error, and the next tick reads on. Only
    /// transport errors from the byte source propagate.
    pub fn tick(&mut self, now_ms: u64) -> Result<TickOutcome, S::Error> {
        let Self {
            source,
            display,
            watchdog,
            telemetry,
            parser,
            schedule,
        } = self;

        let mut buf = [0u8; READ_CHUNK];
        let n = source.read(&mut buf)?;
        if n == 0 {
            return Ok(TickOutcome::Idle);
        }

        let mut scored = None;
        let mut last_error = None;
        parser.feed_slice(
            &buf[..n],
            |sample| {
                let assessment = AqiAssessment::of(&sample);
                display.render(&assessment);
                watchdog.feed();

                if let Some(sink) = telemetry.as_mut() {
                    if schedule.is_due(now_ms) {
                        sink.record(&Observation { sample, assessment });
                        schedule.mark_sent(now_ms);
                    }
                }

                scored = Some(assessment);
            },
            |error| last_error = Some(error),
        );

        Ok(match (scored, last_error) {
            (Some(assessment), _) => TickOutcome::Scored(assessment),
            (None, Some(error)) => TickOutcome::Discarded(error),
            (None, None) => TickOutcome::Pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aqi::colors;
    use aeris_protocol::{encode, MassConcentration, ParticulateSample};

    /// Byte source replaying scripted chunks, one per tick.
    struct ScriptSource {
        chunks: std::vec::Vec<std::vec::Vec<u8>>,
        cursor: usize,
    }

    impl ScriptSource {
        fn new(chunks: &[&[u8]]) -> Self {
            Self {
                chunks: chunks.iter().map(|c| c.to_vec()).collect(),
                cursor: 0,
            }
        }
    }

    impl ByteSource for ScriptSource {
        type Error = ();

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            let Some(chunk) = self.chunks.get(self.cursor) else {
                return Ok(0);
            };
            self.cursor += 1;
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        rendered: std::vec::Vec<AqiAssessment>,
    }

    impl DisplaySink for RecordingDisplay {
        fn render(&mut self, assessment: &AqiAssessment) {
            self.rendered.push(*assessment);
        }
    }

    #[derive(Default)]
    struct CountingWatchdog {
        feeds: usize,
    }

    impl Watchdog for CountingWatchdog {
        fn feed(&mut self) {
            self.feeds += 1;
        }
    }

    #[derive(Default)]
    struct RecordingTelemetry {
        records: std::vec::Vec<Observation>,
    }

    impl TelemetrySink for RecordingTelemetry {
        fn record(&mut self, observation: &Observation) {
            self.records.push(*observation);
        }
    }

    fn frame(pm2_5: u16, pm10: u16) -> [u8; 32] {
        encode(&ParticulateSample {
            atmospheric: MassConcentration {
                pm1_0: 0,
                pm2_5,
                pm10,
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_idle_tick() {
        let mut display = RecordingDisplay::default();
        let mut watchdog = CountingWatchdog::default();
        let mut pipeline = Pipeline::new(ScriptSource::new(&[]), &mut display, &mut watchdog);

        assert_eq!(pipeline.tick(0), Ok(TickOutcome::Idle));
        drop(pipeline);
        assert!(display.rendered.is_empty());
        assert_eq!(watchdog.feeds, 0);
    }

    #[test]
    fn test_frame_renders_and_feeds_watchdog() {
        let mut display = RecordingDisplay::default();
        let mut watchdog = CountingWatchdog::default();
        let chunk = frame(24, 48);
        let mut pipeline =
            Pipeline::new(ScriptSource::new(&[&chunk]), &mut display, &mut watchdog);

        let outcome = pipeline.tick(0).unwrap();
        drop(pipeline);

        let TickOutcome::Scored(assessment) = outcome else {
            panic!("expected a scored tick, got {:?}", outcome);
        };
        assert_eq!(assessment.pm2_5.unwrap().color, colors::YELLOW);
        assert_eq!(display.rendered, vec![assessment]);
        assert_eq!(watchdog.feeds, 1);
    }

    #[test]
    fn test_garbage_is_dropped_silently() {
        let mut display = RecordingDisplay::default();
        let mut watchdog = CountingWatchdog::default();
        let mut pipeline = Pipeline::new(
            ScriptSource::new(&[&[0xDE, 0xAD, 0xBE, 0xEF]]),
            &mut display,
            &mut watchdog,
        );

        assert_eq!(pipeline.tick(0), Ok(TickOutcome::Pending));
        drop(pipeline);
        assert!(display.rendered.is_empty());
        assert_eq!(watchdog.feeds, 0);
    }

    #[test]
    fn test_damaged_frame_reports_discard() {
        let mut display = RecordingDisplay::default();
        let mut watchdog = CountingWatchdog::default();
        let mut chunk = frame(24, 48);
        chunk[12] ^= 0xFF;
        let mut pipeline =
            Pipeline::new(ScriptSource::new(&[&chunk]), &mut display, &mut watchdog);

        let outcome = pipeline.tick(0).unwrap();
        drop(pipeline);

        assert!(matches!(
            outcome,
            TickOutcome::Discarded(DecodeError::ChecksumMismatch { .. })
        ));
        assert!(display.rendered.is_empty());
        assert_eq!(watchdog.feeds, 0);
    }

    #[test]
    fn test_frame_split_across_ticks() {
        let mut display = RecordingDisplay::default();
        let mut watchdog = CountingWatchdog::default();
        let chunk = frame(5, 7);
        let mut pipeline = Pipeline::new(
            ScriptSource::new(&[&chunk[..10], &chunk[10..]]),
            &mut display,
            &mut watchdog,
        );

        assert_eq!(pipeline.tick(0), Ok(TickOutcome::Pending));
        assert!(matches!(pipeline.tick(250), Ok(TickOutcome::Scored(_))));
        drop(pipeline);
        assert_eq!(display.rendered.len(), 1);
    }

    #[test]
    fn test_back_to_back_frames_in_one_tick() {
        let mut display = RecordingDisplay::default();
        let mut watchdog = CountingWatchdog::default();
        let mut chunk = std::vec::Vec::new();
        chunk.extend_from_slice(&frame(1, 1));
        chunk.extend_from_slice(&frame(2, 2));
        let mut pipeline =
            Pipeline::new(ScriptSource::new(&[&chunk]), &mut display, &mut watchdog);

        assert!(matches!(pipeline.tick(0), Ok(TickOutcome::Scored(_))));
        drop(pipeline);
        assert_eq!(display.rendered.len(), 2);
        assert_eq!(watchdog.feeds, 2);
    }

    #[test]
    fn test_telemetry_respects_report_interval() {
        let mut telemetry = RecordingTelemetry::default();
        let chunks: std::vec::Vec<[u8; 32]> = (0..4).map(|i| frame(10 + i, 20)).collect();
        let chunk_refs: std::vec::Vec<&[u8]> = chunks.iter().map(|c| c.as_slice()).collect();
        let mut pipeline = Pipeline::new(
            ScriptSource::new(&chunk_refs),
            RecordingDisplay::default(),
            CountingWatchdog::default(),
        )
        .with_telemetry(&mut telemetry, 15_000);

        // First frame reports immediately, the next two are inside the
        // interval, the fourth crosses it.
        assert!(matches!(pipeline.tick(0), Ok(TickOutcome::Scored(_))));
        assert!(matches!(pipeline.tick(1_000), Ok(TickOutcome::Scored(_))));
        assert!(matches!(pipeline.tick(14_999), Ok(TickOutcome::Scored(_))));
        assert!(matches!(pipeline.tick(15_000), Ok(TickOutcome::Scored(_))));
        drop(pipeline);

        assert_eq!(telemetry.records.len(), 2);
        assert_eq!(telemetry.records[0].sample.atmospheric.pm2_5, 10);
        assert_eq!(telemetry.records[1].sample.atmospheric.pm2_5, 13);
    }

    #[test]
    fn test_display_variant_never_records() {
        let chunk = frame(3, 4);
        let mut pipeline = Pipeline::new(
            ScriptSource::new(&[&chunk]),
            RecordingDisplay::default(),
            CountingWatchdog::default(),
        );
        // Telemetry-free pipelines still score and render.
        assert!(matches!(pipeline.tick(0), Ok(TickOutcome::Scored(_))));
    }
}
