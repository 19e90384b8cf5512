//! Streaming frame parser with magic-byte resynchronization.
//!
//! The sensor free-runs: frames arrive back-to-back, reads land on
//! arbitrary boundaries, and line noise can corrupt any byte. This
//! parser accepts bytes one at a time, hunts for the two magic bytes,
//! accumulates the rest of the frame, and hands the result to
//! [`decode`](crate::frame::decode). A bad checksum discards only the
//! damaged frame; the parser picks up the next magic marker afterwards.

use heapless::Vec;

use crate::frame::{decode, DecodeError, FRAME_LEN, MAGIC};
use crate::sample::ParticulateSample;

/// Frame bytes following the magic marker
const BODY_LEN: usize = FRAME_LEN - 2;

/// State machine for extracting frames from a serial byte stream
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    body: Vec<u8, BODY_LEN>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Hunting for the first magic byte
    Sync,
    /// Got 0x42, expecting 0x4D
    HalfSync,
    /// Magic matched, accumulating the frame body
    Body,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a parser hunting for the start of a frame
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync,
            body: Vec::new(),
        }
    }

    /// Drop any partial frame and resume hunting for magic bytes
    pub fn reset(&mut self) {
        self.state = ParseState::Sync;
        self.body.clear();
    }

    /// Feed a single byte.
    ///
    /// Returns `Ok(Some(sample))` when the byte completes a valid
    /// frame, `Ok(None)` when more bytes are needed, or the decode
    /// error for a frame that arrived damaged. After an error the
    /// parser has already reset itself.
    pub fn feed(&mut self, byte: u8) -> Result<Option<ParticulateSample>, DecodeError> {
        match self.state {
            ParseState::Sync => {
                if byte == MAGIC[0] {
                    self.state = ParseState::HalfSync;
                }
                // Skip garbage between frames silently
                Ok(None)
            }
            ParseState::HalfSync => {
                if byte == MAGIC[1] {
                    self.body.clear();
                    self.state = ParseState::Body;
                } else if byte != MAGIC[0] {
                    // A second 0x42 may itself start the real marker,
                    // so only anything else sends us back to hunting.
                    self.state = ParseState::Sync;
                }
                Ok(None)
            }
            ParseState::Body => {
                // Cannot overflow: we leave Body as soon as it fills
                let _ = self.body.push(byte);
                if self.body.len() < BODY_LEN {
                    return Ok(None);
                }

                let mut frame = [0u8; FRAME_LEN];
                frame[..2].copy_from_slice(&MAGIC);
                frame[2..].copy_from_slice(&self.body);
                self.reset();

                decode(&frame).map(Some)
            }
        }
    }

    /// Feed a chunk of bytes, collecting every frame it completes.
    ///
    /// Bytes after the last complete frame stay buffered for the next
    /// call, so chunks may split frames anywhere. Damaged frames are
    /// counted through `on_error` and parsing continues with the
    /// remainder of the chunk.
    pub fn feed_slice(
        &mut self,
        bytes: &[u8],
        mut on_frame: impl FnMut(ParticulateSample),
        mut on_error: impl FnMut(DecodeError),
    ) {
        for &byte in bytes {
            match self.feed(byte) {
                Ok(Some(sample)) => on_frame(sample),
                Ok(None) => {}
                Err(e) => on_error(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::encode;
    use crate::sample::{MassConcentration, ParticulateSample};

    fn sample(pm2_5: u16, pm10: u16) -> ParticulateSample {
        ParticulateSample {
            atmospheric: MassConcentration {
                pm1_0: 0,
                pm2_5,
                pm10,
            },
            ..Default::default()
        }
    }

    fn collect(parser: &mut FrameParser, bytes: &[u8]) -> (std::vec::Vec<ParticulateSample>, usize) {
        let mut frames = std::vec::Vec::new();
        let mut errors = 0;
        parser.feed_slice(bytes, |s| frames.push(s), |_| errors += 1);
        (frames, errors)
    }

    #[test]
    fn test_clean_frame() {
        let mut parser = FrameParser::new();
        let (frames, errors) = collect(&mut parser, &encode(&sample(24, 48)));
        assert_eq!(frames, vec![sample(24, 48)]);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_resync_after_garbage() {
        let mut parser = FrameParser::new();
        let mut bytes = vec![0x00, 0xFF, 0x42, 0x13, 0x4D];
        bytes.extend_from_slice(&encode(&sample(5, 7)));

        let (frames, errors) = collect(&mut parser, &bytes);
        assert_eq!(frames, vec![sample(5, 7)]);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_repeated_magic_first_byte() {
        // 0x42 0x42 0x4D ...: the second 0x42 starts the real marker
        let mut parser = FrameParser::new();
        let mut bytes = vec![0x42];
        bytes.extend_from_slice(&encode(&sample(1, 2)));

        let (frames, errors) = collect(&mut parser, &bytes);
        assert_eq!(frames, vec![sample(1, 2)]);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut parser = FrameParser::new();
        let frame = encode(&sample(12, 34));

        let (frames, _) = collect(&mut parser, &frame[..11]);
        assert!(frames.is_empty());

        let (frames, errors) = collect(&mut parser, &frame[11..]);
        assert_eq!(frames, vec![sample(12, 34)]);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_back_to_back_frames() {
        let mut parser = FrameParser::new();
        let mut bytes = std::vec::Vec::new();
        bytes.extend_from_slice(&encode(&sample(1, 1)));
        bytes.extend_from_slice(&encode(&sample(2, 2)));
        bytes.extend_from_slice(&encode(&sample(3, 3)));

        let (frames, errors) = collect(&mut parser, &bytes);
        assert_eq!(frames, vec![sample(1, 1), sample(2, 2), sample(3, 3)]);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_damaged_frame_then_recovery() {
        let mut parser = FrameParser::new();
        let mut bytes = std::vec::Vec::new();

        let mut damaged = encode(&sample(9, 9));
        damaged[20] ^= 0xFF;
        bytes.extend_from_slice(&damaged);
        bytes.extend_from_slice(&encode(&sample(4, 6)));

        let (frames, errors) = collect(&mut parser, &bytes);
        assert_eq!(errors, 1);
        assert_eq!(frames, vec![sample(4, 6)]);
    }

    #[test]
    fn test_reset_discards_partial_frame() {
        let mut parser = FrameParser::new();
        let frame = encode(&sample(8, 8));
        let (frames, _) = collect(&mut parser, &frame[..20]);
        assert!(frames.is_empty());

        parser.reset();

        // The tail of the old frame must not complete anything
        let (frames, errors) = collect(&mut parser, &frame[20..]);
        assert!(frames.is_empty());
        assert_eq!(errors, 0);

        let (frames, _) = collect(&mut parser, &frame);
        assert_eq!(frames, vec![sample(8, 8)]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn recovers_frame_after_noise(
                // Noise free of the first magic byte cannot fake a
                // frame start, so recovery must be exact.
                noise in proptest::collection::vec(any::<u8>().prop_filter("not magic", |&b| b != MAGIC[0]), 0..64),
                pm2_5 in any::<u16>(),
                pm10 in any::<u16>(),
            ) {
                let mut bytes = noise;
                bytes.extend_from_slice(&encode(&sample(pm2_5, pm10)));

                let mut parser = FrameParser::new();
                let mut frames = std::vec::Vec::new();
                let mut errors = 0;
                parser.feed_slice(&bytes, |s| frames.push(s), |_| errors += 1);

                prop_assert_eq!(frames, vec![sample(pm2_5, pm10)]);
                prop_assert_eq!(errors, 0);
            }
        }
    }
}
