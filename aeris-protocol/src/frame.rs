//! Frame encoding and decoding for the PMS5003 serial protocol.
//!
//! A frame is exactly 32 bytes: the two magic bytes, a fixed length
//! field, thirteen big-endian 16-bit data words, and a trailing
//! big-endian 16-bit checksum covering everything before it.

use crate::sample::{MassConcentration, ParticleCounts, ParticulateSample};

/// Frame synchronization bytes, ASCII "BM"
pub const MAGIC: [u8; 2] = [0x42, 0x4D];

/// Total frame size in bytes
pub const FRAME_LEN: usize = 32;

/// Value of the frame's length field: bytes after the length field itself
pub const DATA_LEN: u16 = 28;

/// Number of leading bytes covered by the checksum
const CHECKSUM_SPAN: usize = 30;

/// Errors that can occur while decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Fewer than 32 bytes available
    Truncated,
    /// First two bytes are not the sensor's magic marker
    InvalidMagic,
    /// Trailing checksum disagrees with the sum of the frame body
    ChecksumMismatch {
        /// Sum computed over bytes 0..30
        computed: u16,
        /// Checksum carried in bytes 30..32
        received: u16,
    },
}

/// Wrapping 16-bit sum of the checksummed portion of a frame.
fn checksum(bytes: &[u8]) -> u16 {
    bytes[..CHECKSUM_SPAN]
        .iter()
        .fold(0u16, |sum, &b| sum.wrapping_add(u16::from(b)))
}

fn read_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([buf[offset], buf[offset + 1]])
}

/// Decode one frame from the start of `buf`.
///
/// Only the first 32 bytes are inspected; callers holding a larger
/// chunk that may not start on a frame boundary should use
/// [`FrameParser`](crate::parser::FrameParser) instead.
///
/// The length field (bytes 2..4) and the reserved word (bytes 28..30)
/// are covered by the checksum but otherwise not validated, matching
/// the sensor's actual behavior in the field.
pub fn decode(buf: &[u8]) -> Result<ParticulateSample, DecodeError> {
    if buf.len() < FRAME_LEN {
        return Err(DecodeError::Truncated);
    }
    if buf[..2] != MAGIC {
        return Err(DecodeError::InvalidMagic);
    }

    let computed = checksum(buf);
    let received = read_u16(buf, 30);
    if computed != received {
        return Err(DecodeError::ChecksumMismatch { computed, received });
    }

    Ok(ParticulateSample {
        standard: MassConcentration {
            pm1_0: read_u16(buf, 4),
            pm2_5: read_u16(buf, 6),
            pm10: read_u16(buf, 8),
        },
        atmospheric: MassConcentration {
            pm1_0: read_u16(buf, 10),
            pm2_5: read_u16(buf, 12),
            pm10: read_u16(buf, 14),
        },
        bins: ParticleCounts {
            gt0_3um: read_u16(buf, 16),
            gt0_5um: read_u16(buf, 18),
            gt1_0um: read_u16(buf, 20),
            gt2_5um: read_u16(buf, 22),
            gt5_0um: read_u16(buf, 24),
            gt10um: read_u16(buf, 26),
        },
    })
}

/// Encode a sample as a well-formed 32-byte frame.
///
/// The inverse of [`decode`]; used to build test fixtures and sensor
/// simulators. The reserved word is written as zero.
pub fn encode(sample: &ParticulateSample) -> [u8; FRAME_LEN] {
    let mut buf = [0u8; FRAME_LEN];
    buf[..2].copy_from_slice(&MAGIC);
    buf[2..4].copy_from_slice(&DATA_LEN.to_be_bytes());

    let words = [
        sample.standard.pm1_0,
        sample.standard.pm2_5,
        sample.standard.pm10,
        sample.atmospheric.pm1_0,
        sample.atmospheric.pm2_5,
        sample.atmospheric.pm10,
        sample.bins.gt0_3um,
        sample.bins.gt0_5um,
        sample.bins.gt1_0um,
        sample.bins.gt2_5um,
        sample.bins.gt5_0um,
        sample.bins.gt10um,
    ];
    for (i, word) in words.iter().enumerate() {
        buf[4 + 2 * i..6 + 2 * i].copy_from_slice(&word.to_be_bytes());
    }

    let sum = checksum(&buf);
    buf[30..32].copy_from_slice(&sum.to_be_bytes());
    buf
}
