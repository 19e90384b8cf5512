//! PMS5003 particulate sensor protocol
//!
//! This crate decodes the fixed-layout binary frames the Plantower
//! PMS5003 emits on its serial TX line. The sensor pushes one frame
//! roughly every second; each frame carries three groups of 16-bit
//! readings (mass concentrations under standard and atmospheric
//! conditions, plus six cumulative particle-count bins).
//!
//! # Frame format
//!
//! ```text
//! ┌───────┬────────┬───────────────────────────┬──────────┐
//! │ MAGIC │ LENGTH │ DATA                      │ CHECKSUM │
//! │ 2B    │ 2B     │ 26B (13 × u16 BE)         │ 2B       │
//! └───────┴────────┴───────────────────────────┴──────────┘
//! ```
//!
//! MAGIC is `0x42 0x4D` (ASCII "BM"). CHECKSUM is the wrapping 16-bit
//! sum of the first 30 bytes, transmitted big-endian. The LENGTH field
//! is fixed at 28 and is not validated: the checksum is the only
//! integrity check the sensor gives us that actually catches
//! corruption in practice.
//!
//! [`decode`] is a pure function over a byte slice for callers that
//! already hold an aligned frame. [`FrameParser`] is a streaming state
//! machine that re-synchronizes on the magic bytes, for callers
//! reading arbitrary chunks off a serial port.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod parser;
pub mod sample;

pub use frame::{decode, encode, DecodeError, FRAME_LEN, MAGIC};
pub use parser::FrameParser;
pub use sample::{MassConcentration, ParticleCounts, ParticulateSample};
