//! Board-agnostic core logic for the Aeris particulate monitor
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or host facilities:
//!
//! - AQI breakpoint tables and the interpolating lookup engine
//! - Collaborator traits (byte source, display, telemetry, watchdog)
//! - The sample pipeline driving read -> decode -> score -> report
//!
//! Frame decoding itself lives in `aeris-protocol`; this crate turns
//! decoded samples into AQI scores and pushes them at collaborators.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod aqi;
pub mod pipeline;
pub mod traits;
