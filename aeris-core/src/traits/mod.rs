//! Collaborator traits
//!
//! These traits define the seams between the pipeline and everything
//! it does not own: the serial byte source, the display, the optional
//! telemetry writer, and the liveness watchdog. Implementations live
//! with the hardware or host glue, not here.

pub mod display;
pub mod source;
pub mod telemetry;
pub mod watchdog;

pub use display::DisplaySink;
pub use source::ByteSource;
pub use telemetry::{Observation, TelemetrySink};
pub use watchdog::Watchdog;
