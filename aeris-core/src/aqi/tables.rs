//! AirNow breakpoint tables for PM2.5 and PM10
//!
//! Concentration ranges follow the AirNow technical assistance
//! document. Band boundaries are inclusive below and exclusive above,
//! so each band's `conc_hi` equals the next band's `conc_lo` and the
//! tables stay contiguous with no gaps.

use super::{colors, AqiBreakpoint, AqiScale};

const fn band(aqi_lo: u16, aqi_hi: u16, conc_lo: f32, conc_hi: f32, color: super::Rgb565) -> AqiBreakpoint {
    AqiBreakpoint {
        aqi_lo,
        aqi_hi,
        conc_lo,
        conc_hi,
        color,
    }
}

/// PM2.5 breakpoints, µg/m³ (24-hour averaging basis)
pub const PM2_5_BREAKPOINTS: [AqiBreakpoint; 7] = [
    band(0, 50, 0.0, 12.1, colors::GREEN),
    band(51, 100, 12.1, 35.5, colors::YELLOW),
    band(101, 150, 35.5, 55.5, colors::ORANGE),
    band(151, 200, 55.5, 150.5, colors::RED),
    band(201, 300, 150.5, 250.5, colors::PURPLE),
    band(301, 400, 250.5, 350.5, colors::MAROON),
    band(401, 500, 350.5, 500.5, colors::MAROON),
];

/// PM10 breakpoints, µg/m³ (24-hour averaging basis)
pub const PM10_BREAKPOINTS: [AqiBreakpoint; 7] = [
    band(0, 50, 0.0, 55.0, colors::GREEN),
    band(51, 100, 55.0, 155.0, colors::YELLOW),
    band(101, 150, 155.0, 255.0, colors::ORANGE),
    band(151, 200, 255.0, 355.0, colors::RED),
    band(201, 300, 355.0, 425.0, colors::PURPLE),
    band(301, 400, 425.0, 505.0, colors::MAROON),
    band(401, 500, 505.0, 605.0, colors::MAROON),
];

/// Scale for fine particulates (PM2.5)
pub const PM2_5: AqiScale = AqiScale::new(&PM2_5_BREAKPOINTS);

/// Scale for coarse particulates (PM10)
pub const PM10: AqiScale = AqiScale::new(&PM10_BREAKPOINTS);
