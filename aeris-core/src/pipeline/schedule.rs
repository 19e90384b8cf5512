//! Telemetry report scheduling
//!
//! The reference sketch kept the next-report timestamp in a process
//! global; here it is an explicit field advanced by a pure predicate
//! so tests can drive it with arbitrary clocks.

/// Decides when the next telemetry report is due.
#[derive(Debug, Clone, Copy)]
pub struct ReportSchedule {
    interval_ms: u64,
    last_sent_ms: Option<u64>,
}

impl ReportSchedule {
    /// Schedule with the given minimum spacing between reports.
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_sent_ms: None,
        }
    }

    /// Whether a report may be sent at `now_ms`.
    ///
    /// The first report is always due; afterwards a full interval must
    /// have elapsed since the last send.
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_sent_ms {
            None => true,
            Some(sent) => now_ms.saturating_sub(sent) >= self.interval_ms,
        }
    }

    /// Note that a report went out at `now_ms`.
    pub fn mark_sent(&mut self, now_ms: u64) {
        self.last_sent_ms = Some(now_ms);
    }
}
