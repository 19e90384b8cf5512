//! Display sink trait

use crate::aqi::AqiAssessment;

/// Something that can show the current AQI readings.
///
/// Rendering is fire-and-forget: the pipeline never inspects a result,
/// so implementations deal with their own I/O failures (typically by
/// logging and dropping the update).
pub trait DisplaySink {
    /// Show both AQI scores and their severity colors.
    fn render(&mut self, assessment: &AqiAssessment);
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn render(&mut self, assessment: &AqiAssessment) {
        (**self).render(assessment)
    }
}
