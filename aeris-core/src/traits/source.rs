//! Byte source trait for the sensor's serial link

/// A bounded-timeout byte source.
///
/// One call corresponds to one pipeline tick. Implementations must
/// return within their configured timeout (250 ms on the reference
/// hardware) rather than blocking until `buf` fills; a timeout with
/// nothing received is `Ok(0)`, which the pipeline treats as a normal
/// idle tick, not an error.
pub trait ByteSource {
    /// Error type for transport failures (not timeouts)
    type Error;

    /// Read up to `buf.len()` bytes, returning how many arrived.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    type Error = T::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(buf)
    }
}
