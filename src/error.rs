//! Error types for reading the encoder lines.

use core::fmt;

/// Errors that can occur when sampling the encoder lines.
///
/// Decoding and scheduling never fail; only the pin reads do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerError<E> {
    /// Underlying GPIO error.
    Pin(E),
}

// Allow ergonomic `?` propagation from raw pin errors.
impl<E> From<E> for SamplerError<E> {
    fn from(error: E) -> Self {
        SamplerError::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for SamplerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SamplerError::Pin(e) => write!(f, "GPIO error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for SamplerError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SamplerError::Pin(e) => defmt::write!(f, "GPIO error: {}", e),
        }
    }
}
