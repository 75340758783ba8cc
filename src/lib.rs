//! # CAN Signal Codec
//!
//! This library packs and unpacks bit-field signals into the 8-byte payload
//! of a CAN frame, the way signals are described in a CAN signal database.
//!
//! ## Overview
//!
//! A signal is a run of `length` bits (1..=64) at an arbitrary bit position.
//! Two bit-numbering conventions are supported:
//! - **Little endian (Intel)**: `start_bit` is the flat index `byte * 8 + bit`
//!   of the least significant bit; the signal grows towards higher bytes.
//! - **Big endian (Motorola)**: bits are counted MSB first (bit 0 is the MSB of
//!   byte 0) and `start_bit` is the last bit of the signal; the signal's
//!   most significant bit sits `length - 1` positions before it.
//!
//! On top of the raw bit-field codec two physical interpretations are offered:
//! - Linear: `physical = raw * factor + offset`
//! - Fixed point (Q format): `physical = raw / 2^fractional_bits`
//!
//! Encoding truncates towards zero, it never rounds.
//!
//! ## Example
//!
//! ```rust
//! use can_signal_codec::{ByteOrder, CodecResult, SignalCodec, SignalLayout};
//! use can_signal_codec::linear::{LinearCodec, LinearConfig};
//!
//! # fn main() -> CodecResult<()> {
//! // 16-bit unsigned engine speed, 0.25 rpm/bit, Motorola layout in bytes 0-1
//! let config = LinearConfig {
//!     layout: SignalLayout {
//!         start_bit: 15,
//!         length: 16,
//!         byte_order: ByteOrder::BigEndian,
//!         ..Default::default()
//!     },
//!     factor: 0.25,
//!     offset: 0.0,
//! };
//! let codec = LinearCodec::new(config)?;
//!
//! let mut frame = [0u8; 8];
//! codec.encode(&mut frame, 1200.0)?;
//! assert_eq!(frame[..2], [0x12, 0xC0]);
//! assert_eq!(codec.decode(&frame)?, 1200.0);
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

mod codecs;
mod common;

pub use codecs::bitfield;
pub use codecs::checksum;
pub use codecs::fixed_point;
pub use codecs::linear;

pub use codecs::bitfield::{extract, store, ByteOrder, SignalLayout};
pub use codecs::fixed_point::{decode_fixed_point, encode_fixed_point};
pub use codecs::linear::{decode_linear, encode_linear};

/// Number of payload bytes in a frame
pub const FRAME_LEN: usize = 8;

/// One frame payload. Bytes are indexed 0..=7, bits 0 (LSB) to 7 (MSB).
pub type Frame = [u8; FRAME_LEN];

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Codec error types
///
/// Every error is detected before the frame is touched, so a failed
/// `store`/`encode` leaves the frame unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CodecError {
    /// Signal length outside 1..=64 bits
    #[error("Invalid signal length: {0} bits (expected 1 - 64)")]
    InvalidLength(u8),

    /// Signal would address bits outside the frame
    #[error("Signal of {length} bits at start bit {start_bit} does not fit in the frame")]
    SignalOutOfFrame { start_bit: u8, length: u8 },

    /// Fractional bit count outside 0..=63
    #[error("Invalid fractional bits: {0} (expected 0 - 63)")]
    InvalidFractionalBits(u8),

    /// Linear encode with a zero factor
    #[error("Division by zero: factor must not be 0")]
    DivisionByZero,

    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Main trait for physical-value signal codecs
///
/// A codec is built once from its configuration and then converts between
/// the bits of a frame and a physical `f64` value.
pub trait SignalCodec {
    /// Configuration type for this codec
    type Config;

    /// Create a new instance with the given configuration
    ///
    /// # Errors
    /// Returns an error if the signal layout or the numeric parameters are invalid
    fn new(config: Self::Config) -> CodecResult<Self>
    where
        Self: Sized;

    /// Read the signal from `frame` and convert it to its physical value
    fn decode(&self, frame: &Frame) -> CodecResult<f64>;

    /// Convert `physical` to its raw value and write it into `frame`
    ///
    /// Only the bits covered by the signal are modified.
    fn encode(&self, frame: &mut Frame, physical: f64) -> CodecResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_display() {
        assert_eq!(
            CodecError::InvalidLength(65).to_string(),
            "Invalid signal length: 65 bits (expected 1 - 64)"
        );
        assert_eq!(
            CodecError::SignalOutOfFrame {
                start_bit: 60,
                length: 8
            }
            .to_string(),
            "Signal of 8 bits at start bit 60 does not fit in the frame"
        );
        assert_ne!(CodecError::DivisionByZero, CodecError::InvalidLength(0));
    }

    #[test]
    fn test_flat_api_matches_codec() {
        let mut frame: Frame = [0; FRAME_LEN];
        encode_linear(&mut frame, 10.0, 8, 12, false, false, 0.5, 0.0).unwrap();
        assert_eq!(extract(&frame, 8, 12, false, false).unwrap(), 20);
        assert_eq!(
            decode_linear(&frame, 8, 12, false, false, 0.5, 0.0).unwrap(),
            10.0
        );
    }
}
