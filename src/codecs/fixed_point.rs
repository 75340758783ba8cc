//! # Fixed point (Q format) signal codec
//!
//! The low `fractional_bits` bits of the raw value hold the fraction:
//!
//! ```text
//! physical = raw / 2^fractional_bits
//! raw      = trunc(physical * 2^fractional_bits)
//! ```
//!
//! Negative values are converted through `i64` before being stored, so the
//! frame always receives a proper two's complement pattern.

use crate::common::field_ops::{f64_to_raw, raw_to_f64};
use crate::common::validation::validate_fractional_bits;
use crate::{CodecResult, Frame, SignalCodec, SignalLayout};

/// Configuration for a Q format signal
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FixedPointConfig {
    /// Position of the signal in the frame
    pub layout: SignalLayout,
    /// Bits right of the binary point (0..=63)
    pub fractional_bits: u8,
}

/// Q format signal codec
#[derive(Debug, Clone)]
pub struct FixedPointCodec {
    config: FixedPointConfig,
}

impl FixedPointCodec {
    pub fn config(&self) -> &FixedPointConfig {
        &self.config
    }
}

impl SignalCodec for FixedPointCodec {
    type Config = FixedPointConfig;

    fn new(config: Self::Config) -> CodecResult<Self> {
        config.layout.validate()?;
        validate_fractional_bits(config.fractional_bits)?;
        Ok(Self { config })
    }

    fn decode(&self, frame: &Frame) -> CodecResult<f64> {
        to_physical(&self.config.layout, frame, self.config.fractional_bits)
    }

    fn encode(&self, frame: &mut Frame, physical: f64) -> CodecResult<()> {
        from_physical(
            &self.config.layout,
            frame,
            physical,
            self.config.fractional_bits,
        )
    }
}

fn scale(fractional_bits: u8) -> f64 {
    2f64.powi(i32::from(fractional_bits))
}

fn to_physical(layout: &SignalLayout, frame: &Frame, fractional_bits: u8) -> CodecResult<f64> {
    validate_fractional_bits(fractional_bits)?;
    let raw = layout.extract(frame)?;
    Ok(raw_to_f64(raw, layout.signed) / scale(fractional_bits))
}

fn from_physical(
    layout: &SignalLayout,
    frame: &mut Frame,
    physical: f64,
    fractional_bits: u8,
) -> CodecResult<()> {
    validate_fractional_bits(fractional_bits)?;
    let raw = f64_to_raw(physical * scale(fractional_bits), layout.signed);
    layout.store(frame, raw)
}

/// Decode a Q format signal: `raw / 2^fractional_bits`
pub fn decode_fixed_point(
    frame: &Frame,
    start_bit: u8,
    length: u8,
    fractional_bits: u8,
    big_endian: bool,
    is_signed: bool,
) -> CodecResult<f64> {
    let layout = SignalLayout::new(start_bit, length, big_endian, is_signed);
    to_physical(&layout, frame, fractional_bits)
}

/// Encode a Q format signal: `trunc(physical * 2^fractional_bits)`
///
/// # Errors
/// * `CodecError::InvalidFractionalBits` if `fractional_bits` > 63
/// * layout errors as for [`crate::store`]
pub fn encode_fixed_point(
    frame: &mut Frame,
    physical: f64,
    start_bit: u8,
    length: u8,
    fractional_bits: u8,
    big_endian: bool,
    is_signed: bool,
) -> CodecResult<()> {
    let layout = SignalLayout::new(start_bit, length, big_endian, is_signed);
    from_physical(&layout, frame, physical, fractional_bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extract, store, ByteOrder, CodecError};

    #[test]
    fn test_negative_q2() {
        let mut frame = [0u8; 8];
        store(&mut frame, (-4i64) as u64, 0, 8, false, true).unwrap();
        assert_eq!(decode_fixed_point(&frame, 0, 8, 2, false, true).unwrap(), -1.0);

        let mut frame = [0u8; 8];
        encode_fixed_point(&mut frame, -1.0, 0, 8, 2, false, true).unwrap();
        assert_eq!(frame[0], 0xFC);
        assert_eq!(decode_fixed_point(&frame, 0, 8, 2, false, true).unwrap(), -1.0);
    }

    #[test]
    fn test_q15_and_q8_8() {
        let mut frame = [0u8; 8];
        encode_fixed_point(&mut frame, 0.5, 0, 16, 15, false, true).unwrap();
        assert_eq!(extract(&frame, 0, 16, false, false).unwrap(), 0x4000);

        let mut frame = [0u8; 8];
        encode_fixed_point(&mut frame, 1.5, 15, 16, 8, true, false).unwrap();
        assert_eq!(frame[..2], [0x01, 0x80]);
        assert_eq!(decode_fixed_point(&frame, 15, 16, 8, true, false).unwrap(), 1.5);
    }

    #[test]
    fn test_encode_truncates_towards_zero() {
        let mut frame = [0u8; 8];
        encode_fixed_point(&mut frame, 0.3, 0, 8, 2, false, true).unwrap();
        assert_eq!(decode_fixed_point(&frame, 0, 8, 2, false, true).unwrap(), 0.25);

        encode_fixed_point(&mut frame, -0.3, 0, 8, 2, false, true).unwrap();
        assert_eq!(decode_fixed_point(&frame, 0, 8, 2, false, true).unwrap(), -0.25);
    }

    #[test]
    fn test_zero_fractional_bits_is_integer() {
        let mut frame = [0u8; 8];
        encode_fixed_point(&mut frame, 42.9, 8, 8, 0, false, false).unwrap();
        assert_eq!(frame[1], 42);
        assert_eq!(decode_fixed_point(&frame, 8, 8, 0, false, false).unwrap(), 42.0);
    }

    #[test]
    fn test_unsigned_top_bit_stays_positive() {
        let frame = [0, 0, 0, 0, 0, 0, 0, 0x80];
        assert_eq!(
            decode_fixed_point(&frame, 0, 64, 63, false, false).unwrap(),
            1.0
        );
        assert_eq!(
            decode_fixed_point(&frame, 0, 64, 63, false, true).unwrap(),
            -1.0
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let mut frame = [0x5Au8; 8];
        assert_eq!(
            encode_fixed_point(&mut frame, 1.0, 0, 8, 64, false, true),
            Err(CodecError::InvalidFractionalBits(64))
        );
        assert_eq!(
            encode_fixed_point(&mut frame, 1.0, 0, 65, 2, false, true),
            Err(CodecError::InvalidLength(65))
        );
        assert_eq!(frame, [0x5Au8; 8]);
        assert_eq!(
            decode_fixed_point(&frame, 0, 0, 2, false, true),
            Err(CodecError::InvalidLength(0))
        );
    }

    #[test]
    fn test_codec() {
        let codec = FixedPointCodec::new(FixedPointConfig {
            layout: SignalLayout {
                start_bit: 31,
                length: 24,
                byte_order: ByteOrder::BigEndian,
                signed: true,
            },
            fractional_bits: 12,
        })
        .unwrap();
        let mut frame = [0u8; 8];
        codec.encode(&mut frame, -3.75).unwrap();
        assert_eq!(codec.decode(&frame).unwrap(), -3.75);
        assert_eq!(frame[0], 0);
        assert_eq!(frame[4..], [0, 0, 0, 0]);
        assert_eq!(codec.config().fractional_bits, 12);

        assert!(FixedPointCodec::new(FixedPointConfig {
            fractional_bits: 70,
            ..Default::default()
        })
        .is_err());
    }
}
