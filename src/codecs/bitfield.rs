//! # Bit-field codec
//!
//! Raw extraction and insertion of 1..=64 bit integers at any bit position of
//! a frame, in either bit-numbering convention.
//!
//! # Bit numbering
//!
//! - **Little endian (Intel)**: `start_bit` = `byte * 8 + bit` of the signal's
//!   LSB. Bits are consumed upwards, the first chunk becomes the low bits of
//!   the raw value.
//! - **Big endian (Motorola)**: bits are counted MSB first, i.e. position `q`
//!   is bit `7 - q % 8` of byte `q / 8`. The signal ends at `start_bit` and
//!   begins at `start_bit + 1 - length`. Bits are consumed MSB first.
//!
//! ```text
//! 0x1234, 16 bits, little endian at 0  -> [0x34, 0x12, 0, 0, 0, 0, 0, 0]
//! 0x1234, 16 bits, big endian at 15    -> [0x12, 0x34, 0, 0, 0, 0, 0, 0]
//! ```

use crate::common::field_ops::{mask64, read_bits_at, sign_extend, write_bits_at};
use crate::common::spans::BitSpans;
use crate::common::validation::{validate_length, validate_placement};
use crate::{CodecResult, Frame};

/// Bit-numbering convention of a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    /// Intel layout, `start_bit` is the LSB
    #[default]
    LittleEndian,
    /// Motorola layout, `start_bit` is the last bit in MSB-first numbering
    BigEndian,
}

impl ByteOrder {
    pub fn from_big_endian(big_endian: bool) -> Self {
        if big_endian {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }

    pub fn is_big_endian(self) -> bool {
        self == ByteOrder::BigEndian
    }
}

/// Where a signal lives inside a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SignalLayout {
    /// Anchor bit, meaning depends on `byte_order`
    pub start_bit: u8,
    /// Signal width in bits (1..=64)
    pub length: u8,
    /// Bit-numbering convention
    pub byte_order: ByteOrder,
    /// Two's complement signal, sign extended on extraction
    pub signed: bool,
}

impl Default for SignalLayout {
    fn default() -> Self {
        Self {
            start_bit: 0,
            length: 8,
            byte_order: ByteOrder::LittleEndian,
            signed: false,
        }
    }
}

impl SignalLayout {
    pub fn new(start_bit: u8, length: u8, big_endian: bool, signed: bool) -> Self {
        Self {
            start_bit,
            length,
            byte_order: ByteOrder::from_big_endian(big_endian),
            signed,
        }
    }

    /// Validate length and placement
    ///
    /// # Errors
    /// * `CodecError::InvalidLength` if `length` is outside 1..=64
    /// * `CodecError::SignalOutOfFrame` if any bit falls outside the frame
    pub fn validate(&self) -> CodecResult<()> {
        validate_length(self.length)?;
        validate_placement(self.start_bit, self.length, self.byte_order)
    }

    pub(crate) fn spans(&self) -> CodecResult<BitSpans> {
        self.validate()?;
        Ok(BitSpans::new(self.start_bit, self.length, self.byte_order))
    }

    /// Read the raw value of the signal.
    ///
    /// Signed signals come back sign extended to 64 bits, so `raw as i64`
    /// is the value the field represents.
    pub fn extract(&self, frame: &Frame) -> CodecResult<u64> {
        let mut raw = 0u64;
        for span in self.spans()? {
            let bits = read_bits_at(frame, span.byte_index, span.bit_offset, span.width);
            raw |= u64::from(bits) << span.value_shift;
        }
        raw &= mask64(self.length);
        if self.signed {
            raw = sign_extend(raw, self.length);
        }
        Ok(raw)
    }

    /// Write `value` into the signal's bits.
    ///
    /// Bits of `value` above `length` are ignored. Bits of the frame outside
    /// the signal are preserved. On error the frame is not touched.
    pub fn store(&self, frame: &mut Frame, value: u64) -> CodecResult<()> {
        let spans = self.spans()?;
        let value = value & mask64(self.length);
        for span in spans {
            let bits = (value >> span.value_shift) as u8;
            write_bits_at(frame, span.byte_index, span.bit_offset, span.width, bits);
        }
        Ok(())
    }
}

/// Extract a raw signal value from `frame`
///
/// # Errors
/// Fails if `length` is outside 1..=64 or the signal does not fit the frame.
pub fn extract(
    frame: &Frame,
    start_bit: u8,
    length: u8,
    big_endian: bool,
    is_signed: bool,
) -> CodecResult<u64> {
    SignalLayout::new(start_bit, length, big_endian, is_signed).extract(frame)
}

/// Store a raw signal value into `frame`
///
/// # Errors
/// Fails if `length` is outside 1..=64 or the signal does not fit the frame.
/// The frame is left unchanged in that case.
pub fn store(
    frame: &mut Frame,
    value: u64,
    start_bit: u8,
    length: u8,
    big_endian: bool,
    is_signed: bool,
) -> CodecResult<()> {
    SignalLayout::new(start_bit, length, big_endian, is_signed).store(frame, value)
}
