use crate::{ByteOrder, CodecError, CodecResult, FRAME_LEN};

const FRAME_BITS: u16 = (FRAME_LEN * 8) as u16;
const MAX_SIGNAL_LENGTH: u8 = 64;
const MAX_FRACTIONAL_BITS: u8 = 63;

pub fn validate_length(length: u8) -> CodecResult<()> {
    if length == 0 || length > MAX_SIGNAL_LENGTH {
        return Err(CodecError::InvalidLength(length));
    }
    Ok(())
}

/// Check that every bit of the signal lies inside the frame.
///
/// Little endian signals run from `start_bit` upwards, big endian signals
/// end at `start_bit` in MSB-first numbering and begin `length - 1` bits earlier.
pub fn validate_placement(start_bit: u8, length: u8, byte_order: ByteOrder) -> CodecResult<()> {
    let start = u16::from(start_bit);
    let len = u16::from(length);
    let fits = match byte_order {
        ByteOrder::LittleEndian => start + len <= FRAME_BITS,
        ByteOrder::BigEndian => start < FRAME_BITS && start + 1 >= len,
    };
    if !fits {
        return Err(CodecError::SignalOutOfFrame { start_bit, length });
    }
    Ok(())
}

pub fn validate_fractional_bits(fractional_bits: u8) -> CodecResult<()> {
    if fractional_bits > MAX_FRACTIONAL_BITS {
        return Err(CodecError::InvalidFractionalBits(fractional_bits));
    }
    Ok(())
}

pub fn validate_factor(factor: f64) -> CodecResult<()> {
    if factor == 0.0 {
        return Err(CodecError::DivisionByZero);
    }
    Ok(())
}

pub fn validate_finite(name: &str, value: f64) -> CodecResult<()> {
    if !value.is_finite() {
        return Err(CodecError::InvalidConfiguration(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    Ok(())
}
