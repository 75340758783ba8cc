/// Mask covering the low `length` bits of a raw value (`length` in 1..=64)
pub fn mask64(length: u8) -> u64 {
    u64::MAX >> (64 - length)
}

/// Mask covering the low `width` bits of a byte (`width` in 1..=8)
pub fn byte_mask(width: u8) -> u8 {
    u8::MAX >> (8 - width)
}

/// Widen a `length`-bit two's complement pattern to 64 bits
pub fn sign_extend(raw: u64, length: u8) -> u64 {
    if length < 64 && raw & (1u64 << (length - 1)) != 0 {
        raw | (u64::MAX << length)
    } else {
        raw
    }
}

/// Read `width` bits starting at `bit_offset` (LSB = 0) of `data[byte_idx]`
pub fn read_bits_at(data: &[u8], byte_idx: usize, bit_offset: u8, width: u8) -> u8 {
    (data[byte_idx] >> bit_offset) & byte_mask(width)
}

/// Overwrite `width` bits starting at `bit_offset` of `data[byte_idx]`,
/// leaving the other bits of that byte intact
pub fn write_bits_at(data: &mut [u8], byte_idx: usize, bit_offset: u8, width: u8, value: u8) {
    let mask = byte_mask(width) << bit_offset;
    data[byte_idx] = (data[byte_idx] & !mask) | ((value << bit_offset) & mask);
}

/// Interpret a raw value as a number, signed patterns as `i64`
pub fn raw_to_f64(raw: u64, signed: bool) -> f64 {
    if signed {
        raw as i64 as f64
    } else {
        raw as f64
    }
}

/// Truncate a scaled value towards zero into a raw container.
///
/// Signed signals and negative values go through `i64` so the result is a
/// two's complement pattern. Out of range values saturate, NaN becomes 0.
pub fn f64_to_raw(value: f64, signed: bool) -> u64 {
    if signed || value < 0.0 {
        value as i64 as u64
    } else {
        value as u64
    }
}
