use crate::ByteOrder;

const BITS_PER_BYTE: u8 = 8;

/// One run of signal bits that lives inside a single frame byte.
///
/// Take `width` bits starting at `bit_offset` (LSB = 0) of `frame[byte_index]`
/// and place them at `value_shift` in the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSpan {
    pub byte_index: usize,
    pub bit_offset: u8,
    pub width: u8,
    pub value_shift: u8,
}

/// Walks a signal byte by byte, yielding at most 8 bits per step.
///
/// The same walk drives both extraction and storing. Callers validate the
/// placement first; the walk itself does no bounds checks.
#[derive(Debug, Clone)]
pub struct BitSpans {
    byte_order: ByteOrder,
    // flat index for little endian, MSB-first index for big endian
    position: u8,
    remaining: u8,
    consumed: u8,
}

impl BitSpans {
    pub fn new(start_bit: u8, length: u8, byte_order: ByteOrder) -> Self {
        let position = match byte_order {
            ByteOrder::LittleEndian => start_bit,
            ByteOrder::BigEndian => start_bit + 1 - length,
        };
        Self {
            byte_order,
            position,
            remaining: length,
            consumed: 0,
        }
    }
}

impl Iterator for BitSpans {
    type Item = BitSpan;

    fn next(&mut self) -> Option<BitSpan> {
        if self.remaining == 0 {
            return None;
        }
        let byte_index = (self.position / BITS_PER_BYTE) as usize;
        let span = match self.byte_order {
            ByteOrder::LittleEndian => {
                let bit_in_byte = self.position % BITS_PER_BYTE;
                let width = (BITS_PER_BYTE - bit_in_byte).min(self.remaining);
                BitSpan {
                    byte_index,
                    bit_offset: bit_in_byte,
                    width,
                    value_shift: self.consumed,
                }
            }
            ByteOrder::BigEndian => {
                let top_bit = BITS_PER_BYTE - 1 - self.position % BITS_PER_BYTE;
                let width = (top_bit + 1).min(self.remaining);
                BitSpan {
                    byte_index,
                    bit_offset: top_bit + 1 - width,
                    width,
                    value_shift: self.remaining - width,
                }
            }
        };
        self.position += span.width;
        self.remaining -= span.width;
        self.consumed += span.width;
        Some(span)
    }
}
