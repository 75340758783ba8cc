//! # Frame checksum signal
//!
//! Many signal databases reserve one byte of a frame for a CRC over the rest
//! of the payload. This codec computes CRC-8 SAE J1850 over every byte except
//! the checksum byte and writes it through the bit-field codec.
//!
//! # Data layout
//! [DATA ... | CRC(1B) | DATA ...]

use crate::{CodecError, CodecResult, Frame, SignalLayout, FRAME_LEN};
use crc::{Crc, CRC_8_SAE_J1850};

const BITS_PER_BYTE: u8 = 8;

/// Configuration for a frame checksum
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChecksumConfig {
    /// Index of the checksum byte (0..=7)
    pub crc_byte: u8,
}

/// CRC-8 checksum over a frame
#[derive(Debug, Clone)]
pub struct ChecksumCodec {
    config: ChecksumConfig,
    layout: SignalLayout,
}

impl ChecksumCodec {
    /// Create a checksum codec
    ///
    /// # Errors
    /// Returns `CodecError::InvalidConfiguration` if `crc_byte` is outside the frame
    pub fn new(config: ChecksumConfig) -> CodecResult<Self> {
        if usize::from(config.crc_byte) >= FRAME_LEN {
            return Err(CodecError::InvalidConfiguration(format!(
                "Checksum byte shall be between 0 and {}",
                FRAME_LEN - 1
            )));
        }
        let layout = SignalLayout {
            start_bit: config.crc_byte * BITS_PER_BYTE,
            length: BITS_PER_BYTE,
            ..Default::default()
        };
        Ok(Self { config, layout })
    }

    pub fn config(&self) -> &ChecksumConfig {
        &self.config
    }

    /// CRC over all bytes except the checksum byte
    pub fn compute(&self, frame: &Frame) -> u8 {
        let crc_byte = usize::from(self.config.crc_byte);
        let crc = Crc::<u8>::new(&CRC_8_SAE_J1850);
        let mut digest = crc.digest();
        digest.update(&frame[..crc_byte]);
        digest.update(&frame[crc_byte + 1..]);
        digest.finalize()
    }

    /// Write the checksum into the frame
    pub fn protect(&self, frame: &mut Frame) -> CodecResult<()> {
        let crc = self.compute(frame);
        self.layout.store(frame, u64::from(crc))
    }

    /// Check the received checksum against the payload
    pub fn verify(&self, frame: &Frame) -> CodecResult<bool> {
        let received = self.layout.extract(frame)?;
        Ok(received == u64::from(self.compute(frame)))
    }
}
