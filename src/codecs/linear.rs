//! # Linear (scale + offset) signal codec
//!
//! The classic signal database conversion:
//!
//! ```text
//! physical = raw * factor + offset
//! raw      = trunc((physical - offset) / factor)
//! ```
//!
//! Encoding truncates towards zero, so `encode` followed by `decode` can lose
//! up to one `factor` step. Round the physical value first if that matters.
//! Values that do not fit the signal are masked to its width, not rejected.

use crate::common::field_ops::{f64_to_raw, raw_to_f64};
use crate::common::validation::{validate_factor, validate_finite};
use crate::{CodecError, CodecResult, Frame, SignalCodec, SignalLayout};

/// Configuration for a linear signal
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinearConfig {
    /// Position of the signal in the frame
    pub layout: SignalLayout,
    /// Physical units per raw step, must not be 0
    pub factor: f64,
    /// Physical value of raw 0
    pub offset: f64,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            layout: SignalLayout::default(),
            factor: 1.0,
            offset: 0.0,
        }
    }
}

/// Linear signal codec
#[derive(Debug, Clone)]
pub struct LinearCodec {
    config: LinearConfig,
}

impl LinearCodec {
    fn validate_config(config: &LinearConfig) -> CodecResult<()> {
        config.layout.validate()?;
        validate_finite("Factor", config.factor)?;
        validate_finite("Offset", config.offset)?;
        if validate_factor(config.factor).is_err() {
            return Err(CodecError::InvalidConfiguration(
                "Factor must not be 0".into(),
            ));
        }
        Ok(())
    }

    pub fn config(&self) -> &LinearConfig {
        &self.config
    }
}

impl SignalCodec for LinearCodec {
    type Config = LinearConfig;

    fn new(config: Self::Config) -> CodecResult<Self> {
        Self::validate_config(&config)?;
        Ok(Self { config })
    }

    fn decode(&self, frame: &Frame) -> CodecResult<f64> {
        let c = &self.config;
        to_physical(&c.layout, frame, c.factor, c.offset)
    }

    fn encode(&self, frame: &mut Frame, physical: f64) -> CodecResult<()> {
        let c = &self.config;
        from_physical(&c.layout, frame, physical, c.factor, c.offset)
    }
}

fn to_physical(layout: &SignalLayout, frame: &Frame, factor: f64, offset: f64) -> CodecResult<f64> {
    let raw = layout.extract(frame)?;
    Ok(raw_to_f64(raw, layout.signed) * factor + offset)
}

fn from_physical(
    layout: &SignalLayout,
    frame: &mut Frame,
    physical: f64,
    factor: f64,
    offset: f64,
) -> CodecResult<()> {
    layout.validate()?;
    validate_factor(factor)?;
    let raw = f64_to_raw((physical - offset) / factor, layout.signed);
    layout.store(frame, raw)
}

/// Decode a linear signal: `raw * factor + offset`
///
/// The raw value is read as signed when `is_signed` is set.
pub fn decode_linear(
    frame: &Frame,
    start_bit: u8,
    length: u8,
    big_endian: bool,
    is_signed: bool,
    factor: f64,
    offset: f64,
) -> CodecResult<f64> {
    let layout = SignalLayout::new(start_bit, length, big_endian, is_signed);
    to_physical(&layout, frame, factor, offset)
}

/// Encode a linear signal: `trunc((physical - offset) / factor)`
///
/// # Errors
/// * `CodecError::DivisionByZero` if `factor` is 0
/// * layout errors as for [`crate::store`]
#[allow(clippy::too_many_arguments)]
pub fn encode_linear(
    frame: &mut Frame,
    physical: f64,
    start_bit: u8,
    length: u8,
    big_endian: bool,
    is_signed: bool,
    factor: f64,
    offset: f64,
) -> CodecResult<()> {
    let layout = SignalLayout::new(start_bit, length, big_endian, is_signed);
    from_physical(&layout, frame, physical, factor, offset)
}
