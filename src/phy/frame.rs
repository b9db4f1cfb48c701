// Frame format: [Header symbols] [Coded payload symbols], each symbol spread to chips

use super::header::HeaderGeometry;
use super::payload::PayloadGeometry;
use crate::error::{ParamsError, Result};
use crate::utils::consts::MAX_SYMBOLS_PER_FRAME;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameGeometry {
    pub symbols_per_header: usize,
    pub coded_payload_symbols: usize,
    pub symbols_per_frame: usize,
    pub chips_per_symbol: usize,
    pub chips_per_frame: usize,
}

impl FrameGeometry {
    pub fn assemble(
        header: &HeaderGeometry,
        payload: &PayloadGeometry,
        chips_per_symbol: usize,
    ) -> Result<Self> {
        let symbols_per_frame = header
            .symbols_per_header
            .checked_add(payload.coded_payload_symbols)
            .filter(|&symbols| symbols <= MAX_SYMBOLS_PER_FRAME)
            .ok_or(ParamsError::OutOfRange {
                name: "symbols_per_frame",
                value: header.symbols_per_header as f64 + payload.coded_payload_symbols as f64,
                range: "[0, 2^24]",
            })?;
        let chips_per_frame = chips_per_symbol
            .checked_mul(symbols_per_frame)
            .ok_or_else(|| {
                ParamsError::overflow(
                    "chips_per_frame",
                    chips_per_symbol as f64 * symbols_per_frame as f64,
                )
            })?;

        Ok(Self {
            symbols_per_header: header.symbols_per_header,
            coded_payload_symbols: payload.coded_payload_symbols,
            symbols_per_frame,
            chips_per_symbol,
            chips_per_frame,
        })
    }

    pub fn header_chips(&self) -> usize {
        self.symbols_per_header * self.chips_per_symbol
    }

    pub fn payload_chips(&self) -> usize {
        self.coded_payload_symbols * self.chips_per_symbol
    }
}
