// Header format: [Length:12] [Number:16] [CRC:8], padded up to whole symbols

use crate::error::{Diagnostic, ParamsError, Result};
use crate::phy::modulation::ModulationInfo;
use crate::utils::consts::{
    HEADER_CRC_BITS, HEADER_LENGTH_BITS, HEADER_NUMBER_BITS, LENGTH_TAG_KEY, NUM_TAG_KEY,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Field widths of the packet header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderLayout {
    pub length_bits: usize,
    pub number_bits: usize,
    pub crc_bits: usize,
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self {
            length_bits: HEADER_LENGTH_BITS,
            number_bits: HEADER_NUMBER_BITS,
            crc_bits: HEADER_CRC_BITS,
        }
    }
}

impl HeaderLayout {
    pub fn total_bits(&self) -> Result<usize> {
        self.length_bits
            .checked_add(self.number_bits)
            .and_then(|bits| bits.checked_add(self.crc_bits))
            .ok_or_else(|| {
                ParamsError::overflow(
                    "bits_per_header",
                    self.length_bits as f64 + self.number_bits as f64 + self.crc_bits as f64,
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderGeometry {
    pub bits_per_header: usize,
    pub symbols_per_header: usize,
}

impl HeaderGeometry {
    /// Align the header bit budget to the header modulation.
    ///
    /// An inexact budget is rounded up to the next multiple of the
    /// bits-per-symbol, so no header field loses bits.
    pub fn derive(
        requested_bits: usize,
        header_mod: &impl ModulationInfo,
    ) -> Result<(Self, Option<Diagnostic>)> {
        let bits_per_symbol = header_mod.bits_per_symbol();
        let mut bits_per_header = requested_bits;
        let mut symbols_per_header = bits_per_header / bits_per_symbol;
        let mut diagnostic = None;

        if bits_per_header % bits_per_symbol != 0 {
            warn!("Error in evaluating symbols per header; adjusting bits per header");
            bits_per_header = (symbols_per_header + 1)
                .checked_mul(bits_per_symbol)
                .ok_or_else(|| ParamsError::overflow("bits_per_header", requested_bits as f64))?;
            symbols_per_header = bits_per_header / bits_per_symbol;
            diagnostic = Some(Diagnostic::HeaderAdjusted {
                requested_bits,
                adjusted_bits: bits_per_header,
            });
        }

        debug!(
            "bits_per_header={}, symbols_per_header={}",
            bits_per_header, symbols_per_header
        );

        Ok((
            Self {
                bits_per_header,
                symbols_per_header,
            },
            diagnostic,
        ))
    }
}

/// Parameters consumed by the external packet header formatter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderFormat {
    pub bits_per_header: usize,
    pub bits_per_symbol: usize,
    pub length_tag_key: String,
    pub num_tag_key: String,
}

impl HeaderFormat {
    pub fn new(geometry: &HeaderGeometry, header_mod: &impl ModulationInfo) -> Self {
        Self {
            bits_per_header: geometry.bits_per_header,
            bits_per_symbol: header_mod.bits_per_symbol(),
            length_tag_key: LENGTH_TAG_KEY.to_string(),
            num_tag_key: NUM_TAG_KEY.to_string(),
        }
    }

    pub fn with_tag_keys(mut self, length_tag_key: &str, num_tag_key: &str) -> Self {
        self.length_tag_key = length_tag_key.to_string();
        self.num_tag_key = num_tag_key.to_string();
        self
    }
}
