// Payload format: [Data:N] [CRC32:4], coded as whole payload-modulation symbols

use crate::error::{Diagnostic, ParamsError, Result};
use crate::phy::modulation::ModulationInfo;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayloadGeometry {
    pub payload_bytes: usize,
    pub crc_bytes: usize,
    pub coded_payload_bytes: usize,
    pub coded_payload_symbols: usize,
}

impl PayloadGeometry {
    /// Size the coded payload so its bits fill whole symbols.
    ///
    /// On an inexact split the byte count (not the bit count) is rounded up
    /// to the next multiple of bits-per-symbol, and the payload grows by the
    /// difference. The CRC overhead never changes.
    pub fn derive(
        payload_bytes: usize,
        crc_bytes: usize,
        payload_mod: &impl ModulationInfo,
    ) -> Result<(Self, Option<Diagnostic>)> {
        let bits_per_symbol = payload_mod.bits_per_symbol();
        let requested_bytes = payload_bytes;
        let overflow = || {
            ParamsError::overflow(
                "coded_payload_bits",
                (requested_bytes as f64 + crc_bytes as f64) * 8.0,
            )
        };
        let mut payload_bytes = payload_bytes;
        let mut coded_payload_bytes = payload_bytes.checked_add(crc_bytes).ok_or_else(overflow)?;
        let mut coded_payload_bits = coded_payload_bytes.checked_mul(8).ok_or_else(overflow)?;
        let mut diagnostic = None;

        if coded_payload_bits % bits_per_symbol != 0 {
            warn!("Error in evaluating payload symbols per frame; adjusting payload bytes per frame");
            let k = coded_payload_bytes / bits_per_symbol;
            coded_payload_bytes = (k + 1).checked_mul(bits_per_symbol).ok_or_else(overflow)?;
            coded_payload_bits = coded_payload_bytes.checked_mul(8).ok_or_else(overflow)?;
            payload_bytes = coded_payload_bytes - crc_bytes;
            diagnostic = Some(Diagnostic::PayloadAdjusted {
                requested_bytes,
                adjusted_bytes: payload_bytes,
            });
        }
        let coded_payload_symbols = coded_payload_bits / bits_per_symbol;

        debug!(
            "payload_bytes={}, coded_payload_bytes={}, coded_payload_symbols={}",
            payload_bytes, coded_payload_bytes, coded_payload_symbols
        );

        Ok((
            Self {
                payload_bytes,
                crc_bytes,
                coded_payload_bytes,
                coded_payload_symbols,
            },
            diagnostic,
        ))
    }

    pub fn coded_payload_bits(&self) -> usize {
        self.coded_payload_bytes * 8
    }
}
