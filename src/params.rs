use crate::cdma::{AcquisitionGrid, SpreadingCodes, TrainingConfig, TrainingSequenceGenerator};
use crate::config::CdmaConfig;
use crate::error::{Diagnostic, Result};
use crate::phy::{FrameGeometry, HeaderFormat, HeaderGeometry, ModulationInfo, PayloadGeometry};
use serde::Serialize;
use tracing::{info, warn};

/// Everything the framing, spreading and acquisition blocks are configured with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CdmaParameters {
    pub header: HeaderGeometry,
    pub header_format: HeaderFormat,
    pub payload: PayloadGeometry,
    pub frame: FrameGeometry,
    pub training: TrainingConfig,
    pub spreading: SpreadingCodes,
    pub acquisition: AcquisitionGrid,
    /// Corrections applied on the way; empty for a self-consistent config
    pub diagnostics: Vec<Diagnostic>,
}

impl CdmaParameters {
    /// Derive the full parameter set. Pure: the same config always yields
    /// the same parameters, training sequence included.
    pub fn derive(config: &CdmaConfig) -> Result<Self> {
        config.validate()?;
        let mut diagnostics = Vec::new();

        let (header, adjusted) =
            HeaderGeometry::derive(config.bits_per_header()?, &config.header_mod)?;
        diagnostics.extend(adjusted);
        let header_format = HeaderFormat::new(&header, &config.header_mod)
            .with_tag_keys(&config.length_tag_key, &config.num_tag_key);

        let (payload, adjusted) =
            PayloadGeometry::derive(config.payload_bytes, config.crc_bytes, &config.payload_mod)?;
        diagnostics.extend(adjusted);

        let frame = FrameGeometry::assemble(&header, &payload, config.chips_per_symbol)?;

        let generator =
            TrainingSequenceGenerator::new(config.training_algorithm, config.training_seed)?;
        let (training, clamped) = TrainingConfig::derive(
            generator,
            frame.symbols_per_frame,
            config.training_length,
            config.training_percent,
        )?;
        diagnostics.extend(clamped);

        let spreading = SpreadingCodes::new(
            &config.pulse_training,
            &config.pulse_data,
            config.chips_per_symbol,
        )?;

        let acquisition = AcquisitionGrid::derive(
            config.training_percent,
            frame.symbols_per_frame,
            frame.chips_per_symbol,
            config.num_filters,
            config.pll_loop_bw,
            config.frequency_resolution,
        )?;

        for diagnostic in &diagnostics {
            warn!("Adjusted configuration: {}", diagnostic);
        }

        info!("CDMA parameters derived:");
        info!(
            "  - header: {} bits, {} symbols ({}, {} b/sym)",
            header.bits_per_header,
            header.symbols_per_header,
            config.header_mod.name(),
            config.header_mod.bits_per_symbol()
        );
        info!(
            "  - payload: {} bytes + {} CRC, {} symbols ({})",
            payload.payload_bytes,
            payload.crc_bytes,
            payload.coded_payload_symbols,
            config.payload_mod.name()
        );
        info!(
            "  - frame: {} symbols, {} chips ({} chips/symbol)",
            frame.symbols_per_frame, frame.chips_per_frame, frame.chips_per_symbol
        );
        info!(
            "  - training: {} of {} symbols, {}% power",
            training.active_length, frame.symbols_per_frame, training.power_percent
        );
        let (lo, hi) = acquisition.uncertainty_range();
        info!(
            "  - acquisition: {} filters, df = {:e}, range = [{:e}, {:e}]",
            acquisition.num_filters, acquisition.df, lo, hi
        );

        Ok(Self {
            header,
            header_format,
            payload,
            frame,
            training,
            spreading,
            acquisition,
            diagnostics,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
