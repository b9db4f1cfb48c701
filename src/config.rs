use crate::cdma::acquisition::{FrequencyResolution, validate_loop_bandwidth, validate_num_filters};
use crate::cdma::training::{TrainingAlgorithm, TrainingSequenceGenerator, validate_power_percent};
use crate::error::{ParamsError, Result};
use crate::phy::header::HeaderLayout;
use crate::phy::modulation::Modulation;
use crate::utils::consts::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Link configuration. Missing fields take the reference values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CdmaConfig {
    // header
    pub header_layout: HeaderLayout,
    pub header_mod: Modulation,
    pub length_tag_key: String,
    pub num_tag_key: String,

    // payload
    pub payload_bytes: usize,
    pub crc_bytes: usize,
    pub payload_mod: Modulation,

    // training
    pub training_algorithm: TrainingAlgorithm,
    pub training_seed: u64,
    pub training_length: Option<usize>,
    pub training_percent: f64,

    // cdma
    pub chips_per_symbol: usize,
    pub pulse_training: Vec<f64>,
    pub pulse_data: Vec<f64>,

    // timing
    pub num_filters: usize,
    pub pll_loop_bw: f64,
    pub frequency_resolution: FrequencyResolution,
}

impl Default for CdmaConfig {
    fn default() -> Self {
        Self {
            header_layout: HeaderLayout::default(),
            header_mod: Modulation::Bpsk,
            length_tag_key: LENGTH_TAG_KEY.to_string(),
            num_tag_key: NUM_TAG_KEY.to_string(),
            payload_bytes: PAYLOAD_BYTES_PER_FRAME,
            crc_bytes: CRC_BYTES,
            payload_mod: Modulation::Qpsk,
            training_algorithm: TrainingAlgorithm::ChaCha8,
            training_seed: TRAINING_SEED,
            training_length: None,
            training_percent: TRAINING_PERCENT,
            chips_per_symbol: CHIPS_PER_SYMBOL,
            pulse_training: PULSE_TRAINING.to_vec(),
            pulse_data: PULSE_DATA.to_vec(),
            num_filters: NUM_FILTERS,
            pll_loop_bw: PLL_LOOP_BW,
            frequency_resolution: FrequencyResolution::TrainingLengthLimited,
        }
    }
}

impl CdmaConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: CdmaConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn bits_per_header(&self) -> Result<usize> {
        self.header_layout.total_bits()
    }

    /// Boundary checks. Geometry mismatches are not errors here; they are
    /// corrected during derivation.
    pub fn validate(&self) -> Result<()> {
        self.header_mod.validate()?;
        self.payload_mod.validate()?;

        if self.bits_per_header()? == 0 {
            return Err(ParamsError::OutOfRange {
                name: "bits_per_header",
                value: 0.0,
                range: "[1, inf)",
            });
        }
        if self.chips_per_symbol == 0 {
            return Err(ParamsError::OutOfRange {
                name: "chips_per_symbol",
                value: 0.0,
                range: "[1, inf)",
            });
        }

        validate_power_percent(self.training_percent)?;
        validate_loop_bandwidth(self.pll_loop_bw)?;
        validate_num_filters(self.num_filters)?;
        TrainingSequenceGenerator::new(self.training_algorithm, self.training_seed)?;
        Ok(())
    }
}
