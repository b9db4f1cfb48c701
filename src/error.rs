//! Error types for parameter derivation.

use thiserror::Error;

/// Configuration defects that cannot be auto-corrected
#[derive(Error, Debug)]
pub enum ParamsError {
    /// Modulation does not resolve to a usable bits-per-symbol
    #[error("invalid modulation: {0}")]
    InvalidModulation(String),

    /// Training and data pulses correlate
    #[error("spreading codes are not orthogonal (inner product {inner_product})")]
    NonOrthogonalSpreadingCodes { inner_product: f64 },

    /// Pulse lengths disagree with each other or with the spreading factor
    #[error(
        "spreading code length mismatch: training={training}, data={data}, chips_per_symbol={chips_per_symbol}"
    )]
    SpreadingCodeLength {
        training: usize,
        data: usize,
        chips_per_symbol: usize,
    },

    /// A chip is not of unit magnitude
    #[error("chip {index} of the {channel} pulse has magnitude {magnitude}, expected 1")]
    InvalidChip {
        channel: &'static str,
        index: usize,
        magnitude: f64,
    },

    /// Filter bank size is even or zero
    #[error("filter count {0} must be odd and positive")]
    InvalidFilterCount(usize),

    /// Numeric input outside its admissible range
    #[error("{name}={value} out of range {range}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        range: &'static str,
    },

    /// Training generator cannot be keyed with this seed
    #[error("invalid training seed {seed:#x}: {reason}")]
    InvalidTrainingSeed { seed: u64, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParamsError {
    /// A derived size that does not fit in `usize`
    pub fn overflow(name: &'static str, value: f64) -> Self {
        ParamsError::OutOfRange {
            name,
            value,
            range: "fits in usize",
        }
    }
}

/// Result type alias for parameter derivation
pub type Result<T> = std::result::Result<T, ParamsError>;

/// Auto-corrected inconsistencies observed while deriving parameters
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum Diagnostic {
    /// Header bit count rounded up to a whole number of symbols
    HeaderAdjusted {
        requested_bits: usize,
        adjusted_bits: usize,
    },
    /// Payload byte count changed so the coded payload fills whole symbols
    PayloadAdjusted {
        requested_bytes: usize,
        adjusted_bytes: usize,
    },
    /// Active training length exceeded the frame and was clamped
    TrainingLengthClamped { requested: usize, max: usize },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::HeaderAdjusted {
                requested_bits,
                adjusted_bits,
            } => write!(
                f,
                "bits per header adjusted from {} to {}",
                requested_bits, adjusted_bits
            ),
            Diagnostic::PayloadAdjusted {
                requested_bytes,
                adjusted_bytes,
            } => write!(
                f,
                "payload bytes per frame adjusted from {} to {}",
                requested_bytes, adjusted_bytes
            ),
            Diagnostic::TrainingLengthClamped { requested, max } => write!(
                f,
                "training length {} clamped to {}",
                requested, max
            ),
        }
    }
}
