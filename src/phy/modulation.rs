use crate::error::{ParamsError, Result};
use serde::{Deserialize, Serialize};

/// Source of the one attribute this crate needs from a constellation
pub trait ModulationInfo {
    fn bits_per_symbol(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modulation {
    Bpsk,
    Qpsk,
    #[serde(rename = "8psk")]
    Psk8,
    #[serde(rename = "16qam")]
    Qam16,
    #[serde(rename = "32qam")]
    Qam32,
    #[serde(rename = "64qam")]
    Qam64,
    #[serde(rename = "256qam")]
    Qam256,
    Custom { bits_per_symbol: usize },
}

impl Modulation {
    /// Build from a constellation size, which must be a power of two
    pub fn from_points(npoints: usize) -> Result<Self> {
        if npoints < 2 || !npoints.is_power_of_two() {
            return Err(ParamsError::InvalidModulation(format!(
                "{} constellation points is not a power of two >= 2",
                npoints
            )));
        }
        let bits_per_symbol = npoints.trailing_zeros() as usize;
        Ok(match bits_per_symbol {
            1 => Modulation::Bpsk,
            2 => Modulation::Qpsk,
            3 => Modulation::Psk8,
            4 => Modulation::Qam16,
            5 => Modulation::Qam32,
            6 => Modulation::Qam64,
            8 => Modulation::Qam256,
            bits_per_symbol => Modulation::Custom { bits_per_symbol },
        })
    }

    pub fn name(&self) -> String {
        match self {
            Modulation::Bpsk => "BPSK".to_string(),
            Modulation::Qpsk => "QPSK".to_string(),
            Modulation::Psk8 => "8PSK".to_string(),
            Modulation::Qam16 => "16QAM".to_string(),
            Modulation::Qam32 => "32QAM".to_string(),
            Modulation::Qam64 => "64QAM".to_string(),
            Modulation::Qam256 => "256QAM".to_string(),
            Modulation::Custom { bits_per_symbol } => format!("custom({} b/sym)", bits_per_symbol),
        }
    }

    /// Reject modulations that carry no bits
    pub fn validate(&self) -> Result<()> {
        if self.bits_per_symbol() == 0 {
            return Err(ParamsError::InvalidModulation(
                "bits per symbol must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl ModulationInfo for Modulation {
    fn bits_per_symbol(&self) -> usize {
        match self {
            Modulation::Bpsk => 1,
            Modulation::Qpsk => 2,
            Modulation::Psk8 => 3,
            Modulation::Qam16 => 4,
            Modulation::Qam32 => 5,
            Modulation::Qam64 => 6,
            Modulation::Qam256 => 8,
            Modulation::Custom { bits_per_symbol } => *bits_per_symbol,
        }
    }
}
