use crate::error::{ParamsError, Result};
use crate::utils::consts::{
    CHIP_MAGNITUDE_TOLERANCE, ORTHOGONALITY_TOLERANCE, PULSE_DATA, PULSE_TRAINING,
};
use num_complex::Complex64;
use serde::Serialize;
use tracing::debug;

/// Walsh-Hadamard row `m` of length `n` (n a power of two)
pub fn walsh_row(m: usize, n: usize) -> Vec<f64> {
    (0..n)
        .map(|j| {
            let parity = (m & j).count_ones() & 1;
            if parity == 0 { 1.0 } else { -1.0 }
        })
        .collect()
}

/// Hermitian inner product `sum(a[i] * conj(b[i]))`
pub fn inner_product(a: &[Complex64], b: &[Complex64]) -> Complex64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x * y.conj())
        .sum()
}

/// Chip sequences of the training and data channels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadingCodes {
    pub training_pulse: Vec<Complex64>,
    pub data_pulse: Vec<Complex64>,
}

impl SpreadingCodes {
    /// Promote real chips to complex and validate the pair
    pub fn new(training: &[f64], data: &[f64], chips_per_symbol: usize) -> Result<Self> {
        let to_complex =
            |chips: &[f64]| chips.iter().map(|&c| Complex64::new(c, 0.0)).collect::<Vec<_>>();
        Self::from_complex(to_complex(training), to_complex(data), chips_per_symbol)
    }

    /// Reject pulses of the wrong length, non-unit chips, or correlated pairs
    pub fn from_complex(
        training_pulse: Vec<Complex64>,
        data_pulse: Vec<Complex64>,
        chips_per_symbol: usize,
    ) -> Result<Self> {
        if training_pulse.len() != chips_per_symbol || data_pulse.len() != chips_per_symbol {
            return Err(ParamsError::SpreadingCodeLength {
                training: training_pulse.len(),
                data: data_pulse.len(),
                chips_per_symbol,
            });
        }

        for (channel, pulse) in [("training", &training_pulse), ("data", &data_pulse)] {
            if let Some((index, chip)) = pulse
                .iter()
                .enumerate()
                .find(|(_, c)| (c.norm() - 1.0).abs() > CHIP_MAGNITUDE_TOLERANCE)
            {
                return Err(ParamsError::InvalidChip {
                    channel,
                    index,
                    magnitude: chip.norm(),
                });
            }
        }

        let codes = Self {
            training_pulse,
            data_pulse,
        };
        let correlation = codes.inner_product();
        if !codes.is_orthogonal() {
            return Err(ParamsError::NonOrthogonalSpreadingCodes {
                inner_product: correlation.norm(),
            });
        }

        debug!("Spreading codes: {} chips, orthogonal", chips_per_symbol);
        Ok(codes)
    }

    /// Pair of distinct Walsh rows, orthogonal by construction
    pub fn walsh(training_row: usize, data_row: usize, chips_per_symbol: usize) -> Result<Self> {
        if !chips_per_symbol.is_power_of_two()
            || training_row >= chips_per_symbol
            || data_row >= chips_per_symbol
        {
            return Err(ParamsError::SpreadingCodeLength {
                training: training_row,
                data: data_row,
                chips_per_symbol,
            });
        }
        Self::new(
            &walsh_row(training_row, chips_per_symbol),
            &walsh_row(data_row, chips_per_symbol),
            chips_per_symbol,
        )
    }

    pub fn chips_per_symbol(&self) -> usize {
        self.training_pulse.len()
    }

    pub fn inner_product(&self) -> Complex64 {
        inner_product(&self.training_pulse, &self.data_pulse)
    }

    /// Orthogonality under the Hermitian product `sum(t[i] * conj(d[i]))`.
    ///
    /// For real chips this equals the plain elementwise sum. For complex
    /// chips it does not: `{1, j}` and `{1, -j}` are orthogonal here although
    /// their elementwise product sums to 2.
    pub fn is_orthogonal(&self) -> bool {
        self.inner_product().norm() <= ORTHOGONALITY_TOLERANCE
    }
}

impl Default for SpreadingCodes {
    fn default() -> Self {
        let to_complex = |chips: &[f64]| -> Vec<Complex64> {
            chips.iter().map(|&c| Complex64::new(c, 0.0)).collect()
        };
        Self {
            training_pulse: to_complex(&PULSE_TRAINING[..]),
            data_pulse: to_complex(&PULSE_DATA[..]),
        }
    }
}
