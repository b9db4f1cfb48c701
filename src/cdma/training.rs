//! Training sequence generation for the CDMA training channel
//!
//! Transmitter and receiver never exchange the training sequence: both
//! regenerate it from the same (algorithm, seed) pair, so the pair and the
//! bit extraction below are part of the link configuration and must not
//! change between nodes.

use crate::error::{Diagnostic, ParamsError, Result};
use num_complex::Complex64;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingAlgorithm {
    /// Low bit of successive `next_u32` words from ChaCha8 seeded with `seed_from_u64`
    #[default]
    ChaCha8,
    /// Galois LFSR with the given feedback polynomial, register loaded with the seed
    Lfsr { poly: u32 },
}

// Pseudo-random bit sequence generator
pub struct Prbs {
    reg: u32,
    poly: u32,
    mask: u32,
    size: usize,
}

impl Prbs {
    pub fn new(reg: u32, poly: u32, bits: usize) -> Self {
        let mask = (1 << bits) - 1;
        let size = Self::degree(poly);
        Self { reg, poly, mask, size }
    }

    /// Register width implied by the polynomial degree
    pub fn degree(poly: u32) -> usize {
        (u32::BITS - 1 - poly.leading_zeros()) as usize
    }
}

impl Iterator for Prbs {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.reg & self.mask;
        self.reg <<= 1;
        if self.reg >> self.size != 0 {
            self.reg ^= self.poly;
        }
        Some(result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrainingSequenceGenerator {
    algorithm: TrainingAlgorithm,
    seed: u64,
}

impl TrainingSequenceGenerator {
    pub fn new(algorithm: TrainingAlgorithm, seed: u64) -> Result<Self> {
        if let TrainingAlgorithm::Lfsr { poly } = algorithm {
            if poly < 4 {
                return Err(ParamsError::InvalidTrainingSeed {
                    seed,
                    reason: format!("LFSR polynomial {:#x} has degree below 2", poly),
                });
            }
            let degree = Prbs::degree(poly);
            if seed == 0 || seed >> degree != 0 {
                return Err(ParamsError::InvalidTrainingSeed {
                    seed,
                    reason: format!("LFSR seed must be non-zero and fit in {} bits", degree),
                });
            }
        }
        Ok(Self { algorithm, seed })
    }

    pub fn algorithm(&self) -> TrainingAlgorithm {
        self.algorithm
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw `len` uniform bits
    pub fn bits(&self, len: usize) -> Vec<u8> {
        match self.algorithm {
            TrainingAlgorithm::ChaCha8 => {
                let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
                (0..len)
                    .map(|_| (rng.next_u32() & 1) as u8)
                    .collect()
            }
            TrainingAlgorithm::Lfsr { poly } => Prbs::new(self.seed as u32, poly, 1)
                .take(len)
                .map(|bit| bit as u8)
                .collect(),
        }
    }

    /// Antipodal sequence: bit 0 -> -1, bit 1 -> +1, zero imaginary part
    pub fn generate(&self, len: usize) -> Vec<Complex64> {
        self.bits(len)
            .into_iter()
            .map(|bit| Complex64::new(2.0 * bit as f64 - 1.0, 0.0))
            .collect()
    }
}

/// Check a training power share lies strictly inside (0, 100)
pub fn validate_power_percent(power_percent: f64) -> Result<()> {
    if !power_percent.is_finite() || power_percent <= 0.0 || power_percent >= 100.0 {
        return Err(ParamsError::OutOfRange {
            name: "training_percent",
            value: power_percent,
            range: "(0, 100)",
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingConfig {
    pub generator: TrainingSequenceGenerator,
    pub full_sequence: Vec<Complex64>,
    pub active_length: usize,
    pub active_sequence: Vec<Complex64>,
    pub power_percent: f64,
}

impl TrainingConfig {
    /// Generate the frame-long sequence and cut the active prefix.
    ///
    /// `active_length` defaults to the whole frame; longer requests are
    /// clamped and reported. A shorter prefix is not renormalized.
    pub fn derive(
        generator: TrainingSequenceGenerator,
        symbols_per_frame: usize,
        active_length: Option<usize>,
        power_percent: f64,
    ) -> Result<(Self, Option<Diagnostic>)> {
        validate_power_percent(power_percent)?;

        let full_sequence = generator.generate(symbols_per_frame);
        let requested = active_length.unwrap_or(symbols_per_frame);
        let mut diagnostic = None;
        let active_length = if requested > symbols_per_frame {
            warn!(
                "Error in training length evaluation: {} > {} symbols per frame",
                requested, symbols_per_frame
            );
            diagnostic = Some(Diagnostic::TrainingLengthClamped {
                requested,
                max: symbols_per_frame,
            });
            symbols_per_frame
        } else {
            requested
        };
        let active_sequence = full_sequence[..active_length].to_vec();

        debug!(
            "training_length={}, training_percent={}",
            active_length, power_percent
        );

        Ok((
            Self {
                generator,
                full_sequence,
                active_length,
                active_sequence,
                power_percent,
            },
            diagnostic,
        ))
    }
}
