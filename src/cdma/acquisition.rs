//! Frequency search grid for the matched-filter bank of the frequency/timing
//! acquisition block, and the thresholds its consumers share.
//!
//! All frequencies are normalized to the chip rate.

use crate::error::{ParamsError, Result};
use crate::utils::consts::{EPSILON, ESN0_DB_THRESHOLD, MAX_NUM_FILTERS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which resolution bound sets the spacing of the filter bank
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyResolution {
    /// `df1`: limited by the training sequence length
    #[default]
    TrainingLengthLimited,
    /// `df2`: limited by the PLL loop bandwidth
    LoopBandwidthLimited,
    /// `max(df1, df2)`: a neighbouring branch or the PLL absorbs the residual
    Max,
}

impl FrequencyResolution {
    pub fn select(&self, df1: f64, df2: f64) -> f64 {
        match self {
            FrequencyResolution::TrainingLengthLimited => df1,
            FrequencyResolution::LoopBandwidthLimited => df2,
            FrequencyResolution::Max => df1.max(df2),
        }
    }
}

/// Check the filter count keeps the grid symmetric about zero and bounded
pub fn validate_num_filters(num_filters: usize) -> Result<()> {
    if num_filters == 0 || num_filters % 2 == 0 || num_filters > MAX_NUM_FILTERS {
        return Err(ParamsError::InvalidFilterCount(num_filters));
    }
    Ok(())
}

/// Check a normalized loop bandwidth lies strictly inside (0, 1)
pub fn validate_loop_bandwidth(pll_loop_bw: f64) -> Result<()> {
    if !pll_loop_bw.is_finite() || pll_loop_bw <= 0.0 || pll_loop_bw >= 1.0 {
        return Err(ParamsError::OutOfRange {
            name: "pll_loop_bw",
            value: pll_loop_bw,
            range: "(0, 1)",
        });
    }
    Ok(())
}

/// Centre frequencies `(2k - n + 1) * df / 2` for `k` in `0..n`
pub fn filter_frequencies(num_filters: usize, df: f64) -> Vec<f64> {
    let n = num_filters as i64;
    (0..n)
        .map(|k| (2 * k - n + 1) as f64 * df / 2.0)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquisitionGrid {
    /// Matched-filter correlation peak over noise variance
    pub peak_over_variance: f64,
    pub esn0_threshold_db: f64,
    pub epsilon: f64,
    pub num_filters: usize,
    pub df1: f64,
    pub df2: f64,
    pub resolution: FrequencyResolution,
    pub df: f64,
    pub frequencies: Vec<f64>,
}

impl AcquisitionGrid {
    pub fn derive(
        power_percent: f64,
        symbols_per_frame: usize,
        chips_per_symbol: usize,
        num_filters: usize,
        pll_loop_bw: f64,
        resolution: FrequencyResolution,
    ) -> Result<Self> {
        validate_num_filters(num_filters)?;
        validate_loop_bandwidth(pll_loop_bw)?;
        crate::cdma::training::validate_power_percent(power_percent)?;
        let chips_per_frame = symbols_per_frame
            .checked_mul(chips_per_symbol)
            .ok_or_else(|| {
                ParamsError::overflow(
                    "chips_per_frame",
                    symbols_per_frame as f64 * chips_per_symbol as f64,
                )
            })?;
        if chips_per_frame == 0 {
            return Err(ParamsError::OutOfRange {
                name: "chips_per_frame",
                value: 0.0,
                range: "[1, inf)",
            });
        }

        let chips_per_frame = chips_per_frame as f64;
        let peak_over_variance = power_percent * chips_per_frame / (100.0 + power_percent);

        let df1 = 1.0 / (2.0 * chips_per_frame);
        let df2 = pll_loop_bw / chips_per_symbol as f64;
        let df = resolution.select(df1, df2);
        let frequencies = filter_frequencies(num_filters, df);

        debug!(
            "peak_o_var={}, df1={:e}, df2={:e}, df={:e} ({:?})",
            peak_over_variance, df1, df2, df, resolution
        );

        Ok(Self {
            peak_over_variance,
            esn0_threshold_db: ESN0_DB_THRESHOLD,
            epsilon: EPSILON,
            num_filters,
            df1,
            df2,
            resolution,
            df,
            frequencies,
        })
    }

    /// Normalized frequency uncertainty range covered by the bank
    pub fn uncertainty_range(&self) -> (f64, f64) {
        let n = self.frequencies.len();
        (self.frequencies[0], self.frequencies[n - 1])
    }

    pub fn esn0_threshold_linear(&self) -> f64 {
        10f64.powf(self.esn0_threshold_db / 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> AcquisitionGrid {
        AcquisitionGrid::derive(50.0, 252, 8, 51, 0.005, FrequencyResolution::default()).unwrap()
    }

    #[test]
    fn test_reference_grid() {
        let grid = reference();
        assert_eq!(grid.df1, 1.0 / 4032.0);
        assert_eq!(grid.df, grid.df1);
        assert_eq!(grid.df2, 0.005 / 8.0);
        assert_eq!(grid.frequencies.len(), 51);
        assert_eq!(grid.frequencies[25], 0.0);
        assert!((grid.frequencies[0] + 25.0 * grid.df).abs() < 1e-15);
        assert!((grid.frequencies[50] - 25.0 * grid.df).abs() < 1e-15);
        assert_eq!(grid.peak_over_variance, 672.0);
        assert_eq!(grid.esn0_threshold_db, 10.0);
        assert_eq!(grid.epsilon, 1e-6);
    }

    #[test]
    fn test_grid_symmetric_and_increasing() {
        for resolution in [
            FrequencyResolution::TrainingLengthLimited,
            FrequencyResolution::LoopBandwidthLimited,
            FrequencyResolution::Max,
        ] {
            for n in [1, 3, 51, 101] {
                let grid = AcquisitionGrid::derive(30.0, 100, 16, n, 0.01, resolution).unwrap();
                let f = &grid.frequencies;
                assert_eq!(f.len(), n);
                assert_eq!(f[n / 2], 0.0);
                for i in 0..n {
                    assert_eq!(f[i], -f[n - 1 - i]);
                }
                assert!(f.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn test_resolution_strategies() {
        let pick = |r| AcquisitionGrid::derive(50.0, 252, 8, 51, 0.005, r).unwrap().df;
        let df1 = 1.0 / 4032.0;
        let df2 = 0.005 / 8.0;
        assert_eq!(pick(FrequencyResolution::TrainingLengthLimited), df1);
        assert_eq!(pick(FrequencyResolution::LoopBandwidthLimited), df2);
        assert_eq!(pick(FrequencyResolution::Max), df2);
    }

    #[test]
    fn test_uncertainty_range() {
        let grid = reference();
        let (lo, hi) = grid.uncertainty_range();
        assert_eq!(lo, -hi);
        assert!((hi - 25.0 / 4032.0).abs() < 1e-15);
    }

    #[test]
    fn test_invalid_filter_counts() {
        for n in [0, 2, 50, MAX_NUM_FILTERS + 2, usize::MAX] {
            assert!(matches!(
                AcquisitionGrid::derive(50.0, 252, 8, n, 0.005, FrequencyResolution::default()),
                Err(ParamsError::InvalidFilterCount(_))
            ));
        }
    }

    #[test]
    fn test_out_of_range_inputs() {
        let r = FrequencyResolution::default();
        assert!(AcquisitionGrid::derive(50.0, 252, 8, 51, 0.0, r).is_err());
        assert!(AcquisitionGrid::derive(50.0, 252, 8, 51, f64::INFINITY, r).is_err());
        assert!(AcquisitionGrid::derive(100.0, 252, 8, 51, 0.005, r).is_err());
        assert!(AcquisitionGrid::derive(50.0, 0, 8, 51, 0.005, r).is_err());
        assert!(matches!(
            AcquisitionGrid::derive(50.0, 252, usize::MAX / 8, 51, 0.005, r),
            Err(ParamsError::OutOfRange { name: "chips_per_frame", .. })
        ));
    }

    #[test]
    fn test_threshold_linear() {
        assert!((reference().esn0_threshold_linear() - 10.0).abs() < 1e-12);
    }
}
