// Spread-spectrum parameters: training sequence, spreading codes, acquisition grid

pub mod acquisition;
pub mod spreading;
pub mod training;

pub use acquisition::{AcquisitionGrid, FrequencyResolution};
pub use spreading::SpreadingCodes;
pub use training::{TrainingAlgorithm, TrainingConfig, TrainingSequenceGenerator};
