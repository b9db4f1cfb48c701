//! Frame geometry and synchronization parameters for a spread-spectrum
//! (CDMA) physical layer.
//!
//! Header and payload sizes are aligned to their modulations, combined into a
//! frame, and used to derive the training sequence and the frequency grid of
//! the acquisition filter bank. Everything is a pure function of
//! [`CdmaConfig`].

pub mod cdma;
pub mod config;
pub mod error;
pub mod params;
pub mod phy;
pub mod utils;

pub use config::CdmaConfig;
pub use error::{Diagnostic, ParamsError, Result};
pub use params::CdmaParameters;
