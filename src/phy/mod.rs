// Physical layer geometry: header, payload and frame sizing

pub mod frame;
pub mod header;
pub mod modulation;
pub mod payload;

pub use frame::FrameGeometry;
pub use header::{HeaderFormat, HeaderGeometry, HeaderLayout};
pub use modulation::{Modulation, ModulationInfo};
pub use payload::PayloadGeometry;
