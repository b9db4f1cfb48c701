/// 日志级别（可被 RUST_LOG 覆盖）
pub const LOG_LEVEL: &str = "info";

// ============================================================================
// Header Parameters
// ============================================================================

/// Bits carrying the packet length in the default header
pub const HEADER_LENGTH_BITS: usize = 12;

/// Bits carrying the packet number in the default header
pub const HEADER_NUMBER_BITS: usize = 16;

/// Bits carrying the header checksum
pub const HEADER_CRC_BITS: usize = 8;

/// Raw header bit budget before modulation alignment
pub const BITS_PER_HEADER: usize = HEADER_LENGTH_BITS + HEADER_NUMBER_BITS + HEADER_CRC_BITS;

/// Length tag key used by the packet header generator
pub const LENGTH_TAG_KEY: &str = "packet_len";

/// Number tag key used by the packet header generator
pub const NUM_TAG_KEY: &str = "packet_num";

// ============================================================================
// Payload Parameters
// ============================================================================

/// Payload bytes per frame requested by default
pub const PAYLOAD_BYTES_PER_FRAME: usize = 50;

/// CRC32 overhead appended to every payload
pub const CRC_BYTES: usize = 4;

// ============================================================================
// Training / CDMA Parameters
// ============================================================================

/// Seed shared by transmitter and receiver for the training sequence
pub const TRAINING_SEED: u64 = 666;

/// Percentage of transmitted power spent on the training channel
pub const TRAINING_PERCENT: f64 = 50.0;

/// Spreading factor (chip rate / symbol rate)
pub const CHIPS_PER_SYMBOL: usize = 8;

/// Spreading pulse of the training channel
pub const PULSE_TRAINING: [f64; CHIPS_PER_SYMBOL] = [1.0, 1.0, 1.0, 1.0, -1.0, 1.0, 1.0, -1.0];

/// Spreading pulse of the data channel
pub const PULSE_DATA: [f64; CHIPS_PER_SYMBOL] = [-1.0, 1.0, -1.0, 1.0, -1.0, -1.0, -1.0, -1.0];

/// Feedback polynomial of the LFSR training generator
pub const LFSR_POLY: u32 = 0x1100b;

// ============================================================================
// Timing Parameters
// ============================================================================

/// Es/N0 (dB) above which the receiver switches from acquisition to tracking
pub const ESN0_DB_THRESHOLD: f64 = 10.0;

/// Floor used by SNR estimators to avoid division by zero
pub const EPSILON: f64 = 1e-6;

/// Number of matched filters in the frequency/timing acquisition bank
pub const NUM_FILTERS: usize = 51;

/// PLL loop bandwidth, normalized to the symbol rate
pub const PLL_LOOP_BW: f64 = 0.005;

/// Largest filter bank the acquisition block is configured with
pub const MAX_NUM_FILTERS: usize = 65_535;

/// Largest frame, in symbols, a configuration may derive
pub const MAX_SYMBOLS_PER_FRAME: usize = 1 << 24;

/// Tolerance for the orthogonality check of the spreading pulses
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-9;

/// Allowed deviation of a chip magnitude from 1
pub const CHIP_MAGNITUDE_TOLERANCE: f64 = 1e-9;
