//! Remote-control button press synthesizer
//!
//! Turns hex payloads into 2-FSK complex baseband bursts: each packet is
//! phase-continuous FSK, followed by silence up to the start-to-start period,
//! tiled into one "press". Radio output and real-time pacing are injected
//! through the [`Transmitter`] and [`Pacer`] traits.

pub mod error;
pub mod bits;
pub mod config;
pub mod fsk;
pub mod cadence;
pub mod press;
pub mod sequencer;
pub mod transmit;
pub mod pacing;

pub use bits::{clean_hex, hex_to_bits, BitSequence};
pub use cadence::{resolve_period, Cadence, CadenceSource};
pub use config::{DeviceConfig, ModemConfig, SequenceConfig};
pub use error::{PressError, Result, SequenceError, TransmitError};
pub use fsk::FskModulator;
pub use pacing::{CancelHandle, Cancelled, NoopPacer, Pacer, ThreadPacer};
pub use press::{build_press, Press, PressBuilder, PressStats};
pub use sequencer::{run_sequence, PressIndex, PressSequence, RunSummary, SequencedPress};
pub use transmit::{CaptureTransmitter, DryRunTransmitter, Transmitter};

/// One complex baseband sample (I + jQ)
pub type IqSample = num_complex::Complex32;

// Radio defaults (2.4 GHz remote, 250 ksym/s)
pub const DEFAULT_CENTER_FREQ: f64 = 2.44388e9; // Hz
pub const DEFAULT_SAMPLE_RATE: f64 = 2.0e6; // S/s
pub const DEFAULT_SAMPLES_PER_SYMBOL: usize = 8;
pub const DEFAULT_F0_HZ: f64 = 28320.0;
pub const DEFAULT_F1_HZ: f64 = 56641.0;
pub const DEFAULT_TX_GAIN: u32 = 40;
pub const DEFAULT_IF_GAIN: u32 = 21;
pub const DEFAULT_BB_GAIN: u32 = 20;
pub const DEFAULT_BANDWIDTH: f64 = 2.0e6; // Hz

// Press cadence: ~102 packets over ~1.22 s
pub const DEFAULT_PACKETS: usize = 100;
pub const DEFAULT_PERIOD_SECS: f64 = 1.22 / 102.0; // ~11.96 ms start-to-start
pub const DEFAULT_REPEAT: usize = 1;
pub const DEFAULT_PRESS_GAP_SECS: f64 = 0.3;
