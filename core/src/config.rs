use crate::error::{PressError, Result};
use std::time::Duration;

/// Modulator parameters: sample rate, symbol length and the two FSK tones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModemConfig {
    /// Sample rate in samples per second
    pub sample_rate: f64,
    /// Samples emitted for each bit
    pub samples_per_symbol: usize,
    /// Baseband tone for a 0 bit (Hz)
    pub f0: f64,
    /// Baseband tone for a 1 bit (Hz)
    pub f1: f64,
}

impl ModemConfig {
    pub fn new(sample_rate: f64, samples_per_symbol: usize, f0: f64, f1: f64) -> Self {
        Self {
            sample_rate,
            samples_per_symbol,
            f0,
            f1,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(PressError::InvalidConfig(format!(
                "sample rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.samples_per_symbol == 0 {
            return Err(PressError::InvalidConfig(
                "samples per symbol must be at least 1".into(),
            ));
        }
        if !self.f0.is_finite() || !self.f1.is_finite() {
            return Err(PressError::InvalidConfig(format!(
                "tone frequencies must be finite, got f0={} f1={}",
                self.f0, self.f1
            )));
        }
        Ok(())
    }

    /// Tone frequency for a bit value
    pub fn tone(&self, bit: u8) -> f64 {
        if bit == 0 {
            self.f0
        } else {
            self.f1
        }
    }

    /// Symbols per second
    pub fn symbol_rate(&self) -> f64 {
        self.sample_rate / self.samples_per_symbol as f64
    }
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            sample_rate: crate::DEFAULT_SAMPLE_RATE,
            samples_per_symbol: crate::DEFAULT_SAMPLES_PER_SYMBOL,
            f0: crate::DEFAULT_F0_HZ,
            f1: crate::DEFAULT_F1_HZ,
        }
    }
}

/// Radio settings handed to the transmit backend. The synthesizer never
/// reads these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceConfig {
    pub center_freq: f64,
    pub sample_rate: f64,
    pub bandwidth: f64,
    pub tx_gain: u32,
    pub if_gain: u32,
    pub bb_gain: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            center_freq: crate::DEFAULT_CENTER_FREQ,
            sample_rate: crate::DEFAULT_SAMPLE_RATE,
            bandwidth: crate::DEFAULT_BANDWIDTH,
            tx_gain: crate::DEFAULT_TX_GAIN,
            if_gain: crate::DEFAULT_IF_GAIN,
            bb_gain: crate::DEFAULT_BB_GAIN,
        }
    }
}

/// How many times the payload list is replayed and how long to wait between
/// presses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceConfig {
    pub repeat: usize,
    pub press_gap_secs: f64,
}

impl SequenceConfig {
    pub fn validate(&self) -> Result<()> {
        self.press_gap().map(|_| ())
    }

    /// Pause between presses
    pub fn press_gap(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.press_gap_secs).map_err(|_| {
            PressError::InvalidConfig(format!(
                "press gap must be zero or a positive number of seconds, got {}",
                self.press_gap_secs
            ))
        })
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            repeat: crate::DEFAULT_REPEAT,
            press_gap_secs: crate::DEFAULT_PRESS_GAP_SECS,
        }
    }
}
