use crate::bits::{hex_to_bits, BitSequence};
use crate::cadence::{check_period, Cadence};
use crate::config::ModemConfig;
use crate::error::{PressError, Result};
use crate::fsk::FskModulator;
use crate::IqSample;
use log::{debug, warn};

/// Largest sample buffer a press may occupy
const MAX_PRESS_SAMPLES: usize = isize::MAX as usize / std::mem::size_of::<IqSample>();

/// Sizes and timings of a synthesized press
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressStats {
    pub bit_count: usize,
    pub packet_samples: usize,
    pub gap_samples: usize,
    pub packet_count: usize,
    /// `round(period * fs)`; may be smaller than the packet itself
    pub start_to_start_samples: usize,
    /// Set when the period was too short to leave any silence
    pub gap_clamped: bool,
    pub sample_rate: f64,
}

impl PressStats {
    pub fn total_samples(&self) -> usize {
        self.packet_count * (self.packet_samples + self.gap_samples)
    }

    pub fn packet_duration_secs(&self) -> f64 {
        self.packet_samples as f64 / self.sample_rate
    }

    pub fn gap_duration_secs(&self) -> f64 {
        self.gap_samples as f64 / self.sample_rate
    }

    pub fn total_duration_secs(&self) -> f64 {
        self.total_samples() as f64 / self.sample_rate
    }
}

/// One button press: `[packet][silence]` repeated `packet_count` times
#[derive(Debug, Clone)]
pub struct Press {
    samples: Vec<IqSample>,
    stats: PressStats,
}

impl Press {
    pub fn samples(&self) -> &[IqSample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<IqSample> {
        self.samples
    }

    pub fn stats(&self) -> &PressStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Build a press as one contiguous buffer.
///
/// Every tile holds the same packet, so the carrier phase restarts at the
/// beginning of each packet. When `period_secs` is not longer than a
/// packet, no silence is inserted and `PressStats::gap_clamped` is set.
pub fn build_press(
    bits: &BitSequence,
    config: &ModemConfig,
    period_secs: f64,
    packets: usize,
) -> Result<Press> {
    check_period(period_secs)?;
    if packets == 0 {
        return Err(PressError::InvalidConfig(
            "packets per press must be at least 1".into(),
        ));
    }

    let fsk = FskModulator::new(*config)?;

    // Ties round to even
    let start_to_start = (period_secs * config.sample_rate).round_ties_even();
    if start_to_start > MAX_PRESS_SAMPLES as f64 {
        return Err(PressError::InvalidCadence(format!(
            "period {} s at {} S/s does not fit in a sample buffer",
            period_secs, config.sample_rate
        )));
    }
    let start_to_start_samples = start_to_start as usize;

    let packet_samples = bits
        .len()
        .checked_mul(config.samples_per_symbol)
        .filter(|&n| n <= MAX_PRESS_SAMPLES)
        .ok_or_else(|| {
            PressError::InvalidConfig(format!(
                "{} bits at {} samples per symbol do not fit in a sample buffer",
                bits.len(),
                config.samples_per_symbol
            ))
        })?;
    let gap_clamped = start_to_start_samples <= packet_samples;
    let gap_samples = start_to_start_samples.saturating_sub(packet_samples);
    let unit_samples = packet_samples.max(start_to_start_samples);

    let total_samples = unit_samples
        .checked_mul(packets)
        .filter(|&n| n <= MAX_PRESS_SAMPLES)
        .ok_or_else(|| {
            PressError::InvalidConfig(format!(
                "{} packets of {} samples do not fit in a sample buffer",
                packets, unit_samples
            ))
        })?;

    let mut unit = fsk.modulate(bits);
    unit.resize(unit_samples, IqSample::new(0.0, 0.0));

    let mut samples = Vec::with_capacity(total_samples);
    for _ in 0..packets {
        samples.extend_from_slice(&unit);
    }

    let stats = PressStats {
        bit_count: bits.len(),
        packet_samples,
        gap_samples,
        packet_count: packets,
        start_to_start_samples,
        gap_clamped,
        sample_rate: config.sample_rate,
    };

    debug!(
        "built press: bits={} packet={} gap={} packets={} total={}",
        stats.bit_count,
        stats.packet_samples,
        stats.gap_samples,
        stats.packet_count,
        samples.len()
    );
    if gap_clamped {
        warn!(
            "period {:.6} s is not longer than the {:.6} s packet; no silent gap inserted",
            period_secs,
            stats.packet_duration_secs()
        );
    }

    Ok(Press { samples, stats })
}

/// Builds presses for a fixed modem configuration and cadence
#[derive(Debug, Clone)]
pub struct PressBuilder {
    config: ModemConfig,
    cadence: Cadence,
    packets: usize,
}

impl PressBuilder {
    pub fn new(config: ModemConfig, cadence: Cadence, packets: usize) -> Result<Self> {
        config.validate()?;
        check_period(cadence.period_secs)?;
        if packets == 0 {
            return Err(PressError::InvalidConfig(
                "packets per press must be at least 1".into(),
            ));
        }
        Ok(Self {
            config,
            cadence,
            packets,
        })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    pub fn packets(&self) -> usize {
        self.packets
    }

    pub fn build(&self, bits: &BitSequence) -> Result<Press> {
        build_press(bits, &self.config, self.cadence.period_secs, self.packets)
    }

    pub fn build_from_hex(&self, hex: &str) -> Result<Press> {
        let bits = hex_to_bits(hex)?;
        self.build(&bits)
    }
}
