use crate::bits::BitSequence;
use crate::config::ModemConfig;
use crate::error::Result;
use crate::IqSample;
use std::f64::consts::PI;

// Binary continuous-phase FSK
//
// Each bit is held for `samples_per_symbol` samples at its tone (f0 or f1).
// The carrier phase is the running sum of the per-sample increment
// 2π·f/fs over the whole packet, so there is no phase jump at bit edges.
// Phase is accumulated in f64 and only the final I/Q values are narrowed
// to f32.

/// 2-FSK modulator producing unit-magnitude complex baseband
#[derive(Debug, Clone)]
pub struct FskModulator {
    config: ModemConfig,
}

impl FskModulator {
    pub fn new(config: ModemConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Number of samples a packet of `bit_count` bits occupies
    pub fn packet_len(&self, bit_count: usize) -> usize {
        bit_count * self.config.samples_per_symbol
    }

    /// Per-sample instantaneous frequency (Hz), each bit repeated `sps` times
    pub fn instantaneous_frequencies(&self, bits: &BitSequence) -> Vec<f64> {
        let sps = self.config.samples_per_symbol;
        let mut freqs = Vec::with_capacity(self.packet_len(bits.len()));
        for bit in bits.iter() {
            let freq = self.config.tone(bit);
            freqs.extend(std::iter::repeat(freq).take(sps));
        }
        freqs
    }

    /// Accumulated carrier phase (radians) at every sample.
    ///
    /// `phase[0]` already includes the first increment.
    pub fn phase_trajectory(&self, bits: &BitSequence) -> Vec<f64> {
        let fs = self.config.sample_rate;
        let mut phase = 0.0f64;
        self.instantaneous_frequencies(bits)
            .into_iter()
            .map(|freq| {
                phase += 2.0 * PI * freq / fs;
                phase
            })
            .collect()
    }

    /// Modulate one packet
    ///
    /// Output length is `bits.len() * samples_per_symbol`; an empty bit
    /// sequence gives an empty packet.
    pub fn modulate(&self, bits: &BitSequence) -> Vec<IqSample> {
        self.phase_trajectory(bits)
            .into_iter()
            .map(|phi| IqSample::new(phi.cos() as f32, phi.sin() as f32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::hex_to_bits;

    fn test_modulator() -> FskModulator {
        FskModulator::new(ModemConfig::new(1000.0, 4, 100.0, 200.0)).unwrap()
    }

    #[test]
    fn test_packet_length() {
        let fsk = test_modulator();
        let bits = hex_to_bits("abcd").unwrap();
        assert_eq!(fsk.modulate(&bits).len(), 16 * 4);
    }

    #[test]
    fn test_empty_bits_give_empty_packet() {
        let fsk = test_modulator();
        assert!(fsk.modulate(&BitSequence::default()).is_empty());
    }

    #[test]
    fn test_all_zero_bits_use_f0() {
        let fsk = test_modulator();
        let bits = hex_to_bits("0000").unwrap();
        let expected = 2.0 * PI * 100.0 / 1000.0;

        let phases = fsk.phase_trajectory(&bits);
        assert!((phases[0] - expected).abs() < 1e-12);
        for pair in phases.windows(2) {
            assert!((pair[1] - pair[0] - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_all_one_bits_use_f1() {
        let fsk = test_modulator();
        let bits = hex_to_bits("ffff").unwrap();
        let expected = 2.0 * PI * 200.0 / 1000.0;

        for pair in fsk.phase_trajectory(&bits).windows(2) {
            assert!((pair[1] - pair[0] - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_phase_continuous_across_symbol_edges() {
        let fsk = test_modulator();
        let bits = hex_to_bits("a5").unwrap(); // alternating tones
        let freqs = fsk.instantaneous_frequencies(&bits);
        let phases = fsk.phase_trajectory(&bits);

        for n in 1..phases.len() {
            let expected = 2.0 * PI * freqs[n] / 1000.0;
            assert!(
                (phases[n] - phases[n - 1] - expected).abs() < 1e-9,
                "phase jump at sample {}",
                n
            );
        }

        // Same property observed on the emitted samples
        let samples = fsk.modulate(&bits);
        for n in 1..samples.len() {
            let step = (samples[n] * samples[n - 1].conj()).arg() as f64;
            let expected = 2.0 * PI * freqs[n] / 1000.0;
            assert!((step - expected).abs() < 1e-4, "sample {}: {} vs {}", n, step, expected);
        }
    }

    #[test]
    fn test_unit_magnitude() {
        let fsk = FskModulator::new(ModemConfig::default()).unwrap();
        let bits = hex_to_bits("07ffffffffffffffffffffffffffffe3887aafda352d50a4119a0").unwrap();
        for (i, s) in fsk.modulate(&bits).iter().enumerate() {
            assert!((s.norm() - 1.0).abs() < 1e-6, "sample {} has magnitude {}", i, s.norm());
        }
    }

    #[test]
    fn test_phase_is_exact_running_sum() {
        let fsk = FskModulator::new(ModemConfig::default()).unwrap();
        let bits = hex_to_bits("07ffffffffffffffffffffffffffffe3887aafda352d50a4119a0").unwrap();
        let freqs = fsk.instantaneous_frequencies(&bits);

        let mut acc = 0.0f64;
        let expected: Vec<f64> = freqs
            .iter()
            .map(|&f| {
                acc += 2.0 * PI * f / 2e6;
                acc
            })
            .collect();

        // Bit-for-bit, not within a tolerance
        assert_eq!(fsk.phase_trajectory(&bits), expected);
    }

    #[test]
    fn test_frequency_map_follows_bits() {
        let fsk = test_modulator();
        let bits = hex_to_bits("80").unwrap();
        let freqs = fsk.instantaneous_frequencies(&bits);
        assert_eq!(freqs.len(), 32);
        assert!(freqs[..4].iter().all(|&f| f == 200.0));
        assert!(freqs[4..].iter().all(|&f| f == 100.0));
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(FskModulator::new(ModemConfig::new(1000.0, 0, 100.0, 200.0)).is_err());
    }

    #[test]
    fn test_deterministic() {
        let fsk = test_modulator();
        let bits = hex_to_bits("c0ffee").unwrap();
        assert_eq!(fsk.modulate(&bits), fsk.modulate(&bits));
    }
}
