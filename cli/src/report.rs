use fskpress_core::{Cadence, DeviceConfig, ModemConfig, PressIndex, PressStats, SequenceConfig};

const PAYLOAD_DISPLAY_CHARS: usize = 24;

/// Payload as shown in progress lines, cut to 24 characters
pub fn shown_payload(hex: &str) -> String {
    if hex.chars().count() <= PAYLOAD_DISPLAY_CHARS {
        hex.to_string()
    } else {
        let head: String = hex.chars().take(PAYLOAD_DISPLAY_CHARS).collect();
        format!("{}…", head)
    }
}

pub fn config_line(modem: &ModemConfig, device: &DeviceConfig) -> String {
    format!(
        "[cfg] Fc={:.6} GHz  Fs={:.2} MS/s  SPS={}  F0={:.0} Hz  F1={:.0} Hz  BW={:.2} MHz  ({:.0} sym/s)",
        device.center_freq / 1e9,
        modem.sample_rate / 1e6,
        modem.samples_per_symbol,
        modem.f0,
        modem.f1,
        device.bandwidth / 1e6,
        modem.symbol_rate()
    )
}

pub fn cadence_line(packets: usize, cadence: &Cadence, sequence: &SequenceConfig) -> String {
    format!(
        "[cadence] packets/press={}  period={:.2} ms  (~{:.1} pps)  repeats={}  press-gap={:.2} s",
        packets,
        cadence.period_secs * 1e3,
        cadence.packets_per_second(),
        sequence.repeat,
        sequence.press_gap_secs
    )
}

/// Heading printed before each press; includes the set heading when the
/// payload list is replayed more than once.
pub fn press_heading(index: &PressIndex, hex: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(2);
    if index.repeat_count > 1 && index.payload == 1 {
        lines.push(format!(
            "=== Press set {}/{} ===",
            index.repeat, index.repeat_count
        ));
    }
    lines.push(format!(
        "-- Press {}/{}: {}",
        index.payload,
        index.payload_count,
        shown_payload(hex)
    ));
    lines
}

pub fn press_line(stats: &PressStats) -> String {
    format!(
        "[press] bits={}  pkt={} samp (~{:.2} ms), gap={} samp (~{:.2} ms), packets={}, total≈{:.2} s",
        stats.bit_count,
        stats.packet_samples,
        stats.packet_duration_secs() * 1e3,
        stats.gap_samples,
        stats.gap_duration_secs() * 1e3,
        stats.packet_count,
        stats.total_duration_secs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fskpress_core::{build_press, hex_to_bits};

    #[test]
    fn test_short_payload_shown_whole() {
        assert_eq!(shown_payload("deadbeef"), "deadbeef");
        let exact = "0".repeat(24);
        assert_eq!(shown_payload(&exact), exact);
    }

    #[test]
    fn test_long_payload_truncated() {
        let long = "07ffffffffffffffffffffffffffffe3887aafda352d50a4119a0";
        assert_eq!(shown_payload(long), "07ffffffffffffffffffffff…");
    }

    #[test]
    fn test_press_line_values() {
        let bits = hex_to_bits("00").unwrap();
        let press = build_press(&bits, &ModemConfig::new(1000.0, 4, 100.0, 200.0), 0.05, 2).unwrap();
        let line = press_line(press.stats());
        assert_eq!(
            line,
            "[press] bits=8  pkt=32 samp (~32.00 ms), gap=18 samp (~18.00 ms), packets=2, total≈0.10 s"
        );
    }

    #[test]
    fn test_set_heading_only_when_repeating() {
        let single = PressIndex {
            repeat: 1,
            repeat_count: 1,
            payload: 1,
            payload_count: 2,
        };
        assert_eq!(press_heading(&single, "00"), vec!["-- Press 1/2: 00"]);

        let repeated = PressIndex {
            repeat: 2,
            repeat_count: 3,
            ..single
        };
        assert_eq!(
            press_heading(&repeated, "00"),
            vec!["=== Press set 2/3 ===", "-- Press 1/2: 00"]
        );
    }

    #[test]
    fn test_config_lines() {
        let line = config_line(&ModemConfig::default(), &DeviceConfig::default());
        assert!(line.contains("Fc=2.443880 GHz"));
        assert!(line.contains("SPS=8"));
        assert!(line.contains("250000 sym/s"));

        let cadence = Cadence::from_period(0.02).unwrap();
        let line = cadence_line(100, &cadence, &SequenceConfig::default());
        assert!(line.contains("period=20.00 ms"));
        assert!(line.contains("~50.0 pps"));
    }
}
