//! HackRF output through the `hackrf_transfer` utility
//!
//! Samples are streamed to the tool's stdin as interleaved signed 8-bit I/Q
//! (the HackRF native `cs8` format). The call returns once the tool has
//! drained its input and exited.

use fskpress_core::{DeviceConfig, IqSample, TransmitError, Transmitter};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Convert complex samples to interleaved i8 `[I, Q, I, Q, ...]` bytes
pub fn to_cs8(samples: &[IqSample]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for s in samples {
        out.push((s.re * 127.0).clamp(-128.0, 127.0) as i8 as u8);
        out.push((s.im * 127.0).clamp(-128.0, 127.0) as i8 as u8);
    }
    out
}

/// Command-line flags for one transmission.
///
/// `tx_gain` switches the front-end RF amplifier, `if_gain` is the TX VGA
/// gain (0-47 dB). HackRF has no transmit baseband gain, so `bb_gain` is not
/// passed on.
pub fn transfer_args(device: &DeviceConfig) -> Vec<String> {
    vec![
        "-t".to_string(),
        "-".to_string(),
        "-f".to_string(),
        format!("{:.0}", device.center_freq),
        "-s".to_string(),
        format!("{:.0}", device.sample_rate),
        "-b".to_string(),
        format!("{:.0}", device.bandwidth),
        "-x".to_string(),
        device.if_gain.min(47).to_string(),
        "-a".to_string(),
        if device.tx_gain > 0 { "1" } else { "0" }.to_string(),
    ]
}

#[derive(Debug, Clone)]
pub struct HackRfTransfer {
    program: PathBuf,
}

impl HackRfTransfer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Transmitter for HackRfTransfer {
    fn transmit(&mut self, buffer: &[IqSample], device: &DeviceConfig) -> Result<(), TransmitError> {
        let args = transfer_args(device);
        debug!(
            "spawning {} {} (bb_gain {} ignored)",
            self.program.display(),
            args.join(" "),
            device.bb_gain
        );

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(TransmitError::Spawn)?;

        let bytes = to_cs8(buffer);
        let written = match child.stdin.take() {
            // Dropping stdin signals end of stream
            Some(mut stdin) => stdin.write_all(&bytes).and_then(|_| stdin.flush()),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "transmitter stdin not available",
            )),
        };

        if let Err(e) = written {
            let _ = child.kill();
            let _ = child.wait();
            return Err(TransmitError::Io(e));
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(TransmitError::Exit {
                code: status.code(),
            });
        }
        Ok(())
    }
}
