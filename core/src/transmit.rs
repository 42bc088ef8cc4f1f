use crate::config::DeviceConfig;
use crate::error::TransmitError;
use crate::IqSample;
use log::info;

/// Radio output capability.
///
/// `transmit` blocks until the whole buffer has left the device (or fails).
/// The buffer is only borrowed for the duration of the call.
pub trait Transmitter {
    fn transmit(&mut self, buffer: &[IqSample], device: &DeviceConfig) -> Result<(), TransmitError>;
}

impl<T: Transmitter + ?Sized> Transmitter for &mut T {
    fn transmit(&mut self, buffer: &[IqSample], device: &DeviceConfig) -> Result<(), TransmitError> {
        (**self).transmit(buffer, device)
    }
}

impl<T: Transmitter + ?Sized> Transmitter for Box<T> {
    fn transmit(&mut self, buffer: &[IqSample], device: &DeviceConfig) -> Result<(), TransmitError> {
        (**self).transmit(buffer, device)
    }
}

/// Keeps a copy of every buffer it is given
#[derive(Debug, Default)]
pub struct CaptureTransmitter {
    captured: Vec<(Vec<IqSample>, DeviceConfig)>,
}

impl CaptureTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffers(&self) -> impl Iterator<Item = &[IqSample]> {
        self.captured.iter().map(|(buf, _)| buf.as_slice())
    }

    pub fn devices(&self) -> impl Iterator<Item = &DeviceConfig> {
        self.captured.iter().map(|(_, dev)| dev)
    }

    pub fn len(&self) -> usize {
        self.captured.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }
}

impl Transmitter for CaptureTransmitter {
    fn transmit(&mut self, buffer: &[IqSample], device: &DeviceConfig) -> Result<(), TransmitError> {
        self.captured.push((buffer.to_vec(), *device));
        Ok(())
    }
}

/// Logs what would be sent and returns immediately
#[derive(Debug, Default)]
pub struct DryRunTransmitter {
    sent: usize,
}

impl DryRunTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers accepted so far
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl Transmitter for DryRunTransmitter {
    fn transmit(&mut self, buffer: &[IqSample], device: &DeviceConfig) -> Result<(), TransmitError> {
        self.sent += 1;
        info!(
            "[dry-run] {} samples (~{:.3} s) at {:.6} GHz, not transmitted",
            buffer.len(),
            buffer.len() as f64 / device.sample_rate,
            device.center_freq / 1e9
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_keeps_buffers_in_order() {
        let mut tx = CaptureTransmitter::new();
        let device = DeviceConfig::default();
        tx.transmit(&[IqSample::new(1.0, 0.0)], &device).unwrap();
        tx.transmit(&[IqSample::new(0.0, 1.0); 2], &device).unwrap();

        let lens: Vec<usize> = tx.buffers().map(|b| b.len()).collect();
        assert_eq!(lens, vec![1, 2]);
        assert!(tx.devices().all(|d| *d == device));
    }

    #[test]
    fn test_dry_run_counts() {
        let mut tx = DryRunTransmitter::new();
        let device = DeviceConfig::default();
        tx.transmit(&[], &device).unwrap();
        tx.transmit(&[IqSample::new(1.0, 0.0); 10], &device).unwrap();
        assert_eq!(tx.sent(), 2);
    }

    #[test]
    fn test_boxed_transmitter() {
        let mut tx: Box<dyn Transmitter> = Box::new(CaptureTransmitter::new());
        assert!(tx.transmit(&[], &DeviceConfig::default()).is_ok());
    }
}
