use crate::config::DeviceConfig;
use crate::error::{PressError, SequenceError};
use crate::pacing::Pacer;
use crate::press::{Press, PressBuilder};
use crate::transmit::Transmitter;
use log::debug;
use std::time::Duration;

/// Position of a press within a run (all fields 1-based counts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressIndex {
    pub repeat: usize,
    pub repeat_count: usize,
    pub payload: usize,
    pub payload_count: usize,
}

#[derive(Debug, Clone)]
pub struct SequencedPress {
    pub index: PressIndex,
    pub hex: String,
    pub press: Press,
}

/// Lazily builds one press per payload, `repeat_count` times over.
///
/// Nothing is synthesized until `next()` is called. The first synthesis
/// error is yielded once and ends the sequence.
#[derive(Debug, Clone)]
pub struct PressSequence {
    payloads: Vec<String>,
    builder: PressBuilder,
    repeat_count: usize,
    next_slot: usize,
    failed: bool,
}

impl PressSequence {
    pub fn new<I, S>(payloads: I, builder: PressBuilder, repeat_count: usize) -> Result<Self, PressError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let payloads: Vec<String> = payloads.into_iter().map(Into::into).collect();
        if payloads.is_empty() {
            return Err(PressError::NoPayloads);
        }
        Ok(Self {
            payloads,
            builder,
            repeat_count,
            next_slot: 0,
            failed: false,
        })
    }

    pub fn builder(&self) -> &PressBuilder {
        &self.builder
    }

    pub fn payloads(&self) -> &[String] {
        &self.payloads
    }

    pub fn repeat_count(&self) -> usize {
        self.repeat_count
    }

    /// Total number of presses in a complete run
    pub fn total(&self) -> usize {
        self.repeat_count * self.payloads.len()
    }

    /// Presses not yet yielded (zero once an error has been yielded)
    pub fn remaining(&self) -> usize {
        if self.failed {
            0
        } else {
            self.total() - self.next_slot
        }
    }
}

impl Iterator for PressSequence {
    type Item = Result<SequencedPress, PressError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }

        let slot = self.next_slot;
        self.next_slot += 1;

        let payload_count = self.payloads.len();
        let index = PressIndex {
            repeat: slot / payload_count + 1,
            repeat_count: self.repeat_count,
            payload: slot % payload_count + 1,
            payload_count,
        };
        let hex = self.payloads[slot % payload_count].clone();

        match self.builder.build_from_hex(&hex) {
            Ok(press) => Some(Ok(SequencedPress { index, hex, press })),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

impl std::iter::FusedIterator for PressSequence {}

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub presses: usize,
    pub samples: usize,
}

/// Transmit every press of `sequence` in order.
///
/// Each press is synthesized only after the previous transmit returned.
/// `on_press` sees each press before it is sent. Between presses (never
/// after the last one) the pacer waits `press_gap`.
pub fn run_sequence<T, P, F>(
    mut sequence: PressSequence,
    device: &DeviceConfig,
    press_gap: Duration,
    transmitter: &mut T,
    pacer: &mut P,
    mut on_press: F,
) -> Result<RunSummary, SequenceError>
where
    T: Transmitter + ?Sized,
    P: Pacer + ?Sized,
    F: FnMut(&SequencedPress),
{
    let mut summary = RunSummary::default();

    while let Some(item) = sequence.next() {
        let item = item?;
        on_press(&item);

        transmitter.transmit(item.press.samples(), device)?;
        summary.presses += 1;
        summary.samples += item.press.len();
        debug!(
            "press {}/{} of set {}/{} sent",
            item.index.payload, item.index.payload_count, item.index.repeat, item.index.repeat_count
        );

        // Release the buffer before waiting
        drop(item);

        if sequence.remaining() > 0 {
            pacer.pause(press_gap).map_err(|_| SequenceError::Cancelled)?;
        }
    }

    Ok(summary)
}
